// crates/mnemo-server/src/config/mod.rs
// Configuration resolved once at startup

pub mod env;

pub use env::{ConfigValidation, EnvConfig, StoreConfig, default_db_path, resolve_db_path};
