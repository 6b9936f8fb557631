// crates/mnemo-server/src/lib.rs
// Mnemo - persistent categorized memory store

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod config;
pub mod db;
pub mod error;
pub mod mcp;
pub mod tools;
pub mod utils;
pub use error::{MnemoError, Result};
