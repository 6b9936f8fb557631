// crates/mnemo-server/src/config/env.rs
// Environment-based configuration - single source of truth for all env vars

use mnemo_types::AccessMatch;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// File name of the database when no usable path is configured
pub const DEFAULT_DB_FILE: &str = "memory.db";

/// Env var holding the database location
pub const DB_PATH_ENV: &str = "MEMORY_DB_PATH";

/// Env var selecting how access tracking matches rows
pub const ACCESS_MATCH_ENV: &str = "MEMORY_ACCESS_MATCH";

/// Configuration validation result
#[derive(Debug, Default)]
pub struct ConfigValidation {
    pub warnings: Vec<String>,
}

impl ConfigValidation {
    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }
}

/// Environment configuration - all env vars in one place
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    /// Configured database location (MEMORY_DB_PATH)
    pub db_path: Option<PathBuf>,
    /// Raw access tracking mode (MEMORY_ACCESS_MATCH), kept for validation
    pub access_match_raw: Option<String>,
    /// Parsed access tracking mode, falls back to content matching
    pub access_match: AccessMatch,
}

impl EnvConfig {
    /// Load all environment configuration (call once at startup)
    pub fn load() -> Self {
        info!("Loading environment configuration");

        let db_path = read_var(DB_PATH_ENV).map(PathBuf::from);
        let access_match_raw = read_var(ACCESS_MATCH_ENV);
        let access_match = access_match_raw
            .as_deref()
            .and_then(AccessMatch::from_str)
            .unwrap_or_default();

        if let Some(ref path) = db_path {
            debug!(path = %path.display(), "Database path configured");
        }

        Self {
            db_path,
            access_match_raw,
            access_match,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> ConfigValidation {
        let mut validation = ConfigValidation::default();

        if let Some(ref path) = self.db_path
            && !absolute(path).exists()
        {
            validation.add_warning(format!(
                "{} points to '{}' which does not exist. Falling back to {}",
                DB_PATH_ENV,
                path.display(),
                default_db_path().display()
            ));
        }

        if let Some(ref raw) = self.access_match_raw
            && AccessMatch::from_str(raw).is_none()
        {
            validation.add_warning(format!(
                "Unknown {} '{}'. Valid options: content, id (using content)",
                ACCESS_MATCH_ENV, raw
            ));
        }

        validation
    }

    /// Resolve the store configuration, letting a CLI path override the env var
    pub fn store_config(&self, path_override: Option<&Path>) -> StoreConfig {
        let configured = path_override.or(self.db_path.as_deref());
        StoreConfig {
            db_path: resolve_db_path(configured),
            access_match: self.access_match,
        }
    }
}

/// Resolved settings handed to the memory store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub db_path: PathBuf,
    pub access_match: AccessMatch,
}

/// Use the configured path if it exists on disk, otherwise the default location
pub fn resolve_db_path(configured: Option<&Path>) -> PathBuf {
    if let Some(path) = configured {
        let path = absolute(path);
        if path.exists() {
            return path;
        }
        warn!(path = %path.display(), "Configured database path does not exist, using default");
    }
    default_db_path()
}

/// `memory.db` next to the running executable
pub fn default_db_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_DB_FILE)))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE))
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

fn read_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_existing_path() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("notes.db");
        std::fs::write(&db, b"").unwrap();

        assert_eq!(resolve_db_path(Some(&db)), db);
    }

    #[test]
    fn test_resolve_missing_path_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope").join("notes.db");

        let resolved = resolve_db_path(Some(&missing));
        assert_eq!(resolved, default_db_path());
        assert_eq!(resolved.file_name().unwrap(), DEFAULT_DB_FILE);
    }

    #[test]
    fn test_resolve_unset_uses_default() {
        assert_eq!(resolve_db_path(None), default_db_path());
    }

    #[test]
    fn test_default_path_sits_next_to_executable() {
        let exe_dir = std::env::current_exe().unwrap().parent().unwrap().to_path_buf();
        assert_eq!(default_db_path(), exe_dir.join(DEFAULT_DB_FILE));
    }

    #[test]
    fn test_store_config_prefers_override() {
        let dir = tempfile::tempdir().unwrap();
        let from_env = dir.path().join("env.db");
        let from_cli = dir.path().join("cli.db");
        std::fs::write(&from_env, b"").unwrap();
        std::fs::write(&from_cli, b"").unwrap();

        let config = EnvConfig {
            db_path: Some(from_env.clone()),
            access_match_raw: Some("id".into()),
            access_match: AccessMatch::Id,
        };

        let store = config.store_config(Some(&from_cli));
        assert_eq!(store.db_path, from_cli);
        assert_eq!(store.access_match, AccessMatch::Id);

        let store = config.store_config(None);
        assert_eq!(store.db_path, from_env);
    }

    #[test]
    fn test_validation_warns_on_missing_path_and_bad_mode() {
        let config = EnvConfig {
            db_path: Some(PathBuf::from("/definitely/not/here/memory.db")),
            access_match_raw: Some("rowid".into()),
            access_match: AccessMatch::Content,
        };

        let validation = config.validate();
        assert_eq!(validation.warnings.len(), 2);
        assert!(validation.warnings[0].contains(DB_PATH_ENV));
        assert!(validation.warnings[1].contains("rowid"));
    }

    #[test]
    fn test_validation_default_is_clean() {
        let validation = EnvConfig::default().validate();
        assert!(validation.warnings.is_empty());
    }
}
