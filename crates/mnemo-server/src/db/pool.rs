// db/pool.rs
// Async connection pool using deadpool-sqlite
//
// Each store operation checks out one connection, runs a single closure on
// the blocking thread pool, and returns the connection when the guard drops.
//
// ## pool.run()
// Use `pool.run()` from the store operations. Errors arrive as `MnemoError`:
// ```ignore
// let views = ctx.pool()
//     .run(move |conn| search_memories_sync(conn, &query, limit))
//     .await?;
// ```
//
// ## pool.interact()
// Lower level, returns `anyhow::Result`. Used by initialization and the CLI.
//
// Both entry points re-create the schema first if the database file has
// disappeared from disk since the pool was opened.
//
// In-memory pools use a shared cache URI (`file:memdb_xxx?mode=memory&cache=shared`)
// so every pooled connection sees the same database.

use crate::error::MnemoError;
use anyhow::{Context, Result};
use deadpool_sqlite::{Config, Hook, Pool, Runtime};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Database pool wrapper with per-connection setup.
pub struct DatabasePool {
    pool: Pool,
    path: Option<PathBuf>,
}

/// Whether to use a file path or shared in-memory URI.
enum DbStorage {
    File(PathBuf),
    InMemory { label: &'static str },
}

impl DatabasePool {
    /// Open a pooled database at the given path and create the schema.
    pub async fn open(path: &Path) -> Result<Self> {
        let pool = Self::build(path)?;
        pool.initialize().await?;
        Ok(pool)
    }

    /// Build a pool for the given path without touching the disk.
    ///
    /// Connections are opened lazily, so a bad location only surfaces when
    /// [`initialize`](Self::initialize) or the first operation runs.
    pub fn build(path: &Path) -> Result<Self> {
        Self::build_internal(DbStorage::File(path.to_path_buf()))
    }

    /// Open a pooled in-memory database.
    ///
    /// Uses a shared cache URI so all connections access the same in-memory database.
    /// Without it each connection would get its own empty database.
    pub async fn open_in_memory() -> Result<Self> {
        let pool = Self::build_internal(DbStorage::InMemory { label: "memdb" })?;
        pool.initialize().await?;
        Ok(pool)
    }

    fn build_internal(storage: DbStorage) -> Result<Self> {
        let (conn_str, path, hook) = match storage {
            DbStorage::File(p) => {
                let s = p.to_string_lossy().into_owned();
                let hook = make_file_post_create_hook(p.clone());
                (s, Some(p), hook)
            }
            DbStorage::InMemory { label } => {
                let uri = format!(
                    "file:{}_{}?mode=memory&cache=shared",
                    label,
                    uuid::Uuid::new_v4().simple()
                );
                let hook = make_memory_post_create_hook();
                (uri, None, hook)
            }
        };

        let cfg = Config::new(&conn_str);
        let pool = cfg
            .builder(Runtime::Tokio1)
            .context("Failed to create pool builder")?
            .max_size(4)
            .post_create(hook)
            .build()
            .context("Failed to build connection pool")?;

        Ok(Self { pool, path })
    }

    /// Create the parent directory and the schema. Idempotent.
    pub async fn initialize(&self) -> Result<()> {
        if let Some(ref path) = self.path {
            ensure_parent_directory(path)?;
        }

        self.with_connection(|conn| super::schema::run_migrations(conn))
            .await?;

        match self.path {
            Some(ref path) => info!(path = %path.display(), "Memory database initialized"),
            None => debug!("In-memory database initialized"),
        }
        Ok(())
    }

    /// Get the database file path (None for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Run a closure with a connection from the pool.
    ///
    /// The closure runs on a blocking thread pool, so it won't block the
    /// async runtime.
    pub async fn interact<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&Connection) -> Result<R> + Send + 'static,
        R: Send + 'static,
    {
        self.ensure_storage().await?;
        self.with_connection(f).await
    }

    /// Run a closure and convert every failure into `MnemoError`.
    ///
    /// Preferred entry point for the store operations.
    pub async fn run<F, R, E>(&self, f: F) -> Result<R, MnemoError>
    where
        F: FnOnce(&Connection) -> Result<R, E> + Send + 'static,
        R: Send + 'static,
        E: Into<MnemoError> + Send + 'static,
    {
        self.ensure_storage().await?;
        self.pool
            .get()
            .await
            .map_err(|e| MnemoError::Pool(format!("Failed to get connection: {}", e)))?
            .interact(move |conn| f(conn).map_err(Into::into))
            .await
            .map_err(|e| MnemoError::Pool(format!("interact failed: {}", e)))?
    }

    /// Checkout + interact without the storage check (used by initialize).
    async fn with_connection<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&Connection) -> Result<R> + Send + 'static,
        R: Send + 'static,
    {
        let conn = self
            .pool
            .get()
            .await
            .context("Failed to get connection from pool")?;

        conn.interact(move |conn| f(conn))
            .await
            .map_err(|e| anyhow::anyhow!("interact failed: {e}"))?
    }

    /// Re-create the database if its file was removed while we were running.
    async fn ensure_storage(&self) -> Result<()> {
        let Some(ref path) = self.path else {
            return Ok(());
        };
        if path.exists() {
            return Ok(());
        }

        warn!(path = %path.display(), "Database file missing, re-initializing");
        // Idle connections still point at the unlinked file
        let _ = self.pool.retain(|_, _| false);
        self.initialize().await
    }
}

/// Ensure the parent directory of the database file exists.
fn ensure_parent_directory(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    Ok(())
}

/// Create a post_create hook for file-based databases.
///
/// Sets up PRAGMAs via `setup_connection` and restricts file permissions to 0o600.
fn make_file_post_create_hook(path: PathBuf) -> Hook {
    Hook::async_fn(move |conn, _metrics| {
        let path_for_perms = path.clone();
        Box::pin(async move {
            conn.interact(move |conn| {
                setup_connection(conn)?;

                #[cfg(unix)]
                if let Ok(metadata) = std::fs::metadata(&path_for_perms) {
                    let mut perms = metadata.permissions();
                    perms.set_mode(0o600); // rw-------
                    if let Err(e) = std::fs::set_permissions(&path_for_perms, perms) {
                        tracing::warn!("Failed to set database file permissions to 0600: {}", e);
                    }
                }
                #[cfg(not(unix))]
                tracing::debug!(
                    "Skipping DB file permission restriction on non-Unix platform: {}",
                    path_for_perms.display()
                );

                Ok::<_, rusqlite::Error>(())
            })
            .await
            .map_err(|e| {
                deadpool_sqlite::HookError::Message(format!("interact failed: {e}").into())
            })?
            .map_err(|e| {
                deadpool_sqlite::HookError::Message(format!("connection setup failed: {e}").into())
            })
        })
    })
}

/// Create a post_create hook for in-memory databases.
fn make_memory_post_create_hook() -> Hook {
    Hook::async_fn(|conn, _metrics| {
        Box::pin(async move {
            conn.interact(|conn| {
                conn.execute_batch("PRAGMA busy_timeout=5000;")?;
                Ok::<_, rusqlite::Error>(())
            })
            .await
            .map_err(|e| {
                deadpool_sqlite::HookError::Message(format!("interact failed: {e}").into())
            })?
            .map_err(|e| {
                deadpool_sqlite::HookError::Message(format!("connection setup failed: {e}").into())
            })
        })
    })
}

/// Configure a connection after it's created.
/// Called from the post_create hook.
fn setup_connection(conn: &Connection) -> rusqlite::Result<()> {
    // Rollback journal (no -wal/-shm side files), so deleting memory.db
    // really removes the database.
    conn.execute_batch(
        "PRAGMA journal_mode=DELETE; \
         PRAGMA busy_timeout=5000; \
         PRAGMA synchronous=NORMAL;",
    )?;
    Ok(())
}
