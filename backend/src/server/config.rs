//! HTTP server configuration object and startup helpers.

use std::io;
use std::net::SocketAddr;
use std::path::Path;

use actix_web::cookie::Key;
use tracing::{info, warn};

use bookshelf::outbound::persistence::{DbPool, run_pending_migrations};
use bookshelf::settings::ServerSettings;

/// `Key::derive_from` rejects shorter master keys.
const SESSION_KEY_MIN_LEN: usize = 32;

/// Everything the HTTP server needs once settings have been resolved.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            bind_addr,
            db_pool: None,
        }
    }

    /// Store books in PostgreSQL through `pool`.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Resolve settings into a ready configuration.
    ///
    /// Opens the database pool and applies migrations when a database URL
    /// is configured.
    ///
    /// # Errors
    ///
    /// Returns [`io::Error`] when the bind address, session key, pool, or
    /// migrations cannot be set up.
    pub async fn from_settings(settings: &ServerSettings) -> io::Result<Self> {
        let bind_addr = settings.bind_addr().map_err(io::Error::other)?;
        let key = load_session_key(
            &settings.session_key_file(),
            cfg!(debug_assertions) || settings.allow_ephemeral_session_key,
        )?;
        let config = Self::new(key, settings.cookie_secure(), bind_addr);

        let Some(pool_config) = settings.pool_config() else {
            warn!("no database configured; books are kept in memory");
            return Ok(config);
        };
        if settings.run_migrations() {
            let applied = run_pending_migrations(pool_config.database_url())
                .await
                .map_err(io::Error::other)?;
            info!(applied, "database schema is current");
        }
        let pool = DbPool::new(pool_config).await.map_err(io::Error::other)?;
        Ok(config.with_db_pool(pool))
    }
}

fn load_session_key(path: &Path, allow_ephemeral: bool) -> io::Result<Key> {
    let failure = match std::fs::read(path) {
        Ok(bytes) if bytes.len() >= SESSION_KEY_MIN_LEN => return Ok(Key::derive_from(&bytes)),
        Ok(bytes) => format!(
            "session key must be at least {SESSION_KEY_MIN_LEN} bytes, found {}",
            bytes.len()
        ),
        Err(error) => error.to_string(),
    };
    if allow_ephemeral {
        warn!(path = %path.display(), error = %failure, "using temporary session key (dev only)");
        return Ok(Key::generate());
    }
    Err(io::Error::other(format!(
        "failed to load session key at {}: {failure}",
        path.display()
    )))
}
