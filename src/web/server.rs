//! Web server for mini-drive.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::Config;
use crate::storage::FileStorage;
use crate::{Database, DriveError, Result};

use super::handlers::AppState;
use super::router::{create_health_router, create_router};

/// Web server for the API.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
    /// Allowed CORS origins.
    cors_origins: Vec<String>,
}

impl WebServer {
    /// Create a new web server from configuration and an open database.
    pub fn new(config: &Config, db: Database) -> Result<Self> {
        let addr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .map_err(|e| DriveError::Config(format!("invalid bind address: {e}")))?;

        let storage = FileStorage::new(&config.storage.upload_dir)?;
        tracing::info!("File storage initialized at: {}", config.storage.upload_dir);

        let app_state = Arc::new(AppState::new(
            db,
            storage,
            &config.auth.jwt_secret,
            config.auth.token_expiry_days,
            config.auth.cookie_max_age_days,
        ));

        Ok(Self {
            addr,
            app_state,
            cors_origins: config.server.cors_origins.clone(),
        })
    }

    /// Run the server until it is shut down.
    pub async fn run(self) -> Result<()> {
        let router = create_router(self.app_state, &self.cors_origins)
            .merge(create_health_router());

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Web server listening on http://{}", local_addr);

        axum::serve(listener, router).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_web_server_new() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut config = Config::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 0;
        config.storage.upload_dir = tmp
            .path()
            .join("uploads")
            .to_string_lossy()
            .into_owned();

        let db = Database::open_in_memory().await.unwrap();
        let server = WebServer::new(&config, db).unwrap();
        assert_eq!(server.addr.ip().to_string(), "127.0.0.1");
    }

    #[tokio::test]
    async fn test_web_server_rejects_bad_address() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut config = Config::default();
        config.server.host = "not an address".to_string();
        config.storage.upload_dir = tmp
            .path()
            .join("uploads")
            .to_string_lossy()
            .into_owned();

        let db = Database::open_in_memory().await.unwrap();
        assert!(WebServer::new(&config, db).is_err());
    }
}
