//! Server startup.

use std::sync::Arc;

use axum::Router;
use seal_engine::DocSeal;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::{build_router, AppState};

/// The document seal HTTP server.
pub struct SealServer {
    config: ServerConfig,
}

impl SealServer {
    /// Create a server with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Open the engine under `data_root` and build the router.
    pub fn build(&self) -> ServerResult<Router> {
        let profiles = self.config.profile_directory()?;
        let engine = DocSeal::open_with_key_bits(&self.config.data_root, self.config.key_bits)?
            .with_profiles(Arc::new(profiles));
        let state = AppState { engine };
        Ok(build_router(state, self.config.max_upload_bytes))
    }

    /// Run the server until the process is stopped.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!(
            addr = %self.config.bind_addr,
            data_root = %self.config.data_root.display(),
            "seal server listening"
        );
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}
