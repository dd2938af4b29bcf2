#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod auth;
mod error;
mod extract;
pub mod items;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use http::StatusCode;
use retort_config::Config;
use retort_core::NamedRouter;
use secrecy::SecretString;
use tower_http::trace::TraceLayer;

pub use auth::API_KEY_HEADER;
pub use error::{ApiError, ApiErrorDetails};
pub use items::ItemStore;

/// State shared by the item handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ItemStore>,
    pub api_key: Option<SecretString>,
}

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the route table cannot be built
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        let state = AppState {
            store: Arc::new(ItemStore::new(config.store.max_items)),
            api_key: config.server.api_key,
        };

        // Named routes resolve `Location` headers, so they are finished
        // before any unnamed top-level routes are merged in
        let mut app = items::routes(NamedRouter::new())?
            .finish(config.server.public_url)
            .with_state(state);

        if config.server.health.enabled {
            app = app.route(&config.server.health.path, get(|| async { (StatusCode::OK, "ok") }));
        }

        app = app.layer(TraceLayer::new_for_http());

        Ok(Self {
            router: app,
            listen_address,
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
