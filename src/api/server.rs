//! HTTP Server implementation
//!
//! This module provides the HTTP server using Axum framework with:
//! - Configurable host/port binding
//! - Graceful shutdown handling
//! - Static serving of the upload directory at /uploads
//! - CORS support

use crate::api::handlers::AppState;
use crate::api::routes::build_api_routes;
use crate::core::config::{Config, ServerConfig};
use crate::core::uploads::UploadStore;
use crate::db::manager::DatabaseManager;
use crate::db::repository::{
    AdminRepository, OrderRepository, PopularShoeRepository, ProductRepository,
    ShippingFeeRepository,
};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;

/// HTTP API Server
pub struct ApiServer {
    router: Router,
    config: ServerConfig,
}

impl ApiServer {
    /// Create a new API server with the given configuration and database manager
    pub fn new(config: Config, db: Arc<DatabaseManager>) -> anyhow::Result<Self> {
        let server_config = config.server.clone();
        let router = Self::build_router(config, db)?;

        Ok(Self {
            router,
            config: server_config,
        })
    }

    /// Build the Axum router with all routes and middleware
    fn build_router(config: Config, db: Arc<DatabaseManager>) -> anyhow::Result<Router> {
        let uploads = Arc::new(UploadStore::new(config.storage.upload_dir.clone())?);

        let app_state = AppState {
            admin_repo: Arc::new(AdminRepository::new(db.clone())),
            product_repo: Arc::new(ProductRepository::new(db.clone())),
            popular_shoe_repo: Arc::new(PopularShoeRepository::new(db.clone())),
            shipping_fee_repo: Arc::new(ShippingFeeRepository::new(db.clone())),
            order_repo: Arc::new(OrderRepository::new(db)),
            uploads: uploads.clone(),
            jwt_secret: Arc::new(config.security.jwt_secret.clone()),
            token_ttl_secs: config.security.token_ttl_secs,
        };

        // Uploaded photos are served back as static assets
        let router = build_api_routes(app_state)
            .nest_service("/uploads", ServeDir::new(uploads.root()))
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(Self::build_cors_layer(&config.security.allowed_origins)),
            );

        Ok(router)
    }

    /// Build CORS layer from allowed origins configuration
    fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
        use tower_http::cors::Any;

        let cors = CorsLayer::new();

        if allowed_origins.contains(&"*".to_string()) {
            cors.allow_origin(Any).allow_methods(Any).allow_headers(Any)
        } else {
            let origins: Vec<_> = allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            cors.allow_origin(origins).allow_methods(Any).allow_headers(Any)
        }
    }

    /// Start the HTTP server and listen for requests
    ///
    /// This method will block until the server is shut down gracefully.
    pub async fn serve(self) -> anyhow::Result<()> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let socket_addr: SocketAddr = addr.parse()?;

        let listener = tokio::net::TcpListener::bind(socket_addr).await?;

        info!(addr = %socket_addr, "HTTP server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("HTTP server shut down gracefully");

        Ok(())
    }

    /// Get a reference to the router
    pub fn router(&self) -> &Router {
        &self.router
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }

    info!("Initiating graceful shutdown...");
}
