//! HTTP server core implementation
//!
//! This module provides the HttpServer struct and its core methods.

use crate::config::{Config, ServerConfig};
use crate::server::middleware::AuthMiddleware;
use crate::server::routes;
use crate::server::state::AppState;
use crate::utils::error::{ApiError, Result};
use actix_cors::Cors;
use actix_web::{App, HttpServer as ActixHttpServer, middleware::DefaultHeaders, web};
use tracing::info;
use tracing_actix_web::TracingLogger;

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server
    ///
    /// Connects storage, runs pending migrations and wires the shared state.
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        let storage =
            crate::storage::StorageLayer::new(&config.database, &config.storage).await?;
        storage.migrate().await?;

        let state = AppState::new(config.clone(), storage);

        Ok(Self {
            config: config.server.clone(),
            state,
        })
    }

    /// Create the Actix-web application
    ///
    /// Everything under `/api` passes through the bearer-token middleware;
    /// the bare `/health` probe does not.
    fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(state)
            .wrap(cors)
            .wrap(TracingLogger::default())
            .wrap(DefaultHeaders::new().add(("Server", "TaskHub")))
            .route("/health", web::get().to(routes::health::health_check))
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .route("/health", web::get().to(routes::health::health_check))
                    .configure(routes::auth::configure_routes)
                    .configure(routes::users::configure_routes)
                    .configure(routes::workspaces::configure_routes)
                    .configure(routes::members::configure_routes)
                    .configure(routes::projects::configure_routes)
                    .configure(routes::tasks::configure_routes)
                    .configure(routes::tags::configure_routes)
                    .configure(routes::comments::configure_routes)
                    .configure(routes::bookmarks::configure_routes)
                    .configure(routes::media::configure_routes)
                    .configure(routes::search::configure_routes),
            )
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<()> {
        let bind_addr = format!("{}:{}", self.config.host, self.config.port);
        let workers = self.config.workers;

        info!("Starting HTTP server on {}", bind_addr);

        let state = web::Data::new(self.state);

        let mut server = ActixHttpServer::new(move || Self::create_app(state.clone()))
            .bind(&bind_addr)
            .map_err(|e| ApiError::internal(format!("Failed to bind {}: {}", bind_addr, e)))?;

        if workers > 0 {
            server = server.workers(workers);
        }

        info!("HTTP server listening on {}", bind_addr);

        server
            .run()
            .await
            .map_err(|e| ApiError::internal(format!("Server error: {}", e)))?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}
