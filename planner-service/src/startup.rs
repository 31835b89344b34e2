//! Application startup and lifecycle management.
//!
//! Dependencies (table store, planner) are constructed here once and handed
//! to the router through [`AppState`]; nothing is created lazily later.

use crate::config::PlannerConfig;
use crate::handlers;
use crate::services::metrics::http_metrics_middleware;
use crate::services::{EventPlanner, PostgrestStore, TableStore};
use axum::{
    http::HeaderValue,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{request_id_middleware, security_headers_middleware};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TableStore>,
    pub planner: EventPlanner,
}

impl AppState {
    pub fn new(store: Arc<dyn TableStore>, planner: EventPlanner) -> Self {
        Self { store, planner }
    }

    /// Connect the hosted store and the model provider described by `config`.
    ///
    /// A storage client that cannot be built is fatal; a model provider that
    /// cannot be built only disables plan generation.
    pub fn from_config(config: &PlannerConfig) -> Result<Self, AppError> {
        let store = PostgrestStore::new(&config.supabase.url, config.supabase.key.clone())
            .map_err(|e| {
                tracing::error!("Failed to initialize storage client: {}", e);
                e
            })?;

        Ok(Self::new(Arc::new(store), EventPlanner::from_config(config)))
    }
}

fn cors_layer(allowed_origin: &str) -> Result<CorsLayer, AppError> {
    let origin = allowed_origin.parse::<HeaderValue>().map_err(|e| {
        AppError::ConfigError(anyhow::anyhow!(
            "Invalid CORS origin '{}': {}",
            allowed_origin,
            e
        ))
    })?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}

/// Build the full HTTP router for `state`.
pub fn build_router(state: AppState, allowed_origin: &str) -> Result<Router, AppError> {
    let agent_routes = Router::new()
        .route("/api/agent/plan_event", post(handlers::plan_event))
        .route("/api/agent/venues", get(handlers::get_venues))
        .route("/api/agent/caterers", get(handlers::get_caterers))
        .route("/api/agent/decorators", get(handlers::get_decorators))
        .route(
            "/api/agent/service_providers",
            get(handlers::get_service_providers),
        );

    let event_routes = Router::new()
        .route("/api/events", post(handlers::create_event))
        .route("/api/events/", post(handlers::create_event))
        .route(
            "/api/events/:event_id",
            get(handlers::get_event)
                .put(handlers::update_event)
                .delete(handlers::delete_event),
        );

    let router = Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics::metrics))
        .merge(agent_routes)
        .merge(event_routes)
        .route_layer(from_fn(http_metrics_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(cors_layer(allowed_origin)?)
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(request_id_middleware))
        .with_state(state);

    Ok(router)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: PlannerConfig) -> Result<Self, AppError> {
        let state = AppState::from_config(&config)?;
        Self::with_state(config, state).await
    }

    /// Build around pre-constructed dependencies (port 0 = random port).
    pub async fn with_state(config: PlannerConfig, state: AppState) -> Result<Self, AppError> {
        let router = build_router(state, &config.cors.allowed_origin)?;

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Planner service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
