//! Axum web front-end: the form page plus a JSON API over one session store.

pub mod error;
pub mod handlers;

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    http::{header, Method},
    routing::{delete, get},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::store::RecordStore;
use error::WebError;
use handlers::{
    add_employee, export_csv, form_options, health_check, list_employees, remove_employee,
    serve_index,
};

/// Server configuration options.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Enable CORS for development (allows any origin).
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            cors_permissive: true,
        }
    }
}

/// Shared application state: the session's record store
#[derive(Clone, Default)]
pub struct AppState {
    store: Arc<Mutex<RecordStore>>,
}

impl AppState {
    pub fn new(store: RecordStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    pub(crate) fn lock_store(&self) -> Result<MutexGuard<'_, RecordStore>, WebError> {
        self.store
            .lock()
            .map_err(|_| WebError::Internal("record store lock poisoned".to_string()))
    }
}

/// Build the Axum router with all routes.
pub fn build_router(state: AppState, cors_permissive: bool) -> Router {
    let cors = if cors_permissive {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE])
    } else {
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE])
    };

    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/options", get(form_options))
        .route("/employees", get(list_employees).post(add_employee))
        .route("/employees/:index", delete(remove_employee))
        .route("/export", get(export_csv));

    Router::new()
        .route("/", get(serve_index))
        .nest("/api", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the web server until it is stopped.
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let app = build_router(AppState::default(), config.cors_permissive);

    tracing::info!("🚀 Server running on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
