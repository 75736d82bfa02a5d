//! folio-api - HTTP API server for the folio portfolio backend
//!
//! Serves the portfolio document read/write endpoints, image upload,
//! the icon picker listing, and the GitHub stats lookup. Storage mode
//! (JSON file vs. Postgres) is resolved once at startup.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_core::{defaults, AppConfig, PortfolioStore, StorageMode};
use folio_db::{Database, JsonFileStore, PgPortfolioStore, UploadStore};

mod handlers;

use handlers::{data, github, icons, upload};

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The active portfolio store (file or database mode).
    store: Arc<dyn PortfolioStore>,
    /// Public upload file storage.
    uploads: UploadStore,
    /// Startup configuration.
    config: Arc<AppConfig>,
    /// Shared HTTP client for the GitHub upstream.
    http: reqwest::Client,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with configurable output
    //
    // Environment variables:
    //   LOG_FORMAT  - "json" or "text" (default: "text")
    //   LOG_FILE    - path to log file (optional, enables file logging)
    //   RUST_LOG    - standard env filter (default: "folio_api=debug,tower_http=debug")
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "folio_api=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    let _file_guard = if let Some(ref path) = log_file {
        let file_dir = std::path::Path::new(path)
            .parent()
            .unwrap_or(std::path::Path::new("."));
        let file_name = std::path::Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("folio-api.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking),
                )
                .init();
        } else {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(non_blocking)
                        .with_ansi(false),
                )
                .init();
        }
        Some(guard)
    } else if log_format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
        None
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
        None
    };

    info!(
        log_format = %log_format,
        log_file = log_file.as_deref().unwrap_or("(stdout)"),
        "Logging initialized"
    );

    let config = AppConfig::from_env()?;
    info!(
        storage_mode = %config.storage_mode,
        image_mode = %config.image_mode,
        public_dir = %config.public_dir.display(),
        "Configuration loaded"
    );

    let uploads = UploadStore::new(&config.public_dir);

    // Resolve the portfolio store for the configured mode
    let store: Arc<dyn PortfolioStore> = match config.storage_mode {
        StorageMode::File => {
            info!(data_file = %config.data_file.display(), "Using file-mode store");
            Arc::new(JsonFileStore::new(&config.data_file, uploads.clone()))
        }
        StorageMode::Database => {
            info!("Connecting to database...");
            let db = Database::connect(&config.database_url).await?;
            info!("Database connected");

            info!("Running database migrations...");
            db.migrate().await?;
            info!("Database migrations complete");

            Arc::new(PgPortfolioStore::new(db, uploads.clone(), config.image_mode))
        }
    };

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(defaults::GITHUB_TIMEOUT_SECS))
        .build()?;

    let host = config.host.clone();
    let port = config.port;
    let state = AppState {
        store,
        uploads,
        config: Arc::new(config),
        http,
    };

    // Build router
    let app = Router::new()
        // Health check
        .route("/health", get(health_check))
        // Portfolio document
        .route("/api/data", get(data::get_data).post(data::save_data))
        // Image upload (multipart)
        .route(
            "/api/upload",
            post(upload::upload_file)
                .layer(DefaultBodyLimit::max(defaults::MAX_UPLOAD_SIZE_BYTES)),
        )
        // Icon picker listing
        .route("/api/icons", get(icons::list_icons))
        // GitHub stats
        .route("/api/github", get(github::github_stats))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer({
            let allowed_origins = parse_allowed_origins();
            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
                .max_age(Duration::from_secs(defaults::CORS_MAX_AGE_SECS))
        })
        .with_state(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Allowed CORS origins from `ALLOWED_ORIGINS` (comma-separated).
/// Unset means any origin: the dashboard dev server runs on its own port.
fn parse_allowed_origins() -> AllowOrigin {
    match std::env::var("ALLOWED_ORIGINS") {
        Ok(val) if !val.trim().is_empty() => {
            let origins: Vec<HeaderValue> = val
                .split(',')
                .filter_map(|origin| origin.trim().parse().ok())
                .collect();
            AllowOrigin::list(origins)
        }
        _ => AllowOrigin::any(),
    }
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// =============================================================================
// ERROR HANDLING
// =============================================================================

#[derive(Debug)]
enum ApiError {
    Storage(folio_core::Error),
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

impl From<folio_core::Error> for ApiError {
    fn from(err: folio_core::Error) -> Self {
        match &err {
            folio_core::Error::NotFound(msg) => ApiError::NotFound(msg.clone()),
            folio_core::Error::InvalidInput(msg) => ApiError::BadRequest(msg.clone()),
            _ => ApiError::Storage(err),
        }
    }
}

impl ApiError {
    fn status_and_message(self) -> (StatusCode, String) {
        match self {
            ApiError::Storage(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = self.status_and_message();

        let body = Json(serde_json::json!({
            "message": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use crate::AppState;
    use folio_core::AppConfig;
    use folio_db::{JsonFileStore, UploadStore};

    /// File-mode app state rooted in a temp public directory.
    pub fn file_state(public_dir: &std::path::Path) -> AppState {
        let uploads = UploadStore::new(public_dir);
        AppState {
            store: Arc::new(JsonFileStore::new(
                public_dir.join("data.json"),
                uploads.clone(),
            )),
            uploads,
            config: Arc::new(AppConfig {
                public_dir: public_dir.to_path_buf(),
                ..AppConfig::default()
            }),
            http: reqwest::Client::new(),
        }
    }
}
