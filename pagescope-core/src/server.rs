// HTTP analysis service

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderValue, Method, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use pagescope_scanner::{AnalyzeError, Analyzer, AnalyzerConfig};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{debug, info, warn};

pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";
pub const INVALID_REQUEST_MESSAGE: &str = "Invalid JSON: missing or malformed 'url' field";

/// Options for running the analysis service
#[derive(Debug, Clone)]
pub struct ServeOptions {
    pub host: String,
    pub port: u16,
    pub allowed_origin: String,
    pub config: AnalyzerConfig,
}

impl Default for ServeOptions {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_string(),
            config: AnalyzerConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub url: String,
}

/// Body of every non-2xx response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub status: u16,
}

struct AppState {
    analyzer: Analyzer,
}

/// Build the service router: `POST /analyze`, `GET /health`, CORS for `allowed_origin`.
pub fn router(analyzer: Analyzer, allowed_origin: &str) -> anyhow::Result<Router> {
    let origin: HeaderValue = allowed_origin.parse()?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    let state = Arc::new(AppState { analyzer });

    Ok(Router::new()
        .route("/health", get(health))
        .route(
            "/analyze",
            post(analyze)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .layer(cors)
        .with_state(state))
}

/// Map an analysis failure onto the response status.
pub fn status_for_error(err: &AnalyzeError) -> StatusCode {
    match err {
        AnalyzeError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
        AnalyzeError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        AnalyzeError::Connect(_)
        | AnalyzeError::HttpStatus { .. }
        | AnalyzeError::HttpError(_)
        | AnalyzeError::ParseError(_) => StatusCode::BAD_GATEWAY,
        AnalyzeError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    let body = ErrorBody {
        error: message,
        status: status.as_u16(),
    };
    (status, Json(body)).into_response()
}

async fn analyze(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let request = match serde_json::from_slice::<AnalyzeRequest>(&body) {
        Ok(request) if !request.url.trim().is_empty() => request,
        Ok(_) => {
            debug!("Rejected analyze request with empty url");
            return error_response(StatusCode::BAD_REQUEST, INVALID_REQUEST_MESSAGE.to_string());
        }
        Err(e) => {
            debug!("Rejected malformed analyze request: {}", e);
            return error_response(StatusCode::BAD_REQUEST, INVALID_REQUEST_MESSAGE.to_string());
        }
    };

    debug!("Received analyze request for {}", request.url);
    match state.analyzer.analyze(&request.url).await {
        Ok(result) => Json(result).into_response(),
        Err(e) => {
            let status = status_for_error(&e);
            warn!("Analysis of {} failed ({}): {}", request.url, status, e);
            error_response(status, format!("Failed to analyze page: {}", e))
        }
    }
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed() -> Response {
    error_response(
        StatusCode::METHOD_NOT_ALLOWED,
        "Method not allowed".to_string(),
    )
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Serve `app` on `listener` until Ctrl-C.
pub async fn serve(listener: TcpListener, app: Router) -> anyhow::Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Bind to the configured address and run the service.
pub async fn start(options: ServeOptions) -> anyhow::Result<()> {
    let analyzer = Analyzer::try_with_config(options.config.clone())?;
    let app = router(analyzer, &options.allowed_origin)?;

    let addr = format!("{}:{}", options.host, options.port);
    let listener = TcpListener::bind(&addr).await?;
    info!(
        "Analysis service listening on http://{}",
        listener.local_addr()?
    );

    serve(listener, app).await?;
    info!("Analysis service stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!("Unable to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
