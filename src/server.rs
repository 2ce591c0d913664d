use axum::{
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Extension, Router,
};
use hyper::Server;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::app::AnalyzeSheetUseCase;
use crate::auth::{parse_bearer, TokenVerifier};
use crate::domain::AnalyzeRequest;
use crate::error::ServiceError;

/// Shared state behind the HTTP handlers
pub struct ApiContext {
    pub analyze: AnalyzeSheetUseCase,
    pub verifier: Box<dyn TokenVerifier>,
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "sheetcheck",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Prometheus metrics endpoint
async fn metrics_text() -> impl IntoResponse {
    crate::observability::metrics::render().unwrap_or_default()
}

/// Handles POST /api/sheets/analyze
async fn analyze_sheet(
    Extension(ctx): Extension<Arc<ApiContext>>,
    Json(req): Json<AnalyzeRequest>,
) -> Response {
    match ctx.analyze.analyze_url(&req.url).await {
        Ok(response) => Json(response).into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

/// Map a fetch/analysis failure onto the API error payload
fn error_response(err: ServiceError) -> (StatusCode, Json<serde_json::Value>) {
    let (status, error, message) = match &err {
        ServiceError::SheetNotPublic => (
            StatusCode::FORBIDDEN,
            "Sheet not accessible",
            "The Google Sheet is not public. Please share it with 'Anyone with the link can view'."
                .to_string(),
        ),
        ServiceError::SheetNotFound => (
            StatusCode::NOT_FOUND,
            "Sheet not found",
            "Could not find the Google Sheet. Please check the URL.".to_string(),
        ),
        other => (StatusCode::BAD_REQUEST, "Failed to load sheet", other.to_string()),
    };
    (
        status,
        Json(serde_json::json!({ "error": error, "message": message })),
    )
}

/// Handles POST /api/auth/verify-token
async fn verify_token(
    Extension(ctx): Extension<Arc<ApiContext>>,
    headers: HeaderMap,
) -> Response {
    fn unauthorized(message: &str) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "error": message })),
        )
            .into_response()
    }

    let Some(value) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    else {
        return unauthorized("Authorization header required");
    };
    let Some(token) = parse_bearer(value) else {
        return unauthorized("Invalid authorization header format");
    };

    match ctx.verifier.verify(token).await {
        Some(user) => Json(serde_json::json!({
            "valid": true,
            "userId": user.user_id,
            "email": user.email,
        }))
        .into_response(),
        None => unauthorized("Invalid or expired token"),
    }
}

/// Create the HTTP server with all routes
pub fn create_server(ctx: Arc<ApiContext>, allowed_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_text))
        .route("/api/sheets/analyze", post(analyze_sheet))
        .route("/api/auth/verify-token", post(verify_token))
        .layer(Extension(ctx))
        .layer(ServiceBuilder::new().layer(cors))
}

/// Start the HTTP server on the specified port
pub async fn start_server(
    ctx: Arc<ApiContext>,
    port: u16,
    allowed_origins: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_server(ctx, allowed_origins);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    println!("🚀 HTTP server running on http://localhost:{port}");
    println!("💚 Health check: http://localhost:{port}/health");
    println!("📊 Analyze:      POST http://localhost:{port}/api/sheets/analyze");

    Server::bind(&addr).serve(app.into_make_service()).await?;

    Ok(())
}
