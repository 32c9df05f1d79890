// Merger Analysis - Web Server
// JSON API over the merger calculator with Axum

use anyhow::Context;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use merger_analysis::{
    analyze_merger, logging, AnalysisEnvelope, MergerError, MergerInputs, MergerReport, ServerConfig,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn err(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

/// One entry of a batch response: either a report or the error text
#[derive(Serialize)]
struct BatchItem {
    index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<MergerReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn error_status(err: &MergerError) -> StatusCode {
    match err {
        MergerError::DivisionByZero { .. } | MergerError::InvalidInput { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        MergerError::Csv(_) | MergerError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn run_analysis(inputs: &MergerInputs) -> Result<MergerReport, MergerError> {
    inputs.ensure_finite()?;
    let result = analyze_merger(inputs)?;
    Ok(MergerReport::from_result(&result))
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/defaults - Illustrative inputs
async fn get_defaults() -> impl IntoResponse {
    Json(ApiResponse::ok(MergerInputs::default()))
}

/// POST /api/analyze - Analyze one merger
async fn analyze(Json(inputs): Json<MergerInputs>) -> Response {
    match run_analysis(&inputs) {
        Ok(report) => {
            let envelope = AnalysisEnvelope::new(inputs, report);
            (StatusCode::OK, Json(ApiResponse::ok(envelope))).into_response()
        }
        Err(e) => {
            warn!("Analysis rejected: {}", e);
            (error_status(&e), Json(ApiResponse::<()>::err(e.to_string()))).into_response()
        }
    }
}

/// POST /api/analyze/batch - Analyze each merger independently
async fn analyze_batch(Json(batch): Json<Vec<MergerInputs>>) -> impl IntoResponse {
    let items: Vec<BatchItem> = batch
        .iter()
        .enumerate()
        .map(|(index, inputs)| match run_analysis(inputs) {
            Ok(report) => BatchItem {
                index,
                report: Some(report),
                error: None,
            },
            Err(e) => {
                warn!("Batch item {} rejected: {}", index, e);
                BatchItem {
                    index,
                    report: None,
                    error: Some(e.to_string()),
                }
            }
        })
        .collect();

    Json(ApiResponse::ok(items))
}

fn app() -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/defaults", get(get_defaults))
        .route("/analyze", post(analyze))
        .route("/analyze/batch", post(analyze_batch));

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env().context("Invalid server configuration")?;
    logging::init_logging(&config.log_level);

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("🌐 Merger Analysis server running on http://{}", addr);
    info!("   API: http://{}/api/analyze", addr);

    axum::serve(listener, app())
        .await
        .context("Server stopped unexpectedly")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(Request::builder().uri("/api/health").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], "OK");
    }

    #[tokio::test]
    async fn test_defaults_round_trip_into_analyze() {
        let (_, defaults) = send(Request::builder().uri("/api/defaults").body(Body::empty()).unwrap()).await;
        let (status, body) = send(post_json("/api/analyze", defaults["data"].clone())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        let report = &body["data"]["report"];
        assert_eq!(report["commentary"]["merger_type"], "Merger of Equals");
        assert_eq!(report["post_merger"][0]["formatted"], "3.5000");
        assert_eq!(report["result"]["stake_a_pct"], 50.0);
    }

    #[tokio::test]
    async fn test_zero_shares_is_unprocessable() {
        let mut inputs = serde_json::to_value(MergerInputs::default()).unwrap();
        inputs["company_a"]["shares_outstanding"] = Value::from(0.0);

        let (status, body) = send(post_json("/api/analyze", inputs)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("division by zero"));
    }

    #[tokio::test]
    async fn test_batch_reports_each_item() {
        let good = serde_json::to_value(MergerInputs::default()).unwrap();
        let mut bad = good.clone();
        bad["company_b"]["total_equity"] = Value::from(0.0);

        let (status, body) = send(post_json("/api/analyze/batch", Value::Array(vec![good, bad]))).await;
        assert_eq!(status, StatusCode::OK);

        let items = body["data"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert!(items[0]["report"].is_object());
        assert!(items[0].get("error").is_none());
        assert!(items[1]["error"].as_str().unwrap().contains("division by zero"));
    }
}
