//! HTTP API for classification, health checks, and Prometheus metrics

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use classifier_lib::{
    health::HealthRegistry,
    observability::{ServiceMetrics, StructuredLogger},
    AnomalyService, ClassificationResult, ComponentStatus,
};
use prometheus::{Encoder, TextEncoder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Version string reported alongside every prediction
const MODEL_VERSION: &str = "statistical-v1";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AnomalyService>,
    pub health_registry: HealthRegistry,
    pub metrics: ServiceMetrics,
    pub logger: StructuredLogger,
}

impl AppState {
    pub fn new(
        service: Arc<AnomalyService>,
        health_registry: HealthRegistry,
        metrics: ServiceMetrics,
        logger: StructuredLogger,
    ) -> Self {
        Self {
            service,
            health_registry,
            metrics,
            logger,
        }
    }
}

/// Request body for the predict endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictRequest {
    pub sensor_data: Vec<f64>,
}

/// Feature breakdown in the wire format the dashboard expects
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureBreakdown {
    pub mean_temp: f64,
    pub temp_std: f64,
    pub temp_range: f64,
    pub max_deviation: f64,
    pub active_sensors: usize,
}

/// Response body for the predict endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictResponse {
    pub prediction: String,
    pub confidence: f64,
    pub raw_prediction: f64,
    pub input_sensors: usize,
    pub features: FeatureBreakdown,
    pub timestamp: String,
    pub model_version: String,
}

impl PredictResponse {
    /// The timestamp is attached here, at the transport layer; the core
    /// result itself is a pure function of the readings.
    fn from_result(result: &ClassificationResult) -> Self {
        Self {
            prediction: result.status.as_str().to_string(),
            confidence: result.confidence,
            raw_prediction: result.raw_mean_temperature,
            input_sensors: result.input_sensor_count,
            features: FeatureBreakdown {
                mean_temp: result.feature_breakdown.mean_temperature,
                temp_std: result.feature_breakdown.std_deviation,
                temp_range: result.feature_breakdown.temperature_range,
                max_deviation: result.feature_breakdown.max_deviation,
                active_sensors: result.feature_breakdown.active_sensor_count,
            },
            timestamp: Utc::now().to_rfc3339(),
            model_version: MODEL_VERSION.to_string(),
        }
    }
}

/// Error body returned for malformed requests
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Classification endpoint
///
/// A malformed body (scalar, object, null, non-numeric entries) is the
/// only rejected input. Degenerate data — an empty array or readings
/// that all fail validity filtering — still classifies and returns 200
/// with `activeSensors: 0`.
async fn predict(
    State(state): State<Arc<AppState>>,
    body: Result<Json<PredictRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match body {
        Ok(json) => json,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!(
                        "sensorData must be an array of numbers: {}",
                        rejection.body_text()
                    ),
                }),
            )
                .into_response();
        }
    };

    let start = Instant::now();
    let result = state.service.predict(&request.sensor_data);
    state
        .metrics
        .observe_classification_latency(start.elapsed().as_secs_f64());
    state.metrics.inc_classifications();

    let filtered = result.input_sensor_count - result.feature_breakdown.active_sensor_count;
    if filtered > 0 {
        state.metrics.add_readings_filtered(filtered as i64);
    }
    if result.feature_breakdown.active_sensor_count == 0 && result.input_sensor_count > 0 {
        state.metrics.inc_degraded_inputs();
        state.logger.log_degraded_input(result.input_sensor_count);
    }
    if result.status.is_anomalous() {
        state.metrics.inc_anomalies();
    }

    state.logger.log_classification(
        result.status.as_str(),
        result.confidence,
        result.raw_mean_temperature,
        result.feature_breakdown.active_sensor_count,
        result.input_sensor_count,
    );

    (StatusCode::OK, Json(PredictResponse::from_result(&result))).into_response()
}

/// Current classifier configuration snapshot
async fn get_config(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.service.configuration().clone())
}

/// Health check response - returns 200 if healthy, 503 if unhealthy
async fn healthz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let health = state.health_registry.health().await;

    let status_code = match health.status {
        ComponentStatus::Healthy => StatusCode::OK,
        ComponentStatus::Degraded => StatusCode::OK, // Still operational
        ComponentStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(health))
}

/// Readiness check response - returns 200 if ready, 503 if not ready
async fn readyz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let readiness = state.health_registry.readiness().await;

    let status_code = if readiness.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(readiness))
}

/// Prometheus metrics endpoint
async fn metrics() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    encoder.encode(&metric_families, &mut buffer).unwrap();

    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        buffer,
    )
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/predict", post(predict))
        .route("/api/v1/config", get(get_config))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/metrics", get(metrics))
        .with_state(state)
}

/// Start the API server
pub async fn serve(port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", port);
    info!(addr = %addr, "Starting API server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
