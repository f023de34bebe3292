// Liveness and store health

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::app::AppState;

/// GET / - Plain liveness message
pub async fn root() -> &'static str {
    "API is running."
}

/// GET /health - Store connectivity
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let timestamp = chrono::Utc::now().to_rfc3339();
    let backend = state.store.backend_name();

    let (healthy, store_health) = match state.store.health_check().await {
        Ok(()) => (
            true,
            serde_json::json!({
                "backend": backend,
                "status": "healthy",
                "error": null
            }),
        ),
        Err(e) => {
            tracing::warn!(backend, error = %e, "Store health check failed");
            (
                false,
                serde_json::json!({
                    "backend": backend,
                    "status": "unhealthy",
                    "error": "Store connection failed"
                }),
            )
        }
    };

    let response = serde_json::json!({
        "status": if healthy { "healthy" } else { "degraded" },
        "service": "registry-backend",
        "timestamp": timestamp,
        "components": {
            "store": store_health
        }
    });

    if healthy {
        (StatusCode::OK, Json(response))
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response))
    }
}
