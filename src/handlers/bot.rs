// Bot pairing handlers

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    app::AppState,
    handlers::ApiResponse,
    middleware::ResolvedSession,
    models::BotSessionSummary,
    services::pairing,
    store::TenantScope,
    utils::service_error::{ServiceError, ServiceResult},
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairingTokenResponse {
    pub auth_token: String,
}

fn require_scope(session: ResolvedSession, state: &AppState) -> ServiceResult<TenantScope> {
    session
        .scope(state)
        .ok_or_else(|| ServiceError::Authentication("Login required".to_string()))
}

/// POST /bot/session/create - Issue a pairing token, shown only in this response
pub async fn create_session(
    State(state): State<AppState>,
    session: ResolvedSession,
) -> ServiceResult<Response> {
    let scope = require_scope(session, &state)?;
    let auth_token = pairing::create(&scope).await?;

    let response = ApiResponse {
        success: true,
        data: Some(PairingTokenResponse { auth_token }),
        message: "Bot session created".to_string(),
    };

    Ok((StatusCode::CREATED, Json(response)).into_response())
}

/// GET /bot/session/get - List the caller's pairing sessions
pub async fn list_sessions(
    State(state): State<AppState>,
    session: ResolvedSession,
) -> ServiceResult<Json<ApiResponse<Vec<BotSessionSummary>>>> {
    let scope = require_scope(session, &state)?;
    let sessions = pairing::list(&scope).await?;

    Ok(Json(ApiResponse {
        success: true,
        data: Some(sessions),
        message: "Bot sessions retrieved".to_string(),
    }))
}

/// DELETE /bot/session/delete/{id} - Revoke one of the caller's pairing sessions
pub async fn delete_session(
    State(state): State<AppState>,
    session: ResolvedSession,
    id: Result<Path<Uuid>, PathRejection>,
) -> ServiceResult<Json<ApiResponse<()>>> {
    let scope = require_scope(session, &state)?;
    let Path(session_id) = id?;

    pairing::revoke(&scope, session_id).await?;

    Ok(Json(ApiResponse {
        success: true,
        data: None,
        message: "Bot session deleted".to_string(),
    }))
}
