// Employee registry handlers

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    response::Json,
};
use uuid::Uuid;

use crate::{
    app::AppState,
    handlers::ApiResponse,
    middleware::ResolvedSession,
    models::Employee,
    services::employees::{self, AddEmployeeRequest, UpdateEmployeeRequest},
    store::TenantScope,
    utils::service_error::{ServiceError, ServiceResult},
};

fn require_scope(session: ResolvedSession, state: &AppState) -> ServiceResult<TenantScope> {
    session
        .scope(state)
        .ok_or_else(|| ServiceError::NotFound("No active session".to_string()))
}

/// POST /employees/add
pub async fn add_employee(
    State(state): State<AppState>,
    session: ResolvedSession,
    payload: Result<Json<AddEmployeeRequest>, JsonRejection>,
) -> ServiceResult<Json<ApiResponse<Employee>>> {
    let scope = require_scope(session, &state)?;
    let employee = employees::add(
        &scope,
        payload.map(|Json(request)| request).map_err(ServiceError::from),
    )
    .await?;

    Ok(Json(ApiResponse {
        success: true,
        data: Some(employee),
        message: "Employee added".to_string(),
    }))
}

/// GET /employees/get
pub async fn list_employees(
    State(state): State<AppState>,
    session: ResolvedSession,
) -> ServiceResult<Json<ApiResponse<Vec<Employee>>>> {
    let scope = require_scope(session, &state)?;
    let employees = employees::list(&scope).await?;

    Ok(Json(ApiResponse {
        success: true,
        data: Some(employees),
        message: "Employees retrieved".to_string(),
    }))
}

/// PUT /employees/update/{id}
pub async fn update_employee(
    State(state): State<AppState>,
    session: ResolvedSession,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateEmployeeRequest>, JsonRejection>,
) -> ServiceResult<Json<ApiResponse<Employee>>> {
    let scope = require_scope(session, &state)?;
    let employee = employees::update(
        &scope,
        id.map(|Path(id)| id).map_err(ServiceError::from),
        payload.map(|Json(request)| request).map_err(ServiceError::from),
    )
    .await?;

    Ok(Json(ApiResponse {
        success: true,
        data: Some(employee),
        message: "Employee updated".to_string(),
    }))
}
