// Authentication handlers
// Register, login, logout and session inspection over the access_token cookie

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use time::Duration;
use validator::Validate;

use crate::{
    app::AppState,
    app_config::AppConfig,
    handlers::ApiResponse,
    middleware::{ResolvedSession, SESSION_COOKIE},
    models::{Company, CompanyStatus, SESSION_TTL_DAYS},
    services::{Credentials, Registration},
    utils::{
        service_error::{ServiceError, ServiceResult},
        validation::{validate_password, validate_present, validate_rfc, validate_user_name},
    },
};

// =============================================================================
// REQUEST/RESPONSE TYPES
// =============================================================================

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(
        required(message = "is required"),
        custom(function = "validate_present")
    )]
    pub user_name: Option<String>,

    #[validate(
        required(message = "is required"),
        custom(function = "validate_present")
    )]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        required(message = "is required"),
        length(max = 255, message = "must be at most 255 characters"),
        custom(function = "validate_present")
    )]
    pub legal_name: Option<String>,

    #[validate(
        required(message = "is required"),
        length(max = 255, message = "must be at most 255 characters"),
        custom(function = "validate_present")
    )]
    pub name: Option<String>,

    #[validate(required(message = "is required"), custom(function = "validate_password"))]
    pub password: Option<String>,

    #[validate(required(message = "is required"), custom(function = "validate_rfc"))]
    pub rfc: Option<String>,

    #[validate(required(message = "is required"), custom(function = "validate_user_name"))]
    pub user_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SessionUser {
    pub name: String,
    pub status: CompanyStatus,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: SessionUser,
}

impl From<&Company> for SessionResponse {
    fn from(company: &Company) -> Self {
        Self {
            user: SessionUser {
                name: company.name.clone(),
                status: company.status,
            },
        }
    }
}

// =============================================================================
// COOKIES
// =============================================================================

fn base_cookie(value: String, max_age: Duration, config: &AppConfig) -> Cookie<'static> {
    let same_site = if config.is_production() {
        SameSite::Strict
    } else {
        SameSite::Lax
    };

    Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .domain(config.security.cookie_domain.clone())
        .http_only(true)
        .secure(config.is_production())
        .same_site(same_site)
        .max_age(max_age)
        .build()
}

/// Cookie carrying a freshly issued session token
pub fn create_session_cookie(token: String, config: &AppConfig) -> Cookie<'static> {
    base_cookie(token, Duration::days(SESSION_TTL_DAYS), config)
}

/// Cookie that makes the browser drop the session token
pub fn create_delete_session_cookie(config: &AppConfig) -> Cookie<'static> {
    // Negative max_age deletes the cookie
    base_cookie(String::new(), Duration::seconds(-1), config)
}

fn reject_if_logged_in(session: &ResolvedSession) -> ServiceResult<()> {
    if session.is_authenticated() {
        return Err(ServiceError::validation(
            "session: already logged in, log out first",
        ));
    }
    Ok(())
}

// =============================================================================
// AUTHENTICATION HANDLERS
// =============================================================================

/// POST /auth/register - Create a pending company and start its session
pub async fn register(
    State(state): State<AppState>,
    session: ResolvedSession,
    jar: CookieJar,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ServiceResult<Response> {
    reject_if_logged_in(&session)?;
    let Json(request) = payload?;
    request.validate()?;

    let registration = Registration {
        legal_name: request.legal_name.unwrap_or_default(),
        name: request.name.unwrap_or_default(),
        password: request.password.unwrap_or_default(),
        rfc: request.rfc.unwrap_or_default(),
        user_name: request.user_name.unwrap_or_default(),
    };

    let issued = state.auth_service.register(registration).await?;
    let jar = jar.add(create_session_cookie(issued.token, &state.config));

    let response = ApiResponse {
        success: true,
        data: Some(SessionResponse::from(&issued.company)),
        message: "Company registered, wait for verification".to_string(),
    };

    Ok((StatusCode::CREATED, jar, Json(response)).into_response())
}

/// POST /auth/login - Authenticate an active company
pub async fn login(
    State(state): State<AppState>,
    session: ResolvedSession,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ServiceResult<Response> {
    reject_if_logged_in(&session)?;
    let Json(request) = payload?;
    request.validate()?;

    let credentials = Credentials {
        user_name: request.user_name.unwrap_or_default(),
        password: request.password.unwrap_or_default(),
    };

    let issued = state.auth_service.login(credentials).await?;
    let jar = jar.add(create_session_cookie(issued.token, &state.config));

    let response = ApiResponse {
        success: true,
        data: Some(SessionResponse::from(&issued.company)),
        message: "Logged in".to_string(),
    };

    Ok((StatusCode::OK, jar, Json(response)).into_response())
}

/// GET /auth/session - Sanitized view of the current company
pub async fn get_session(
    session: ResolvedSession,
    jar: CookieJar,
) -> ServiceResult<Json<ApiResponse<SessionResponse>>> {
    if jar.get(SESSION_COOKIE).is_none() {
        return Err(ServiceError::NotFound("No session cookie".to_string()));
    }

    let company = session
        .company()
        .ok_or_else(|| ServiceError::NotFound("No active session".to_string()))?;

    Ok(Json(ApiResponse {
        success: true,
        data: Some(SessionResponse::from(company)),
        message: "Session found".to_string(),
    }))
}

/// POST /auth/logout - Clear the session cookie
///
/// The token itself stays valid until it expires.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> ServiceResult<Response> {
    if jar.get(SESSION_COOKIE).is_none() {
        return Err(ServiceError::NotFound("No session cookie".to_string()));
    }

    let jar = jar.add(create_delete_session_cookie(&state.config));
    tracing::info!("Session cookie cleared");

    let response = ApiResponse::<()> {
        success: true,
        data: None,
        message: "Logged out".to_string(),
    };

    Ok((StatusCode::OK, jar, Json(response)).into_response())
}
