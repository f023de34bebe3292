// Session resolver
// Runs on every request and attaches the live company record, never rejects

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{request::Parts, Request},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use std::convert::Infallible;

use crate::{app::AppState, models::Company, store::TenantScope};

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "access_token";

/// The company behind the current request, if any
#[derive(Debug, Clone, Default)]
pub struct ResolvedSession(pub Option<Company>);

impl ResolvedSession {
    pub fn company(&self) -> Option<&Company> {
        self.0.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }

    /// Tenant handle for the resolved company
    pub fn scope(self, state: &AppState) -> Option<TenantScope> {
        self.0
            .map(|company| TenantScope::new(company, state.store.clone()))
    }
}

pub async fn session_resolver(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let session = resolve(&state, &jar).await;
    request.extensions_mut().insert(session);
    next.run(request).await
}

async fn resolve(state: &AppState, jar: &CookieJar) -> ResolvedSession {
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return ResolvedSession(None);
    };

    let claims = match state.jwt_service.verify(cookie.value()) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!(reason = %e, "Ignoring invalid session token");
            return ResolvedSession(None);
        }
    };

    match state.store.find_company_by_id(claims.id).await {
        Ok(Some(company)) => ResolvedSession(Some(company)),
        Ok(None) => {
            tracing::debug!(company_id = %claims.id, "Session token for unknown company");
            ResolvedSession(None)
        }
        Err(e) => {
            tracing::warn!(company_id = %claims.id, error = %e, "Session lookup failed");
            ResolvedSession(None)
        }
    }
}

/// Reads the resolver's result; anonymous when the resolver did not run
impl<S> FromRequestParts<S> for ResolvedSession
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<ResolvedSession>()
            .cloned()
            .unwrap_or_default())
    }
}
