// Bot pairing token lifecycle
// Tokens are issued to active companies, listed masked and revoked by id

use rand::{distributions::Alphanumeric, Rng};
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::BotSessionSummary;
use crate::services::ensure_active;
use crate::store::{StoreError, TenantScope};
use crate::utils::service_error::{ServiceError, ServiceResult};

/// Length of a freshly issued pairing token
pub const PAIRING_TOKEN_LENGTH: usize = 48;

// Retry once on a token collision
const ISSUE_ATTEMPTS: usize = 2;

pub fn generate_pairing_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(PAIRING_TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// Issue a new pairing token; the raw value is only ever returned here
pub async fn create(scope: &TenantScope) -> ServiceResult<String> {
    ensure_active(scope.company())?;

    for _ in 0..ISSUE_ATTEMPTS {
        match scope.create_bot_session(generate_pairing_token()).await {
            Ok(session) => {
                info!(
                    company_id = %scope.company_id(),
                    session_id = %session.id,
                    "Bot pairing token issued"
                );
                return Ok(session.auth_token);
            }
            Err(StoreError::UniqueViolation(_)) => {
                warn!(company_id = %scope.company_id(), "Pairing token collision, retrying");
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(ServiceError::Internal)
}

/// The caller's pairing sessions, newest first, tokens masked
pub async fn list(scope: &TenantScope) -> ServiceResult<Vec<BotSessionSummary>> {
    let sessions = scope.list_bot_sessions().await?;
    Ok(sessions.into_iter().map(BotSessionSummary::from).collect())
}

pub async fn revoke(scope: &TenantScope, session_id: Uuid) -> ServiceResult<()> {
    if !scope.delete_bot_session(session_id).await? {
        return Err(ServiceError::NotFound("Bot session not found".to_string()));
    }

    info!(company_id = %scope.company_id(), %session_id, "Bot pairing session revoked");
    Ok(())
}
