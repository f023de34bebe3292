// Session token claims
// Claims only prove which company a token was issued to; status is always re-read from the store

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifetime of a session token and its cookie
pub const SESSION_TTL_DAYS: i64 = 7;

/// Session token claims
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionClaims {
    /// Company ID
    pub id: Uuid,

    /// Normalized user name at issue time
    pub user_name: String,

    /// Issued at timestamp (Unix epoch seconds)
    pub iat: i64,

    /// Expires at timestamp (Unix epoch seconds)
    pub exp: i64,
}

impl SessionClaims {
    /// Create claims issued now and expiring after `ttl`
    pub fn new(id: Uuid, user_name: impl Into<String>, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_name: user_name.into(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    /// Session claims with the standard lifetime
    pub fn for_session(id: Uuid, user_name: impl Into<String>) -> Self {
        Self::new(id, user_name, Duration::days(SESSION_TTL_DAYS))
    }
}
