// Bot pairing session model
// A pairing token links one chat-bot conversation to the company that issued it

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use serde::Serialize;
use uuid::Uuid;

use crate::schema::bot_sessions;

/// Number of characters kept visible at each end of a masked token
const MASK_VISIBLE: usize = 4;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = bot_sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BotSession {
    pub id: Uuid,
    pub auth_token: String,
    pub created_by: Uuid,
    pub chat_id: Option<String>,
    pub chat_metadata: Option<serde_json::Value>,
    pub used: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bot_sessions)]
pub struct NewBotSession {
    pub auth_token: String,
    pub created_by: Uuid,
}

/// Listing view of a pairing session; the raw token is never re-disclosed
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BotSessionSummary {
    pub id: Uuid,
    pub auth_token: String,
    pub chat_id: Option<String>,
    pub chat_metadata: Option<serde_json::Value>,
    pub used: bool,
    pub created_at: DateTime<Utc>,
}

impl From<BotSession> for BotSessionSummary {
    fn from(session: BotSession) -> Self {
        Self {
            id: session.id,
            auth_token: mask_token(&session.auth_token),
            chat_id: session.chat_id,
            chat_metadata: session.chat_metadata,
            used: session.used,
            created_at: session.created_at,
        }
    }
}

/// Keep the first and last few characters of a token, hide the rest
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= MASK_VISIBLE * 2 {
        return "…".to_string();
    }

    let head: String = chars[..MASK_VISIBLE].iter().collect();
    let tail: String = chars[chars.len() - MASK_VISIBLE..].iter().collect();
    format!("{}…{}", head, tail)
}

impl BotSession {
    pub async fn create(
        conn: &mut AsyncPgConnection,
        new_session: NewBotSession,
    ) -> QueryResult<Self> {
        diesel::insert_into(bot_sessions::table)
            .values(&new_session)
            .returning(BotSession::as_returning())
            .get_result(conn)
            .await
    }

    /// List a company's pairing sessions, newest first
    pub async fn list_for_company(
        conn: &mut AsyncPgConnection,
        company_id: Uuid,
    ) -> QueryResult<Vec<Self>> {
        bot_sessions::table
            .filter(bot_sessions::created_by.eq(company_id))
            .order(bot_sessions::created_at.desc())
            .select(BotSession::as_select())
            .load(conn)
            .await
    }

    /// Delete a session owned by `company_id`, returns whether a row was removed
    pub async fn delete_for_company(
        conn: &mut AsyncPgConnection,
        company_id: Uuid,
        session_id: Uuid,
    ) -> QueryResult<bool> {
        let deleted = diesel::delete(
            bot_sessions::table
                .filter(bot_sessions::id.eq(session_id))
                .filter(bot_sessions::created_by.eq(company_id)),
        )
        .execute(conn)
        .await?;

        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("abcd1234efgh5678"), "abcd…5678");
        assert_eq!(mask_token("short"), "…");
        assert_eq!(mask_token("12345678"), "…");
    }

    #[test]
    fn test_summary_hides_raw_token() {
        let session = BotSession {
            id: Uuid::new_v4(),
            auth_token: "AbCdEfGhIjKlMnOpQrStUvWxYz0123456789AbCdEfGhIjKl".to_string(),
            created_by: Uuid::new_v4(),
            chat_id: None,
            chat_metadata: None,
            used: false,
            created_at: Utc::now(),
        };

        let summary = BotSessionSummary::from(session);
        assert_eq!(summary.auth_token, "AbCd…IjKl");

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["authToken"], "AbCd…IjKl");
        assert!(json["chatId"].is_null());
        assert_eq!(json["used"], false);
    }
}
