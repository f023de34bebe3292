// Company (tenant) database model
// A company is the principal that logs in and owns employees and bot sessions

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::schema::companies;

/// Lifecycle status of a company account
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    diesel::expression::AsExpression,
    diesel::deserialize::FromSqlRow,
)]
#[diesel(sql_type = diesel::sql_types::Text)]
#[serde(rename_all = "lowercase")]
pub enum CompanyStatus {
    Pending,  // Registered, waiting for an operator to verify it
    Active,   // Verified, full access
    Inactive, // Disabled, cannot log in
}

impl CompanyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompanyStatus::Pending => "pending",
            CompanyStatus::Active => "active",
            CompanyStatus::Inactive => "inactive",
        }
    }
}

impl FromStr for CompanyStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(CompanyStatus::Pending),
            "active" => Ok(CompanyStatus::Active),
            "inactive" => Ok(CompanyStatus::Inactive),
            _ => Err(format!("Invalid company status: {}", s)),
        }
    }
}

impl std::fmt::Display for CompanyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<DB> diesel::deserialize::FromSql<diesel::sql_types::Text, DB> for CompanyStatus
where
    DB: diesel::backend::Backend,
    String: diesel::deserialize::FromSql<diesel::sql_types::Text, DB>,
{
    fn from_sql(bytes: DB::RawValue<'_>) -> diesel::deserialize::Result<Self> {
        let value = String::from_sql(bytes)?;
        Self::from_str(&value).map_err(|e| e.into())
    }
}

impl<DB> diesel::serialize::ToSql<diesel::sql_types::Text, DB> for CompanyStatus
where
    DB: diesel::backend::Backend,
    str: diesel::serialize::ToSql<diesel::sql_types::Text, DB>,
{
    fn to_sql<'b>(
        &'b self,
        out: &mut diesel::serialize::Output<'b, '_, DB>,
    ) -> diesel::serialize::Result {
        self.as_str().to_sql(out)
    }
}

/// Company database model - queryable from database
#[derive(Debug, Clone, Serialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = companies)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Company {
    pub id: Uuid,
    pub user_name: String,
    pub legal_name: String,
    pub name: String,
    pub rfc: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub status: CompanyStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Company {
    pub fn is_active(&self) -> bool {
        self.status == CompanyStatus::Active
    }

    /// Find company by ID
    pub async fn find_by_id(
        conn: &mut AsyncPgConnection,
        company_id: Uuid,
    ) -> QueryResult<Option<Self>> {
        companies::table
            .find(company_id)
            .select(Company::as_select())
            .first(conn)
            .await
            .optional()
    }

    /// Find company by its normalized user name
    pub async fn find_by_user_name(
        conn: &mut AsyncPgConnection,
        user_name: &str,
    ) -> QueryResult<Option<Self>> {
        companies::table
            .filter(companies::user_name.eq(user_name))
            .select(Company::as_select())
            .first(conn)
            .await
            .optional()
    }

    /// Insert a new company
    pub async fn create(conn: &mut AsyncPgConnection, new_company: NewCompany) -> QueryResult<Self> {
        diesel::insert_into(companies::table)
            .values(&new_company)
            .returning(Company::as_returning())
            .get_result(conn)
            .await
    }

    /// Change the lifecycle status of a company
    pub async fn set_status(
        conn: &mut AsyncPgConnection,
        company_id: Uuid,
        new_status: CompanyStatus,
    ) -> QueryResult<Option<Self>> {
        diesel::update(companies::table.find(company_id))
            .set((
                companies::status.eq(new_status),
                companies::updated_at.eq(Utc::now()),
            ))
            .returning(Company::as_returning())
            .get_result(conn)
            .await
            .optional()
    }
}

/// New company for insertion
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = companies)]
pub struct NewCompany {
    pub user_name: String,
    pub legal_name: String,
    pub name: String,
    pub rfc: String,
    pub password: String,
    pub status: CompanyStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_status_conversion() {
        assert_eq!(CompanyStatus::Pending.as_str(), "pending");
        assert_eq!(CompanyStatus::from_str("active"), Ok(CompanyStatus::Active));
        assert_eq!(
            CompanyStatus::from_str("inactive"),
            Ok(CompanyStatus::Inactive)
        );
        assert!(CompanyStatus::from_str("verified").is_err());
    }

    #[test]
    fn test_password_never_serialized() {
        let now = Utc::now();
        let company = Company {
            id: Uuid::new_v4(),
            user_name: "acme_co_1".to_string(),
            legal_name: "acme sa".to_string(),
            name: "acme".to_string(),
            rfc: "abc123456xyz".to_string(),
            password: "$2b$04$secretdigest".to_string(),
            status: CompanyStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(&company).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["status"], "pending");
    }
}
