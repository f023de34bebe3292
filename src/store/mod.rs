// Credential store
// Persistence seam for companies, employees and bot pairing sessions

pub mod memory;
pub mod postgres;
pub mod tenant;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    BotSession, Company, CompanyStatus, Employee, EmployeeChanges, NewBotSession, NewCompany,
    NewEmployee,
};

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use tenant::{Owned, TenantScope};

/// Unique constraint names, shared by both backends
pub const COMPANIES_USER_NAME_KEY: &str = "companies_user_name_key";
pub const COMPANIES_RFC_KEY: &str = "companies_rfc_key";
pub const EMPLOYEES_CURP_KEY: &str = "employees_tenant_curp_key";
pub const EMPLOYEES_RFC_KEY: &str = "employees_tenant_rfc_key";
pub const BOT_SESSIONS_TOKEN_KEY: &str = "bot_sessions_auth_token_key";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),
    #[error("Record not found")]
    NotFound,
    #[error("Connection pool error: {0}")]
    Pool(String),
    #[error("Database error: {0}")]
    Database(String),
}

impl StoreError {
    /// Name of the violated constraint, if this is a uniqueness violation
    pub fn constraint(&self) -> Option<&str> {
        match self {
            StoreError::UniqueViolation(constraint) => Some(constraint),
            _ => None,
        }
    }
}

impl From<diesel::result::Error> for StoreError {
    fn from(error: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error};

        match error {
            Error::NotFound => StoreError::NotFound,
            Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                StoreError::UniqueViolation(
                    info.constraint_name().unwrap_or("unknown").to_string(),
                )
            }
            other => StoreError::Database(other.to_string()),
        }
    }
}

/// Create / find-unique / update / list-by-tenant operations over the registry tables
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Short backend name for logs and health output
    fn backend_name(&self) -> &'static str;

    async fn health_check(&self) -> Result<(), StoreError>;

    async fn create_company(&self, new_company: NewCompany) -> Result<Company, StoreError>;

    async fn find_company_by_id(&self, company_id: Uuid) -> Result<Option<Company>, StoreError>;

    async fn find_company_by_user_name(
        &self,
        user_name: &str,
    ) -> Result<Option<Company>, StoreError>;

    /// Used by the operator process that verifies companies
    async fn update_company_status(
        &self,
        company_id: Uuid,
        status: CompanyStatus,
    ) -> Result<Company, StoreError>;

    async fn create_bot_session(
        &self,
        new_session: NewBotSession,
    ) -> Result<BotSession, StoreError>;

    /// Newest first
    async fn list_bot_sessions(&self, company_id: Uuid) -> Result<Vec<BotSession>, StoreError>;

    /// Returns false when no row with that id belongs to the company
    async fn delete_bot_session(
        &self,
        company_id: Uuid,
        session_id: Uuid,
    ) -> Result<bool, StoreError>;

    async fn create_employee(&self, new_employee: NewEmployee) -> Result<Employee, StoreError>;

    /// Newest first
    async fn list_employees(&self, company_id: Uuid) -> Result<Vec<Employee>, StoreError>;

    /// Unscoped lookup, only reachable through TenantScope
    async fn find_employee(&self, employee_id: Uuid) -> Result<Option<Employee>, StoreError>;

    /// Returns None when no row with that id belongs to the company
    async fn update_employee(
        &self,
        company_id: Uuid,
        employee_id: Uuid,
        changes: EmployeeChanges,
    ) -> Result<Option<Employee>, StoreError>;
}
