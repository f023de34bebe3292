// PostgreSQL credential store backed by the Diesel pool

use async_trait::async_trait;
use bb8::PooledConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::AsyncPgConnection;
use uuid::Uuid;

use super::{CredentialStore, StoreError};
use crate::db::{check_diesel_health, DieselPool};
use crate::models::{
    BotSession, Company, CompanyStatus, Employee, EmployeeChanges, NewBotSession, NewCompany,
    NewEmployee,
};

type PgManager = AsyncDieselConnectionManager<AsyncPgConnection>;

#[derive(Clone)]
pub struct PgStore {
    pool: DieselPool,
}

impl PgStore {
    pub fn new(pool: DieselPool) -> Self {
        Self { pool }
    }

    async fn conn(&self) -> Result<PooledConnection<'_, PgManager>, StoreError> {
        self.pool
            .get()
            .await
            .map_err(|e| StoreError::Pool(e.to_string()))
    }
}

impl std::fmt::Debug for PgStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgStore")
            .field("connections", &self.pool.state().connections)
            .finish()
    }
}

#[async_trait]
impl CredentialStore for PgStore {
    fn backend_name(&self) -> &'static str {
        "postgresql"
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        check_diesel_health(&self.pool)
            .await
            .map_err(|e| StoreError::Pool(e.to_string()))
    }

    async fn create_company(&self, new_company: NewCompany) -> Result<Company, StoreError> {
        let mut conn = self.conn().await?;
        Ok(Company::create(&mut conn, new_company).await?)
    }

    async fn find_company_by_id(&self, company_id: Uuid) -> Result<Option<Company>, StoreError> {
        let mut conn = self.conn().await?;
        Ok(Company::find_by_id(&mut conn, company_id).await?)
    }

    async fn find_company_by_user_name(
        &self,
        user_name: &str,
    ) -> Result<Option<Company>, StoreError> {
        let mut conn = self.conn().await?;
        Ok(Company::find_by_user_name(&mut conn, user_name).await?)
    }

    async fn update_company_status(
        &self,
        company_id: Uuid,
        status: CompanyStatus,
    ) -> Result<Company, StoreError> {
        let mut conn = self.conn().await?;
        Company::set_status(&mut conn, company_id, status)
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn create_bot_session(
        &self,
        new_session: NewBotSession,
    ) -> Result<BotSession, StoreError> {
        let mut conn = self.conn().await?;
        Ok(BotSession::create(&mut conn, new_session).await?)
    }

    async fn list_bot_sessions(&self, company_id: Uuid) -> Result<Vec<BotSession>, StoreError> {
        let mut conn = self.conn().await?;
        Ok(BotSession::list_for_company(&mut conn, company_id).await?)
    }

    async fn delete_bot_session(
        &self,
        company_id: Uuid,
        session_id: Uuid,
    ) -> Result<bool, StoreError> {
        let mut conn = self.conn().await?;
        Ok(BotSession::delete_for_company(&mut conn, company_id, session_id).await?)
    }

    async fn create_employee(&self, new_employee: NewEmployee) -> Result<Employee, StoreError> {
        let mut conn = self.conn().await?;
        Ok(Employee::create(&mut conn, new_employee).await?)
    }

    async fn list_employees(&self, company_id: Uuid) -> Result<Vec<Employee>, StoreError> {
        let mut conn = self.conn().await?;
        Ok(Employee::list_for_company(&mut conn, company_id).await?)
    }

    async fn find_employee(&self, employee_id: Uuid) -> Result<Option<Employee>, StoreError> {
        let mut conn = self.conn().await?;
        Ok(Employee::find_by_id(&mut conn, employee_id).await?)
    }

    async fn update_employee(
        &self,
        company_id: Uuid,
        employee_id: Uuid,
        changes: EmployeeChanges,
    ) -> Result<Option<Employee>, StoreError> {
        let mut conn = self.conn().await?;
        Ok(Employee::update_for_company(&mut conn, company_id, employee_id, changes).await?)
    }
}
