// Tenant-scoped store handle
// Built from the resolved company; every row it touches is filtered by created_by

use std::sync::Arc;
use uuid::Uuid;

use super::{CredentialStore, StoreError};
use crate::models::{BotSession, Company, Employee, EmployeeChanges, NewBotSession, NewEmployee};

/// Outcome of an owner-checked operation on a single row
#[derive(Debug)]
pub enum Owned<T> {
    Found(T),
    Missing,
    Foreign,
}

#[derive(Clone)]
pub struct TenantScope {
    company: Company,
    store: Arc<dyn CredentialStore>,
}

impl TenantScope {
    pub fn new(company: Company, store: Arc<dyn CredentialStore>) -> Self {
        Self { company, store }
    }

    pub fn company(&self) -> &Company {
        &self.company
    }

    pub fn company_id(&self) -> Uuid {
        self.company.id
    }

    pub async fn create_bot_session(&self, auth_token: String) -> Result<BotSession, StoreError> {
        self.store
            .create_bot_session(NewBotSession {
                auth_token,
                created_by: self.company.id,
            })
            .await
    }

    pub async fn list_bot_sessions(&self) -> Result<Vec<BotSession>, StoreError> {
        self.store.list_bot_sessions(self.company.id).await
    }

    /// Rows owned by other tenants are reported as missing
    pub async fn delete_bot_session(&self, session_id: Uuid) -> Result<bool, StoreError> {
        self.store
            .delete_bot_session(self.company.id, session_id)
            .await
    }

    /// The owner is always the scope's company, whatever `created_by` holds
    pub async fn create_employee(&self, mut new_employee: NewEmployee) -> Result<Employee, StoreError> {
        new_employee.created_by = self.company.id;
        self.store.create_employee(new_employee).await
    }

    pub async fn list_employees(&self) -> Result<Vec<Employee>, StoreError> {
        self.store.list_employees(self.company.id).await
    }

    pub async fn update_employee(
        &self,
        employee_id: Uuid,
        changes: EmployeeChanges,
    ) -> Result<Owned<Employee>, StoreError> {
        match self.store.find_employee(employee_id).await? {
            None => return Ok(Owned::Missing),
            Some(existing) if existing.created_by != self.company.id => {
                return Ok(Owned::Foreign)
            }
            Some(_) => {}
        }

        Ok(self
            .store
            .update_employee(self.company.id, employee_id, changes)
            .await?
            .map_or(Owned::Missing, Owned::Found))
    }
}
