// In-memory credential store for development and tests
// Enforces the same uniqueness rules as the PostgreSQL schema under a single write lock

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    CredentialStore, StoreError, BOT_SESSIONS_TOKEN_KEY, COMPANIES_RFC_KEY,
    COMPANIES_USER_NAME_KEY, EMPLOYEES_CURP_KEY, EMPLOYEES_RFC_KEY,
};
use crate::models::{
    BotSession, Company, CompanyStatus, Employee, EmployeeChanges, NewBotSession, NewCompany,
    NewEmployee,
};

// Rows are kept in insertion order; listings walk them backwards for newest first
#[derive(Debug, Default)]
struct Tables {
    companies: Vec<Company>,
    employees: Vec<Employee>,
    bot_sessions: Vec<BotSession>,
}

impl Tables {
    fn check_employee_unique(
        &self,
        company_id: Uuid,
        curp: &str,
        rfc: &str,
        skip: Option<Uuid>,
    ) -> Result<(), StoreError> {
        for employee in self
            .employees
            .iter()
            .filter(|e| e.created_by == company_id && Some(e.id) != skip)
        {
            if employee.curp == curp {
                return Err(StoreError::UniqueViolation(EMPLOYEES_CURP_KEY.to_string()));
            }
            if employee.rfc == rfc {
                return Err(StoreError::UniqueViolation(EMPLOYEES_RFC_KEY.to_string()));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn create_company(&self, new_company: NewCompany) -> Result<Company, StoreError> {
        let mut tables = self.tables.write().await;

        if tables
            .companies
            .iter()
            .any(|c| c.user_name == new_company.user_name)
        {
            return Err(StoreError::UniqueViolation(
                COMPANIES_USER_NAME_KEY.to_string(),
            ));
        }
        if tables.companies.iter().any(|c| c.rfc == new_company.rfc) {
            return Err(StoreError::UniqueViolation(COMPANIES_RFC_KEY.to_string()));
        }

        let now = Utc::now();
        let company = Company {
            id: Uuid::new_v4(),
            user_name: new_company.user_name,
            legal_name: new_company.legal_name,
            name: new_company.name,
            rfc: new_company.rfc,
            password: new_company.password,
            status: new_company.status,
            created_at: now,
            updated_at: now,
        };
        tables.companies.push(company.clone());

        Ok(company)
    }

    async fn find_company_by_id(&self, company_id: Uuid) -> Result<Option<Company>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.companies.iter().find(|c| c.id == company_id).cloned())
    }

    async fn find_company_by_user_name(
        &self,
        user_name: &str,
    ) -> Result<Option<Company>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .companies
            .iter()
            .find(|c| c.user_name == user_name)
            .cloned())
    }

    async fn update_company_status(
        &self,
        company_id: Uuid,
        status: CompanyStatus,
    ) -> Result<Company, StoreError> {
        let mut tables = self.tables.write().await;
        let company = tables
            .companies
            .iter_mut()
            .find(|c| c.id == company_id)
            .ok_or(StoreError::NotFound)?;

        company.status = status;
        company.updated_at = Utc::now();

        Ok(company.clone())
    }

    async fn create_bot_session(
        &self,
        new_session: NewBotSession,
    ) -> Result<BotSession, StoreError> {
        let mut tables = self.tables.write().await;

        if tables
            .bot_sessions
            .iter()
            .any(|s| s.auth_token == new_session.auth_token)
        {
            return Err(StoreError::UniqueViolation(
                BOT_SESSIONS_TOKEN_KEY.to_string(),
            ));
        }

        let session = BotSession {
            id: Uuid::new_v4(),
            auth_token: new_session.auth_token,
            created_by: new_session.created_by,
            chat_id: None,
            chat_metadata: None,
            used: false,
            created_at: Utc::now(),
        };
        tables.bot_sessions.push(session.clone());

        Ok(session)
    }

    async fn list_bot_sessions(&self, company_id: Uuid) -> Result<Vec<BotSession>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .bot_sessions
            .iter()
            .rev()
            .filter(|s| s.created_by == company_id)
            .cloned()
            .collect())
    }

    async fn delete_bot_session(
        &self,
        company_id: Uuid,
        session_id: Uuid,
    ) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let before = tables.bot_sessions.len();
        tables
            .bot_sessions
            .retain(|s| !(s.id == session_id && s.created_by == company_id));

        Ok(tables.bot_sessions.len() < before)
    }

    async fn create_employee(&self, new_employee: NewEmployee) -> Result<Employee, StoreError> {
        let mut tables = self.tables.write().await;

        if !tables
            .companies
            .iter()
            .any(|c| c.id == new_employee.created_by)
        {
            return Err(StoreError::Database(
                "employees.created_by references a missing company".to_string(),
            ));
        }
        tables.check_employee_unique(
            new_employee.created_by,
            &new_employee.curp,
            &new_employee.rfc,
            None,
        )?;

        let now = Utc::now();
        let employee = Employee {
            id: Uuid::new_v4(),
            created_by: new_employee.created_by,
            full_name: new_employee.full_name,
            curp: new_employee.curp,
            rfc: new_employee.rfc,
            position: new_employee.position,
            salary: new_employee.salary,
            social_security_number: new_employee.social_security_number,
            status: new_employee.status,
            created_at: now,
            updated_at: now,
        };
        tables.employees.push(employee.clone());

        Ok(employee)
    }

    async fn list_employees(&self, company_id: Uuid) -> Result<Vec<Employee>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .employees
            .iter()
            .rev()
            .filter(|e| e.created_by == company_id)
            .cloned()
            .collect())
    }

    async fn find_employee(&self, employee_id: Uuid) -> Result<Option<Employee>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.employees.iter().find(|e| e.id == employee_id).cloned())
    }

    async fn update_employee(
        &self,
        company_id: Uuid,
        employee_id: Uuid,
        changes: EmployeeChanges,
    ) -> Result<Option<Employee>, StoreError> {
        let mut tables = self.tables.write().await;

        let Some(index) = tables
            .employees
            .iter()
            .position(|e| e.id == employee_id && e.created_by == company_id)
        else {
            return Ok(None);
        };

        let mut updated = tables.employees[index].clone();
        changes.apply_to(&mut updated);
        tables.check_employee_unique(company_id, &updated.curp, &updated.rfc, Some(employee_id))?;

        tables.employees[index] = updated.clone();
        Ok(Some(updated))
    }
}
