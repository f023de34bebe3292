// Employee registry operations
// Every call goes through the caller's TenantScope

use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Employee, EmployeeChanges, EmployeeStatus, NewEmployee};
use crate::services::ensure_active;
use crate::store::{Owned, StoreError, TenantScope, EMPLOYEES_CURP_KEY, EMPLOYEES_RFC_KEY};
use crate::utils::service_error::{ServiceError, ServiceResult};
use crate::utils::validation::{
    normalize_identity, validate_curp, validate_nss, validate_present, validate_rfc,
};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddEmployeeRequest {
    #[validate(
        required(message = "is required"),
        length(max = 255, message = "must be at most 255 characters"),
        custom(function = "validate_present")
    )]
    pub full_name: Option<String>,

    #[validate(required(message = "is required"), custom(function = "validate_curp"))]
    pub curp: Option<String>,

    #[validate(required(message = "is required"), custom(function = "validate_rfc"))]
    pub rfc: Option<String>,

    #[validate(
        required(message = "is required"),
        length(max = 255, message = "must be at most 255 characters"),
        custom(function = "validate_present")
    )]
    pub position: Option<String>,

    #[validate(
        required(message = "is required"),
        range(min = 0.0, message = "must be zero or greater")
    )]
    pub salary: Option<f64>,

    #[validate(required(message = "is required"), custom(function = "validate_nss"))]
    pub social_security_number: Option<String>,

    pub status: Option<EmployeeStatus>,
}

/// Partial update; absent fields keep their stored value
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateEmployeeRequest {
    #[validate(
        length(max = 255, message = "must be at most 255 characters"),
        custom(function = "validate_present")
    )]
    pub full_name: Option<String>,

    #[validate(custom(function = "validate_curp"))]
    pub curp: Option<String>,

    #[validate(custom(function = "validate_rfc"))]
    pub rfc: Option<String>,

    #[validate(
        length(max = 255, message = "must be at most 255 characters"),
        custom(function = "validate_present")
    )]
    pub position: Option<String>,

    #[validate(range(min = 0.0, message = "must be zero or greater"))]
    pub salary: Option<f64>,

    #[validate(custom(function = "validate_nss"))]
    pub social_security_number: Option<String>,

    pub status: Option<EmployeeStatus>,
}

impl UpdateEmployeeRequest {
    fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.curp.is_none()
            && self.rfc.is_none()
            && self.position.is_none()
            && self.salary.is_none()
            && self.social_security_number.is_none()
            && self.status.is_none()
    }

    fn into_changes(self) -> EmployeeChanges {
        EmployeeChanges {
            full_name: self.full_name.map(|v| v.trim().to_string()),
            curp: self.curp.map(|v| v.trim().to_uppercase()),
            rfc: self.rfc.map(|v| normalize_identity(&v)),
            position: self.position.map(|v| v.trim().to_string()),
            salary: self.salary,
            social_security_number: self.social_security_number.map(|v| v.trim().to_string()),
            status: self.status,
            updated_at: None,
        }
    }
}

fn conflict_for(error: StoreError) -> ServiceError {
    match error {
        StoreError::UniqueViolation(constraint) => {
            let field = match constraint.as_str() {
                EMPLOYEES_CURP_KEY => "curp",
                EMPLOYEES_RFC_KEY => "rfc",
                _ => "employee",
            };
            ServiceError::Conflict(format!("An employee with this {} already exists", field))
        }
        other => other.into(),
    }
}

/// The payload is handed over unparsed so the status check runs before body validation
pub async fn add(
    scope: &TenantScope,
    payload: ServiceResult<AddEmployeeRequest>,
) -> ServiceResult<Employee> {
    ensure_active(scope.company())?;
    let request = payload?;
    request.validate()?;

    // validate() guarantees every required field is present
    let (
        Some(full_name),
        Some(curp),
        Some(rfc),
        Some(position),
        Some(salary),
        Some(social_security_number),
    ) = (
        request.full_name,
        request.curp,
        request.rfc,
        request.position,
        request.salary,
        request.social_security_number,
    )
    else {
        return Err(ServiceError::validation("body: missing required fields"));
    };

    let new_employee = NewEmployee {
        created_by: scope.company_id(),
        full_name: full_name.trim().to_string(),
        curp: curp.trim().to_uppercase(),
        rfc: normalize_identity(&rfc),
        position: position.trim().to_string(),
        salary,
        social_security_number: social_security_number.trim().to_string(),
        status: request.status.unwrap_or_default(),
    };

    let employee = scope
        .create_employee(new_employee)
        .await
        .map_err(conflict_for)?;

    info!(
        company_id = %scope.company_id(),
        employee_id = %employee.id,
        "Employee added"
    );
    Ok(employee)
}

pub async fn list(scope: &TenantScope) -> ServiceResult<Vec<Employee>> {
    Ok(scope.list_employees().await?)
}

pub async fn update(
    scope: &TenantScope,
    employee_id: ServiceResult<Uuid>,
    payload: ServiceResult<UpdateEmployeeRequest>,
) -> ServiceResult<Employee> {
    ensure_active(scope.company())?;
    let employee_id = employee_id?;
    let request = payload?;
    request.validate()?;

    if request.is_empty() {
        return Err(ServiceError::validation("body: no fields to update"));
    }

    match scope
        .update_employee(employee_id, request.into_changes())
        .await
        .map_err(conflict_for)?
    {
        Owned::Found(employee) => {
            info!(
                company_id = %scope.company_id(),
                employee_id = %employee.id,
                "Employee updated"
            );
            Ok(employee)
        }
        Owned::Missing => Err(ServiceError::NotFound("Employee not found".to_string())),
        Owned::Foreign => Err(ServiceError::Authorization(
            "Employee belongs to another company".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CompanyStatus, NewCompany};
    use crate::store::{CredentialStore, MemoryStore};
    use std::sync::Arc;

    async fn scope_for(
        store: &Arc<MemoryStore>,
        user_name: &str,
        rfc: &str,
        status: CompanyStatus,
    ) -> TenantScope {
        let company = store
            .create_company(NewCompany {
                user_name: user_name.to_string(),
                legal_name: "legal".to_string(),
                name: "name".to_string(),
                rfc: rfc.to_string(),
                password: "digest".to_string(),
                status,
            })
            .await
            .unwrap();
        TenantScope::new(company, store.clone())
    }

    fn request() -> AddEmployeeRequest {
        AddEmployeeRequest {
            full_name: Some(" Ana Lopez ".to_string()),
            curp: Some("loaa900101mdfpnn09".to_string()),
            rfc: Some("LOAA900101AB1".to_string()),
            position: Some("Cashier".to_string()),
            salary: Some(9500.0),
            social_security_number: Some("12345678901".to_string()),
            status: None,
        }
    }

    #[tokio::test]
    async fn test_add_normalizes_fields() {
        let store = Arc::new(MemoryStore::new());
        let scope = scope_for(&store, "acme_co_1", "aaa123456xy1", CompanyStatus::Active).await;

        let employee = add(&scope, Ok(request())).await.unwrap();
        assert_eq!(employee.full_name, "Ana Lopez");
        assert_eq!(employee.curp, "LOAA900101MDFPNN09");
        assert_eq!(employee.rfc, "loaa900101ab1");
        assert_eq!(employee.status, EmployeeStatus::Active);
        assert_eq!(employee.created_by, scope.company_id());
    }

    #[tokio::test]
    async fn test_add_checks_status_before_body() {
        let store = Arc::new(MemoryStore::new());
        let scope = scope_for(&store, "acme_co_1", "aaa123456xy1", CompanyStatus::Pending).await;

        let result = add(&scope, Err(ServiceError::validation("body: bad json"))).await;
        assert!(matches!(result, Err(ServiceError::Authorization(_))));
    }

    #[tokio::test]
    async fn test_add_aggregates_validation_errors() {
        let store = Arc::new(MemoryStore::new());
        let scope = scope_for(&store, "acme_co_1", "aaa123456xy1", CompanyStatus::Active).await;

        let mut bad = request();
        bad.curp = Some("nope".to_string());
        bad.salary = Some(-1.0);
        bad.position = None;

        match add(&scope, Ok(bad)).await {
            Err(ServiceError::Validation(messages)) => {
                assert_eq!(messages.len(), 3);
                assert!(messages.contains(&"position: is required".to_string()));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_text_fields_fit_their_columns() {
        let store = Arc::new(MemoryStore::new());
        let scope = scope_for(&store, "acme_co_1", "aaa123456xy1", CompanyStatus::Active).await;

        let mut widest = request();
        widest.full_name = Some("a".repeat(255));
        widest.position = Some("p".repeat(255));
        assert!(add(&scope, Ok(widest)).await.is_ok());

        let mut too_long = request();
        too_long.curp = Some("BEBE900101HDFPNN09".to_string());
        too_long.full_name = Some("a".repeat(256));
        match add(&scope, Ok(too_long)).await {
            Err(ServiceError::Validation(messages)) => {
                assert_eq!(
                    messages,
                    vec!["full_name: must be at most 255 characters".to_string()]
                );
            }
            other => panic!("expected validation error, got {:?}", other),
        }

        let changes = UpdateEmployeeRequest {
            position: Some("p".repeat(256)),
            ..Default::default()
        };
        assert!(changes.validate().is_err());
    }

    #[tokio::test]
    async fn test_duplicate_curp_conflicts() {
        let store = Arc::new(MemoryStore::new());
        let scope = scope_for(&store, "acme_co_1", "aaa123456xy1", CompanyStatus::Active).await;

        add(&scope, Ok(request())).await.unwrap();
        let mut again = request();
        again.rfc = Some("ZZZZ900101AB1".to_string());

        let result = add(&scope, Ok(again)).await;
        assert!(matches!(result, Err(ServiceError::Conflict(msg)) if msg.contains("curp")));
    }

    #[tokio::test]
    async fn test_update_owner_rules() {
        let store = Arc::new(MemoryStore::new());
        let owner = scope_for(&store, "acme_co_1", "aaa123456xy1", CompanyStatus::Active).await;
        let other = scope_for(&store, "beta_co_1", "bbb123456xy1", CompanyStatus::Active).await;
        let employee = add(&owner, Ok(request())).await.unwrap();

        let changes = || UpdateEmployeeRequest {
            position: Some("Manager".to_string()),
            ..Default::default()
        };

        let foreign = update(&other, Ok(employee.id), Ok(changes())).await;
        assert!(matches!(foreign, Err(ServiceError::Authorization(_))));

        let missing = update(&owner, Ok(Uuid::new_v4()), Ok(changes())).await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));

        let empty = update(&owner, Ok(employee.id), Ok(UpdateEmployeeRequest::default())).await;
        assert!(matches!(empty, Err(ServiceError::Validation(_))));

        let updated = update(&owner, Ok(employee.id), Ok(changes())).await.unwrap();
        assert_eq!(updated.position, "Manager");
        assert_eq!(updated.curp, employee.curp);
    }
}
