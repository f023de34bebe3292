// Employee database model
// Every row belongs to exactly one company through created_by

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::schema::employees;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    diesel::expression::AsExpression,
    diesel::deserialize::FromSqlRow,
)]
#[diesel(sql_type = diesel::sql_types::Text)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeStatus {
    #[default]
    Active,
    Inactive,
}

impl EmployeeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeStatus::Active => "active",
            EmployeeStatus::Inactive => "inactive",
        }
    }
}

impl FromStr for EmployeeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(EmployeeStatus::Active),
            "inactive" => Ok(EmployeeStatus::Inactive),
            _ => Err(format!("Invalid employee status: {}", s)),
        }
    }
}

impl<DB> diesel::deserialize::FromSql<diesel::sql_types::Text, DB> for EmployeeStatus
where
    DB: diesel::backend::Backend,
    String: diesel::deserialize::FromSql<diesel::sql_types::Text, DB>,
{
    fn from_sql(bytes: DB::RawValue<'_>) -> diesel::deserialize::Result<Self> {
        let value = String::from_sql(bytes)?;
        Self::from_str(&value).map_err(|e| e.into())
    }
}

impl<DB> diesel::serialize::ToSql<diesel::sql_types::Text, DB> for EmployeeStatus
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

/// Employee database model - queryable from database
#[derive(Debug, Clone, Serialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = employees)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Employee {
    pub id: Uuid,
    pub created_by: Uuid,
    pub full_name: String,
    pub curp: String,
    pub rfc: String,
    pub position: String,
    pub salary: f64,
    pub social_security_number: String,
    pub status: EmployeeStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New employee for insertion
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = employees)]
pub struct NewEmployee {
    pub created_by: Uuid,
    pub full_name: String,
    pub curp: String,
    pub rfc: String,
    pub position: String,
    pub salary: f64,
    pub social_security_number: String,
    pub status: EmployeeStatus,
}

/// Partial employee update; `None` fields are left untouched
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = employees)]
pub struct EmployeeChanges {
    pub full_name: Option<String>,
    pub curp: Option<String>,
    pub rfc: Option<String>,
    pub position: Option<String>,
    pub salary: Option<f64>,
    pub social_security_number: Option<String>,
    pub status: Option<EmployeeStatus>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl EmployeeChanges {
    /// Apply the changes to an in-memory record
    pub fn apply_to(&self, employee: &mut Employee) {
        if let Some(full_name) = &self.full_name {
            employee.full_name = full_name.clone();
        }
        if let Some(curp) = &self.curp {
            employee.curp = curp.clone();
        }
        if let Some(rfc) = &self.rfc {
            employee.rfc = rfc.clone();
        }
        if let Some(position) = &self.position {
            employee.position = position.clone();
        }
        if let Some(salary) = self.salary {
            employee.salary = salary;
        }
        if let Some(nss) = &self.social_security_number {
            employee.social_security_number = nss.clone();
        }
        if let Some(status) = self.status {
            employee.status = status;
        }
        employee.updated_at = self.updated_at.unwrap_or_else(Utc::now);
    }
}

impl Employee {
    /// List a company's employees, newest first
    pub async fn list_for_company(
        conn: &mut AsyncPgConnection,
        company_id: Uuid,
    ) -> QueryResult<Vec<Self>> {
        employees::table
            .filter(employees::created_by.eq(company_id))
            .order(employees::created_at.desc())
            .select(Employee::as_select())
            .load(conn)
            .await
    }

    /// Find an employee by id regardless of owner
    pub async fn find_by_id(
        conn: &mut AsyncPgConnection,
        employee_id: Uuid,
    ) -> QueryResult<Option<Self>> {
        employees::table
            .find(employee_id)
            .select(Employee::as_select())
            .first(conn)
            .await
            .optional()
    }

    pub async fn create(
        conn: &mut AsyncPgConnection,
        new_employee: NewEmployee,
    ) -> QueryResult<Self> {
        diesel::insert_into(employees::table)
            .values(&new_employee)
            .returning(Employee::as_returning())
            .get_result(conn)
            .await
    }

    /// Update an employee owned by `company_id`
    pub async fn update_for_company(
        conn: &mut AsyncPgConnection,
        company_id: Uuid,
        employee_id: Uuid,
        mut changes: EmployeeChanges,
    ) -> QueryResult<Option<Self>> {
        changes.updated_at = Some(Utc::now());

        diesel::update(
            employees::table
                .filter(employees::id.eq(employee_id))
                .filter(employees::created_by.eq(company_id)),
        )
        .set(&changes)
        .returning(Employee::as_returning())
        .get_result(conn)
        .await
        .optional()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Employee {
        let now = Utc::now();
        Employee {
            id: Uuid::new_v4(),
            created_by: Uuid::new_v4(),
            full_name: "ana lopez".to_string(),
            curp: "LOAA900101MDFPNN09".to_string(),
            rfc: "loaa900101ab1".to_string(),
            position: "cashier".to_string(),
            salary: 9500.0,
            social_security_number: "12345678901".to_string(),
            status: EmployeeStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_apply_changes_only_touches_given_fields() {
        let mut employee = sample();
        let changes = EmployeeChanges {
            position: Some("manager".to_string()),
            salary: Some(12000.0),
            ..Default::default()
        };

        changes.apply_to(&mut employee);

        assert_eq!(employee.position, "manager");
        assert_eq!(employee.salary, 12000.0);
        assert_eq!(employee.full_name, "ana lopez");
        assert_eq!(employee.status, EmployeeStatus::Active);
    }

    #[test]
    fn test_employee_status_default_is_active() {
        assert_eq!(EmployeeStatus::default(), EmployeeStatus::Active);
        assert_eq!(EmployeeStatus::from_str("inactive"), Ok(EmployeeStatus::Inactive));
    }
}
