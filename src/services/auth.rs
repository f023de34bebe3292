// Login and registration orchestration
// Input shape is checked by the handlers; this layer owns lookups, hashing and token issue

use std::sync::Arc;
use tracing::{info, warn};

use crate::models::{Company, CompanyStatus, NewCompany};
use crate::services::jwt::JwtService;
use crate::store::{CredentialStore, StoreError, COMPANIES_RFC_KEY, COMPANIES_USER_NAME_KEY};
use crate::utils::password::{hash_password_blocking, verify_password_blocking};
use crate::utils::service_error::{ServiceError, ServiceResult};
use crate::utils::validation::normalize_identity;

#[derive(Debug, Clone)]
pub struct Credentials {
    pub user_name: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Registration {
    pub legal_name: String,
    pub name: String,
    pub password: String,
    pub rfc: String,
    pub user_name: String,
}

/// A freshly signed session token and the company it was issued to
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub company: Company,
}

pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    jwt: Arc<JwtService>,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(store: Arc<dyn CredentialStore>, jwt: Arc<JwtService>, bcrypt_cost: u32) -> Self {
        Self {
            store,
            jwt,
            bcrypt_cost,
        }
    }

    pub async fn login(&self, credentials: Credentials) -> ServiceResult<IssuedSession> {
        let user_name = normalize_identity(&credentials.user_name);

        let company = self
            .store
            .find_company_by_user_name(&user_name)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Company not found".to_string()))?;

        let matches =
            verify_password_blocking(credentials.password, company.password.clone()).await?;
        if !matches {
            warn!(company_id = %company.id, "Login failed: wrong password");
            return Err(ServiceError::Authentication(
                "Invalid user name or password".to_string(),
            ));
        }

        match company.status {
            CompanyStatus::Inactive => {
                info!(company_id = %company.id, "Login refused for inactive company");
                return Err(ServiceError::Authorization(
                    "Company account is inactive".to_string(),
                ));
            }
            CompanyStatus::Pending => {
                info!(company_id = %company.id, "Login refused for unverified company");
                return Err(ServiceError::Authorization(
                    "Company account is pending verification".to_string(),
                ));
            }
            CompanyStatus::Active => {}
        }

        let token = self.jwt.sign_session(company.id, &company.user_name)?;
        info!(company_id = %company.id, "Company logged in");

        Ok(IssuedSession { token, company })
    }

    /// New companies start pending until an operator verifies them
    pub async fn register(&self, registration: Registration) -> ServiceResult<IssuedSession> {
        let digest = hash_password_blocking(registration.password, self.bcrypt_cost).await?;

        let new_company = NewCompany {
            user_name: normalize_identity(&registration.user_name),
            legal_name: normalize_identity(&registration.legal_name),
            name: normalize_identity(&registration.name),
            rfc: normalize_identity(&registration.rfc),
            password: digest,
            status: CompanyStatus::Pending,
        };

        let company = match self.store.create_company(new_company).await {
            Ok(company) => company,
            Err(StoreError::UniqueViolation(constraint)) => {
                let field = match constraint.as_str() {
                    COMPANIES_USER_NAME_KEY => "user_name",
                    COMPANIES_RFC_KEY => "rfc",
                    _ => "company",
                };
                info!(field, "Registration rejected: already registered");
                return Err(ServiceError::Conflict(format!(
                    "{} is already registered",
                    field
                )));
            }
            Err(e) => return Err(e.into()),
        };

        let token = self.jwt.sign_session(company.id, &company.user_name)?;
        info!(company_id = %company.id, "Company registered");

        Ok(IssuedSession { token, company })
    }
}
