// Services module
// Business logic layer between the handlers and the credential store

pub mod auth;
pub mod employees;
pub mod jwt;
pub mod pairing;

use crate::models::Company;
use crate::utils::service_error::{ServiceError, ServiceResult};

// Re-export commonly used services
pub use auth::{AuthService, Credentials, IssuedSession, Registration};
pub use jwt::{JwtConfig, JwtService, TokenError};

/// Mutating operations are reserved for verified companies
pub fn ensure_active(company: &Company) -> ServiceResult<()> {
    if company.is_active() {
        Ok(())
    } else {
        Err(ServiceError::Authorization(format!(
            "Company account is {}",
            company.status
        )))
    }
}
