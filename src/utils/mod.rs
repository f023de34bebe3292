// Utility modules

pub mod password;
pub mod service_error;
pub mod validation;

pub use password::{hash_password, verify_password, PasswordError};
pub use service_error::{ServiceError, ServiceResult};
pub use validation::{collect_messages, normalize_identity};
