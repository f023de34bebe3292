// Password hashing and verification utilities using bcrypt
// bcrypt is CPU bound, the async helpers move it off the reactor

use thiserror::Error;

/// Errors that can occur during password operations
#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Failed to hash password: {0}")]
    HashingError(String),

    #[error("Password task failed: {0}")]
    TaskError(String),
}

/// Hash a password with a fresh salt at the given work factor
///
/// # Example
/// ```ignore
/// let digest = hash_password("S3cure!pass", 10)?;
/// // Returns something like: $2b$10$...
/// ```
pub fn hash_password(password: &str, cost: u32) -> Result<String, PasswordError> {
    bcrypt::hash(password, cost).map_err(|e| PasswordError::HashingError(e.to_string()))
}

/// Check a password against a stored digest
///
/// A malformed digest never matches.
pub fn verify_password(password: &str, digest: &str) -> bool {
    match bcrypt::verify(password, digest) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::warn!(error = %e, "Stored password digest could not be parsed");
            false
        }
    }
}

/// `hash_password` on the blocking thread pool
pub async fn hash_password_blocking(password: String, cost: u32) -> Result<String, PasswordError> {
    tokio::task::spawn_blocking(move || hash_password(&password, cost))
        .await
        .map_err(|e| PasswordError::TaskError(e.to_string()))?
}

/// `verify_password` on the blocking thread pool
pub async fn verify_password_blocking(
    password: String,
    digest: String,
) -> Result<bool, PasswordError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &digest))
        .await
        .map_err(|e| PasswordError::TaskError(e.to_string()))
}
