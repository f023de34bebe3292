// Session token codec
// HS256 signed tokens carrying SessionClaims, stateless and not revocable

use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;
use uuid::Uuid;

use crate::app_config::{AppConfig, MIN_SECRET_LENGTH};
use crate::models::auth::SessionClaims;

// Error types for token operations
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Malformed token")]
    Malformed,

    #[error("Invalid token signature")]
    BadSignature,

    #[error("Token expired")]
    Expired,

    #[error("Token encoding error: {0}")]
    Encoding(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;
        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::BadSignature,
            _ => TokenError::Malformed,
        }
    }
}

// Signing configuration
#[derive(Clone)]
pub struct JwtConfig {
    pub algorithm: Algorithm,
    pub encoding_key: EncodingKey,
    pub decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("algorithm", &self.algorithm)
            .field("encoding_key", &"<redacted>")
            .field("decoding_key", &"<redacted>")
            .finish()
    }
}

impl JwtConfig {
    pub fn from_secret(secret: &str) -> Result<Self, TokenError> {
        if secret.len() < MIN_SECRET_LENGTH {
            return Err(TokenError::Encoding(format!(
                "secret must be at least {} characters",
                MIN_SECRET_LENGTH
            )));
        }

        Ok(JwtConfig {
            algorithm: Algorithm::HS256,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        })
    }

    /// Create JWT config from the application configuration
    pub fn from_app_config(config: &AppConfig) -> Result<Self, TokenError> {
        Self::from_secret(&config.jwt.secret)
    }
}

#[derive(Debug)]
pub struct JwtService {
    config: JwtConfig,
    validation: Validation,
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Self {
        let mut validation = Validation::new(config.algorithm);
        validation.validate_exp = true;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0; // No leeway for expiry validation

        Self { config, validation }
    }

    pub fn from_app_config(config: &AppConfig) -> Result<Self, TokenError> {
        Ok(Self::new(JwtConfig::from_app_config(config)?))
    }

    /// Sign a token for a company that stays valid for `ttl`
    pub fn sign(&self, id: Uuid, user_name: &str, ttl: Duration) -> Result<String, TokenError> {
        self.encode_claims(&SessionClaims::new(id, user_name, ttl))
    }

    /// Sign a token with the standard session lifetime
    pub fn sign_session(&self, id: Uuid, user_name: &str) -> Result<String, TokenError> {
        self.encode_claims(&SessionClaims::for_session(id, user_name))
    }

    pub fn encode_claims(&self, claims: &SessionClaims) -> Result<String, TokenError> {
        let header = Header::new(self.config.algorithm);
        encode(&header, claims, &self.config.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Check signature and expiry, returning the claims
    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let token_data = decode::<SessionClaims>(token, &self.config.decoding_key, &self.validation)?;
        Ok(token_data.claims)
    }
}
