// Credential and employee field validation
// Pure functions, used directly and through `validator` custom attributes

use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;
use validator::{ValidationError, ValidationErrors};

pub const USER_NAME_MIN: usize = 7;
pub const USER_NAME_MAX: usize = 14;
pub const PASSWORD_MIN: usize = 8;
pub const PASSWORD_MAX: usize = 64;

/// Symbols accepted as the special character of a password
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*()-_=+[]{};:'\",.<>/?\\|`~";

lazy_static! {
    static ref USER_NAME_REGEX: Regex = Regex::new(r"^[A-Za-z0-9_]+$").unwrap();
    static ref RFC_REGEX: Regex = Regex::new(r"(?i)^[A-ZÑ&]{3,4}\d{6}[A-Z0-9]{3}$").unwrap();
    static ref CURP_REGEX: Regex =
        Regex::new(r"(?i)^[A-Z]{4}\d{6}[HM][A-Z]{5}[A-Z0-9]\d$").unwrap();
    static ref NSS_REGEX: Regex = Regex::new(r"^\d{11}$").unwrap();
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

fn require(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("required", "is required"));
    }
    Ok(())
}

/// Trim and lowercase an identity-bearing string before comparison or storage
pub fn normalize_identity(value: &str) -> String {
    value.trim().to_lowercase()
}

pub fn is_valid_user_name(user_name: &str) -> bool {
    (USER_NAME_MIN..=USER_NAME_MAX).contains(&user_name.chars().count())
        && USER_NAME_REGEX.is_match(user_name)
}

pub fn is_valid_password(password: &str) -> bool {
    let length = password.chars().count();
    (PASSWORD_MIN..=PASSWORD_MAX).contains(&length)
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SYMBOLS.contains(c))
}

pub fn is_valid_rfc(rfc: &str) -> bool {
    RFC_REGEX.is_match(rfc)
}

pub fn is_valid_curp(curp: &str) -> bool {
    CURP_REGEX.is_match(curp)
}

pub fn is_valid_nss(nss: &str) -> bool {
    NSS_REGEX.is_match(nss)
}

/// Non-blank text field
pub fn validate_present(value: &str) -> Result<(), ValidationError> {
    require(value)
}

pub fn validate_user_name(user_name: &str) -> Result<(), ValidationError> {
    require(user_name)?;
    if !is_valid_user_name(user_name.trim()) {
        return Err(error(
            "user_name_format",
            "must be 7 to 14 characters of letters, digits or underscore",
        ));
    }
    Ok(())
}

/// Password length and complexity; the value is never trimmed
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    require(password)?;
    if !is_valid_password(password) {
        return Err(error(
            "password_complexity",
            "must be 8 to 64 characters with a lowercase letter, an uppercase letter, a digit and a symbol",
        ));
    }
    Ok(())
}

pub fn validate_rfc(rfc: &str) -> Result<(), ValidationError> {
    require(rfc)?;
    if !is_valid_rfc(rfc.trim()) {
        return Err(error("rfc_format", "is not a valid RFC"));
    }
    Ok(())
}

pub fn validate_curp(curp: &str) -> Result<(), ValidationError> {
    require(curp)?;
    if !is_valid_curp(curp.trim()) {
        return Err(error("curp_format", "is not a valid CURP"));
    }
    Ok(())
}

pub fn validate_nss(nss: &str) -> Result<(), ValidationError> {
    require(nss)?;
    if !is_valid_nss(nss.trim()) {
        return Err(error("nss_format", "must be exactly 11 digits"));
    }
    Ok(())
}

/// Flatten validator output into sorted `field: message` strings
pub fn collect_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.first().map(|e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                format!("{}: {}", field, message)
            })
        })
        .collect();
    messages.sort();
    messages
}
