pub mod auth;
pub mod bookmark;
pub mod health;
pub mod user;

use axum::extract::FromRequest;

use crate::errors::AppError;

/// `Json` whose rejections (no body, bad JSON, missing fields) come back as
/// 400 in the same `{"error": ...}` shape as every other failure.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} should not be empty")));
    }
    Ok(())
}

pub(crate) fn require_email(value: &str) -> Result<(), AppError> {
    require_non_empty("email", value)?;
    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(AppError::Validation("email must be an email".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape() {
        assert!(require_email("a@x.com").is_ok());
        assert!(require_email("").is_err());
        assert!(require_email("no-at-sign").is_err());
        assert!(require_email("@x.com").is_err());
        assert!(require_email("a@").is_err());
        assert!(require_email("a@b@c").is_err());
        assert!(require_email("a b@x.com").is_err());
    }
}
