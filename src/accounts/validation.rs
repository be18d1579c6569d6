use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;
use time::{macros::format_description, Date};

use super::dto::{NewUser, RegistrationForm, UserPatch};
use crate::config::ValidationConfig;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name must be between {min} and {max} characters")]
    NameLength { min: usize, max: usize },
    #[error("invalid email format")]
    EmailFormat,
    #[error("email must be at most {max} characters")]
    EmailLength { max: usize },
    #[error("password must be between {min} and {max} characters")]
    PasswordLength { min: usize, max: usize },
    #[error("birthdate must be a date in YYYY-MM-DD format")]
    Birthdate,
}

pub fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub fn parse_birthdate(raw: &str) -> Result<Date, ValidationError> {
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|_| ValidationError::Birthdate)
}

fn check_name(policy: &ValidationConfig, name: &str) -> Result<(), ValidationError> {
    let len = name.chars().count();
    if len < policy.name_min_length || len > policy.name_max_length {
        return Err(ValidationError::NameLength {
            min: policy.name_min_length,
            max: policy.name_max_length,
        });
    }
    Ok(())
}

fn check_email(policy: &ValidationConfig, email: &str) -> Result<(), ValidationError> {
    if email.chars().count() > policy.email_max_length {
        return Err(ValidationError::EmailLength {
            max: policy.email_max_length,
        });
    }
    if !is_valid_email(email) {
        return Err(ValidationError::EmailFormat);
    }
    Ok(())
}

fn check_password(policy: &ValidationConfig, password: &str) -> Result<(), ValidationError> {
    let len = password.chars().count();
    if len < policy.password_min_length || len > policy.password_max_length {
        return Err(ValidationError::PasswordLength {
            min: policy.password_min_length,
            max: policy.password_max_length,
        });
    }
    Ok(())
}

/// Check a raw registration form against the policy and build the typed
/// input for [`AccountStore::register`](super::store::AccountStore::register).
///
/// The name and email are trimmed; the password is taken verbatim.
pub fn validate_registration(
    policy: &ValidationConfig,
    form: RegistrationForm<'_>,
) -> Result<NewUser, ValidationError> {
    let name = form.name.trim();
    let email = form.email.trim();
    check_name(policy, name)?;
    check_email(policy, email)?;
    check_password(policy, form.password)?;
    let birthdate = parse_birthdate(form.birthdate)?;
    Ok(NewUser::new(name, birthdate, email, form.password))
}

/// Apply the same rules to whichever fields a patch supplies.
pub fn validate_patch(policy: &ValidationConfig, patch: &UserPatch) -> Result<(), ValidationError> {
    if let Some(name) = patch.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        check_name(policy, name)?;
    }
    if let Some(password) = patch.new_password.as_deref().filter(|p| !p.is_empty()) {
        check_password(policy, password)?;
    }
    Ok(())
}
