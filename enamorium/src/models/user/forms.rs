use email_address::EmailAddress;
use serde::Deserialize;

use crate::constants::{MIN_NAME_LENGTH, MIN_PASSWORD_LENGTH};
use crate::errors::EnamoriumError;

#[derive(Deserialize, Debug, Clone)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), EnamoriumError> {
        validate_name(&self.name)?;
        validate_email(&self.email)?;
        validate_password(&self.password)
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), EnamoriumError> {
        validate_email(&self.email)?;
        validate_password(&self.password)
    }
}

fn invalid(field: &str, message: String) -> EnamoriumError {
    EnamoriumError::ValidationError((field.to_string(), message))
}

fn validate_name(name: &str) -> Result<(), EnamoriumError> {
    if name.trim().chars().count() < MIN_NAME_LENGTH {
        return Err(invalid(
            "name",
            format!("must be at least {} characters", MIN_NAME_LENGTH),
        ));
    }

    Ok(())
}

fn validate_email(email: &str) -> Result<(), EnamoriumError> {
    if !EmailAddress::is_valid(email.trim()) {
        return Err(invalid("email", "is invalid".to_string()));
    }

    Ok(())
}

fn validate_password(password: &str) -> Result<(), EnamoriumError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(invalid(
            "password",
            format!("must be at least {} characters", MIN_PASSWORD_LENGTH),
        ));
    }

    Ok(())
}
