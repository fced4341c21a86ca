//! Client-side form validation. Forms are checked before any request is sent;
//! every failing field is reported at once so the caller can flag them all.
//! The backend validates again and answers 400 on anything that slips through.

use super::{
    auth::types::{LoginRequest, RegisterRequest},
    sessions::types::SessionForm,
};
use crate::error::{Result, ValidationErrors};
use regex::Regex;
use secrecy::ExposeSecret;

pub const NAME_MIN_CHARS: usize = 3;
pub const NAME_MAX_CHARS: usize = 20;
pub const PASSWORD_MIN_CHARS: usize = 3;
pub const PASSWORD_MAX_CHARS: usize = 40;
pub const DESCRIPTION_MAX_CHARS: usize = 2000;

#[must_use]
pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").map_or(false, |re| re.is_match(email))
}

fn check_required(errors: &mut ValidationErrors, field: &'static str, value: &str) -> bool {
    if value.trim().is_empty() {
        errors.add(field, "is required");
        false
    } else {
        true
    }
}

fn check_length(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) {
    let length = value.chars().count();
    if length < min {
        errors.add(field, format!("must be at least {min} characters"));
    } else if length > max {
        errors.add(field, format!("must be at most {max} characters"));
    }
}

impl LoginRequest {
    /// # Errors
    /// Returns `Error::Validation` when the email or password is missing.
    pub fn validate(&self) -> Result<()> {
        let mut errors = ValidationErrors::new();
        check_required(&mut errors, "email", &self.email);
        check_required(&mut errors, "password", self.password.expose_secret());
        errors.into_result()
    }
}

impl RegisterRequest {
    /// # Errors
    /// Returns `Error::Validation` listing every invalid field.
    pub fn validate(&self) -> Result<()> {
        let mut errors = ValidationErrors::new();

        if check_required(&mut errors, "email", &self.email) && !valid_email(self.email.trim()) {
            errors.add("email", "must be a valid email address");
        }
        if check_required(&mut errors, "firstName", &self.first_name) {
            check_length(
                &mut errors,
                "firstName",
                self.first_name.trim(),
                NAME_MIN_CHARS,
                NAME_MAX_CHARS,
            );
        }
        if check_required(&mut errors, "lastName", &self.last_name) {
            check_length(
                &mut errors,
                "lastName",
                self.last_name.trim(),
                NAME_MIN_CHARS,
                NAME_MAX_CHARS,
            );
        }
        let password = self.password.expose_secret();
        if check_required(&mut errors, "password", password) {
            check_length(
                &mut errors,
                "password",
                password,
                PASSWORD_MIN_CHARS,
                PASSWORD_MAX_CHARS,
            );
        }

        errors.into_result()
    }
}

impl SessionForm {
    /// # Errors
    /// Returns `Error::Validation` listing every invalid field.
    pub fn validate(&self) -> Result<()> {
        let mut errors = ValidationErrors::new();

        check_required(&mut errors, "name", &self.name);
        if self.date.is_none() {
            errors.add("date", "is required");
        }
        if self.teacher_id.is_none() {
            errors.add("teacher_id", "is required");
        }
        if check_required(&mut errors, "description", &self.description)
            && self.description.chars().count() > DESCRIPTION_MAX_CHARS
        {
            errors.add(
                "description",
                format!("must be at most {DESCRIPTION_MAX_CHARS} characters"),
            );
        }

        errors.into_result()
    }
}
