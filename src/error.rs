use std::fmt;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors surfaced to callers of the API clients and user flows.
///
/// The session store, guards and token injector never produce these; failures
/// only come from I/O, decoding, local validation, or the backend itself.
#[derive(Clone, Debug, Error)]
pub enum Error {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Request failed ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("Response error: {0}")]
    Parse(String),
    #[error("Request error: {0}")]
    Serialization(String),
    #[error("Invalid form: {0}")]
    Validation(ValidationErrors),
    #[error("not authenticated")]
    NotAuthenticated,
    #[error("forbidden: {0}")]
    Forbidden(String),
}

impl Error {
    /// HTTP status associated with the failure; network failures report `0`.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Network(_) | Self::Timeout(_) => Some(0),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// 400 and 422 are how the backend reports rejected payloads.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_)) || matches!(self.status(), Some(400 | 422))
    }
}

/// A single failing form field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every failing field of a submitted form, in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.errors.iter().any(|error| error.field == field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Converts into `Ok(())` when nothing failed.
    ///
    /// # Errors
    /// Returns `Error::Validation` carrying every recorded field error.
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.errors {
            if !first {
                formatter.write_str(", ")?;
            }
            write!(formatter, "{}: {}", error.field, error.message)?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_display_includes_status() {
        let err = Error::Http {
            status: 404,
            message: "Not found".to_string(),
        };
        assert_eq!(err.to_string(), "Request failed (404): Not found");
        assert!(err.is_not_found());
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn network_failures_report_status_zero() {
        assert_eq!(Error::Network("down".to_string()).status(), Some(0));
        assert_eq!(Error::Timeout("slow".to_string()).status(), Some(0));
        assert_eq!(Error::Parse("bad".to_string()).status(), None);
    }

    #[test]
    fn backend_rejections_count_as_validation() {
        for status in [400, 422] {
            let err = Error::Http {
                status,
                message: String::new(),
            };
            assert!(err.is_validation());
        }
        let err = Error::Http {
            status: 500,
            message: String::new(),
        };
        assert!(!err.is_validation());
    }

    #[test]
    fn validation_errors_collect_fields() {
        let mut errors = ValidationErrors::new();
        assert!(errors.clone().into_result().is_ok());

        errors.add("email", "is required");
        errors.add("password", "is required");

        assert_eq!(errors.len(), 2);
        assert!(errors.has("email"));
        assert!(!errors.has("name"));
        assert_eq!(
            errors.to_string(),
            "email: is required, password: is required"
        );

        let result = errors.into_result();
        assert!(matches!(result, Err(Error::Validation(_))));
    }
}
