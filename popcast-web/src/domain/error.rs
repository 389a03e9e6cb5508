use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;
use validator::ValidationErrors;

/// Key used for errors that belong to the whole form rather than one field.
pub(crate) const FORM_FIELD: &str = "form";

/// Field name to message, ordered by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct FormErrors(BTreeMap<String, String>);

impl FormErrors {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.insert(field, message);
        errors
    }

    /// Keeps the first message reported for a field.
    pub(crate) fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    /// Message for `field`, empty when the field is valid.
    pub(crate) fn get(&self, field: &str) -> &str {
        self.0.get(field).map(String::as_str).unwrap_or("")
    }

    pub(crate) fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    pub(crate) fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }

    /// First message, used for banners.
    pub(crate) fn first_message(&self) -> &str {
        self.0.values().next().map(String::as_str).unwrap_or("")
    }
}

impl From<ValidationErrors> for FormErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut form = FormErrors::new();
        for (field, field_errors) in errors.field_errors() {
            if let Some(error) = field_errors.first() {
                let message = error
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| format!("{field} is invalid"));
                form.insert(field.as_ref(), message);
            }
        }
        form
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub(crate) enum DomainError {
    #[error("validation failed: {0}")]
    Invalid(FormErrors),

    #[error("resource not found")]
    NotFound,

    #[error("not authorized")]
    Unauthorized,

    /// The backend refused the request; `message` is its `error`/`message` field.
    #[error("backend rejected request ({status}): {}", message.as_deref().unwrap_or("no message"))]
    Rejected {
        status: u16,
        message: Option<String>,
    },

    #[error("backend unavailable: {0}")]
    Unavailable(String),

    #[error("unexpected domain error: {0}")]
    Unexpected(String),
}

impl From<FormErrors> for DomainError {
    fn from(errors: FormErrors) -> Self {
        DomainError::Invalid(errors)
    }
}

impl DomainError {
    /// Text for an error banner: the backend message when there is one, else `fallback`.
    pub(crate) fn banner(&self, fallback: &str) -> String {
        match self {
            DomainError::Invalid(errors) if !errors.is_empty() => errors.first_message().to_string(),
            DomainError::Rejected {
                message: Some(message),
                ..
            } => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::{DomainError, FormErrors};

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 1, message = "Username is required"))]
        username: String,
    }

    #[test]
    fn first_message_per_field_wins() {
        let mut errors = FormErrors::new();
        errors.insert("title", "Title is required");
        errors.insert("title", "ignored");
        assert_eq!(errors.get("title"), "Title is required");
        assert_eq!(errors.get("content"), "");
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn validator_messages_are_carried_over() {
        let errors = Probe {
            username: String::new(),
        }
        .validate()
        .expect_err("must fail");
        let form = FormErrors::from(errors);
        assert_eq!(form.get("username"), "Username is required");
    }

    #[test]
    fn banner_prefers_backend_message() {
        let err = DomainError::Rejected {
            status: 409,
            message: Some("Username already exists".to_string()),
        };
        assert_eq!(err.banner("fallback"), "Username already exists");
        assert_eq!(DomainError::NotFound.banner("fallback"), "fallback");
    }
}
