//! Declarative forms: a schema of fields with validators, the raw values a
//! user edits, and the errors produced when checking one against the other.

mod schema;
mod values;

pub use schema::{CrossCheck, FieldKind, FieldSpec, FormSchema, LookupKind};
pub use values::{FieldNumber, FieldValue, FormValues, decimal_text};

/// A validation failure, either tied to one field or to the whole form.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct FieldError {
    pub field: Option<&'static str>,
    pub message: String,
}

impl FieldError {
    pub fn field(name: &'static str, message: impl Into<String>) -> Self {
        Self {
            field: Some(name),
            message: message.into(),
        }
    }

    pub fn form(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{} invalid field(s)", .0.len())]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn for_field(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|error| error.field == Some(name))
            .map(|error| error.message.as_str())
    }

    /// Errors not tied to a single field.
    pub fn form_errors(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter().filter(|error| error.field.is_none())
    }

    /// The message shown in a toast when the form is rejected.
    pub fn first_message(&self) -> &str {
        self.0
            .first()
            .map_or("Please fix the errors in the form", |error| {
                error.message.as_str()
            })
    }
}

impl From<FieldError> for ValidationErrors {
    fn from(error: FieldError) -> Self {
        ValidationErrors(vec![error])
    }
}
