//! Error types surfaced to the landing page forms.

use thiserror::Error;

use crate::form::FormField;

/// A required field was empty at submit time.
///
/// The submission is refused locally and the form stays open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{} is required", field.label())]
pub struct ValidationError {
    pub field: FormField,
}

impl ValidationError {
    pub fn new(field: FormField) -> Self {
        Self { field }
    }
}

/// A collaborator (auth, catalog) call failed.
///
/// The form that issued the call keeps its fields when this comes back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{cause}")]
pub struct RemoteError {
    pub cause: String,
}

impl RemoteError {
    pub fn new(cause: impl Into<String>) -> Self {
        Self {
            cause: cause.into(),
        }
    }
}
