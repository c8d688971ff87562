//! Credential form models.
//!
//! Each form panel owns one of these while it is mounted. Fields are plain
//! strings replaced on every keystroke; checks happen only at submit time.
//!
//! - `login.rs`: identifier + password, classified on submit
//! - `register.rs`: username + email + password, no classification

mod login;
mod register;

use std::fmt;

pub use login::{LoginForm, LoginPayload};
pub use register::{RegisterForm, RegisterPayload};

use crate::error::{RemoteError, ValidationError};

/// Input slots across both forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    /// Login "username or email" field.
    Identifier,
    Username,
    Email,
    Password,
}

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            FormField::Identifier => "Username or email",
            FormField::Username => "Username",
            FormField::Email => "Email",
            FormField::Password => "Password",
        }
    }

    /// Secret fields are masked when rendered and redacted in logs.
    pub fn is_secret(self) -> bool {
        matches!(self, FormField::Password)
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Shared editing behaviour for the login and register forms.
///
/// Implementors provide field storage and focus; the provided methods
/// cover terminal-style editing, focus cycling and the required-field check.
pub trait CredentialForm {
    /// Fields in display and validation order.
    fn fields(&self) -> &'static [FormField];

    fn value(&self, field: FormField) -> &str;

    fn value_mut(&mut self, field: FormField) -> Option<&mut String>;

    fn focus(&self) -> FormField;

    fn set_focus(&mut self, field: FormField);

    fn status(&self) -> &FormStatus;

    fn status_mut(&mut self) -> &mut FormStatus;

    /// Appends a character to the focused field.
    fn push_char(&mut self, c: char) {
        let field = self.focus();
        if let Some(value) = self.value_mut(field) {
            value.push(c);
        }
        self.status_mut().clear_error();
    }

    /// Removes the last character of the focused field.
    fn pop_char(&mut self) {
        let field = self.focus();
        if let Some(value) = self.value_mut(field) {
            value.pop();
        }
        self.status_mut().clear_error();
    }

    fn focus_next(&mut self) {
        let fields = self.fields();
        let idx = position(fields, self.focus());
        self.set_focus(fields[(idx + 1) % fields.len()]);
    }

    fn focus_prev(&mut self) {
        let fields = self.fields();
        let idx = position(fields, self.focus());
        self.set_focus(fields[(idx + fields.len() - 1) % fields.len()]);
    }

    /// True when the focused field is the last one (Enter submits there).
    fn focus_is_last(&self) -> bool {
        self.fields().last() == Some(&self.focus())
    }

    /// First empty field in validation order.
    fn first_missing(&self) -> Option<FormField> {
        self.fields()
            .iter()
            .copied()
            .find(|field| self.value(*field).is_empty())
    }

    /// Checks that every field is non-empty.
    ///
    /// On failure the error is recorded for display and focus moves to the
    /// offending field. Field values are never touched.
    fn check_required(&mut self) -> Result<(), ValidationError> {
        match self.first_missing() {
            Some(field) => {
                let err = ValidationError::new(field);
                self.set_focus(field);
                self.status_mut().error = Some(err.to_string());
                Err(err)
            }
            None => Ok(()),
        }
    }
}

fn position(fields: &[FormField], field: FormField) -> usize {
    fields.iter().position(|f| *f == field).unwrap_or(0)
}

/// Submission status shared by both forms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormStatus {
    /// Message shown under the form (validation or remote failure).
    pub error: Option<String>,
    /// Informational message (e.g. "account created, log in").
    pub notice: Option<String>,
    /// A submission is with the auth service.
    pub pending: bool,
}

impl FormStatus {
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn mark_pending(&mut self) {
        self.pending = true;
        self.error = None;
        self.notice = None;
    }

    /// Records a remote failure. Field values are left as they are, and any
    /// notice raised while the submission was pending is dropped.
    pub fn fail(&mut self, err: &RemoteError) {
        self.pending = false;
        self.notice = None;
        self.error = Some(err.to_string());
    }
}
