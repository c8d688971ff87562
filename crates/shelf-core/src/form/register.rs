use std::fmt;

use tracing::info;

use super::{CredentialForm, FormField, FormStatus};
use crate::error::ValidationError;

const REGISTER_FIELDS: &[FormField] = &[FormField::Username, FormField::Email, FormField::Password];

/// Register form model: username, email and password.
///
/// Each field's meaning is fixed by its slot. The email is not shape-checked
/// here, unlike the login identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterForm {
    username: String,
    email: String,
    password: String,
    focus: FormField,
    status: FormStatus,
}

impl Default for RegisterForm {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterForm {
    pub fn new() -> Self {
        Self {
            username: String::new(),
            email: String::new(),
            password: String::new(),
            focus: FormField::Username,
            status: FormStatus::default(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn set_username(&mut self, text: impl Into<String>) {
        self.username = text.into();
        self.status.clear_error();
    }

    pub fn set_email(&mut self, text: impl Into<String>) {
        self.email = text.into();
        self.status.clear_error();
    }

    pub fn set_password(&mut self, text: impl Into<String>) {
        self.password = text.into();
        self.status.clear_error();
    }

    /// Validates and builds the register payload. All three fields are required.
    pub fn submit(&mut self) -> Result<RegisterPayload, ValidationError> {
        self.check_required()?;
        let payload = RegisterPayload {
            username: self.username.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        };
        info!(username = %payload.username, email = %payload.email, "register submitted");
        Ok(payload)
    }
}

impl CredentialForm for RegisterForm {
    fn fields(&self) -> &'static [FormField] {
        REGISTER_FIELDS
    }

    fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Username => &self.username,
            FormField::Email => &self.email,
            FormField::Password => &self.password,
            FormField::Identifier => "",
        }
    }

    fn value_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Username => Some(&mut self.username),
            FormField::Email => Some(&mut self.email),
            FormField::Password => Some(&mut self.password),
            FormField::Identifier => None,
        }
    }

    fn focus(&self) -> FormField {
        self.focus
    }

    fn set_focus(&mut self, field: FormField) {
        if REGISTER_FIELDS.contains(&field) {
            self.focus = field;
        }
    }

    fn status(&self) -> &FormStatus {
        &self.status
    }

    fn status_mut(&mut self) -> &mut FormStatus {
        &mut self.status
    }
}

/// Completed registration handed to the auth service.
#[derive(Clone, PartialEq, Eq)]
pub struct RegisterPayload {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for RegisterPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterPayload")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
