use std::fmt;

use tracing::info;

use super::{CredentialForm, FormField, FormStatus};
use crate::classify::{ClassifiedIdentifier, classify};
use crate::error::ValidationError;

const LOGIN_FIELDS: &[FormField] = &[FormField::Identifier, FormField::Password];

/// Login form model: one identifier field plus a password.
///
/// The identifier stays raw text until `submit`, where it is classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    identifier: String,
    password: String,
    focus: FormField,
    status: FormStatus,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            identifier: String::new(),
            password: String::new(),
            focus: FormField::Identifier,
            status: FormStatus::default(),
        }
    }

    /// Fresh form carrying an informational notice.
    pub fn with_notice(notice: impl Into<String>) -> Self {
        let mut form = Self::new();
        form.status.notice = Some(notice.into());
        form
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn set_identifier(&mut self, text: impl Into<String>) {
        self.identifier = text.into();
        self.status.clear_error();
    }

    pub fn set_password(&mut self, text: impl Into<String>) {
        self.password = text.into();
        self.status.clear_error();
    }

    /// Validates and builds the login payload.
    ///
    /// Both fields must be non-empty. The identifier is classified here and
    /// the tag travels with the payload. The panel is not changed.
    pub fn submit(&mut self) -> Result<LoginPayload, ValidationError> {
        self.check_required()?;
        let payload = LoginPayload {
            identifier: classify(&self.identifier),
            password: self.password.clone(),
        };
        info!(identifier = %payload.identifier, "login submitted");
        Ok(payload)
    }
}

impl CredentialForm for LoginForm {
    fn fields(&self) -> &'static [FormField] {
        LOGIN_FIELDS
    }

    fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Identifier => &self.identifier,
            FormField::Password => &self.password,
            FormField::Username | FormField::Email => "",
        }
    }

    fn value_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Identifier => Some(&mut self.identifier),
            FormField::Password => Some(&mut self.password),
            FormField::Username | FormField::Email => None,
        }
    }

    fn focus(&self) -> FormField {
        self.focus
    }

    fn set_focus(&mut self, field: FormField) {
        if LOGIN_FIELDS.contains(&field) {
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

/// Completed login submission handed to the auth service.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginPayload {
    pub identifier: ClassifiedIdentifier,
    pub password: String,
}

impl LoginPayload {
    /// The email side of the payload; empty when the identifier is a username.
    pub fn email(&self) -> &str {
        match &self.identifier {
            ClassifiedIdentifier::Email(email) => email,
            ClassifiedIdentifier::Username(_) => "",
        }
    }

    /// The username side of the payload; empty when the identifier is an email.
    pub fn username(&self) -> &str {
        match &self.identifier {
            ClassifiedIdentifier::Username(name) => name,
            ClassifiedIdentifier::Email(_) => "",
        }
    }
}

impl fmt::Debug for LoginPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginPayload")
            .field("email", &self.email())
            .field("username", &self.username())
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_form_is_empty_and_focuses_identifier() {
        let form = LoginForm::new();
        assert_eq!(form.identifier(), "");
        assert_eq!(form.password(), "");
        assert_eq!(form.focus(), FormField::Identifier);
        assert_eq!(form.status(), &FormStatus::default());
    }

    #[test]
    fn test_setters_replace_unconditionally() {
        let mut form = LoginForm::new();
        form.set_identifier("first");
        form.set_identifier("  second  ");
        form.set_password("pw");
        assert_eq!(form.identifier(), "  second  ");
        assert_eq!(form.password(), "pw");
    }

    #[test]
    fn test_submit_with_email_identifier() {
        let mut form = LoginForm::new();
        form.set_identifier("a@b.com");
        form.set_password("secret");

        let payload = form.submit().unwrap();
        assert_eq!(
            payload.identifier,
            ClassifiedIdentifier::Email("a@b.com".to_string())
        );
        assert_eq!(payload.email(), "a@b.com");
        assert_eq!(payload.username(), "");
        assert_eq!(payload.password, "secret");
    }

    #[test]
    fn test_submit_with_username_identifier() {
        let mut form = LoginForm::new();
        form.set_identifier("ann");
        form.set_password("secret");

        let payload = form.submit().unwrap();
        assert_eq!(payload.email(), "");
        assert_eq!(payload.username(), "ann");
    }

    #[test]
    fn test_submit_missing_identifier() {
        let mut form = LoginForm::new();
        form.set_password("secret");

        let err = form.submit().unwrap_err();
        assert_eq!(err.field, FormField::Identifier);
        assert_eq!(
            form.status().error.as_deref(),
            Some("Username or email is required")
        );
        assert_eq!(form.password(), "secret");
    }

    #[test]
    fn test_submit_missing_password_moves_focus() {
        let mut form = LoginForm::new();
        form.set_identifier("ann");

        let err = form.submit().unwrap_err();
        assert_eq!(err.field, FormField::Password);
        assert_eq!(form.focus(), FormField::Password);
        assert_eq!(form.identifier(), "ann");
    }

    #[test]
    fn test_whitespace_identifier_is_not_empty() {
        let mut form = LoginForm::new();
        form.set_identifier(" ");
        form.set_password("pw");

        let payload = form.submit().unwrap();
        assert_eq!(payload.username(), " ");
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut form = LoginForm::new();
        for c in "ann".chars() {
            form.push_char(c);
        }
        form.focus_next();
        for c in "pw!".chars() {
            form.push_char(c);
        }
        form.pop_char();

        assert_eq!(form.identifier(), "ann");
        assert_eq!(form.password(), "pw");
    }

    #[test]
    fn test_focus_cycles() {
        let mut form = LoginForm::new();
        form.focus_next();
        assert_eq!(form.focus(), FormField::Password);
        assert!(form.focus_is_last());
        form.focus_next();
        assert_eq!(form.focus(), FormField::Identifier);
        form.focus_prev();
        assert_eq!(form.focus(), FormField::Password);
    }

    #[test]
    fn test_editing_clears_error() {
        let mut form = LoginForm::new();
        let _ = form.submit();
        assert!(form.status().error.is_some());

        form.push_char('a');
        assert!(form.status().error.is_none());
    }

    #[test]
    fn test_foreign_field_focus_is_ignored() {
        let mut form = LoginForm::new();
        form.set_focus(FormField::Email);
        assert_eq!(form.focus(), FormField::Identifier);
    }

    #[test]
    fn test_payload_debug_redacts_password() {
        let mut form = LoginForm::new();
        form.set_identifier("ann");
        form.set_password("hunter2");
        let payload = form.submit().unwrap();

        let debug = format!("{payload:?}");
        assert!(debug.contains("ann"));
        assert!(!debug.contains("hunter2"));
    }
}
