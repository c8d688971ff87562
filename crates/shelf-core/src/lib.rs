//! Core Shelf library (panel state machine, forms, classifier, services, config).

pub mod classify;
pub mod config;
pub mod error;
pub mod form;
pub mod logging;
pub mod panel;
pub mod services;

pub use classify::{ClassifiedIdentifier, classify};
pub use error::{RemoteError, ValidationError};
pub use form::{FormField, LoginForm, LoginPayload, RegisterForm, RegisterPayload};
pub use panel::{Action, Panel, PanelKind, PanelStateMachine, Transition};
