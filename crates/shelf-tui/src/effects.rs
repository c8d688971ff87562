//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent calls into the collaborators only; the reducer never talks
//! to a service directly.

use shelf_core::{LoginPayload, RegisterPayload};

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Hand a login submission to the auth service.
    Login(LoginPayload),

    /// Hand a registration to the auth service.
    Register(RegisterPayload),

    /// Run a catalog search.
    Search { query: String },

    /// Fetch ratings and reviews for the hits of `query`.
    LoadReviews { query: String, isbns: Vec<String> },
}
