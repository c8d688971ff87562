//! Panel key handlers and renderers.
//!
//! Each panel owns its key handling and its drawing. Key handlers never
//! change the active panel themselves: they return a `PanelUpdate` naming
//! the action to dispatch (if any) plus effects for the runtime.
//!
//! ## Module Structure
//!
//! - `welcome.rs`: Login / Register / Guest buttons and the catalog search
//! - `form.rs`: editing keys and drawing shared by both credential forms
//! - `login.rs`: login form panel
//! - `register.rs`: register form panel
//! - `home.rs`: guest / signed-in home panel
//! - `search.rs`: search box and results list

pub mod form;
pub mod home;
pub mod login;
pub mod register;
pub mod search;
pub mod welcome;

use shelf_core::Action;

use crate::effects::UiEffect;

/// Update returned by panel key handlers.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PanelUpdate {
    pub action: Option<Action>,
    pub effects: Vec<UiEffect>,
}

impl PanelUpdate {
    pub fn stay() -> Self {
        Self::default()
    }

    pub fn dispatch(action: Action) -> Self {
        Self {
            action: Some(action),
            effects: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_ui_effects(mut self, effects: Vec<UiEffect>) -> Self {
        self.effects = effects;
        self
    }
}
