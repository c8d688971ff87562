//! Panel state machine.
//!
//! The landing page shows exactly one panel at a time. The active panel is
//! a single enum value, and the form panels carry their form model inside
//! the variant, so two panels can never be active together and a form's
//! input is dropped the moment its panel is left.
//!
//! ```text
//! Welcome ──OpenLogin──────▶ LoginForm ──Close──▶ Welcome
//! Welcome ──OpenRegister───▶ RegisterForm ──Close──▶ Welcome
//! Welcome ──ProceedAsGuest─▶ GuestHome ──Logout──▶ Welcome
//! LoginForm ──LoginSucceeded──▶ GuestHome
//! RegisterForm ──RegisterSucceeded──▶ LoginForm (fresh, with notice)
//! ```
//!
//! Every other (panel, action) pair leaves the panel unchanged.

use std::fmt;

use tracing::debug;

use crate::form::{LoginForm, RegisterForm};

/// Notice shown on the login form after a successful registration.
pub const REGISTERED_NOTICE: &str = "Account created. Log in to continue.";

/// Discrete user actions that can move the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// "Login" button on the welcome panel.
    OpenLogin,
    /// "Register" button on the welcome panel.
    OpenRegister,
    /// "Proceed as Guest" on the welcome panel.
    ProceedAsGuest,
    /// "Close/Back" on a form panel.
    Close,
    /// Auth service accepted a login.
    LoginSucceeded,
    /// Auth service accepted a registration.
    RegisterSucceeded,
    /// Explicit sign-out from the home panel.
    Logout,
}

#[cfg(test)]
impl Action {
    pub(crate) fn all() -> &'static [Action] {
        &[
            Action::OpenLogin,
            Action::OpenRegister,
            Action::ProceedAsGuest,
            Action::Close,
            Action::LoginSucceeded,
            Action::RegisterSucceeded,
            Action::Logout,
        ]
    }
}

/// The active panel together with the state it owns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Welcome,
    LoginForm(LoginForm),
    RegisterForm(RegisterForm),
    GuestHome,
}

impl Panel {
    pub fn kind(&self) -> PanelKind {
        match self {
            Panel::Welcome => PanelKind::Welcome,
            Panel::LoginForm(_) => PanelKind::LoginForm,
            Panel::RegisterForm(_) => PanelKind::RegisterForm,
            Panel::GuestHome => PanelKind::GuestHome,
        }
    }
}

/// Data-free panel tag, for comparisons and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelKind {
    Welcome,
    LoginForm,
    RegisterForm,
    GuestHome,
}

impl PanelKind {
    #[cfg(test)]
    pub(crate) fn all() -> &'static [PanelKind] {
        &[
            PanelKind::Welcome,
            PanelKind::LoginForm,
            PanelKind::RegisterForm,
            PanelKind::GuestHome,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            PanelKind::Welcome => "welcome",
            PanelKind::LoginForm => "login",
            PanelKind::RegisterForm => "register",
            PanelKind::GuestHome => "home",
        }
    }
}

impl fmt::Display for PanelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of dispatching one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: PanelKind,
    pub to: PanelKind,
}

impl Transition {
    pub fn changed(self) -> bool {
        self.from != self.to
    }
}

/// Owns the active panel and applies the transition table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelStateMachine {
    panel: Panel,
}

impl PanelStateMachine {
    /// Starts on the welcome panel.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut Panel {
        &mut self.panel
    }

    pub fn kind(&self) -> PanelKind {
        self.panel.kind()
    }

    pub fn is_active(&self, kind: PanelKind) -> bool {
        self.kind() == kind
    }

    pub fn login_form_mut(&mut self) -> Option<&mut LoginForm> {
        match &mut self.panel {
            Panel::LoginForm(form) => Some(form),
            _ => None,
        }
    }

    pub fn register_form_mut(&mut self) -> Option<&mut RegisterForm> {
        match &mut self.panel {
            Panel::RegisterForm(form) => Some(form),
            _ => None,
        }
    }

    /// Applies one action. Unlisted (panel, action) pairs are no-ops.
    ///
    /// Replacing the panel value drops whatever form the old panel owned.
    pub fn dispatch(&mut self, action: Action) -> Transition {
        let from = self.kind();
        let next = match (from, action) {
            (PanelKind::Welcome, Action::OpenLogin) => Some(Panel::LoginForm(LoginForm::new())),
            (PanelKind::Welcome, Action::OpenRegister) => {
                Some(Panel::RegisterForm(RegisterForm::new()))
            }
            (PanelKind::Welcome, Action::ProceedAsGuest)
            | (PanelKind::LoginForm, Action::LoginSucceeded) => Some(Panel::GuestHome),
            (PanelKind::LoginForm | PanelKind::RegisterForm, Action::Close)
            | (PanelKind::GuestHome, Action::Logout) => Some(Panel::Welcome),
            (PanelKind::RegisterForm, Action::RegisterSucceeded) => {
                Some(Panel::LoginForm(LoginForm::with_notice(REGISTERED_NOTICE)))
            }
            _ => None,
        };

        let Some(next) = next else {
            debug!(panel = %from, ?action, "action ignored");
            return Transition { from, to: from };
        };

        self.panel = next;
        let to = self.kind();
        debug!(%from, %to, ?action, "panel transition");
        Transition { from, to }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{CredentialForm, FormField};

    fn machine_at(kind: PanelKind) -> PanelStateMachine {
        let mut machine = PanelStateMachine::new();
        match kind {
            PanelKind::Welcome => {}
            PanelKind::LoginForm => {
                machine.dispatch(Action::OpenLogin);
            }
            PanelKind::RegisterForm => {
                machine.dispatch(Action::OpenRegister);
            }
            PanelKind::GuestHome => {
                machine.dispatch(Action::ProceedAsGuest);
            }
        }
        assert_eq!(machine.kind(), kind);
        machine
    }

    fn expected(from: PanelKind, action: Action) -> PanelKind {
        match (from, action) {
            (PanelKind::Welcome, Action::OpenLogin)
            | (PanelKind::RegisterForm, Action::RegisterSucceeded) => PanelKind::LoginForm,
            (PanelKind::Welcome, Action::OpenRegister) => PanelKind::RegisterForm,
            (PanelKind::Welcome, Action::ProceedAsGuest)
            | (PanelKind::LoginForm, Action::LoginSucceeded) => PanelKind::GuestHome,
            (PanelKind::LoginForm | PanelKind::RegisterForm, Action::Close)
            | (PanelKind::GuestHome, Action::Logout) => PanelKind::Welcome,
            (other, _) => other,
        }
    }

    #[test]
    fn test_initial_panel_is_welcome() {
        let machine = PanelStateMachine::new();
        assert_eq!(machine.kind(), PanelKind::Welcome);
        assert_eq!(machine.panel(), &Panel::Welcome);
    }

    #[test]
    fn test_full_transition_table() {
        for &from in PanelKind::all() {
            for &action in Action::all() {
                let mut machine = machine_at(from);
                let transition = machine.dispatch(action);
                let to = expected(from, action);
                assert_eq!(transition, Transition { from, to }, "{from} + {action:?}");
                assert_eq!(machine.kind(), to);
            }
        }
    }

    #[test]
    fn test_login_then_close_returns_to_welcome_with_fresh_form() {
        let mut machine = PanelStateMachine::new();
        machine.dispatch(Action::OpenLogin);
        let form = machine.login_form_mut().unwrap();
        form.set_identifier("ann");
        form.set_password("secret");

        let transition = machine.dispatch(Action::Close);
        assert!(transition.changed());
        assert_eq!(machine.panel(), &Panel::Welcome);

        machine.dispatch(Action::OpenLogin);
        let form = machine.login_form_mut().unwrap();
        assert_eq!(form, &LoginForm::new());
    }

    #[test]
    fn test_register_form_discarded_on_close() {
        let mut machine = PanelStateMachine::new();
        machine.dispatch(Action::OpenRegister);
        machine.register_form_mut().unwrap().set_username("ann");
        machine.dispatch(Action::Close);
        machine.dispatch(Action::OpenRegister);

        assert_eq!(machine.register_form_mut().unwrap().username(), "");
    }

    #[test]
    fn test_ignored_action_keeps_form_state() {
        let mut machine = machine_at(PanelKind::LoginForm);
        machine.login_form_mut().unwrap().set_identifier("ann");

        let transition = machine.dispatch(Action::OpenRegister);
        assert!(!transition.changed());
        assert_eq!(machine.login_form_mut().unwrap().identifier(), "ann");
    }

    #[test]
    fn test_exactly_one_panel_active() {
        let script = [
            Action::OpenLogin,
            Action::OpenRegister,
            Action::Close,
            Action::OpenRegister,
            Action::ProceedAsGuest,
            Action::RegisterSucceeded,
            Action::LoginSucceeded,
            Action::Close,
            Action::Logout,
            Action::ProceedAsGuest,
            Action::Close,
            Action::Logout,
        ];
        let mut machine = PanelStateMachine::new();
        for action in script {
            machine.dispatch(action);
            let active = PanelKind::all()
                .iter()
                .filter(|kind| machine.is_active(**kind))
                .count();
            assert_eq!(active, 1);
        }
    }

    #[test]
    fn test_register_success_opens_login_with_notice() {
        let mut machine = machine_at(PanelKind::RegisterForm);
        machine.dispatch(Action::RegisterSucceeded);

        let form = machine.login_form_mut().unwrap();
        assert_eq!(form.status().notice.as_deref(), Some(REGISTERED_NOTICE));
        assert_eq!(form.identifier(), "");
        assert_eq!(form.focus(), FormField::Identifier);
    }

    #[test]
    fn test_guest_home_only_leaves_on_logout() {
        let mut machine = machine_at(PanelKind::GuestHome);
        for action in [
            Action::OpenLogin,
            Action::OpenRegister,
            Action::ProceedAsGuest,
            Action::Close,
        ] {
            assert!(!machine.dispatch(action).changed());
        }
        assert!(machine.dispatch(Action::Logout).changed());
        assert_eq!(machine.kind(), PanelKind::Welcome);
    }

    #[test]
    fn test_machine_is_reenterable() {
        let mut machine = PanelStateMachine::new();
        for _ in 0..3 {
            machine.dispatch(Action::OpenLogin);
            machine.dispatch(Action::Close);
            machine.dispatch(Action::ProceedAsGuest);
            machine.dispatch(Action::Logout);
        }
        assert_eq!(machine.kind(), PanelKind::Welcome);
    }
}
