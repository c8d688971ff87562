//! Login form panel.

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Color;
use shelf_core::LoginForm;
use tracing::debug;

use super::PanelUpdate;
use super::form::{handle_form_key, render_form};
use crate::effects::UiEffect;

pub fn handle_key(form: &mut LoginForm, key: KeyEvent) -> PanelUpdate {
    handle_form_key(form, key, |form| match form.submit() {
        Ok(payload) => Some(UiEffect::Login(payload)),
        Err(err) => {
            debug!(%err, "login refused");
            None
        }
    })
}

pub fn render(frame: &mut Frame, area: Rect, form: &LoginForm) {
    render_form(frame, area, form, "Log In", Color::Cyan);
}
