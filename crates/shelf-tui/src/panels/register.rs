//! Register form panel.

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Color;
use shelf_core::RegisterForm;
use tracing::debug;

use super::PanelUpdate;
use super::form::{handle_form_key, render_form};
use crate::effects::UiEffect;

pub fn handle_key(form: &mut RegisterForm, key: KeyEvent) -> PanelUpdate {
    handle_form_key(form, key, |form| match form.submit() {
        Ok(payload) => Some(UiEffect::Register(payload)),
        Err(err) => {
            debug!(%err, "registration refused");
            None
        }
    })
}

pub fn render(frame: &mut Frame, area: Rect, form: &RegisterForm) {
    render_form(frame, area, form, "Create Account", Color::Magenta);
}
