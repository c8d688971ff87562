//! Editing keys and drawing shared by the login and register panels.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use shelf_core::Action;
use shelf_core::form::{CredentialForm, FormField};

use super::PanelUpdate;
use crate::common::mask_secret;
use crate::effects::UiEffect;
use crate::render_utils::{
    InputHint, InputLine, calculate_panel_area, render_hints, render_input_line,
    render_panel_container, render_separator,
};

/// Shown when Enter is pressed while a submission is still out.
pub const SUBMIT_IN_PROGRESS: &str = "Submission in progress...";

const FORM_WIDTH: u16 = 52;

/// Handles one key on a credential form.
///
/// `submit` validates the form and builds the effect for the runtime; it
/// returns `None` when validation failed (the form has already recorded
/// the error).
pub fn handle_form_key<F, S>(form: &mut F, key: KeyEvent, submit: S) -> PanelUpdate
where
    F: CredentialForm,
    S: FnOnce(&mut F) -> Option<UiEffect>,
{
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => PanelUpdate::dispatch(Action::Close),
        KeyCode::Tab | KeyCode::Down => {
            form.focus_next();
            PanelUpdate::stay()
        }
        KeyCode::BackTab | KeyCode::Up => {
            form.focus_prev();
            PanelUpdate::stay()
        }
        KeyCode::Enter if !form.focus_is_last() => {
            form.focus_next();
            PanelUpdate::stay()
        }
        KeyCode::Enter => {
            if form.status().pending {
                form.status_mut().notice = Some(SUBMIT_IN_PROGRESS.to_string());
                return PanelUpdate::stay();
            }
            match submit(form) {
                Some(effect) => {
                    form.status_mut().mark_pending();
                    PanelUpdate::stay().with_ui_effects(vec![effect])
                }
                None => PanelUpdate::stay(),
            }
        }
        KeyCode::Backspace => {
            form.pop_char();
            PanelUpdate::stay()
        }
        KeyCode::Char(c) if !ctrl => {
            form.push_char(c);
            PanelUpdate::stay()
        }
        _ => PanelUpdate::stay(),
    }
}

fn placeholder(field: FormField) -> &'static str {
    match field {
        FormField::Identifier => "username or you@example.com",
        FormField::Username => "pick a username",
        FormField::Email => "you@example.com",
        FormField::Password => "password",
    }
}

/// Draws a credential form as a centered box: one label + input per field,
/// a status line, and key hints.
pub fn render_form<F: CredentialForm>(
    frame: &mut Frame,
    area: Rect,
    form: &F,
    title: &str,
    color: Color,
) {
    let fields = form.fields();
    // label + input per field, separator, status, hints, borders
    let height = fields.len() as u16 * 2 + 5;
    let popup = calculate_panel_area(area, FORM_WIDTH, height);
    let inner = render_panel_container(frame, popup, title, color);

    let mut y = inner.y;
    for field in fields {
        if y + 1 >= inner.y + inner.height {
            break;
        }
        let focused = form.focus() == *field;
        let label_style = if focused {
            Style::default().fg(color)
        } else {
            Style::default().fg(Color::Gray)
        };
        frame.render_widget(
            Paragraph::new(Span::styled(field.label(), label_style)),
            Rect::new(inner.x, y, inner.width, 1),
        );

        let raw = form.value(*field);
        let shown = if field.is_secret() {
            mask_secret(raw)
        } else {
            raw.to_string()
        };
        render_input_line(
            frame,
            Rect::new(inner.x, y + 1, inner.width, 1),
            &InputLine {
                value: &shown,
                placeholder: Some(placeholder(*field)),
                prompt: "> ",
                focused,
                color,
            },
        );
        y += 2;
    }

    render_separator(frame, inner, y - inner.y);

    let status = form.status();
    let status_line = if let Some(error) = &status.error {
        Some(Span::styled(error.as_str(), Style::default().fg(Color::Red)))
    } else if let Some(notice) = &status.notice {
        Some(Span::styled(notice.as_str(), Style::default().fg(Color::Green)))
    } else if status.pending {
        Some(Span::styled(
            "Submitting...",
            Style::default().fg(Color::Yellow),
        ))
    } else {
        None
    };
    if let Some(line) = status_line
        && y + 1 < inner.y + inner.height
    {
        frame.render_widget(
            Paragraph::new(line),
            Rect::new(inner.x, y + 1, inner.width, 1),
        );
    }

    let hints = [
        InputHint::new("Tab", "next field"),
        InputHint::new("Enter", "submit"),
        InputHint::new("Esc", "back"),
    ];
    render_hints(frame, inner, &hints, color);
}
