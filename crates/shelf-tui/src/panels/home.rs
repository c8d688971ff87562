//! Home panel, reached as a guest or after a successful login.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use shelf_core::Action;
use shelf_core::config::Variant;
use shelf_core::services::Session;

use super::{PanelUpdate, search};
use crate::effects::UiEffect;
use crate::state::SearchState;

const ACCENT: Color = Color::Green;

pub fn handle_key(search: &mut SearchState, key: KeyEvent) -> PanelUpdate {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return PanelUpdate::stay();
    }
    match key.code {
        KeyCode::Char('/') => {
            search.focused = true;
            PanelUpdate::stay()
        }
        KeyCode::Char('o') | KeyCode::Esc => PanelUpdate::dispatch(Action::Logout),
        KeyCode::Char('q') => PanelUpdate::stay().with_ui_effects(vec![UiEffect::Quit]),
        _ => PanelUpdate::stay(),
    }
}

pub fn render(
    frame: &mut Frame,
    area: Rect,
    variant: Variant,
    session: Option<&Session>,
    search_state: &SearchState,
) {
    let [greeting_area, search_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);

    let lines = match session {
        Some(session) => vec![
            Line::from(Span::styled(
                format!("Welcome back, {}!", session.account.username),
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("Signed in since {}", session.started_at.format("%H:%M")),
                Style::default().fg(Color::DarkGray),
            )),
        ],
        None => vec![
            Line::from(Span::styled(
                format!("Browsing {} as a guest", variant.site_name()),
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                if variant.shows_reviews() {
                    "Search for a book to see its ratings and reviews."
                } else {
                    "Log in from the welcome page to make requests."
                },
                Style::default().fg(Color::DarkGray),
            )),
        ],
    };
    frame.render_widget(Paragraph::new(lines), greeting_area);

    search::render(frame, search_area, search_state, ACCENT);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logout_key() {
        let mut search = SearchState::default();
        let update = handle_key(
            &mut search,
            KeyEvent::new(KeyCode::Char('o'), KeyModifiers::NONE),
        );
        assert_eq!(update.action, Some(Action::Logout));
    }

    #[test]
    fn test_slash_focuses_search() {
        let mut search = SearchState::default();
        handle_key(
            &mut search,
            KeyEvent::new(KeyCode::Char('/'), KeyModifiers::NONE),
        );
        assert!(search.focused);
    }
}
