//! Welcome panel: the three entry buttons plus the catalog search.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use shelf_core::Action;
use shelf_core::config::Variant;

use super::{PanelUpdate, search};
use crate::effects::UiEffect;
use crate::state::SearchState;

const ACCENT: Color = Color::Cyan;

pub fn handle_key(search: &mut SearchState, key: KeyEvent) -> PanelUpdate {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return PanelUpdate::stay();
    }
    match key.code {
        KeyCode::Char('l') => PanelUpdate::dispatch(Action::OpenLogin),
        KeyCode::Char('r') => PanelUpdate::dispatch(Action::OpenRegister),
        KeyCode::Char('g') => PanelUpdate::dispatch(Action::ProceedAsGuest),
        KeyCode::Char('/') => {
            search.focused = true;
            PanelUpdate::stay()
        }
        KeyCode::Char('q') | KeyCode::Esc => {
            PanelUpdate::stay().with_ui_effects(vec![UiEffect::Quit])
        }
        _ => PanelUpdate::stay(),
    }
}

fn button(key: &'static str, label: &'static str) -> Vec<Span<'static>> {
    vec![
        Span::styled("[", Style::default().fg(Color::DarkGray)),
        Span::styled(key, Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
        Span::styled("] ", Style::default().fg(Color::DarkGray)),
        Span::raw(label),
    ]
}

pub fn render(frame: &mut Frame, area: Rect, variant: Variant, search_state: &SearchState) {
    let [headline_area, tagline_area, buttons_area, search_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Length(2),
        Constraint::Min(0),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(Span::styled(
            variant.headline(),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        headline_area,
    );
    frame.render_widget(
        Paragraph::new(variant.tagline())
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        tagline_area,
    );

    let mut spans = button("l", "Login");
    spans.push(Span::raw("    "));
    spans.extend(button("r", "Register"));
    spans.push(Span::raw("    "));
    spans.extend(button("g", "Proceed as Guest"));
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        buttons_area,
    );

    search::render(frame, search_area, search_state, ACCENT);
}
