//! View composition.
//!
//! Draws exactly one panel, chosen by matching on the active `Panel`, between
//! a header (site name and who is signed in) and a footer (key hints or the
//! latest notice). Rendering reads state and never mutates it.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use shelf_core::Panel;
use shelf_core::services::SessionStore;

use crate::panels::{home, login, register, welcome};
use crate::render_utils::{InputHint, render_hints, render_separator};
use crate::state::AppState;

pub fn render(app: &AppState, frame: &mut Frame) {
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_header(app, frame, header_area);

    let body = inset(body_area);
    match app.machine.panel() {
        Panel::Welcome => welcome::render(frame, body, app.variant, &app.search),
        Panel::LoginForm(form) => login::render(frame, body, form),
        Panel::RegisterForm(form) => register::render(frame, body, form),
        Panel::GuestHome => home::render(
            frame,
            body,
            app.variant,
            app.session.current(),
            &app.search,
        ),
    }

    render_footer(app, frame, footer_area);
}

fn inset(area: Rect) -> Rect {
    Rect::new(
        area.x + 2,
        area.y + 1,
        area.width.saturating_sub(4),
        area.height.saturating_sub(1),
    )
}

fn render_header(app: &AppState, frame: &mut Frame, area: Rect) {
    let title_area = Rect::new(area.x, area.y, area.width, 1);

    frame.render_widget(
        Paragraph::new(Span::styled(
            format!(" {}", app.variant.site_name()),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        title_area,
    );

    let who = match app.signed_in_as() {
        Some(username) => Span::styled(
            format!("Signed in as {username} "),
            Style::default().fg(Color::Green),
        ),
        None => Span::styled("Not signed in ", Style::default().fg(Color::DarkGray)),
    };
    frame.render_widget(
        Paragraph::new(Line::from(who)).alignment(Alignment::Right),
        title_area,
    );

    render_separator(frame, area, 1);
}

fn footer_hints(app: &AppState) -> Vec<InputHint<'static>> {
    if app.search.focused && app.has_search() {
        return vec![
            InputHint::new("Enter", "search"),
            InputHint::new("Esc", "done"),
        ];
    }
    match app.machine.panel() {
        Panel::Welcome => vec![
            InputHint::new("l", "login"),
            InputHint::new("r", "register"),
            InputHint::new("g", "guest"),
            InputHint::new("/", "search"),
            InputHint::new("q", "quit"),
        ],
        Panel::LoginForm(_) | Panel::RegisterForm(_) => {
            vec![InputHint::new("Ctrl+C", "quit")]
        }
        Panel::GuestHome => {
            let leave = if app.session.is_signed_in() {
                "log out"
            } else {
                "back"
            };
            vec![
                InputHint::new("/", "search"),
                InputHint::new("o", leave),
                InputHint::new("q", "quit"),
            ]
        }
    }
}

fn render_footer(app: &AppState, frame: &mut Frame, area: Rect) {
    if let Some(notice) = &app.notice {
        frame.render_widget(
            Paragraph::new(Span::styled(
                notice.as_str(),
                Style::default().fg(Color::Yellow),
            ))
            .alignment(Alignment::Center),
            area,
        );
        return;
    }
    render_hints(frame, area, &footer_hints(app), Color::Cyan);
}
