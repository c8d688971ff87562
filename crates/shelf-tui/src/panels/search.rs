//! Catalog search box and results, shared by the welcome and home panels.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use shelf_core::RemoteError;
use shelf_core::services::{Book, BookReviews};
use tracing::debug;

use super::PanelUpdate;
use crate::common::truncate_with_ellipsis;
use crate::effects::UiEffect;
use crate::render_utils::{InputLine, render_input_line};
use crate::state::SearchState;

/// Keys while the search box has focus.
pub fn handle_key(search: &mut SearchState, key: KeyEvent) -> PanelUpdate {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => {
            search.focused = false;
            PanelUpdate::stay()
        }
        KeyCode::Enter => {
            if search.query.is_empty() {
                search.submitted = None;
                search.last_query = None;
                search.results.clear();
                search.error = None;
                search.reviews.clear();
                search.reviews_error = None;
                return PanelUpdate::stay();
            }
            let query = search.query.clone();
            search.submitted = Some(query.clone());
            PanelUpdate::stay().with_ui_effects(vec![UiEffect::Search { query }])
        }
        KeyCode::Backspace => {
            search.query.pop();
            PanelUpdate::stay()
        }
        KeyCode::Char(c) if !ctrl => {
            search.query.push(c);
            PanelUpdate::stay()
        }
        _ => PanelUpdate::stay(),
    }
}

/// Applies a catalog answer and returns whether it was taken. Answers for a
/// query other than the one most recently submitted are dropped.
pub fn apply_result(
    search: &mut SearchState,
    query: String,
    result: Result<Vec<Book>, RemoteError>,
) -> bool {
    if search.submitted.as_deref() != Some(query.as_str()) {
        debug!(%query, "stale search result dropped");
        return false;
    }
    search.submitted = None;
    search.reviews.clear();
    search.reviews_error = None;
    match result {
        Ok(books) => {
            search.results = books;
            search.error = None;
        }
        Err(err) => {
            search.results.clear();
            search.error = Some(err.to_string());
        }
    }
    search.last_query = Some(query);
    true
}

/// Applies ratings and reviews for the shown results. Dropped when they
/// belong to older results or a newer search is already out.
pub fn apply_reviews(
    search: &mut SearchState,
    query: &str,
    result: Result<Vec<BookReviews>, RemoteError>,
) {
    if search.is_pending() || search.last_query.as_deref() != Some(query) {
        debug!(%query, "stale reviews dropped");
        return;
    }
    match result {
        Ok(found) => {
            search.reviews = found;
            search.reviews_error = None;
        }
        Err(err) => {
            search.reviews.clear();
            search.reviews_error = Some(err.to_string());
        }
    }
}

fn book_line(book: &Book, width: usize) -> Line<'static> {
    let mut text = format!("{} by {}", book.title, book.author);
    if let Some(year) = book.year {
        text.push_str(&format!(" ({year})"));
    }
    Line::from(vec![
        Span::styled("• ", Style::default().fg(Color::DarkGray)),
        Span::raw(truncate_with_ellipsis(&text, width.saturating_sub(2))),
    ])
}

fn reviews_lines(book: &BookReviews, width: usize) -> Vec<Line<'static>> {
    let dim = Style::default().fg(Color::DarkGray);
    let rating = if book.rating.is_rated() {
        format!(
            "★ {:.2}/10 from {} rating(s)",
            book.rating.average, book.rating.count
        )
    } else {
        "Not rated yet".to_string()
    };
    let summary = format!("{rating} · {} review(s)", book.reviews.len());
    let mut lines = vec![Line::from(vec![
        Span::raw("  "),
        Span::styled(
            truncate_with_ellipsis(&summary, width.saturating_sub(2)),
            Style::default().fg(Color::Yellow),
        ),
    ])];
    if let Some(latest) = book.latest() {
        let quote = format!("\"{}\"", latest.comment);
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(
                truncate_with_ellipsis(&quote, width.saturating_sub(2)),
                dim.add_modifier(Modifier::ITALIC),
            ),
        ]));
    }
    lines
}

/// Draws the search box on the first row of `area` and results below it.
pub fn render(frame: &mut Frame, area: Rect, search: &SearchState, color: Color) {
    if area.height == 0 {
        return;
    }
    render_input_line(
        frame,
        Rect::new(area.x, area.y, area.width, 1),
        &InputLine {
            value: &search.query,
            placeholder: Some("search by title, author or ISBN (press /)"),
            prompt: "Search: ",
            focused: search.focused,
            color,
        },
    );

    let width = area.width as usize;
    let mut lines = Vec::new();
    if search.is_pending() {
        lines.push(Line::from(Span::styled(
            "Searching...",
            Style::default().fg(Color::Yellow),
        )));
    } else if let Some(error) = &search.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    } else if let Some(query) = &search.last_query {
        if search.results.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("No books match \"{query}\""),
                Style::default().fg(Color::DarkGray),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                format!("{} result(s) for \"{query}\"", search.results.len()),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )));
            for book in &search.results {
                lines.push(book_line(book, width));
                if let Some(reviews) = search.reviews_for(&book.isbn) {
                    lines.extend(reviews_lines(reviews, width));
                }
            }
            if let Some(error) = &search.reviews_error {
                lines.push(Line::from(Span::styled(
                    format!("Reviews unavailable: {error}"),
                    Style::default().fg(Color::Red),
                )));
            }
        }
    }

    let results_area = Rect::new(
        area.x,
        area.y + 1,
        area.width,
        area.height.saturating_sub(1),
    );
    frame.render_widget(Paragraph::new(lines), results_area);
}

#[cfg(test)]
mod tests {
    use shelf_core::services::RatingSummary;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn book(title: &str) -> Book {
        Book {
            isbn: title.to_string(),
            title: title.to_string(),
            author: "Someone".to_string(),
            year: None,
            publisher: None,
        }
    }

    #[test]
    fn test_enter_sends_query() {
        let mut search = SearchState {
            query: "dune".to_string(),
            focused: true,
            ..SearchState::default()
        };
        let update = handle_key(&mut search, key(KeyCode::Enter));
        assert_eq!(
            update.effects,
            vec![UiEffect::Search {
                query: "dune".to_string()
            }]
        );
        assert!(search.is_pending());
    }

    #[test]
    fn test_enter_on_empty_query_clears_results() {
        let mut search = SearchState {
            last_query: Some("dune".to_string()),
            results: vec![book("Dune")],
            ..SearchState::default()
        };
        let update = handle_key(&mut search, key(KeyCode::Enter));
        assert!(update.effects.is_empty());
        assert!(search.results.is_empty());
        assert!(!search.has_outcome());
    }

    #[test]
    fn test_esc_unfocuses_and_keeps_query() {
        let mut search = SearchState {
            query: "du".to_string(),
            focused: true,
            ..SearchState::default()
        };
        handle_key(&mut search, key(KeyCode::Esc));
        assert!(!search.focused);
        assert_eq!(search.query, "du");
    }

    #[test]
    fn test_apply_result_for_submitted_query() {
        let mut search = SearchState {
            submitted: Some("dune".to_string()),
            ..SearchState::default()
        };
        apply_result(&mut search, "dune".to_string(), Ok(vec![book("Dune")]));
        assert!(!search.is_pending());
        assert_eq!(search.results.len(), 1);
        assert_eq!(search.last_query.as_deref(), Some("dune"));
    }

    #[test]
    fn test_apply_result_drops_stale_query() {
        let mut search = SearchState {
            submitted: Some("hobbit".to_string()),
            ..SearchState::default()
        };
        let taken = apply_result(&mut search, "dune".to_string(), Ok(vec![book("Dune")]));
        assert!(!taken);
        assert!(search.results.is_empty());
        assert!(search.is_pending());
    }

    fn reviewed(isbn: &str, ratings: usize) -> BookReviews {
        BookReviews {
            rating: RatingSummary {
                isbn: isbn.to_string(),
                average: 7.5,
                count: ratings,
            },
            reviews: Vec::new(),
        }
    }

    #[test]
    fn test_apply_reviews_for_current_results() {
        let mut search = SearchState {
            submitted: Some("dune".to_string()),
            ..SearchState::default()
        };
        assert!(apply_result(&mut search, "dune".to_string(), Ok(vec![book("Dune")])));
        apply_reviews(&mut search, "dune", Ok(vec![reviewed("Dune", 2)]));
        assert_eq!(search.reviews_for("Dune").unwrap().rating.count, 2);
    }

    #[test]
    fn test_reviews_for_older_results_are_dropped() {
        let mut search = SearchState {
            last_query: Some("dune".to_string()),
            submitted: Some("hobbit".to_string()),
            results: vec![book("Dune")],
            ..SearchState::default()
        };
        apply_reviews(&mut search, "dune", Ok(vec![reviewed("Dune", 2)]));
        assert!(search.reviews.is_empty());

        search.submitted = None;
        apply_reviews(&mut search, "emma", Ok(vec![reviewed("Dune", 2)]));
        assert!(search.reviews.is_empty());
    }

    #[test]
    fn test_new_results_clear_old_reviews() {
        let mut search = SearchState {
            submitted: Some("emma".to_string()),
            reviews: vec![reviewed("Dune", 2)],
            reviews_error: Some("offline".to_string()),
            ..SearchState::default()
        };
        apply_result(&mut search, "emma".to_string(), Ok(vec![book("Emma")]));
        assert!(search.reviews.is_empty());
        assert_eq!(search.reviews_error, None);
    }

    #[test]
    fn test_review_failure_is_recorded() {
        let mut search = SearchState {
            last_query: Some("dune".to_string()),
            results: vec![book("Dune")],
            ..SearchState::default()
        };
        apply_reviews(&mut search, "dune", Err(RemoteError::new("reviews offline")));
        assert_eq!(search.reviews_error.as_deref(), Some("reviews offline"));
    }

    #[test]
    fn test_apply_result_error() {
        let mut search = SearchState {
            submitted: Some("dune".to_string()),
            results: vec![book("Old")],
            ..SearchState::default()
        };
        apply_result(
            &mut search,
            "dune".to_string(),
            Err(RemoteError::new("catalog offline")),
        );
        assert!(search.results.is_empty());
        assert_eq!(search.error.as_deref(), Some("catalog offline"));
    }
}
