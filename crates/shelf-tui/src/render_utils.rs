//! Shared rendering helpers for panels.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::common::truncate_start_with_ellipsis;

/// Centers a box of at most `width` x `height` inside `area`.
pub fn calculate_panel_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Clears `area` and draws a titled border. Returns the inner area.
pub fn render_panel_container(frame: &mut Frame, area: Rect, title: &str, color: Color) -> Rect {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(format!(" {title} "))
        .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// Key hint shown in the footer: "Enter submit • Esc back".
pub struct InputHint<'a> {
    pub key: &'a str,
    pub action: &'a str,
}

impl<'a> InputHint<'a> {
    pub fn new(key: &'a str, action: &'a str) -> Self {
        Self { key, action }
    }
}

/// A prompt-style input line: "> <text>█".
pub struct InputLine<'a> {
    /// Text as it should be displayed (already masked for secrets).
    pub value: &'a str,
    pub placeholder: Option<&'a str>,
    pub prompt: &'a str,
    pub focused: bool,
    pub color: Color,
}

pub fn render_input_line(frame: &mut Frame, area: Rect, input: &InputLine<'_>) {
    let is_placeholder = input.value.is_empty() && input.placeholder.is_some();
    let prompt_width = u16::try_from(input.prompt.len()).unwrap_or(u16::MAX);
    let max_text_width = area.width.saturating_sub(prompt_width + 1) as usize;

    let prompt_color = if input.focused {
        input.color
    } else {
        Color::DarkGray
    };
    let mut spans = vec![Span::styled(input.prompt, Style::default().fg(prompt_color))];
    let cursor = Span::styled("█", Style::default().fg(input.color));

    if is_placeholder {
        if input.focused {
            spans.push(cursor);
        }
        let text = truncate_start_with_ellipsis(input.placeholder.unwrap_or(""), max_text_width);
        spans.push(Span::styled(text, Style::default().fg(Color::DarkGray)));
    } else {
        let text = truncate_start_with_ellipsis(input.value, max_text_width);
        let text_color = if input.focused {
            Color::White
        } else {
            Color::Gray
        };
        spans.push(Span::styled(text, Style::default().fg(text_color)));
        if input.focused {
            spans.push(cursor);
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Renders a centered line of key hints on the last row of `area`.
pub fn render_hints(frame: &mut Frame, area: Rect, hints: &[InputHint], highlight: Color) {
    if area.height == 0 {
        return;
    }
    let hints_area = Rect::new(area.x, area.y + area.height - 1, area.width, 1);

    let mut spans = Vec::new();
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(highlight)));
        spans.push(Span::styled(
            format!(" {}", hint.action),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let para = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(para, hints_area);
}

/// Horizontal rule at `y_offset` rows into `area`.
pub fn render_separator(frame: &mut Frame, area: Rect, y_offset: u16) {
    if y_offset >= area.height {
        return;
    }
    let separator = "─".repeat(area.width as usize);
    let separator_area = Rect::new(area.x, area.y + y_offset, area.width, 1);
    frame.render_widget(
        Paragraph::new(Span::styled(separator, Style::default().fg(Color::DarkGray))),
        separator_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_area_is_centered() {
        let area = Rect::new(0, 0, 80, 24);
        let panel = calculate_panel_area(area, 40, 10);
        assert_eq!(panel, Rect::new(20, 7, 40, 10));
    }

    #[test]
    fn test_panel_area_clamps_to_small_terminal() {
        let area = Rect::new(0, 2, 30, 6);
        let panel = calculate_panel_area(area, 40, 10);
        assert_eq!(panel.width, 28);
        assert_eq!(panel.height, 6);
        assert_eq!(panel.y, 2);
    }
}
