use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::util::unicode;

use super::theme::Theme;

/// A centered popup rect of the given inner text width/height, clamped to
/// the available area.
pub(super) fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

/// Render a blocking modal with a message and a key hint. Used for both
/// the error dialog and the yes/no confirmation.
pub(super) fn render_modal(
    frame: &mut Frame,
    theme: &Theme,
    area: Rect,
    title: &str,
    message: &str,
    hint: &str,
    border: ratatui::style::Color,
) {
    let max_text = (area.width.saturating_sub(6)).max(20) as usize;
    let mut lines: Vec<Line> = message
        .split('\n')
        .map(|l| {
            Line::from(Span::styled(
                unicode::truncate_to_width(l, max_text),
                Style::default().fg(theme.text_bright).bg(theme.background),
            ))
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        hint,
        Style::default().fg(theme.dim).bg(theme.background),
    )));

    let text_width = lines
        .iter()
        .map(|l| l.spans.iter().map(|s| unicode::display_width(&s.content)).sum::<usize>())
        .max()
        .unwrap_or(0) as u16;
    let popup = centered_rect(area, text_width + 6, lines.len() as u16 + 2);

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", title),
            Style::default()
                .fg(border)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border).bg(theme.background))
        .style(Style::default().bg(theme.background));

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block).centered(), popup);
}
