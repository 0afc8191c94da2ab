//! Hover popup showing the status text.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::constants;
use crate::theme;

/// Render the popup just below the panel row, sized to the text.
pub fn render(frame: &mut Frame, app: &App, anchor: Rect) {
    let area = frame.area();
    let text = app
        .tray
        .current
        .as_ref()
        .map_or(constants::MSG_WAITING, |s| s.hover_text.as_str());

    let lines: Vec<&str> = text.lines().collect();
    let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    #[allow(clippy::cast_possible_truncation)]
    let width = ((longest as u16).saturating_add(4)).clamp(24, area.width.max(24));
    #[allow(clippy::cast_possible_truncation)]
    let height = (lines.len() as u16).saturating_add(2).max(3);

    let y = anchor.y.saturating_add(anchor.height);
    let popup = Rect {
        x: anchor.x.saturating_add(1),
        y,
        width: width.min(area.width.saturating_sub(anchor.x.saturating_add(1))),
        height: height.min(area.height.saturating_sub(y)),
    };

    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER_FOCUSED))
        .title(Span::styled(
            constants::TITLE_HOVER,
            Style::default()
                .fg(theme::ACCENT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        ));

    // Left-aligned, one terminal cell per character: the status output
    // keeps its column layout.
    let body: Vec<Line> = lines
        .into_iter()
        .map(|l| Line::from(Span::styled(l, Style::default().fg(theme::TEXT_PRIMARY))))
        .collect();

    frame.render_widget(
        Paragraph::new(body).block(block).alignment(Alignment::Left),
        popup,
    );
}
