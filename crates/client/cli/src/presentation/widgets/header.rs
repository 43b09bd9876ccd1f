//! Header widget with the location name and status line.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::presentation::Screen;

pub fn render(frame: &mut Frame, area: Rect, screen: &Screen) {
    let line = Line::from(vec![
        Span::styled(
            screen.title.as_str(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(screen.status.as_str(), Style::default().fg(Color::Gray)),
    ]);
    let paragraph = Paragraph::new(line)
        .alignment(Alignment::Left)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}
