//! Story panel: location text followed by the outcome of the last action.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::presentation::Screen;

pub fn render(frame: &mut Frame, area: Rect, screen: &Screen) {
    let mut text = Text::from(screen.text.as_str());
    if let Some(notice) = &screen.notice {
        text.push_line(Line::default());
        for line in notice.lines() {
            text.push_line(Line::styled(line, Style::default().fg(Color::LightCyan)));
        }
    }
    let paragraph = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}
