//! Error popup drawn over the frame until the player acknowledges it.

use adventure_core::ErrorReport;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub fn render(frame: &mut Frame, area: Rect, report: &ErrorReport) {
    let lines = vec![
        Line::from(report.message.as_str()),
        Line::default(),
        Line::from(Span::styled(
            format!("Code {}", report.code),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from("Press any key"),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(Span::styled(
            report.title.as_str(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}
