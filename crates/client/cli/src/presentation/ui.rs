//! Frame layout for the CLI.
//!
//! The frame is a header with the location name and status line, the story
//! panel, and a footer with the current prompt. Errors are drawn as a popup
//! over everything else.
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use super::widgets::{footer, header, popup, story};
use super::{Prompt, Screen};

pub const HEADER_HEIGHT: u16 = 3;
pub const FOOTER_HEIGHT: u16 = 3;

pub fn render_frame(frame: &mut Frame, screen: &Screen, prompt: &Prompt) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(frame.area());

    header::render(frame, chunks[0], screen);
    story::render(frame, chunks[1], screen);
    footer::render(frame, chunks[2], prompt);

    if let Prompt::Error(report) = prompt {
        popup::render(frame, centered_rect(60, 30, frame.area()), report);
    }
}

/// A rectangle of the given percentage size centred in `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use adventure_core::{AllowedActions, ErrorReport};
    use ratatui::{Terminal, backend::TestBackend};

    fn rendered(screen: &Screen, prompt: &Prompt) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).expect("test backend");
        terminal
            .draw(|frame| render_frame(frame, screen, prompt))
            .expect("draws");
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn popup_sits_inside_the_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(60, 30, area);
        assert_eq!(popup, Rect::new(20, 14, 60, 12));
    }

    #[test]
    fn map_screen_shows_text_and_commands() {
        let screen = Screen::new("Leafy Glade", "Sunlight falls through the leaves.")
            .with_status("Turn 3");
        let text = rendered(
            &screen,
            &Prompt::Commands(AllowedActions::MOVE | AllowedActions::QUIT),
        );
        assert!(text.contains("Leafy Glade"));
        assert!(text.contains("Turn 3"));
        assert!(text.contains("Sunlight falls through the leaves."));
        assert!(text.contains("[M]ove"));
        assert!(text.contains("[Q]uit"));
        assert!(!text.contains("[F]ight"));
    }

    #[test]
    fn errors_show_title_message_and_code() {
        let report = ErrorReport::new("Datafile Error!", "Unable to open MAP .idx file.", -30);
        let text = rendered(&Screen::default(), &Prompt::Error(report));
        assert!(text.contains("Datafile Error!"));
        assert!(text.contains("Unable to open MAP .idx"));
        assert!(text.contains("-30"));
    }
}
