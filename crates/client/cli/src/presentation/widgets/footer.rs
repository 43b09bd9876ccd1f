//! Footer widget displaying the keys the current prompt accepts.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::input;
use crate::presentation::Prompt;

/// Render the footer panel with key bindings help.
pub fn render(frame: &mut Frame, area: Rect, prompt: &Prompt) {
    let paragraph = Paragraph::new(line(prompt)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn line(prompt: &Prompt) -> Line<'static> {
    let text = match prompt {
        Prompt::Commands(allowed) => input::available(*allowed)
            .map(|command| command.label())
            .collect::<Vec<_>>()
            .join(" | "),
        Prompt::Direction(open) => {
            let keys: Vec<String> = open
                .iter()
                .map(|direction| {
                    let name = direction.to_string();
                    format!("[{}]{}", name[..1].to_uppercase(), &name[1..])
                })
                .collect();
            format!("Go where? {} | [Esc] Back", keys.join(" | "))
        }
        Prompt::Npc(names) => {
            let choices: Vec<String> = names
                .iter()
                .enumerate()
                .map(|(index, name)| format!("[{}] {name}", index + 1))
                .collect();
            format!("Talk to whom? {} | [Esc] Back", choices.join(" | "))
        }
        Prompt::Question(question) => format!("{question} [Y/N]"),
        Prompt::Error(_) => "Press any key".to_string(),
    };
    Line::from(Span::raw(text))
}
