//! Terminal setup/teardown and the crossterm-backed [`Presentation`].
use std::io::{self, Stdout};

use adventure_core::{AllowedActions, Direction, ErrorReport};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use super::{Presentation, Prompt, Screen, ui};
use crate::input::{self, Choice, Command};

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

pub fn init() -> Result<Tui> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    Ok(terminal)
}

pub fn restore() -> Result<()> {
    execute!(io::stdout(), LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}

pub struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = restore();
    }
}

/// Draws screens with ratatui and reads keys with crossterm.
pub struct TerminalPresenter {
    terminal: Tui,
    screen: Screen,
}

impl TerminalPresenter {
    pub fn new(terminal: Tui) -> Self {
        Self {
            terminal,
            screen: Screen::default(),
        }
    }

    fn draw(&mut self, prompt: &Prompt) -> Result<()> {
        let screen = &self.screen;
        self.terminal
            .draw(|frame| ui::render_frame(frame, screen, prompt))?;
        Ok(())
    }

    /// Redraws with `prompt` and polls keys until `accept` maps one.
    fn prompt<T>(&mut self, prompt: Prompt, accept: impl Fn(KeyEvent) -> Option<T>) -> Result<T> {
        self.draw(&prompt)?;
        loop {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(value) = accept(key) {
                        return Ok(value);
                    }
                }
                Event::Resize(_, _) => self.draw(&prompt)?,
                _ => {}
            }
        }
    }
}

impl Presentation for TerminalPresenter {
    fn present_text(&mut self, screen: &Screen) -> Result<()> {
        self.screen = screen.clone();
        Ok(())
    }

    fn wait_for_key(&mut self, allowed: AllowedActions) -> Result<Command> {
        self.prompt(Prompt::Commands(allowed), |key| input::command_for(key, allowed))
    }

    fn choose_direction(&mut self, open: &[Direction]) -> Result<Choice<Direction>> {
        self.prompt(Prompt::Direction(open.to_vec()), |key| {
            input::direction_for(key, open)
        })
    }

    fn choose_npc(&mut self, names: &[String]) -> Result<Choice<usize>> {
        let count = names.len();
        self.prompt(Prompt::Npc(names.to_vec()), |key| input::npc_for(key, count))
    }

    fn confirm(&mut self, question: &str) -> Result<bool> {
        self.prompt(Prompt::Question(question.to_string()), input::answer_for)
    }

    fn present_error(&mut self, report: &ErrorReport) -> Result<()> {
        self.prompt(Prompt::Error(report.clone()), |_| Some(()))
    }
}
