//! Presentation layer used by the session loop.
//!
//! The loop talks to a [`Presentation`] only: it hands over the screen to
//! show and asks for input restricted to what the current mode allows. The
//! terminal implementation lives in [`terminal`]; tests drive the loop with
//! a scripted fake.
pub mod terminal;
pub mod ui;
pub mod widgets;

use adventure_core::{AllowedActions, Direction, ErrorReport};
use anyhow::Result;

use crate::input::{Choice, Command};

pub use terminal::TerminalPresenter;

/// Everything drawn on the main panel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Screen {
    pub title: String,
    /// Turn, gold and similar one-line facts.
    pub status: String,
    pub text: String,
    /// Outcome of the last action, shown under the text.
    pub notice: Option<String>,
}

impl Screen {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_notice(mut self, notice: Option<String>) -> Self {
        self.notice = notice;
        self
    }
}

/// What the footer asks of the player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Prompt {
    Commands(AllowedActions),
    Direction(Vec<Direction>),
    Npc(Vec<String>),
    Question(String),
    Error(ErrorReport),
}

pub trait Presentation {
    /// Replaces the screen shown behind every prompt.
    fn present_text(&mut self, screen: &Screen) -> Result<()>;

    /// Blocks until the player picks one of the `allowed` commands.
    fn wait_for_key(&mut self, allowed: AllowedActions) -> Result<Command>;

    fn choose_direction(&mut self, open: &[Direction]) -> Result<Choice<Direction>>;

    fn choose_npc(&mut self, names: &[String]) -> Result<Choice<usize>>;

    /// Yes/no dialog.
    fn confirm(&mut self, question: &str) -> Result<bool>;

    /// Shows an error and waits for acknowledgement.
    fn present_error(&mut self, report: &ErrorReport) -> Result<()>;
}
