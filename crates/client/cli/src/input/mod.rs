//! Input processing for the CLI client.
//!
//! This module owns the keyboard-to-command mapping so the session loop can
//! stay agnostic about concrete key bindings or `crossterm` events. Every
//! lookup takes the set of actions currently allowed; keys outside it map to
//! nothing and the caller keeps waiting.

use adventure_core::{AllowedActions, Direction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A player command on the map screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Move,
    Talk,
    Fight,
    Loot,
    Withdraw,
    Rest,
    Barter,
    Player,
    Quit,
    Debug,
    Confirm,
    Cancel,
}

impl Command {
    /// The action flag that must be allowed for this command.
    pub const fn action(self) -> AllowedActions {
        match self {
            Self::Move => AllowedActions::MOVE,
            Self::Talk => AllowedActions::TALK,
            Self::Fight => AllowedActions::FIGHT,
            Self::Loot => AllowedActions::LOOT,
            Self::Withdraw => AllowedActions::WITHDRAW,
            Self::Rest => AllowedActions::REST,
            Self::Barter => AllowedActions::BARTER,
            Self::Player => AllowedActions::PLAYER,
            Self::Quit => AllowedActions::QUIT,
            Self::Debug => AllowedActions::DEBUG,
            Self::Confirm => AllowedActions::CONFIRM,
            Self::Cancel => AllowedActions::CANCEL,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Move => "[M]ove",
            Self::Talk => "[T]alk",
            Self::Fight => "[F]ight",
            Self::Loot => "[L]oot",
            Self::Withdraw => "[W]ithdraw",
            Self::Rest => "[R]est",
            Self::Barter => "[B]arter",
            Self::Player => "[P]layer",
            Self::Quit => "[Q]uit",
            Self::Debug => "[/] Debug",
            Self::Confirm => "[Enter] Continue",
            Self::Cancel => "[Esc] Back",
        }
    }

    pub const ALL: [Command; 12] = [
        Self::Move,
        Self::Talk,
        Self::Fight,
        Self::Loot,
        Self::Withdraw,
        Self::Rest,
        Self::Barter,
        Self::Player,
        Self::Quit,
        Self::Debug,
        Self::Confirm,
        Self::Cancel,
    ];
}

/// Commands whose action is in `allowed`, in menu order.
pub fn available(allowed: AllowedActions) -> impl Iterator<Item = Command> {
    Command::ALL
        .into_iter()
        .filter(move |command| allowed.contains(command.action()))
}

fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

/// Translates a key into a command if the command is currently allowed.
pub fn command_for(key: KeyEvent, allowed: AllowedActions) -> Option<Command> {
    let command = if is_interrupt(&key) {
        Command::Quit
    } else {
        match key.code {
            KeyCode::Enter => Command::Confirm,
            KeyCode::Esc => Command::Cancel,
            KeyCode::Char('/') => Command::Debug,
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'm' => Command::Move,
                't' => Command::Talk,
                'f' => Command::Fight,
                'l' => Command::Loot,
                'w' => Command::Withdraw,
                'r' => Command::Rest,
                'b' => Command::Barter,
                'p' => Command::Player,
                'q' => Command::Quit,
                _ => return None,
            },
            _ => return None,
        }
    };
    allowed.contains(command.action()).then_some(command)
}

/// Outcome of a prompt that can be backed out of.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Choice<T> {
    Selected(T),
    Cancelled,
}

/// Direction keys in the move prompt. Only open exits are accepted.
pub fn direction_for(key: KeyEvent, open: &[Direction]) -> Option<Choice<Direction>> {
    let direction = match key.code {
        KeyCode::Esc => return Some(Choice::Cancelled),
        KeyCode::Up => Direction::North,
        KeyCode::Down => Direction::South,
        KeyCode::Right => Direction::East,
        KeyCode::Left => Direction::West,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'n' => Direction::North,
            's' => Direction::South,
            'e' => Direction::East,
            'w' => Direction::West,
            _ => return None,
        },
        _ => return None,
    };
    open.contains(&direction)
        .then_some(Choice::Selected(direction))
}

/// NPC selection by number key, `1` for the first of `count` entries.
pub fn npc_for(key: KeyEvent, count: usize) -> Option<Choice<usize>> {
    match key.code {
        KeyCode::Esc => Some(Choice::Cancelled),
        KeyCode::Char(c @ '1'..='3') => {
            let index = usize::from(c as u8 - b'1');
            (index < count).then_some(Choice::Selected(index))
        }
        _ => None,
    }
}

/// Yes/no dialog answer.
pub fn answer_for(key: KeyEvent) -> Option<bool> {
    if is_interrupt(&key) {
        return Some(true);
    }
    match key.code {
        KeyCode::Char('y' | 'Y') | KeyCode::Enter => Some(true),
        KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn commands_respect_the_allowed_set() {
        let allowed = AllowedActions::ALWAYS | AllowedActions::MOVE;
        assert_eq!(command_for(key(KeyCode::Char('m')), allowed), Some(Command::Move));
        assert_eq!(command_for(key(KeyCode::Char('M')), allowed), Some(Command::Move));
        assert_eq!(command_for(key(KeyCode::Char('q')), allowed), Some(Command::Quit));
        assert_eq!(command_for(key(KeyCode::Char('/')), allowed), Some(Command::Debug));
        assert_eq!(command_for(key(KeyCode::Char('p')), allowed), Some(Command::Player));
        assert_eq!(command_for(key(KeyCode::Char('f')), allowed), None);
        assert_eq!(command_for(key(KeyCode::Char('t')), allowed), None);
        assert_eq!(command_for(key(KeyCode::Enter), allowed), None);
        assert_eq!(command_for(key(KeyCode::Char('z')), allowed), None);
    }

    #[test]
    fn every_map_key_has_a_command() {
        let all = AllowedActions::all();
        for (c, command) in [
            ('m', Command::Move),
            ('t', Command::Talk),
            ('f', Command::Fight),
            ('l', Command::Loot),
            ('w', Command::Withdraw),
            ('r', Command::Rest),
            ('b', Command::Barter),
        ] {
            assert_eq!(command_for(key(KeyCode::Char(c)), all), Some(command));
        }
        assert_eq!(command_for(key(KeyCode::Enter), all), Some(Command::Confirm));
        assert_eq!(command_for(key(KeyCode::Esc), all), Some(Command::Cancel));
    }

    #[test]
    fn ctrl_c_quits_when_quitting_is_allowed() {
        let interrupt = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(command_for(interrupt, AllowedActions::ALWAYS), Some(Command::Quit));
        assert_eq!(command_for(interrupt, AllowedActions::CONFIRM), None);
    }

    #[test]
    fn directions_are_limited_to_open_exits() {
        let open = [Direction::North, Direction::West];
        assert_eq!(
            direction_for(key(KeyCode::Char('n')), &open),
            Some(Choice::Selected(Direction::North))
        );
        assert_eq!(
            direction_for(key(KeyCode::Left), &open),
            Some(Choice::Selected(Direction::West))
        );
        assert_eq!(direction_for(key(KeyCode::Char('s')), &open), None);
        assert_eq!(direction_for(key(KeyCode::Char('x')), &open), None);
        assert_eq!(direction_for(key(KeyCode::Esc), &open), Some(Choice::Cancelled));
    }

    #[test]
    fn npc_keys_stop_at_the_present_count() {
        assert_eq!(npc_for(key(KeyCode::Char('1')), 2), Some(Choice::Selected(0)));
        assert_eq!(npc_for(key(KeyCode::Char('2')), 2), Some(Choice::Selected(1)));
        assert_eq!(npc_for(key(KeyCode::Char('3')), 2), None);
        assert_eq!(npc_for(key(KeyCode::Char('4')), 3), None);
        assert_eq!(npc_for(key(KeyCode::Esc), 1), Some(Choice::Cancelled));
    }

    #[test]
    fn yes_no_answers() {
        assert_eq!(answer_for(key(KeyCode::Char('y'))), Some(true));
        assert_eq!(answer_for(key(KeyCode::Char('N'))), Some(false));
        assert_eq!(answer_for(key(KeyCode::Esc)), Some(false));
        assert_eq!(answer_for(key(KeyCode::Char('q'))), None);
    }

    #[test]
    fn menu_lists_only_allowed_commands() {
        let menu: Vec<_> = available(AllowedActions::FIGHT | AllowedActions::QUIT).collect();
        assert_eq!(menu, [Command::Fight, Command::Quit]);
    }
}
