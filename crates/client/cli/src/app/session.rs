//! The mode loop: splash, then the map hub until the player quits.
//!
//! Combat and the shop resolve inside [`LocationVisit`] and hand control
//! straight back to the map. Every recoverable failure is shown to the
//! player and the session carries on from the last stable state.

use adventure_core::gate::check_movement;
use adventure_core::{
    AllowedActions, CharacterSource, Direction, Env, ErrorReport, ErrorSeverity, GameConfig,
    GameError, GameState, LevelState, LocationId, LocationVisit, Party, VisitError, VisitReport,
};
use anyhow::Result;

use super::sheets::{debug_sheet, player_sheet};
use crate::input::{Choice, Command};
use crate::presentation::{Presentation, Screen};

/// A failed action: either the engine refused it or the terminal broke.
enum StepError {
    Visit(VisitError),
    Ui(anyhow::Error),
}

impl From<VisitError> for StepError {
    fn from(error: VisitError) -> Self {
        Self::Visit(error)
    }
}

impl From<anyhow::Error> for StepError {
    fn from(error: anyhow::Error) -> Self {
        Self::Ui(error)
    }
}

/// Title, message and code for any visit failure.
pub fn error_report(error: &VisitError) -> ErrorReport {
    match error {
        VisitError::Oracle(error) => error.report(),
        other => ErrorReport::new("Error!", other.to_string(), 0),
    }
}

pub struct Session<'a> {
    visit: LocationVisit<'a>,
    game: GameState,
    level: LevelState,
    report: VisitReport,
    start: LocationId,
    notice: Option<String>,
}

impl<'a> Session<'a> {
    pub fn new(env: Env<'a>, config: &GameConfig, party: Party, start: LocationId) -> Self {
        let mut game = GameState::new(party);
        game.gold = config.starting_gold;
        Self {
            visit: LocationVisit::new(env, config.rng_seed),
            game,
            level: LevelState::default(),
            report: VisitReport::default(),
            start,
            notice: None,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Runs until the player quits or the adventure cannot start.
    pub fn run(&mut self, ui: &mut dyn Presentation) -> Result<()> {
        let splash = match self.visit.splash(&mut self.game) {
            Ok(splash) => splash,
            Err(error) => return self.fail(ui, &error),
        };
        ui.present_text(&Screen::new(&splash.title, &splash.introduction))?;
        let allowed = AllowedActions::CONFIRM | AllowedActions::QUIT;
        if ui.wait_for_key(allowed)? == Command::Quit {
            tracing::info!("quit from the splash screen");
            return Ok(());
        }

        match self.visit.arrive(&mut self.game, &mut self.level, self.start) {
            Ok(report) => self.report = report,
            Err(error) => return self.fail(ui, &error),
        }

        while !self.game.mode.is_terminal() {
            ui.present_text(&self.screen())?;
            let command = ui.wait_for_key(self.report.allowed)?;
            self.notice = None;
            match self.dispatch(ui, command) {
                Ok(()) => {}
                Err(StepError::Ui(error)) => return Err(error),
                Err(StepError::Visit(error)) => {
                    ui.present_error(&error_report(&error))?;
                    if !error.severity().is_recoverable() {
                        anyhow::bail!("session aborted: {error}");
                    }
                    tracing::warn!(code = error.error_code(), %error, "action failed");
                }
            }
        }
        tracing::info!(turn = self.game.turn, "session ended");
        Ok(())
    }

    /// Reports an error that leaves nothing to play.
    fn fail(&self, ui: &mut dyn Presentation, error: &VisitError) -> Result<()> {
        tracing::error!(code = error.error_code(), %error, "adventure cannot start");
        ui.present_error(&error_report(error))?;
        if error.severity() == ErrorSeverity::Fatal {
            anyhow::bail!("session aborted: {error}");
        }
        Ok(())
    }

    fn screen(&self) -> Screen {
        let status = format!(
            "Turn {}  Gold {}  Party {}",
            self.game.turn,
            self.game.gold,
            self.game.party.len()
        );
        Screen::new(&self.level.name, &self.game.text)
            .with_status(status)
            .with_notice(self.notice.clone())
    }

    fn dispatch(&mut self, ui: &mut dyn Presentation, command: Command) -> Result<(), StepError> {
        match command {
            Command::Move => {
                let open = self.open_exits();
                if let Choice::Selected(direction) = ui.choose_direction(&open)? {
                    self.report = self
                        .visit
                        .travel(&mut self.game, &mut self.level, direction)?;
                }
            }
            Command::Talk => self.talk(ui)?,
            Command::Fight => {
                let outcome = self.visit.fight(&mut self.game, &mut self.level)?;
                self.notice = Some(format!("You defeat {}.", outcome.defeated.join(", ")));
                self.refresh_allowed();
            }
            Command::Loot => {
                let loot = self.visit.take_loot(&mut self.game, &mut self.level)?;
                let mut notice = format!("You take {}.", loot.taken.join(", "));
                if loot.left > 0 {
                    notice.push_str(&format!("\n{} left behind, no room to carry.", loot.left));
                }
                self.notice = Some(notice);
                self.refresh_allowed();
            }
            Command::Withdraw => {
                self.report = self.visit.withdraw(&mut self.game, &mut self.level)?;
            }
            Command::Rest => self.notice = Some(self.visit.rest(&mut self.game)),
            Command::Barter => self.notice = Some(self.visit.barter(&mut self.game)?),
            Command::Player => Self::sheet(ui, "Party", player_sheet(&self.game))?,
            Command::Debug => Self::sheet(ui, "Debug", debug_sheet(&self.game))?,
            Command::Quit => {
                if ui.confirm("Quit the adventure?")? {
                    self.visit.quit(&mut self.game)?;
                }
            }
            Command::Confirm | Command::Cancel => {}
        }
        Ok(())
    }

    fn talk(&mut self, ui: &mut dyn Presentation) -> Result<(), StepError> {
        let present: Vec<(usize, u8)> = self
            .level
            .npcs
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_used() && slot.present)
            .map(|(index, slot)| (index, slot.npc_id))
            .collect();
        let slot = match present.as_slice() {
            [] => return Err(VisitError::NotPresent(0).into()),
            [(index, _)] => *index,
            _ => {
                let characters = self.visit.env().characters;
                let names = present
                    .iter()
                    .map(|&(_, id)| {
                        characters
                            .character(CharacterSource::Npc, id)
                            .map(|record| record.name.clone())
                    })
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(VisitError::from)?;
                match ui.choose_npc(&names)? {
                    Choice::Selected(choice) => present[choice].0,
                    Choice::Cancelled => return Ok(()),
                }
            }
        };
        let text = self.visit.talk(&mut self.game, &self.level, slot)?;
        self.notice = Some(if text.is_empty() {
            "They have nothing to say.".to_string()
        } else {
            text
        });
        Ok(())
    }

    fn sheet(ui: &mut dyn Presentation, title: &str, text: String) -> Result<(), StepError> {
        ui.present_text(&Screen::new(title, text))?;
        ui.wait_for_key(AllowedActions::CONFIRM | AllowedActions::CANCEL)?;
        Ok(())
    }

    fn open_exits(&self) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|&direction| check_movement(&self.game, &self.level, direction))
            .collect()
    }

    /// Recomputes the action set after an action that changed the location
    /// in place.
    fn refresh_allowed(&mut self) {
        let mut allowed = AllowedActions::ALWAYS;
        allowed.set(AllowedActions::MOVE, !self.open_exits().is_empty());
        if self.level.spawned.is_some() {
            allowed |= AllowedActions::FIGHT;
            allowed.set(AllowedActions::WITHDRAW, self.game.previous_location != 0);
        } else {
            allowed |= AllowedActions::REST | AllowedActions::BARTER;
            allowed.set(
                AllowedActions::TALK,
                self.level.npcs.iter().any(|slot| slot.is_used() && slot.present),
            );
            allowed.set(AllowedActions::LOOT, self.report.loot && !self.level.looted);
        }
        self.report.allowed = allowed;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use adventure_core::{
        CharacterKind, CharacterRecord, Condition, ConditionBlock, Exit, GameMode, MemoryOracle,
        NpcSlot, PcgRng, PlayerState, WeaponRecord,
    };

    use super::*;

    /// Plays back scripted input and records what was shown.
    #[derive(Default)]
    struct ScriptedUi {
        commands: VecDeque<Command>,
        directions: VecDeque<Direction>,
        npcs: VecDeque<usize>,
        answers: VecDeque<bool>,
        screens: Vec<Screen>,
        errors: Vec<ErrorReport>,
        offered: Vec<AllowedActions>,
    }

    impl ScriptedUi {
        fn new(commands: impl IntoIterator<Item = Command>) -> Self {
            Self {
                commands: commands.into_iter().collect(),
                ..Self::default()
            }
        }

        fn notices(&self) -> Vec<&str> {
            self.screens
                .iter()
                .filter_map(|screen| screen.notice.as_deref())
                .collect()
        }
    }

    impl Presentation for ScriptedUi {
        fn present_text(&mut self, screen: &Screen) -> Result<()> {
            self.screens.push(screen.clone());
            Ok(())
        }

        fn wait_for_key(&mut self, allowed: AllowedActions) -> Result<Command> {
            self.offered.push(allowed);
            let command = self
                .commands
                .pop_front()
                .ok_or_else(|| anyhow::anyhow!("script exhausted"))?;
            anyhow::ensure!(allowed.contains(command.action()), "{command:?} not allowed");
            Ok(command)
        }

        fn choose_direction(&mut self, open: &[Direction]) -> Result<Choice<Direction>> {
            Ok(match self.directions.pop_front() {
                Some(direction) if open.contains(&direction) => Choice::Selected(direction),
                _ => Choice::Cancelled,
            })
        }

        fn choose_npc(&mut self, names: &[String]) -> Result<Choice<usize>> {
            Ok(match self.npcs.pop_front() {
                Some(index) if index < names.len() => Choice::Selected(index),
                _ => Choice::Cancelled,
            })
        }

        fn confirm(&mut self, _question: &str) -> Result<bool> {
            Ok(self.answers.pop_front().unwrap_or(true))
        }

        fn present_error(&mut self, report: &ErrorReport) -> Result<()> {
            self.errors.push(report.clone());
            Ok(())
        }
    }

    fn world() -> MemoryOracle {
        let mut glade = LevelState::new(1, "Leafy Glade").with_exit(Direction::North, Exit::to(2));
        glade.text_id = 10;
        glade.npcs[0] = NpcSlot {
            npc_id: 1,
            text_id: 20,
            ..NpcSlot::default()
        };
        glade.loot.chance = 100;
        glade.loot.weapons.push(1);

        let mut den = LevelState::new(2, "Wolf Den").with_exit(
            Direction::South,
            Exit::to(1).with_requirements(ConditionBlock::single(Condition::NoMonstersSpawned)),
        );
        den.spawn.chance = 100;
        den.spawn.monsters.push(1);

        MemoryOracle::new()
            .with_location(glade)
            .with_location(den)
            .with_story(0, "Leafy Glade")
            .with_story(1, "A short walk.")
            .with_story(10, "Sunlight through leaves.")
            .with_story(20, "Beware the den.")
            .with_character(
                CharacterSource::Npc,
                CharacterRecord::new(1, "Hermit", CharacterKind::Npc),
            )
            .with_character(
                CharacterSource::Monster,
                CharacterRecord::new(1, "Wolf", CharacterKind::Monster),
            )
            .with_weapon(WeaponRecord {
                id: 1,
                name: "Dagger".into(),
                ..WeaponRecord::default()
            })
    }

    fn session(store: &MemoryOracle, start: LocationId) -> Session<'_> {
        let party = Party::with_leader(PlayerState::new("Argus").with_hp(10));
        let mut config = GameConfig::new();
        config.starting_gold = 15;
        Session::new(Env::from_store(store, &PcgRng), &config, party, start)
    }

    #[test]
    fn quitting_at_the_splash_loads_nothing() {
        let store = world();
        let mut session = session(&store, 1);
        let mut ui = ScriptedUi::new([Command::Quit]);
        session.run(&mut ui).expect("runs");

        assert_eq!(ui.screens[0].title, "Leafy Glade");
        assert_eq!(ui.screens[0].text, "A short walk.");
        assert_eq!(session.game().current_location, 0);
        assert_eq!(session.game().gold, 15);
    }

    #[test]
    fn a_full_round_through_the_hub() {
        let store = world();
        let mut session = session(&store, 1);
        let mut ui = ScriptedUi::new([
            Command::Confirm,
            Command::Talk,
            Command::Loot,
            Command::Move,
            Command::Fight,
            Command::Move,
            Command::Debug,
            Command::Confirm,
            Command::Quit,
        ]);
        ui.directions = [Direction::North, Direction::South].into();
        session.run(&mut ui).expect("runs");

        let game = session.game();
        assert_eq!(game.mode, GameMode::Exit);
        assert_eq!(game.current_location, 1);
        assert_eq!(game.primary_defeats.get(2), 1);
        assert_eq!(game.npcs.find(1).map(|npc| npc.talked_count), Some(1));
        assert!(ui.errors.is_empty(), "{:?}", ui.errors);
        assert_eq!(
            ui.notices(),
            ["Beware the den.", "You take Dagger.", "You defeat Wolf."]
        );

        // Spawned monsters block talk and loot and pin the party in the den.
        let in_den = ui.offered[4];
        assert!(in_den.contains(AllowedActions::FIGHT | AllowedActions::WITHDRAW));
        assert!(!in_den.intersects(AllowedActions::TALK | AllowedActions::LOOT));
        assert!(!in_den.contains(AllowedActions::MOVE));
        // The fight opens the path home.
        assert!(ui.offered[5].contains(AllowedActions::MOVE));

        let debug = ui
            .screens
            .iter()
            .find(|screen| screen.title == "Debug")
            .expect("debug screen shown");
        assert!(debug.text.contains("Locations discovered: 2"));
    }

    #[test]
    fn declining_to_quit_keeps_playing() {
        let store = world();
        let mut session = session(&store, 1);
        let mut ui = ScriptedUi::new([Command::Confirm, Command::Quit, Command::Rest, Command::Quit]);
        ui.answers = [false, true].into();
        session.run(&mut ui).expect("runs");
        assert_eq!(session.game().turn, 1);
        assert_eq!(ui.notices(), ["You rest for a while."]);
    }

    #[test]
    fn missing_start_location_is_reported() {
        let store = world();
        let mut session = session(&store, 9);
        let mut ui = ScriptedUi::new([Command::Confirm]);
        session.run(&mut ui).expect("recoverable");
        assert_eq!(ui.errors.len(), 1);
        assert!(ui.errors[0].message.contains("location 9"));
        assert_eq!(session.game().mode, GameMode::Map);
    }

    #[test]
    fn cancelled_move_stays_put() {
        let store = world();
        let mut session = session(&store, 1);
        let mut ui = ScriptedUi::new([Command::Confirm, Command::Move, Command::Quit]);
        session.run(&mut ui).expect("runs");
        assert_eq!(session.game().current_location, 1);
        assert_eq!(session.game().turn, 0);
    }
}
