//! The map-screen state machine.
//!
//! [`LocationVisit`] drives one location at a time: it loads the record,
//! records the visit, rolls the encounter and loot tables, works out which
//! NPCs and exits are available and composes the text for the screen. Each
//! player action it performs advances the turn clock once.

use arrayvec::ArrayVec;
use bitflags::bitflags;

use crate::env::{
    CharacterSource, Env, OracleError, RollContext, compute_seed, roll_chance,
};
use crate::error::{ErrorSeverity, GameError};
use crate::gate::{self, ExitNarration};
use crate::roster::RosterError;
use crate::state::{
    Direction, Encounter, GameMode, GameState, ItemKind, ItemRef, LevelState, LocationId,
    SpawnKind, StateError,
};

bitflags! {
    /// Actions the player may choose from on the current screen.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct AllowedActions: u16 {
        const MOVE     = 1 << 0;
        const TALK     = 1 << 1;
        const FIGHT    = 1 << 2;
        const LOOT     = 1 << 3;
        const WITHDRAW = 1 << 4;
        const REST     = 1 << 5;
        const BARTER   = 1 << 6;
        const PLAYER   = 1 << 7;
        const QUIT     = 1 << 8;
        const DEBUG    = 1 << 9;
        const CONFIRM  = 1 << 10;
        const CANCEL   = 1 << 11;
    }
}

impl AllowedActions {
    /// Actions open on every map screen.
    pub const ALWAYS: Self = Self::PLAYER.union(Self::QUIT).union(Self::DEBUG);
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum VisitError {
    #[error("cannot move {0} from here")]
    ExitClosed(Direction),

    #[error("there is nowhere to withdraw to")]
    NoPreviousLocation,

    #[error("nobody is present in npc slot {0}")]
    NotPresent(usize),

    #[error("nothing here to take")]
    NothingToLoot,

    #[error("no monsters to fight")]
    NothingToFight,

    #[error("location {requested} loaded as location {found}")]
    IdMismatch {
        requested: LocationId,
        found: LocationId,
    },

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Roster(#[from] RosterError),
}

impl GameError for VisitError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ExitClosed(_)
            | Self::NoPreviousLocation
            | Self::NotPresent(_)
            | Self::NothingToLoot
            | Self::NothingToFight => ErrorSeverity::Validation,
            Self::IdMismatch { .. } => ErrorSeverity::Recoverable,
            Self::Oracle(error) => error.severity(),
            Self::State(error) => error.severity(),
            Self::Roster(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ExitClosed(_) => "VISIT_EXIT_CLOSED",
            Self::NoPreviousLocation => "VISIT_NO_PREVIOUS_LOCATION",
            Self::NotPresent(_) => "VISIT_NPC_NOT_PRESENT",
            Self::NothingToLoot => "VISIT_NOTHING_TO_LOOT",
            Self::NothingToFight => "VISIT_NOTHING_TO_FIGHT",
            Self::IdMismatch { .. } => "VISIT_ID_MISMATCH",
            Self::Oracle(error) => error.error_code(),
            Self::State(error) => error.error_code(),
            Self::Roster(error) => error.error_code(),
        }
    }
}

/// Outcome of arriving at a location.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VisitReport {
    pub spawn: Option<SpawnKind>,
    pub npcs_present: bool,
    pub loot: bool,
    pub exits: ArrayVec<Direction, 4>,
    pub allowed: AllowedActions,
}

/// Summary of a finished fight.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CombatOutcome {
    pub spawn: SpawnKind,
    pub defeated: Vec<String>,
}

/// Items handed to the party by a loot action.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LootReport {
    pub taken: Vec<String>,
    /// Entries left behind because every inventory was full.
    pub left: usize,
}

/// Session statistics shown on the debug screen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DebugReport {
    pub party_size: usize,
    pub npcs_met: usize,
    pub locations_discovered: usize,
    pub primary_defeat_locations: usize,
    pub secondary_defeat_locations: usize,
}

impl DebugReport {
    pub fn collect(game: &GameState) -> Self {
        Self {
            party_size: game.party.len(),
            npcs_met: game.npcs.len(),
            locations_discovered: game.visits.nonzero(),
            primary_defeat_locations: game.primary_defeats.nonzero(),
            secondary_defeat_locations: game.secondary_defeats.nonzero(),
        }
    }
}

/// Title and introduction shown before play starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Splash {
    pub title: String,
    pub introduction: String,
}

pub const TITLE_TEXT: u16 = 0;
pub const INTRODUCTION_TEXT: u16 = 1;

/// Drives the map screen against a set of oracles.
#[derive(Clone, Copy, Debug)]
pub struct LocationVisit<'a> {
    env: Env<'a>,
    seed: u64,
}

impl<'a> LocationVisit<'a> {
    pub fn new(env: Env<'a>, seed: u64) -> Self {
        Self { env, seed }
    }

    pub fn env(&self) -> Env<'a> {
        self.env
    }

    /// Loads the title and introduction and names the session.
    pub fn splash(&self, game: &mut GameState) -> Result<Splash, VisitError> {
        let title = self.env.story.story(TITLE_TEXT)?;
        let introduction = self.env.story.story(INTRODUCTION_TEXT)?;
        game.name = title.clone();
        Ok(Splash {
            title,
            introduction,
        })
    }

    /// Loads location `id` and enters it. On failure `game` and `level` are
    /// left as they were.
    pub fn arrive(
        &self,
        game: &mut GameState,
        level: &mut LevelState,
        id: LocationId,
    ) -> Result<VisitReport, VisitError> {
        let mut fresh = self.env.locations.location(id)?;
        if fresh.id != id {
            tracing::error!(requested = id, found = fresh.id, "location id mismatch");
            return Err(VisitError::IdMismatch {
                requested: id,
                found: fresh.id,
            });
        }
        tracing::info!(location = id, name = %fresh.name, "location loaded");
        let mut next = game.clone();
        let report = self.enter(&mut next, &mut fresh)?;
        *game = next;
        *level = fresh;
        Ok(report)
    }

    /// Records the visit and works out everything the location offers.
    ///
    /// Both states may be partly updated when this fails; [`Self::arrive`]
    /// only commits them on success.
    pub fn enter(
        &self,
        game: &mut GameState,
        level: &mut LevelState,
    ) -> Result<VisitReport, VisitError> {
        game.record_visit(level.id);
        game.encounters.clear();
        level.spawned = None;
        level.looted = false;
        for slot in level.npcs.iter_mut() {
            slot.present = false;
        }

        let spawn = self.roll_spawn(game, level);
        let mut text_id = level.text_id;
        if let Some(kind) = spawn {
            let table = match kind {
                SpawnKind::Primary => &level.spawn,
                SpawnKind::Secondary => &level.respawn,
            };
            for &monster in &table.monsters {
                let record = self
                    .env
                    .characters
                    .character(CharacterSource::Monster, monster)?;
                game.encounters.push(Encounter::new(record))?;
            }
            level.spawned = Some(kind);
            let spawn_text = match kind {
                SpawnKind::Primary => level.text_spawn,
                SpawnKind::Secondary => level.text_respawn,
            };
            if spawn_text != 0 {
                text_id = spawn_text;
            }
            tracing::debug!(location = level.id, spawn = %kind, "monsters spawned");
        } else if game.secondary_defeats.get(level.id) > 0 && level.text_after_respawn != 0 {
            text_id = level.text_after_respawn;
        } else if game.primary_defeats.get(level.id) > 0 && level.text_after_spawn != 0 {
            text_id = level.text_after_spawn;
        }

        let npcs_present = spawn.is_none() && gate::check_talk(game, level, self.env.characters)?;
        let loot = spawn.is_none() && self.roll_loot(game, level);

        let mut text = match text_id {
            0 => String::new(),
            id => self.env.story.story(id)?,
        };
        let mut narration = ExitNarration::new();
        let exits = gate::describe_exits(game, level, self.env.story, &mut narration)?;
        text.push_str(narration.as_str());
        game.text = text;

        let mut allowed = AllowedActions::ALWAYS;
        allowed.set(AllowedActions::MOVE, !exits.is_empty());
        if spawn.is_some() {
            allowed |= AllowedActions::FIGHT;
            allowed.set(AllowedActions::WITHDRAW, game.previous_location != 0);
        } else {
            allowed |= AllowedActions::REST | AllowedActions::BARTER;
            allowed.set(AllowedActions::TALK, npcs_present);
            allowed.set(AllowedActions::LOOT, loot);
        }

        Ok(VisitReport {
            spawn,
            npcs_present,
            loot,
            exits,
            allowed,
        })
    }

    fn roll_spawn(&self, game: &GameState, level: &LevelState) -> Option<SpawnKind> {
        let kind = gate::check_monster_spawn(game, level)?;
        let (chance, context) = match kind {
            SpawnKind::Primary => (level.spawn.chance, RollContext::Spawn),
            SpawnKind::Secondary => (level.respawn.chance, RollContext::Respawn),
        };
        let seed = compute_seed(self.seed, game.turn, level.id, context);
        roll_chance(self.env.rng, seed, chance).then_some(kind)
    }

    fn roll_loot(&self, game: &GameState, level: &LevelState) -> bool {
        if level.looted || !gate::check_loot(game, level) {
            return false;
        }
        let seed = compute_seed(self.seed, game.turn, level.id, RollContext::Loot);
        roll_chance(self.env.rng, seed, level.loot.chance)
    }

    /// Moves through the exit in `direction`.
    pub fn travel(
        &self,
        game: &mut GameState,
        level: &mut LevelState,
        direction: Direction,
    ) -> Result<VisitReport, VisitError> {
        if !gate::check_movement(game, level, direction) {
            return Err(VisitError::ExitClosed(direction));
        }
        let destination = level.exit(direction).destination;
        let report = self.arrive(game, level, destination)?;
        game.advance_turn();
        Ok(report)
    }

    /// Falls back to the previous location, leaving any spawn behind.
    pub fn withdraw(
        &self,
        game: &mut GameState,
        level: &mut LevelState,
    ) -> Result<VisitReport, VisitError> {
        let previous = game.previous_location;
        if previous == 0 {
            return Err(VisitError::NoPreviousLocation);
        }
        let report = self.arrive(game, level, previous)?;
        game.advance_turn();
        Ok(report)
    }

    /// Talks to the NPC in `slot` (0-based) and returns their text.
    pub fn talk(
        &self,
        game: &mut GameState,
        level: &LevelState,
        slot: usize,
    ) -> Result<String, VisitError> {
        let npc = level
            .npcs
            .get(slot)
            .filter(|npc| npc.is_used() && npc.present)
            .ok_or(VisitError::NotPresent(slot))?;
        let text = match npc.text_id {
            0 => String::new(),
            id => self.env.story.story(id)?,
        };
        game.npcs.add(npc.npc_id);
        game.npcs
            .increment_talk(npc.npc_id, npc.dialogue_id, game.turn)?;
        game.advance_turn();
        Ok(text)
    }

    /// Hands the location's loot to the party.
    pub fn take_loot(
        &self,
        game: &mut GameState,
        level: &mut LevelState,
    ) -> Result<LootReport, VisitError> {
        if level.looted || !gate::check_loot(game, level) {
            return Err(VisitError::NothingToLoot);
        }
        let entries = level
            .loot
            .weapons
            .iter()
            .map(|&id| ItemRef::weapon(id))
            .chain(level.loot.items.iter().map(|&id| ItemRef::item(id)));
        let mut report = LootReport::default();
        for item in entries {
            let name = match item.kind() {
                Some(ItemKind::Weapon) => self.env.weapons.weapon(item.id())?.name.clone(),
                _ => self.env.items.item(item.id())?.name.clone(),
            };
            match game.give_to_party(item) {
                Ok(()) => report.taken.push(name),
                Err(StateError::InventoryFull) => report.left += 1,
                Err(error) => return Err(error.into()),
            }
        }
        level.looted = true;
        game.advance_turn();
        tracing::debug!(location = level.id, taken = report.taken.len(), "loot taken");
        Ok(report)
    }

    /// Fights the spawned monsters. Combat resolves immediately in the
    /// party's favour and returns to the map.
    pub fn fight(
        &self,
        game: &mut GameState,
        level: &mut LevelState,
    ) -> Result<CombatOutcome, VisitError> {
        let spawn = level.spawned.ok_or(VisitError::NothingToFight)?;
        game.set_mode(GameMode::Combat)?;
        let defeated: Vec<String> = game
            .encounters
            .iter()
            .map(|encounter| encounter.record.name.clone())
            .collect();
        if let Some(leader) = game.party.leader_mut() {
            leader.kills = leader.kills.saturating_add(defeated.len() as u16);
        }
        game.record_defeat(level.id, spawn);
        game.encounters.clear();
        level.spawned = None;
        game.set_mode(GameMode::Map)?;
        game.advance_turn();
        Ok(CombatOutcome { spawn, defeated })
    }

    /// Opens the shop. Trading is not available, so the visit returns to the
    /// map straight away.
    pub fn barter(&self, game: &mut GameState) -> Result<String, VisitError> {
        game.set_mode(GameMode::Shop)?;
        game.set_mode(GameMode::Map)?;
        game.advance_turn();
        Ok("There is nobody here to trade with.".to_string())
    }

    pub fn rest(&self, game: &mut GameState) -> String {
        game.advance_turn();
        "You rest for a while.".to_string()
    }

    /// Ends the session.
    pub fn quit(&self, game: &mut GameState) -> Result<(), VisitError> {
        game.set_mode(GameMode::Exit)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CharacterKind, CharacterRecord, ItemRecord, WeaponRecord};
    use crate::condition::{Condition, ConditionBlock, VisitBound};
    use crate::env::{MemoryOracle, PcgRng};
    use crate::state::{Exit, NpcSlot, Party, PlayerState};

    fn world() -> MemoryOracle {
        let mut glade = LevelState::new(1, "Leafy Glade")
            .with_exit(Direction::North, Exit::to(2))
            .with_exit(Direction::East, Exit::to(3).with_text(11));
        glade.text_id = 10;
        glade.npcs[0] = NpcSlot {
            npc_id: 1,
            dialogue_id: 2,
            text_id: 20,
            ..NpcSlot::default()
        };
        glade.loot.chance = 100;
        glade.loot.weapons.push(1);
        glade.loot.items.push(1);

        let mut lair = LevelState::new(2, "Wolf Den").with_exit(
            Direction::South,
            Exit::to(1).with_requirements(ConditionBlock::single(Condition::NoMonstersSpawned)),
        );
        lair.text_id = 12;
        lair.text_spawn = 13;
        lair.text_after_spawn = 14;
        lair.spawn.chance = 100;
        lair.spawn.monsters.push(1);
        lair.spawn.monsters.push(1);
        // Only spawns on the first visit.
        lair.spawn.requires = ConditionBlock::single(Condition::MapVisit {
            location: 2,
            bound: VisitBound::AtMost,
            count: 1,
        });

        MemoryOracle::new()
            .with_location(glade)
            .with_location(lair)
            .with_story(0, "Leafy Glade")
            .with_story(1, "A quiet forest.")
            .with_story(10, "Sunlight through leaves.")
            .with_story(11, "A stream runs east.")
            .with_story(12, "An empty den.")
            .with_story(13, "Wolves!")
            .with_story(14, "Wolf bones litter the den.")
            .with_story(20, "Welcome, traveller.")
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
            .with_item(ItemRecord {
                id: 1,
                name: "Torch".into(),
                ..ItemRecord::default()
            })
    }

    fn new_game() -> GameState {
        GameState::new(Party::with_leader(PlayerState::new("Argus").with_hp(10)))
    }

    #[test]
    fn splash_names_the_session() {
        let store = world();
        let visit = LocationVisit::new(Env::from_store(&store, &PcgRng), 1);
        let mut game = new_game();
        let splash = visit.splash(&mut game).expect("story present");
        assert_eq!(splash.title, "Leafy Glade");
        assert_eq!(splash.introduction, "A quiet forest.");
        assert_eq!(game.name, "Leafy Glade");
    }

    #[test]
    fn arrival_composes_text_and_actions() {
        let store = world();
        let visit = LocationVisit::new(Env::from_store(&store, &PcgRng), 1);
        let mut game = new_game();
        let mut level = LevelState::default();
        let report = visit.arrive(&mut game, &mut level, 1).expect("loads");

        assert_eq!(game.current_location, 1);
        assert_eq!(game.visits.get(1), 1);
        assert_eq!(report.spawn, None);
        assert!(report.npcs_present);
        assert!(report.loot);
        assert_eq!(report.exits.as_slice(), [Direction::North, Direction::East]);
        assert!(report.allowed.contains(
            AllowedActions::MOVE | AllowedActions::TALK | AllowedActions::LOOT | AllowedActions::QUIT
        ));
        assert!(!report.allowed.contains(AllowedActions::FIGHT));
        assert_eq!(
            game.text,
            "Sunlight through leaves.\n\nYou can Move north.\nA stream runs east."
        );
        assert_eq!(game.encounters.len(), 1);
        assert_eq!(game.npcs.len(), 1);
    }

    #[test]
    fn spawn_blocks_talk_and_gates_exits() {
        let store = world();
        let visit = LocationVisit::new(Env::from_store(&store, &PcgRng), 1);
        let mut game = new_game();
        let mut level = LevelState::default();
        visit.arrive(&mut game, &mut level, 1).expect("loads");
        let report = visit
            .travel(&mut game, &mut level, Direction::North)
            .expect("north is open");

        assert_eq!(report.spawn, Some(SpawnKind::Primary));
        assert_eq!(game.previous_location, 1);
        assert_eq!(game.encounters.len(), 2);
        assert!(report.allowed.contains(AllowedActions::FIGHT | AllowedActions::WITHDRAW));
        assert!(!report.allowed.intersects(AllowedActions::TALK | AllowedActions::LOOT));
        assert!(!report.allowed.contains(AllowedActions::MOVE));
        assert_eq!(game.text, "Wolves!");

        let outcome = visit.fight(&mut game, &mut level).expect("monsters present");
        assert_eq!(outcome.defeated, ["Wolf", "Wolf"]);
        assert_eq!(game.primary_defeats.get(2), 1);
        assert_eq!(game.mode, GameMode::Map);
        assert!(gate::check_movement(&game, &level, Direction::South));

        // Second visit: no respawn and the aftermath text shows.
        visit
            .travel(&mut game, &mut level, Direction::South)
            .expect("path home");
        let report = visit
            .travel(&mut game, &mut level, Direction::North)
            .expect("back to the den");
        assert_eq!(report.spawn, None);
        assert!(game.text.starts_with("Wolf bones litter the den."));
    }

    #[test]
    fn withdraw_returns_to_previous_location() {
        let store = world();
        let visit = LocationVisit::new(Env::from_store(&store, &PcgRng), 1);
        let mut game = new_game();
        let mut level = LevelState::default();
        assert_eq!(
            visit.withdraw(&mut game, &mut level),
            Err(VisitError::NoPreviousLocation)
        );
        visit.arrive(&mut game, &mut level, 1).expect("loads");
        visit
            .travel(&mut game, &mut level, Direction::North)
            .expect("north is open");
        visit.withdraw(&mut game, &mut level).expect("glade loads");
        assert_eq!(game.current_location, 1);
        assert_eq!(game.primary_defeats.get(2), 0);
    }

    #[test]
    fn failed_load_keeps_current_level() {
        let store = world();
        let visit = LocationVisit::new(Env::from_store(&store, &PcgRng), 1);
        let mut game = new_game();
        let mut level = LevelState::default();
        visit.arrive(&mut game, &mut level, 1).expect("loads");
        level.exit_mut(Direction::West).destination = 99;
        let before = level.clone();
        assert_eq!(
            visit.travel(&mut game, &mut level, Direction::West),
            Err(VisitError::Oracle(OracleError::LocationNotFound(99)))
        );
        assert_eq!(level, before);
        assert_eq!(game.current_location, 1);
    }

    #[test]
    fn closed_exit_is_rejected() {
        let store = world();
        let visit = LocationVisit::new(Env::from_store(&store, &PcgRng), 1);
        let mut game = new_game();
        let mut level = LevelState::default();
        visit.arrive(&mut game, &mut level, 1).expect("loads");
        let turn = game.turn;
        assert_eq!(
            visit.travel(&mut game, &mut level, Direction::South),
            Err(VisitError::ExitClosed(Direction::South))
        );
        assert_eq!(game.turn, turn);
    }

    #[test]
    fn failed_arrival_keeps_game_state() {
        let mut den = LevelState::new(2, "Wolf Den");
        den.spawn.chance = 100;
        den.spawn.monsters.push(9);
        den.spawn.requires = ConditionBlock::single(Condition::Always);
        let store = world().with_location(den);
        let visit = LocationVisit::new(Env::from_store(&store, &PcgRng), 1);
        let mut game = new_game();
        let mut level = LevelState::default();
        visit.arrive(&mut game, &mut level, 1).expect("loads");
        let previous = game.previous_location;
        let turn = game.turn;
        let encounters = game.encounters.len();

        assert_eq!(
            visit.travel(&mut game, &mut level, Direction::North),
            Err(VisitError::Oracle(OracleError::CharacterNotFound {
                catalog: CharacterSource::Monster,
                id: 9
            }))
        );
        assert_eq!(game.current_location, 1);
        assert_eq!(level.id, 1);
        assert_eq!(game.previous_location, previous);
        assert_eq!(game.visits.get(2), 0);
        assert_eq!(game.visits.get(1), 1);
        assert_eq!(game.turn, turn);
        assert_eq!(game.encounters.len(), encounters);
        assert_eq!(
            game.encounters.get(0).map(|e| e.record.name.as_str()),
            Some("Hermit")
        );
    }

    #[test]
    fn talking_updates_roster_and_turn() {
        let store = world();
        let visit = LocationVisit::new(Env::from_store(&store, &PcgRng), 1);
        let mut game = new_game();
        let mut level = LevelState::default();
        visit.arrive(&mut game, &mut level, 1).expect("loads");
        let turn = game.turn;
        let text = visit.talk(&mut game, &level, 0).expect("hermit present");
        assert_eq!(text, "Welcome, traveller.");
        let hermit = game.npcs.find(1).expect("registered");
        assert_eq!(hermit.talked_count, 1);
        assert_eq!(hermit.last_dialogue, 2);
        assert_eq!(hermit.last_talked_turn, turn);
        assert_eq!(game.turn, turn + 1);
        assert_eq!(
            visit.talk(&mut game, &level, 1),
            Err(VisitError::NotPresent(1))
        );
    }

    #[test]
    fn loot_is_taken_once() {
        let store = world();
        let visit = LocationVisit::new(Env::from_store(&store, &PcgRng), 1);
        let mut game = new_game();
        let mut level = LevelState::default();
        visit.arrive(&mut game, &mut level, 1).expect("loads");
        let report = visit.take_loot(&mut game, &mut level).expect("loot present");
        assert_eq!(report.taken, ["Dagger", "Torch"]);
        assert_eq!(report.left, 0);
        assert!(game.party_owns(ItemKind::Weapon, 1));
        assert!(game.party_owns(ItemKind::Item, 1));
        assert_eq!(
            visit.take_loot(&mut game, &mut level),
            Err(VisitError::NothingToLoot)
        );
    }

    #[test]
    fn shop_and_rest_return_to_map() {
        let store = world();
        let visit = LocationVisit::new(Env::from_store(&store, &PcgRng), 1);
        let mut game = new_game();
        let text = visit.barter(&mut game).expect("map to shop and back");
        assert_eq!(text, "There is nobody here to trade with.");
        assert_eq!(game.mode, GameMode::Map);
        visit.rest(&mut game);
        assert_eq!(game.turn, 2);
        visit.quit(&mut game).expect("map to exit");
        assert!(game.mode.is_terminal());
    }

    #[test]
    fn debug_report_counts_progress() {
        let store = world();
        let visit = LocationVisit::new(Env::from_store(&store, &PcgRng), 1);
        let mut game = new_game();
        let mut level = LevelState::default();
        visit.arrive(&mut game, &mut level, 1).expect("loads");
        visit
            .travel(&mut game, &mut level, Direction::North)
            .expect("den loads");
        visit.fight(&mut game, &mut level).expect("wolves");
        assert_eq!(
            DebugReport::collect(&game),
            DebugReport {
                party_size: 1,
                npcs_met: 1,
                locations_discovered: 2,
                primary_defeat_locations: 1,
                secondary_defeat_locations: 0,
            }
        );
    }
}
