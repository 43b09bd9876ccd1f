//! Location gates: what the current location lets the party do right now.
//!
//! Every gate consults the block stored with the feature it guards. A block
//! without conditions always lets the feature through. Storage failures
//! while fetching text or character records are returned as errors and are
//! never folded into a `false` verdict.

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::env::{CharacterOracle, CharacterSource, OracleError, StoryOracle};
use crate::state::{Direction, Encounter, GameState, LevelState, SpawnKind};

/// Which encounter table, if any, triggers on this visit.
///
/// The respawn table is only consulted when the primary table does not
/// trigger.
pub fn check_monster_spawn(game: &GameState, level: &LevelState) -> Option<SpawnKind> {
    if !level.spawn.is_empty() && level.spawn.requires.passes(game, level) {
        return Some(SpawnKind::Primary);
    }
    if !level.respawn.is_empty() && level.respawn.requires.passes(game, level) {
        return Some(SpawnKind::Secondary);
    }
    None
}

/// Whether the exit in `direction` exists and its conditions pass.
pub fn check_movement(game: &GameState, level: &LevelState, direction: Direction) -> bool {
    let exit = level.exit(direction);
    exit.exists() && exit.requires.passes(game, level)
}

/// Whether the location has loot and its conditions pass.
pub fn check_loot(game: &GameState, level: &LevelState) -> bool {
    !level.loot.is_empty() && level.loot.requires.passes(game, level)
}

/// Recomputes which NPCs are present and loads them into the encounter
/// roster. Present NPCs are registered in the session roster so later
/// conditions and talk counters can find them.
///
/// Returns whether anyone is present.
pub fn check_talk(
    game: &mut GameState,
    level: &mut LevelState,
    characters: &dyn CharacterOracle,
) -> Result<bool, OracleError> {
    // Every record is fetched before anything changes, so a failed lookup
    // leaves both states untouched.
    let mut present = ArrayVec::<_, { GameConfig::MAX_NPC_SLOTS }>::new();
    for (index, slot) in level.npcs.iter().enumerate() {
        if slot.is_used() && slot.requires.passes(game, level) {
            let record = characters.character(CharacterSource::Npc, slot.npc_id)?;
            present.push((index, record));
        }
    }

    game.encounters.clear();
    for slot in level.npcs.iter_mut() {
        slot.present = false;
    }
    let found = !present.is_empty();
    for (index, record) in present {
        let slot = &mut level.npcs[index];
        slot.present = true;
        game.npcs.add(slot.npc_id);
        // Three NPC slots never exceed the four encounter slots.
        if game.encounters.push(Encounter::new(record)).is_err() {
            tracing::warn!(npc = slot.npc_id, "encounter roster full");
        }
    }
    Ok(found)
}

/// Accumulates exit descriptions for the map screen.
///
/// The first description is set off from the story text by a blank line;
/// later ones start on the next line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExitNarration {
    text: String,
    entries: usize,
}

impl ExitNarration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: &str) {
        self.text.push_str(if self.entries == 0 { "\n\n" } else { "\n" });
        self.text.push_str(line);
        self.entries += 1;
    }

    pub fn entries(&self) -> usize {
        self.entries
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// Canned description for an exit with no story text of its own.
pub fn default_exit_text(direction: Direction) -> String {
    format!("You can Move {direction}.")
}

/// [`check_movement`] that also narrates a usable exit: its story text when
/// it has one, otherwise the canned line.
pub fn describe_movement(
    game: &GameState,
    level: &LevelState,
    direction: Direction,
    story: &dyn StoryOracle,
    narration: &mut ExitNarration,
) -> Result<bool, OracleError> {
    if !check_movement(game, level, direction) {
        return Ok(false);
    }
    let exit = level.exit(direction);
    let line = match exit.text_id {
        0 => default_exit_text(direction),
        text_id => story.story(text_id)?,
    };
    narration.push(&line);
    Ok(true)
}

/// Narrates every usable exit in record order and returns their directions.
pub fn describe_exits(
    game: &GameState,
    level: &LevelState,
    story: &dyn StoryOracle,
    narration: &mut ExitNarration,
) -> Result<ArrayVec<Direction, 4>, OracleError> {
    let mut usable = ArrayVec::new();
    for direction in Direction::ALL {
        if describe_movement(game, level, direction, story, narration)? {
            usable.push(direction);
        }
    }
    Ok(usable)
}
