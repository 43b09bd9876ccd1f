//! Session state: everything that survives moving from one location to the next.
//!
//! [`GameState`] is the only mutable aggregate in the engine. It owns the party,
//! the encounter roster, the NPC roster and the per-location counters; the
//! resident [`LevelState`] is owned alongside it by the caller and swapped on
//! every move.
mod counters;
mod level;
mod mode;
mod party;

use std::sync::Arc;

use arrayvec::ArrayVec;

pub use counters::LocationCounters;
pub use level::{Direction, Exit, LevelState, LocationId, LootTable, NpcSlot, SpawnTable, TextId};
pub use mode::GameMode;
pub use party::{
    Abilities, Formation, ItemKind, ItemRef, Party, PartyMemberStatus, PlayerState,
};

use crate::catalog::CharacterRecord;
use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::roster::NpcRoster;

/// Which encounter table produced a spawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum SpawnKind {
    Primary,
    Secondary,
}

/// Errors raised by state mutations that would break a capacity or mode invariant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("party already has {} members", GameConfig::MAX_PLAYERS)]
    PartyFull,

    #[error("encounter roster already holds {} characters", GameConfig::MAX_MONSTER_TYPES)]
    EncounterFull,

    #[error("inventory already holds {} items", GameConfig::MAX_ITEMS)]
    InventoryFull,

    #[error("no party members to receive the item")]
    NoPartyMembers,

    #[error("cannot switch from {from} mode to {to} mode")]
    InvalidTransition { from: GameMode, to: GameMode },
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::PartyFull | Self::EncounterFull | Self::InventoryFull | Self::NoPartyMembers => {
                ErrorSeverity::Validation
            }
            Self::InvalidTransition { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::PartyFull => "STATE_PARTY_FULL",
            Self::EncounterFull => "STATE_ENCOUNTER_FULL",
            Self::InventoryFull => "STATE_INVENTORY_FULL",
            Self::NoPartyMembers => "STATE_NO_PARTY_MEMBERS",
            Self::InvalidTransition { .. } => "STATE_INVALID_TRANSITION",
        }
    }
}

/// A character currently facing the party: an NPC met on this visit or a
/// spawned monster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Encounter {
    pub record: Arc<CharacterRecord>,
    pub hp: u16,
}

impl Encounter {
    pub fn new(record: Arc<CharacterRecord>) -> Self {
        let hp = record.hp;
        Self { record, hp }
    }
}

/// The (at most four) characters the party is currently facing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EncounterRoster {
    slots: ArrayVec<Encounter, { GameConfig::MAX_MONSTER_TYPES }>,
}

impl EncounterRoster {
    pub fn push(&mut self, encounter: Encounter) -> Result<(), StateError> {
        self.slots
            .try_push(encounter)
            .map_err(|_| StateError::EncounterFull)
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Encounter> {
        self.slots.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Encounter> {
        self.slots.get(index)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Process-wide session state.
#[derive(Clone, Debug, Default)]
pub struct GameState {
    /// Adventure title (story text 0).
    pub name: String,
    pub mode: GameMode,
    pub current_location: LocationId,
    pub previous_location: LocationId,
    pub visits: LocationCounters,
    pub primary_defeats: LocationCounters,
    pub secondary_defeats: LocationCounters,
    /// Turn clock; wraps at 16 bits.
    pub turn: u16,
    pub gold: u16,
    pub party: Party,
    pub encounters: EncounterRoster,
    pub npcs: NpcRoster,
    /// Display text composed for the current screen.
    pub text: String,
}

impl GameState {
    pub fn new(party: Party) -> Self {
        Self {
            party,
            ..Self::default()
        }
    }

    /// Records arrival at `location`: shifts the current id into the previous
    /// slot and bumps the visit counter.
    pub fn record_visit(&mut self, location: LocationId) {
        self.previous_location = self.current_location;
        self.current_location = location;
        self.visits.increment(location);
    }

    /// Records that the monsters spawned by `kind` at `location` were beaten.
    pub fn record_defeat(&mut self, location: LocationId, kind: SpawnKind) {
        match kind {
            SpawnKind::Primary => self.primary_defeats.increment(location),
            SpawnKind::Secondary => self.secondary_defeats.increment(location),
        }
    }

    /// Advances the turn clock by one completed action.
    pub fn advance_turn(&mut self) {
        self.turn = self.turn.wrapping_add(1);
    }

    /// Moves between modes, rejecting transitions the hub layout forbids.
    pub fn set_mode(&mut self, to: GameMode) -> Result<(), StateError> {
        if !self.mode.can_transition(to) {
            return Err(StateError::InvalidTransition {
                from: self.mode,
                to,
            });
        }
        if self.mode != to {
            tracing::debug!(from = %self.mode, to = %to, "mode transition");
        }
        self.mode = to;
        Ok(())
    }

    /// Hands an item to the first party member with a free inventory slot.
    pub fn give_to_party(&mut self, item: ItemRef) -> Result<(), StateError> {
        if self.party.is_empty() {
            return Err(StateError::NoPartyMembers);
        }
        for slot in 1..=GameConfig::MAX_PLAYERS as u8 {
            if let Some(member) = self.party.get_mut(slot)
                && member.give(item).is_ok()
            {
                return Ok(());
            }
        }
        Err(StateError::InventoryFull)
    }

    /// Whether any party member carries the referenced weapon or item.
    pub fn party_owns(&self, kind: ItemKind, id: u8) -> bool {
        self.party.members().any(|member| member.owns(kind, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_visit_tracks_previous_location() {
        let mut game = GameState::default();
        game.record_visit(1);
        game.record_visit(2);
        assert_eq!(game.current_location, 2);
        assert_eq!(game.previous_location, 1);
        assert_eq!(game.visits.get(1), 1);
        assert_eq!(game.visits.get(2), 1);
    }

    #[test]
    fn record_defeat_targets_matching_counter() {
        let mut game = GameState::default();
        game.record_defeat(3, SpawnKind::Primary);
        game.record_defeat(3, SpawnKind::Secondary);
        game.record_defeat(3, SpawnKind::Secondary);
        assert_eq!(game.primary_defeats.get(3), 1);
        assert_eq!(game.secondary_defeats.get(3), 2);
    }

    #[test]
    fn turn_counter_wraps() {
        let mut game = GameState {
            turn: u16::MAX,
            ..GameState::default()
        };
        game.advance_turn();
        assert_eq!(game.turn, 0);
    }

    #[test]
    fn exit_mode_is_terminal() {
        let mut game = GameState::default();
        game.set_mode(GameMode::Combat).expect("map to combat");
        assert!(matches!(
            game.set_mode(GameMode::Shop),
            Err(StateError::InvalidTransition { .. })
        ));
        game.set_mode(GameMode::Map).expect("combat back to map");
        game.set_mode(GameMode::Exit).expect("map to exit");
        assert!(game.set_mode(GameMode::Map).is_err());
    }

    #[test]
    fn loot_goes_to_first_member_with_room() {
        let mut leader = PlayerState::new("Argus");
        for id in 0..GameConfig::MAX_ITEMS as u8 {
            leader.give(ItemRef::item(id)).expect("room");
        }
        let party = Party::from_members([leader, PlayerState::new("Bree")]).expect("fits");
        let mut game = GameState::new(party);
        game.give_to_party(ItemRef::weapon(1)).expect("second member has room");
        assert!(game.party.get(2).is_some_and(|pc| pc.owns(ItemKind::Weapon, 1)));
        assert!(game.party_owns(ItemKind::Weapon, 1));
    }

    #[test]
    fn empty_party_cannot_receive_items() {
        let mut game = GameState::default();
        assert_eq!(
            game.give_to_party(ItemRef::item(1)),
            Err(StateError::NoPartyMembers)
        );
    }
}
