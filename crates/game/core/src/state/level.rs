//! The single resident location.
//!
//! A [`LevelState`] is decoded from one location record and replaced wholesale
//! when the party moves; nothing about a location survives a reload except the
//! per-location counters held by [`crate::GameState`].

use arrayvec::ArrayVec;

use crate::condition::ConditionBlock;
use crate::config::GameConfig;
use crate::state::SpawnKind;

/// Location identifier. `0` means "no location" in exit fields.
pub type LocationId = u16;

/// Story-text reference. `0` means "no text" in every field except the
/// adventure title.
pub type TextId = u16;

/// Compass direction of an exit.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Record order of exits.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub const fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::South => 1,
            Self::East => 2,
            Self::West => 3,
        }
    }
}

/// One navigable exit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Exit {
    pub destination: LocationId,
    pub text_id: TextId,
    pub requires: ConditionBlock,
}

impl Exit {
    pub fn to(destination: LocationId) -> Self {
        Self {
            destination,
            ..Self::default()
        }
    }

    pub fn with_requirements(mut self, requires: ConditionBlock) -> Self {
        self.requires = requires;
        self
    }

    pub fn with_text(mut self, text_id: TextId) -> Self {
        self.text_id = text_id;
        self
    }

    pub fn exists(&self) -> bool {
        self.destination != 0
    }
}

/// Monster encounter table: primary spawn or secondary respawn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpawnTable {
    /// Percentage chance (0-100) the encounter happens once its conditions pass.
    pub chance: u8,
    pub monsters: ArrayVec<u8, { GameConfig::MAX_MONSTER_TYPES }>,
    pub requires: ConditionBlock,
}

impl SpawnTable {
    pub fn is_empty(&self) -> bool {
        self.monsters.is_empty()
    }
}

/// Loot available at the location, weapons and items kept apart.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LootTable {
    pub chance: u8,
    pub weapons: ArrayVec<u8, { GameConfig::MAX_REWARD_ITEMS }>,
    pub items: ArrayVec<u8, { GameConfig::MAX_REWARD_ITEMS }>,
    pub requires: ConditionBlock,
}

impl LootTable {
    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty() && self.items.is_empty()
    }
}

/// One of the three NPC slots of a location.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NpcSlot {
    /// NPC id, `0` for an unused slot.
    pub npc_id: u8,
    pub requires: ConditionBlock,
    pub dialogue_id: u8,
    pub text_id: TextId,
    /// Whether the NPC showed up on this visit; recomputed by every talk check.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub present: bool,
}

impl NpcSlot {
    pub fn is_used(&self) -> bool {
        self.npc_id != 0
    }
}

/// Working set of the location the party is standing in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LevelState {
    pub id: LocationId,
    pub name: String,
    /// Default story text shown on arrival.
    pub text_id: TextId,
    pub exits: [Exit; 4],
    pub spawn: SpawnTable,
    pub respawn: SpawnTable,
    pub loot: LootTable,
    pub text_spawn: TextId,
    pub text_after_spawn: TextId,
    pub text_respawn: TextId,
    pub text_after_respawn: TextId,
    pub npcs: [NpcSlot; GameConfig::MAX_NPC_SLOTS],
    /// Table whose monsters are currently spawned here. Cleared whenever the
    /// location loads.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub spawned: Option<SpawnKind>,
    /// The loot has been collected on this visit.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub looted: bool,
}

impl LevelState {
    pub fn new(id: LocationId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn exit(&self, direction: Direction) -> &Exit {
        &self.exits[direction.index()]
    }

    pub fn exit_mut(&mut self, direction: Direction) -> &mut Exit {
        &mut self.exits[direction.index()]
    }

    pub fn has_spawned(&self) -> bool {
        self.spawned.is_some()
    }

    /// Returns the location with `exit` installed for `direction`.
    pub fn with_exit(mut self, direction: Direction, exit: Exit) -> Self {
        self.exits[direction.index()] = exit;
        self
    }
}
