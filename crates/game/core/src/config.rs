/// Engine capacity limits and tunable session defaults.
///
/// The associated constants size every bounded collection in the engine and
/// mirror the record formats produced by the data packer, so a data file that
/// exceeds one of them is rejected at load time rather than truncated.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Seed for spawn and loot chance rolls.
    pub rng_seed: u64,
    /// Gold the party starts the adventure with.
    pub starting_gold: u16,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Distinct locations tracked by the per-location counters.
    pub const MAX_LOCATIONS: usize = 256;
    /// Conditions allowed in a single condition block.
    pub const MAX_REQUIREMENTS: usize = 8;
    /// Bytes per encoded condition.
    pub const COND_LENGTH: usize = 5;
    pub const MAX_PLAYERS: usize = 4;
    pub const MAX_MONSTER_TYPES: usize = 4;
    pub const MAX_REWARD_ITEMS: usize = 6;
    pub const MAX_NPC_SLOTS: usize = 3;
    pub const MAX_LEVEL_NAME_SIZE: usize = 32;
    pub const MAX_ITEMS: usize = 32;
    pub const MAX_SPELLS: usize = 8;
    pub const MAX_STORY_TEXT_SIZE: usize = 1024;
    /// Fixed width of character, weapon and item names in catalog records.
    pub const NAME_SIZE: usize = 18;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_RNG_SEED: u64 = 0x0123_4567_89ab_cdef;
    pub const DEFAULT_STARTING_GOLD: u16 = 0;

    pub fn new() -> Self {
        Self {
            rng_seed: Self::DEFAULT_RNG_SEED,
            starting_gold: Self::DEFAULT_STARTING_GOLD,
        }
    }

    pub fn with_rng_seed(rng_seed: u64) -> Self {
        Self {
            rng_seed,
            ..Self::new()
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
