//! Adventure engine core: data model, condition engine and location logic.
//!
//! `adventure-core` holds the rules of a room-at-a-time adventure and never
//! touches files or the terminal. Static data reaches it through the oracle
//! traits in [`env`]; the session's mutable state lives in
//! [`state::GameState`] alongside the single resident [`state::LevelState`],
//! and [`visit::LocationVisit`] drives both from the map screen.
pub mod catalog;
pub mod condition;
pub mod config;
pub mod env;
pub mod error;
pub mod gate;
pub mod roster;
pub mod rules;
pub mod state;
pub mod visit;

pub use catalog::{CharacterKind, CharacterRecord, ItemRecord, WeaponRecord};
pub use condition::{
    Attribute, Condition, ConditionBlock, ConditionError, EvalPolicy, NpcCheck, Ownership,
    RawCondition, VisitBound, evaluate,
};
pub use config::GameConfig;
pub use env::{
    CharacterOracle, CharacterSource, Env, ItemOracle, LocationOracle, MemoryOracle, OracleError,
    PcgRng, RngOracle, StoryOracle, WeaponOracle,
};
pub use error::{ErrorReport, ErrorSeverity, GameError};
pub use gate::{
    ExitNarration, check_loot, check_monster_spawn, check_movement, check_talk,
    describe_movement,
};
pub use roster::{NpcRecord, NpcRoster, RosterError};
pub use state::{
    Direction, Encounter, Exit, GameMode, GameState, ItemKind, ItemRef, LevelState, LocationId,
    LootTable, NpcSlot, Party, PartyMemberStatus, PlayerState, SpawnKind, SpawnTable, StateError,
    TextId,
};
pub use visit::{AllowedActions, DebugReport, LocationVisit, VisitError, VisitReport};
