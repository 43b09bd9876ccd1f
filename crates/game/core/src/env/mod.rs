//! Traits describing read-only adventure data.
//!
//! Oracles expose locations, story text and the character, weapon and item
//! catalogs. The [`Env`] aggregate bundles them so gate and visit logic can
//! reach everything it needs without depending on how the data is stored.
mod error;
mod memory;
mod rng;

use std::sync::Arc;

pub use error::{CharacterSource, OracleError};
pub use memory::MemoryOracle;
pub use rng::{PcgRng, RngOracle, RollContext, compute_seed, roll_chance};

use crate::catalog::{CharacterRecord, ItemRecord, WeaponRecord};
use crate::state::{LevelState, LocationId, TextId};

/// Decoded location records.
pub trait LocationOracle: Send + Sync {
    /// Builds a fresh [`LevelState`] for `id`. Nothing is returned unless the
    /// whole record decoded.
    fn location(&self, id: LocationId) -> Result<LevelState, OracleError>;
}

pub trait StoryOracle: Send + Sync {
    fn story(&self, id: TextId) -> Result<String, OracleError>;
}

pub trait CharacterOracle: Send + Sync {
    fn character(
        &self,
        source: CharacterSource,
        id: u8,
    ) -> Result<Arc<CharacterRecord>, OracleError>;
}

pub trait WeaponOracle: Send + Sync {
    fn weapon(&self, id: u8) -> Result<Arc<WeaponRecord>, OracleError>;
}

pub trait ItemOracle: Send + Sync {
    fn item(&self, id: u8) -> Result<Arc<ItemRecord>, OracleError>;
}

/// Aggregates the read-only oracles a session needs.
#[derive(Clone, Copy)]
pub struct Env<'a> {
    pub locations: &'a dyn LocationOracle,
    pub story: &'a dyn StoryOracle,
    pub characters: &'a dyn CharacterOracle,
    pub weapons: &'a dyn WeaponOracle,
    pub items: &'a dyn ItemOracle,
    pub rng: &'a dyn RngOracle,
}

impl<'a> Env<'a> {
    /// Uses one backing store for every catalog.
    pub fn from_store<S>(store: &'a S, rng: &'a dyn RngOracle) -> Self
    where
        S: LocationOracle + StoryOracle + CharacterOracle + WeaponOracle + ItemOracle,
    {
        Self {
            locations: store,
            story: store,
            characters: store,
            weapons: store,
            items: store,
            rng,
        }
    }
}

impl core::fmt::Debug for Env<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Env").finish_non_exhaustive()
    }
}
