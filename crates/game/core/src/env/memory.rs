//! In-memory oracle backed by maps.
//!
//! Used by authoring tools that build a world without packing it to disk and
//! by tests that need a small adventure.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::{
    CharacterOracle, CharacterSource, ItemOracle, LocationOracle, OracleError, StoryOracle,
    WeaponOracle,
};
use crate::catalog::{CharacterRecord, ItemRecord, WeaponRecord};
use crate::state::{LevelState, LocationId, TextId};

#[derive(Clone, Debug, Default)]
pub struct MemoryOracle {
    locations: BTreeMap<LocationId, LevelState>,
    story: BTreeMap<TextId, String>,
    monsters: BTreeMap<u8, Arc<CharacterRecord>>,
    npcs: BTreeMap<u8, Arc<CharacterRecord>>,
    weapons: BTreeMap<u8, Arc<WeaponRecord>>,
    items: BTreeMap<u8, Arc<ItemRecord>>,
}

impl MemoryOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_location(mut self, level: LevelState) -> Self {
        self.insert_location(level);
        self
    }

    pub fn with_story(mut self, id: TextId, text: impl Into<String>) -> Self {
        self.insert_story(id, text);
        self
    }

    pub fn with_character(mut self, source: CharacterSource, record: CharacterRecord) -> Self {
        self.insert_character(source, record);
        self
    }

    pub fn with_weapon(mut self, record: WeaponRecord) -> Self {
        self.weapons.insert(record.id, Arc::new(record));
        self
    }

    pub fn with_item(mut self, record: ItemRecord) -> Self {
        self.items.insert(record.id, Arc::new(record));
        self
    }

    pub fn insert_location(&mut self, level: LevelState) {
        self.locations.insert(level.id, level);
    }

    pub fn insert_story(&mut self, id: TextId, text: impl Into<String>) {
        self.story.insert(id, text.into());
    }

    /// Character ids are 8-bit in every reference; wider ids are truncated.
    pub fn insert_character(&mut self, source: CharacterSource, record: CharacterRecord) {
        let id = record.id as u8;
        let table = match source {
            CharacterSource::Monster => &mut self.monsters,
            CharacterSource::Npc => &mut self.npcs,
        };
        table.insert(id, Arc::new(record));
    }

    pub fn location_ids(&self) -> impl Iterator<Item = LocationId> + '_ {
        self.locations.keys().copied()
    }
}

impl LocationOracle for MemoryOracle {
    fn location(&self, id: LocationId) -> Result<LevelState, OracleError> {
        self.locations
            .get(&id)
            .cloned()
            .ok_or(OracleError::LocationNotFound(id))
    }
}

impl StoryOracle for MemoryOracle {
    fn story(&self, id: TextId) -> Result<String, OracleError> {
        self.story
            .get(&id)
            .cloned()
            .ok_or(OracleError::StoryNotFound(id))
    }
}

impl CharacterOracle for MemoryOracle {
    fn character(
        &self,
        source: CharacterSource,
        id: u8,
    ) -> Result<Arc<CharacterRecord>, OracleError> {
        let table = match source {
            CharacterSource::Monster => &self.monsters,
            CharacterSource::Npc => &self.npcs,
        };
        table
            .get(&id)
            .cloned()
            .ok_or(OracleError::CharacterNotFound {
                catalog: source,
                id,
            })
    }
}

impl WeaponOracle for MemoryOracle {
    fn weapon(&self, id: u8) -> Result<Arc<WeaponRecord>, OracleError> {
        self.weapons
            .get(&id)
            .cloned()
            .ok_or(OracleError::WeaponNotFound(id))
    }
}

impl ItemOracle for MemoryOracle {
    fn item(&self, id: u8) -> Result<Arc<ItemRecord>, OracleError> {
        self.items
            .get(&id)
            .cloned()
            .ok_or(OracleError::ItemNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CharacterKind;

    #[test]
    fn catalogs_are_separate() {
        let oracle = MemoryOracle::new()
            .with_character(
                CharacterSource::Npc,
                CharacterRecord::new(1, "Innkeeper", CharacterKind::Npc),
            )
            .with_story(0, "Leafy Glade");
        assert_eq!(
            oracle.character(CharacterSource::Npc, 1).map(|r| r.name.clone()),
            Ok("Innkeeper".to_string())
        );
        assert_eq!(
            oracle.character(CharacterSource::Monster, 1),
            Err(OracleError::CharacterNotFound {
                catalog: CharacterSource::Monster,
                id: 1
            })
        );
        assert_eq!(oracle.story(0).as_deref(), Ok("Leafy Glade"));
        assert_eq!(oracle.location(3), Err(OracleError::LocationNotFound(3)));
    }
}
