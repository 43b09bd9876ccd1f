//! RON world descriptions.
//!
//! A world file lists every location, story text and catalog entry of one
//! adventure. It is the source the packer turns into binary data files, and
//! it can be played directly through [`World::into_oracle`].

use std::collections::BTreeSet;
use std::path::Path;

use adventure_core::visit::{INTRODUCTION_TEXT, TITLE_TEXT};
use adventure_core::{
    CharacterRecord, CharacterSource, ItemRecord, LevelState, MemoryOracle, TextId, WeaponRecord,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryEntry {
    pub id: TextId,
    pub text: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct World {
    pub locations: Vec<LevelState>,
    pub story: Vec<StoryEntry>,
    pub monsters: Vec<CharacterRecord>,
    pub npcs: Vec<CharacterRecord>,
    pub weapons: Vec<WeaponRecord>,
    pub items: Vec<ItemRecord>,
}

impl World {
    /// Checks every cross reference and id range the packed format relies on.
    pub fn validate(&self) -> LoadResult<()> {
        let mut problems = Vec::new();

        let locations = unique_ids(
            "location",
            self.locations.iter().map(|l| l.id),
            false,
            &mut problems,
        );
        let story = unique_ids("story", self.story.iter().map(|s| s.id), true, &mut problems);
        let monsters = unique_ids(
            "monster",
            self.monsters.iter().map(|c| c.id),
            false,
            &mut problems,
        );
        let npcs = unique_ids("npc", self.npcs.iter().map(|c| c.id), false, &mut problems);
        let weapons = unique_ids(
            "weapon",
            self.weapons.iter().map(|w| u16::from(w.id)),
            false,
            &mut problems,
        );
        let items = unique_ids(
            "item",
            self.items.iter().map(|i| u16::from(i.id)),
            false,
            &mut problems,
        );

        for required in [TITLE_TEXT, INTRODUCTION_TEXT] {
            if !story.contains(&required) {
                problems.push(format!("story text {required} is required"));
            }
        }
        for (catalog, ids) in [("monster", &monsters), ("npc", &npcs)] {
            if let Some(id) = ids.iter().find(|&&id| id > u16::from(u8::MAX)) {
                problems.push(format!("{catalog} id {id} does not fit in a byte"));
            }
        }

        for level in &self.locations {
            let at = format!("location {}", level.id);
            let mut text = |field: &str, id: TextId| {
                if id != 0 && !story.contains(&id) {
                    problems.push(format!("{at}: {field} refers to missing story text {id}"));
                }
            };
            text("text", level.text_id);
            text("text_spawn", level.text_spawn);
            text("text_after_spawn", level.text_after_spawn);
            text("text_respawn", level.text_respawn);
            text("text_after_respawn", level.text_after_respawn);
            for exit in &level.exits {
                text("exit text", exit.text_id);
            }
            for slot in &level.npcs {
                text("npc text", slot.text_id);
            }

            for exit in level.exits.iter().filter(|e| e.exists()) {
                if !locations.contains(&exit.destination) {
                    problems.push(format!("{at}: exit leads to missing location {}", exit.destination));
                }
            }
            for &monster in level.spawn.monsters.iter().chain(&level.respawn.monsters) {
                if !monsters.contains(&u16::from(monster)) {
                    problems.push(format!("{at}: spawns missing monster {monster}"));
                }
            }
            for slot in level.npcs.iter().filter(|s| s.is_used()) {
                if !npcs.contains(&u16::from(slot.npc_id)) {
                    problems.push(format!("{at}: hosts missing npc {}", slot.npc_id));
                }
            }
            for &weapon in &level.loot.weapons {
                if !weapons.contains(&u16::from(weapon)) {
                    problems.push(format!("{at}: loot names missing weapon {weapon}"));
                }
            }
            for &item in &level.loot.items {
                if !items.contains(&u16::from(item)) {
                    problems.push(format!("{at}: loot names missing item {item}"));
                }
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            anyhow::bail!("world has {} problem(s):\n  {}", problems.len(), problems.join("\n  "))
        }
    }

    /// Text with the given id, if the world defines it.
    pub fn story_text(&self, id: TextId) -> Option<&str> {
        self.story
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.text.as_str())
    }

    /// Serves the world straight from memory, without packing it.
    pub fn into_oracle(self) -> MemoryOracle {
        let mut oracle = MemoryOracle::new();
        for level in self.locations {
            oracle.insert_location(level);
        }
        for entry in self.story {
            oracle.insert_story(entry.id, entry.text);
        }
        for record in self.monsters {
            oracle.insert_character(CharacterSource::Monster, record);
        }
        for record in self.npcs {
            oracle.insert_character(CharacterSource::Npc, record);
        }
        for record in self.weapons {
            oracle = oracle.with_weapon(record);
        }
        for record in self.items {
            oracle = oracle.with_item(record);
        }
        oracle
    }
}

/// Collects ids, reporting duplicates and the reserved id 0.
fn unique_ids(
    what: &str,
    ids: impl Iterator<Item = u16>,
    allow_zero: bool,
    problems: &mut Vec<String>,
) -> BTreeSet<u16> {
    let mut seen = BTreeSet::new();
    for id in ids {
        if id == 0 && !allow_zero {
            problems.push(format!("{what} id 0 is reserved"));
        }
        if !seen.insert(id) {
            problems.push(format!("duplicate {what} id {id}"));
        }
    }
    seen
}

/// Loader for world descriptions from RON files.
pub struct WorldLoader;

impl WorldLoader {
    /// Parse a world from a RON string.
    pub fn parse(content: &str) -> LoadResult<World> {
        let world: World = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse world RON: {}", e))?;
        Ok(world)
    }

    /// Load a world from a RON file.
    pub fn load(path: &Path) -> LoadResult<World> {
        Self::parse(&read_file(path)?)
    }
}
