//! Adventure manifest (`adventure.toml`).

use std::path::{Path, PathBuf};

use adventure_core::rules::{CharacterClass, Race};
use adventure_core::state::Abilities;
use adventure_core::{GameConfig, LocationId, Party, PlayerState};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};
use crate::reader::ByteOrder;

/// Base names of the packed data files inside a data directory.
///
/// Indexed files get `.idx` and `.dat` appended; character files are plain
/// fixed-record files and get `.dat` only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileNames {
    pub map: String,
    pub story: String,
    pub weapons: String,
    pub items: String,
    pub monsters: String,
    pub npcs: String,
}

impl Default for FileNames {
    fn default() -> Self {
        Self {
            map: "map".into(),
            story: "story".into(),
            weapons: "weapons".into(),
            items: "items".into(),
            monsters: "monster".into(),
            npcs: "npc".into(),
        }
    }
}

/// A starting party member.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberSpec {
    pub name: String,
    pub class: CharacterClass,
    pub race: Race,
    pub level: u8,
    pub abilities: Abilities,
    pub hp: u16,
}

impl Default for MemberSpec {
    fn default() -> Self {
        Self {
            name: "Adventurer".into(),
            class: CharacterClass::default(),
            race: Race::Human,
            level: 1,
            abilities: Abilities::uniform(10),
            hp: 10,
        }
    }
}

impl MemberSpec {
    pub fn to_player(&self) -> PlayerState {
        let mut player = PlayerState::new(&self.name)
            .with_class(self.class)
            .with_abilities(self.abilities)
            .with_hp(self.hp);
        player.race = self.race;
        player.level = self.level.max(1);
        player
    }
}

/// Everything a front-end needs to start an adventure from a data directory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    pub name: String,
    pub start_location: LocationId,
    pub starting_gold: u16,
    pub rng_seed: Option<u64>,
    pub byte_order: ByteOrder,
    pub files: FileNames,
    pub party: Vec<MemberSpec>,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            name: String::new(),
            start_location: 1,
            starting_gold: GameConfig::DEFAULT_STARTING_GOLD,
            rng_seed: None,
            byte_order: ByteOrder::default(),
            files: FileNames::default(),
            party: vec![MemberSpec::default()],
        }
    }
}

impl Manifest {
    pub const FILE_NAME: &'static str = "adventure.toml";

    /// Builds the starting party, rejecting more members than fit.
    pub fn party(&self) -> LoadResult<Party> {
        let party = Party::from_members(self.party.iter().map(MemberSpec::to_player))
            .map_err(|e| anyhow::anyhow!("Invalid starting party: {}", e))?;
        Ok(party)
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            rng_seed: self.rng_seed.unwrap_or(GameConfig::DEFAULT_RNG_SEED),
            starting_gold: self.starting_gold,
        }
    }
}

/// Loader for adventure manifests from TOML files.
pub struct ManifestLoader;

impl ManifestLoader {
    /// Parse manifest data from a TOML string.
    pub fn parse(content: &str) -> LoadResult<Manifest> {
        let manifest: Manifest = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse manifest TOML: {}", e))?;
        if manifest.start_location == 0 {
            anyhow::bail!("start_location must be a location id, not 0");
        }
        Ok(manifest)
    }

    /// Load a manifest from a TOML file.
    pub fn load(path: &Path) -> LoadResult<Manifest> {
        Self::parse(&read_file(path)?)
    }

    /// Load `adventure.toml` from `dir`, falling back to defaults when the
    /// directory has none.
    pub fn load_from_dir(dir: &Path) -> LoadResult<Manifest> {
        let path = Self::path_in(dir);
        if !path.exists() {
            tracing::info!(dir = %dir.display(), "no adventure manifest, using defaults");
            return Ok(Manifest::default());
        }
        Self::load(&path)
    }

    /// Render a manifest back to TOML.
    pub fn render(manifest: &Manifest) -> LoadResult<String> {
        toml::to_string_pretty(manifest)
            .map_err(|e| anyhow::anyhow!("Failed to render manifest TOML: {}", e))
    }

    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join(Manifest::FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_manifest() {
        let manifest = ManifestLoader::parse(
            r#"
            name = "Leafy Glade"
            start_location = 3
            starting_gold = 25
            byte_order = "little"

            [files]
            map = "glade_map"

            [[party]]
            name = "Argus"
            class = "Fighter"
            race = "Elf"
            level = 2
            hp = 14
            abilities = { str = 15, dex = 12, con = 14, wis = 8, int = 10, chr = 9 }

            [[party]]
            name = "Mira"
            "#,
        )
        .expect("valid manifest");

        assert_eq!(manifest.name, "Leafy Glade");
        assert_eq!(manifest.start_location, 3);
        assert_eq!(manifest.byte_order, ByteOrder::Little);
        assert_eq!(manifest.files.map, "glade_map");
        assert_eq!(manifest.files.story, "story");

        let party = manifest.party().expect("fits");
        assert_eq!(party.len(), 2);
        let leader = party.leader().expect("leader");
        assert_eq!(leader.name, "Argus");
        assert_eq!(leader.class, CharacterClass::Fighter);
        assert_eq!(leader.race, Race::Elf);
        assert_eq!(leader.abilities.str, 15);
        assert_eq!(leader.hp, 14);
        assert_eq!(party.get(2).map(|pc| pc.hp), Some(10));
        assert_eq!(manifest.game_config().starting_gold, 25);
    }

    #[test]
    fn empty_manifest_uses_defaults() {
        let manifest = ManifestLoader::parse("").expect("defaults");
        assert_eq!(manifest, Manifest::default());
        assert_eq!(manifest.byte_order, ByteOrder::Big);
        assert_eq!(manifest.game_config().rng_seed, GameConfig::DEFAULT_RNG_SEED);
    }

    #[test]
    fn rendered_manifest_parses_back() {
        let mut manifest = Manifest {
            name: "Sands".into(),
            start_location: 4,
            byte_order: ByteOrder::Little,
            ..Manifest::default()
        };
        manifest.files.npcs = "townsfolk".into();
        let text = ManifestLoader::render(&manifest).expect("renders");
        assert_eq!(ManifestLoader::parse(&text).expect("parses"), manifest);
    }

    #[test]
    fn rejects_oversized_party() {
        let members = "[[party]]\n".repeat(5);
        let manifest = ManifestLoader::parse(&members).expect("parses");
        assert!(manifest.party().is_err());
    }

    #[test]
    fn rejects_location_zero() {
        assert!(ManifestLoader::parse("start_location = 0").is_err());
    }

    #[test]
    fn missing_manifest_falls_back() {
        let dir = tempfile::tempdir().expect("tempdir");
        let manifest = ManifestLoader::load_from_dir(dir.path()).expect("defaults");
        assert_eq!(manifest.start_location, 1);

        std::fs::write(ManifestLoader::path_in(dir.path()), "name = \"Sands\"").expect("write");
        let manifest = ManifestLoader::load_from_dir(dir.path()).expect("loads");
        assert_eq!(manifest.name, "Sands");
    }
}
