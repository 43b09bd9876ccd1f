//! Packs a [`World`] into the binary data files read by [`crate::DataFiles`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use adventure_core::CharacterRecord;
use anyhow::Context;

use crate::index::IndexBase;
use crate::loaders::{FileNames, LoadResult, World};
use crate::reader::ByteOrder;
use crate::records::{
    encode_character, encode_item, encode_location, encode_story, encode_weapon,
};
use crate::writer::IndexedFileBuilder;

/// One output file, named relative to the data directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Lays records out by id. Ids without a record get an empty entry so every
/// later record stays at its positional slot.
fn indexed(
    records: BTreeMap<u16, Vec<u8>>,
    base: IndexBase,
    order: ByteOrder,
    stem: &str,
) -> LoadResult<[PackedFile; 2]> {
    let mut builder = IndexedFileBuilder::new(order);
    if let Some(&last) = records.keys().next_back() {
        for id in base.first_id()..=last {
            let record = records.get(&id).map(Vec::as_slice).unwrap_or_default();
            builder
                .push(record)
                .with_context(|| format!("{stem} record {id}"))?;
        }
    }
    let (index, data) = builder.finish();
    Ok([
        PackedFile {
            name: format!("{stem}.idx"),
            bytes: index,
        },
        PackedFile {
            name: format!("{stem}.dat"),
            bytes: data,
        },
    ])
}

/// Fixed-width character file; missing ids are zero-filled.
fn characters(records: &[CharacterRecord], order: ByteOrder, stem: &str) -> PackedFile {
    let last = records.iter().map(|r| usize::from(r.id)).max().unwrap_or(0);
    let mut bytes = vec![0; last * CharacterRecord::RECORD_SIZE];
    for record in records {
        let start = (usize::from(record.id) - 1) * CharacterRecord::RECORD_SIZE;
        bytes[start..start + CharacterRecord::RECORD_SIZE]
            .copy_from_slice(&encode_character(record, order));
    }
    PackedFile {
        name: format!("{stem}.dat"),
        bytes,
    }
}

/// Encodes every data file of `world`. The world is validated first.
pub fn pack_world(world: &World, names: &FileNames, order: ByteOrder) -> LoadResult<Vec<PackedFile>> {
    world.validate()?;

    let mut files = Vec::new();
    let locations = world
        .locations
        .iter()
        .map(|level| (level.id, encode_location(level, order)))
        .collect();
    files.extend(indexed(locations, IndexBase::OneBased, order, &names.map)?);

    let story = world
        .story
        .iter()
        .map(|entry| (entry.id, encode_story(&entry.text)))
        .collect();
    files.extend(indexed(story, IndexBase::ZeroBased, order, &names.story)?);

    let weapons = world
        .weapons
        .iter()
        .map(|weapon| (u16::from(weapon.id), encode_weapon(weapon, order)))
        .collect();
    files.extend(indexed(weapons, IndexBase::OneBased, order, &names.weapons)?);

    let items = world
        .items
        .iter()
        .map(|item| (u16::from(item.id), encode_item(item, order)))
        .collect();
    files.extend(indexed(items, IndexBase::OneBased, order, &names.items)?);

    files.push(characters(&world.monsters, order, &names.monsters));
    files.push(characters(&world.npcs, order, &names.npcs));
    Ok(files)
}

/// Writes packed files into `dir`, creating it when needed.
pub fn write_pack(dir: &Path, files: &[PackedFile]) -> LoadResult<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating data directory {}", dir.display()))?;
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = dir.join(&file.name);
        std::fs::write(&path, &file.bytes)
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::debug!(path = %path.display(), bytes = file.bytes.len(), "wrote data file");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{ENTRY_SIZE, entries};
    use crate::loaders::StoryEntry;
    use adventure_core::{CharacterKind, LevelState};

    fn world() -> World {
        World {
            locations: vec![LevelState::new(1, "Glade"), LevelState::new(3, "Cave")],
            story: vec![
                StoryEntry {
                    id: 0,
                    text: "Title".into(),
                },
                StoryEntry {
                    id: 1,
                    text: "Intro".into(),
                },
            ],
            monsters: vec![CharacterRecord::new(2, "Wolf", CharacterKind::Monster)],
            ..World::default()
        }
    }

    fn file<'a>(files: &'a [PackedFile], name: &str) -> &'a [u8] {
        files
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.bytes.as_slice())
            .expect("file packed")
    }

    #[test]
    fn gaps_keep_positional_slots() {
        let files = pack_world(&world(), &FileNames::default(), ByteOrder::Big).expect("packs");
        let map = entries(file(&files, "map.idx"), ByteOrder::Big);
        assert_eq!(map.len(), 3);
        assert_eq!(map[1].size, 0);
        assert_eq!(map[2].offset, u32::from(map[0].size));

        let story = file(&files, "story.idx");
        assert_eq!(story.len(), 2 * ENTRY_SIZE);
        assert_eq!(file(&files, "story.dat"), b"TitleIntro");

        let monsters = file(&files, "monster.dat");
        assert_eq!(monsters.len(), 2 * CharacterRecord::RECORD_SIZE);
        assert!(monsters[..CharacterRecord::RECORD_SIZE].iter().all(|&b| b == 0));
        assert!(file(&files, "npc.dat").is_empty());
        assert!(file(&files, "weapons.idx").is_empty());
    }

    #[test]
    fn invalid_world_is_not_packed() {
        let mut broken = world();
        broken.story.clear();
        assert!(pack_world(&broken, &FileNames::default(), ByteOrder::Big).is_err());
    }
}
