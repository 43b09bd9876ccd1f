//! On-disk data files and the oracles backed by them.
//!
//! Every lookup opens its files, reads one record and closes them again;
//! no handle outlives a call. Catalog records are cached after the first
//! read since they never change during a session. Locations and story text
//! are read fresh each time.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use adventure_core::{
    CharacterOracle, CharacterRecord, CharacterSource, ItemOracle, ItemRecord, LevelState,
    LocationId, LocationOracle, OracleError, StoryOracle, TextId, WeaponOracle, WeaponRecord,
};

use crate::error::{DataError, DataKind};
use crate::index::{ENTRY_SIZE, IndexBase, IndexEntry, index_offset};
use crate::loaders::{FileNames, Manifest};
use crate::reader::ByteOrder;
use crate::records::{
    decode_character, decode_item, decode_location, decode_story, decode_weapon, record_offset,
};

/// Paths of one index/data pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexedPaths {
    pub index: PathBuf,
    pub data: PathBuf,
}

impl IndexedPaths {
    fn in_dir(dir: &Path, stem: &str) -> Self {
        Self {
            index: dir.join(format!("{stem}.idx")),
            data: dir.join(format!("{stem}.dat")),
        }
    }
}

/// Every data file of one adventure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataPaths {
    pub map: IndexedPaths,
    pub story: IndexedPaths,
    pub weapons: IndexedPaths,
    pub items: IndexedPaths,
    pub monsters: PathBuf,
    pub npcs: PathBuf,
}

impl DataPaths {
    pub fn in_dir(dir: &Path, names: &FileNames) -> Self {
        Self {
            map: IndexedPaths::in_dir(dir, &names.map),
            story: IndexedPaths::in_dir(dir, &names.story),
            weapons: IndexedPaths::in_dir(dir, &names.weapons),
            items: IndexedPaths::in_dir(dir, &names.items),
            monsters: dir.join(format!("{}.dat", names.monsters)),
            npcs: dir.join(format!("{}.dat", names.npcs)),
        }
    }

    pub fn all(&self) -> [&Path; 10] {
        [
            &self.map.index,
            &self.map.data,
            &self.story.index,
            &self.story.data,
            &self.weapons.index,
            &self.weapons.data,
            &self.items.index,
            &self.items.data,
            &self.monsters,
            &self.npcs,
        ]
    }
}

type Cache<T> = RwLock<BTreeMap<u8, Arc<T>>>;

/// Reads an adventure's packed data files on demand.
#[derive(Debug)]
pub struct DataFiles {
    paths: DataPaths,
    order: ByteOrder,
    monsters: Cache<CharacterRecord>,
    npcs: Cache<CharacterRecord>,
    weapons: Cache<WeaponRecord>,
    items: Cache<ItemRecord>,
}

impl DataFiles {
    pub fn new(paths: DataPaths, order: ByteOrder) -> Self {
        Self {
            paths,
            order,
            monsters: RwLock::default(),
            npcs: RwLock::default(),
            weapons: RwLock::default(),
            items: RwLock::default(),
        }
    }

    /// Data files named by `manifest` inside `dir`.
    pub fn open(dir: &Path, manifest: &Manifest) -> Self {
        Self::new(DataPaths::in_dir(dir, &manifest.files), manifest.byte_order)
    }

    pub fn paths(&self) -> &DataPaths {
        &self.paths
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    /// Data files that do not exist.
    pub fn missing_files(&self) -> Vec<&Path> {
        self.paths
            .all()
            .into_iter()
            .filter(|path| !path.is_file())
            .collect()
    }

    /// Loads location `id` as a fresh working set.
    pub fn load_location(&self, id: LocationId) -> Result<LevelState, DataError> {
        let bytes = read_indexed(&self.paths.map, IndexBase::OneBased, id, DataKind::Map, self.order)?;
        let level = decode_location(&bytes, self.order)
            .map_err(|e| e.in_record(DataKind::Map, id))?;
        if level.id != id {
            tracing::warn!(requested = id, found = level.id, "map record does not match");
            return Err(DataError::MapMismatch {
                requested: id,
                found: level.id,
            });
        }
        tracing::debug!(location = id, bytes = bytes.len(), "map record decoded");
        Ok(level)
    }

    pub fn load_story(&self, id: TextId) -> Result<String, DataError> {
        let bytes = read_indexed(
            &self.paths.story,
            IndexBase::ZeroBased,
            id,
            DataKind::Story,
            self.order,
        )?;
        Ok(decode_story(&bytes))
    }

    pub fn load_character(
        &self,
        source: CharacterSource,
        id: u8,
    ) -> Result<Arc<CharacterRecord>, DataError> {
        let (cache, path) = match source {
            CharacterSource::Monster => (&self.monsters, &self.paths.monsters),
            CharacterSource::Npc => (&self.npcs, &self.paths.npcs),
        };
        cached(cache, id, || {
            let bytes = read_character(path, source, id)?;
            let record = decode_character(&bytes, self.order)
                .map_err(|e| e.in_record(source.into(), id.into()))?;
            if record.id != u16::from(id) {
                tracing::warn!(catalog = %source, requested = id, found = record.id, "character record does not match");
                return Err(DataError::MonsterMismatch {
                    catalog: source,
                    requested: id,
                    found: record.id,
                });
            }
            Ok(record)
        })
    }

    pub fn load_weapon(&self, id: u8) -> Result<Arc<WeaponRecord>, DataError> {
        cached(&self.weapons, id, || {
            let bytes = read_indexed(
                &self.paths.weapons,
                IndexBase::OneBased,
                id.into(),
                DataKind::Weapon,
                self.order,
            )?;
            decode_weapon(&bytes, self.order).map_err(|e| e.in_record(DataKind::Weapon, id.into()))
        })
    }

    pub fn load_item(&self, id: u8) -> Result<Arc<ItemRecord>, DataError> {
        cached(&self.items, id, || {
            let bytes = read_indexed(
                &self.paths.items,
                IndexBase::OneBased,
                id.into(),
                DataKind::Item,
                self.order,
            )?;
            decode_item(&bytes, self.order).map_err(|e| e.in_record(DataKind::Item, id.into()))
        })
    }
}

/// Returns the cached record or loads and caches it. A poisoned lock only
/// disables caching.
fn cached<T>(
    cache: &Cache<T>,
    id: u8,
    load: impl FnOnce() -> Result<T, DataError>,
) -> Result<Arc<T>, DataError> {
    if let Some(hit) = cache.read().ok().and_then(|map| map.get(&id).cloned()) {
        return Ok(hit);
    }
    let record = Arc::new(load()?);
    if let Ok(mut map) = cache.write() {
        map.insert(id, Arc::clone(&record));
    }
    Ok(record)
}

/// Reads `buf.len()` bytes, telling a short file apart from an I/O failure.
fn read_record(
    file: &mut File,
    buf: &mut [u8],
    kind: DataKind,
    id: u16,
    start: u64,
) -> Result<(), DataError> {
    match file.read_exact(buf) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
            let available = file
                .metadata()
                .map(|m| m.len().saturating_sub(start) as usize)
                .unwrap_or(0);
            Err(DataError::Truncated {
                kind,
                id,
                needed: buf.len(),
                available: available.min(buf.len()),
            })
        }
        Err(source) => Err(DataError::Read { kind, source }),
    }
}

fn alloc_record(kind: DataKind, size: usize) -> Result<Vec<u8>, DataError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(size)
        .map_err(|_| DataError::Allocation { kind, size })?;
    buf.resize(size, 0);
    Ok(buf)
}

/// Index lookup followed by a read of the record it points at.
fn read_indexed(
    paths: &IndexedPaths,
    base: IndexBase,
    id: u16,
    kind: DataKind,
    order: ByteOrder,
) -> Result<Vec<u8>, DataError> {
    let mut index = File::open(&paths.index).map_err(|e| DataError::index_open(kind, e))?;
    let mut data = File::open(&paths.data).map_err(|e| DataError::data_open(kind, e))?;

    let at = index_offset(base, id).ok_or(DataError::RecordNotFound { kind, id })?;
    let index_len = index
        .metadata()
        .map_err(|source| DataError::Read { kind, source })?
        .len();
    if at + ENTRY_SIZE as u64 > index_len {
        return Err(DataError::RecordNotFound { kind, id });
    }
    index
        .seek(SeekFrom::Start(at))
        .map_err(|source| DataError::Read { kind, source })?;
    let mut raw = [0; ENTRY_SIZE];
    read_record(&mut index, &mut raw, kind, id, at)?;
    let entry = IndexEntry::decode(raw, order);
    tracing::trace!(%kind, id, size = entry.size, offset = entry.offset, "index entry");

    let start = u64::from(entry.offset);
    data.seek(SeekFrom::Start(start))
        .map_err(|source| DataError::Read { kind, source })?;
    let mut buf = alloc_record(kind, usize::from(entry.size))?;
    read_record(&mut data, &mut buf, kind, id, start)?;
    Ok(buf)
}

/// Reads fixed record `id` from a character file.
fn read_character(path: &Path, source: CharacterSource, id: u8) -> Result<Vec<u8>, DataError> {
    let kind = DataKind::from(source);
    let mut file = File::open(path).map_err(|e| DataError::data_open(kind, e))?;
    let start = record_offset(id).ok_or(DataError::RecordNotFound {
        kind,
        id: id.into(),
    })?;
    let len = file
        .metadata()
        .map_err(|e| DataError::Read { kind, source: e })?
        .len();
    if start >= len {
        return Err(DataError::MonsterSeek {
            catalog: source,
            id,
        });
    }
    file.seek(SeekFrom::Start(start))
        .map_err(|e| DataError::Read { kind, source: e })?;
    let mut buf = alloc_record(kind, CharacterRecord::RECORD_SIZE)?;
    read_record(&mut file, &mut buf, kind, id.into(), start)?;
    Ok(buf)
}

impl LocationOracle for DataFiles {
    fn location(&self, id: LocationId) -> Result<LevelState, OracleError> {
        Ok(self.load_location(id)?)
    }
}

impl StoryOracle for DataFiles {
    fn story(&self, id: TextId) -> Result<String, OracleError> {
        Ok(self.load_story(id)?)
    }
}

impl CharacterOracle for DataFiles {
    fn character(
        &self,
        source: CharacterSource,
        id: u8,
    ) -> Result<Arc<CharacterRecord>, OracleError> {
        Ok(self.load_character(source, id)?)
    }
}

impl WeaponOracle for DataFiles {
    fn weapon(&self, id: u8) -> Result<Arc<WeaponRecord>, OracleError> {
        Ok(self.load_weapon(id)?)
    }
}

impl ItemOracle for DataFiles {
    fn item(&self, id: u8) -> Result<Arc<ItemRecord>, OracleError> {
        Ok(self.load_item(id)?)
    }
}
