//! Data file errors.
//!
//! Every variant carries the numeric code, title and message the front-end
//! shows before returning to the previous stable mode. Open failures, short
//! reads and consistency failures stay distinct so a missing file can be told
//! apart from a corrupt one.

use std::io;

use adventure_core::{CharacterSource, ErrorReport, ErrorSeverity, GameError, OracleError};

pub const DATAFILE_TITLE: &str = "Datafile Error!";
pub const MEMORY_TITLE: &str = "Memory Error!";

/// Which pair of data files a failure concerns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum DataKind {
    Map,
    Story,
    Weapon,
    Item,
    Monster,
    Npc,
}

impl From<CharacterSource> for DataKind {
    fn from(source: CharacterSource) -> Self {
        match source {
            CharacterSource::Monster => Self::Monster,
            CharacterSource::Npc => Self::Npc,
        }
    }
}

/// Failure while decoding an in-memory record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("record holds {available} bytes, {needed} needed")]
    Truncated { needed: usize, available: usize },

    #[error("{field} lists {count} entries, at most {max} fit")]
    Overflow {
        field: &'static str,
        count: usize,
        max: usize,
    },
}

impl DecodeError {
    /// Attaches the record the decoder was working on.
    pub fn in_record(self, kind: DataKind, id: u16) -> DataError {
        match self {
            Self::Truncated { needed, available } => DataError::Truncated {
                kind,
                id,
                needed,
                available,
            },
            Self::Overflow { field, count, max } => DataError::Overflow {
                kind,
                id,
                field,
                count,
                max,
            },
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("unable to open MAP .idx file: {0}")]
    MapIndexOpen(#[source] io::Error),

    #[error("unable to open MAP .dat file: {0}")]
    MapDataOpen(#[source] io::Error),

    #[error("map record {requested} holds location {found}")]
    MapMismatch { requested: u16, found: u16 },

    #[error("unable to open STORY .idx file: {0}")]
    StoryIndexOpen(#[source] io::Error),

    #[error("unable to open STORY .dat file: {0}")]
    StoryDataOpen(#[source] io::Error),

    #[error("unable to open ITEM .idx file: {0}")]
    ItemIndexOpen(#[source] io::Error),

    #[error("unable to open ITEM .dat file: {0}")]
    ItemDataOpen(#[source] io::Error),

    #[error("unable to open WEAPON .idx file: {0}")]
    WeaponIndexOpen(#[source] io::Error),

    #[error("unable to open WEAPON .dat file: {0}")]
    WeaponDataOpen(#[source] io::Error),

    #[error("unable to open MONSTER .dat file: {0}")]
    MonsterOpen(#[source] io::Error),

    #[error("unable to open NPC .dat file: {0}")]
    NpcOpen(#[source] io::Error),

    #[error("{catalog} record {id} lies past the end of its file")]
    MonsterSeek { catalog: CharacterSource, id: u8 },

    #[error("{catalog} record {requested} holds character {found}")]
    MonsterMismatch {
        catalog: CharacterSource,
        requested: u8,
        found: u16,
    },

    #[error("{kind} record {id} holds {available} bytes, {needed} needed")]
    Truncated {
        kind: DataKind,
        id: u16,
        needed: usize,
        available: usize,
    },

    #[error("reading {kind} data failed: {source}")]
    Read {
        kind: DataKind,
        #[source]
        source: io::Error,
    },

    #[error("{kind} record {id} is outside the index")]
    RecordNotFound { kind: DataKind, id: u16 },

    #[error("{kind} record {id}: {field} lists {count} entries, at most {max} fit")]
    Overflow {
        kind: DataKind,
        id: u16,
        field: &'static str,
        count: usize,
        max: usize,
    },

    #[error("unable to allocate {size} bytes for {kind} record")]
    Allocation { kind: DataKind, size: usize },
}

impl DataError {
    pub(crate) fn index_open(kind: DataKind, source: io::Error) -> Self {
        match kind {
            DataKind::Map => Self::MapIndexOpen(source),
            DataKind::Story => Self::StoryIndexOpen(source),
            DataKind::Weapon => Self::WeaponIndexOpen(source),
            DataKind::Item => Self::ItemIndexOpen(source),
            DataKind::Monster => Self::MonsterOpen(source),
            DataKind::Npc => Self::NpcOpen(source),
        }
    }

    pub(crate) fn data_open(kind: DataKind, source: io::Error) -> Self {
        match kind {
            DataKind::Map => Self::MapDataOpen(source),
            DataKind::Story => Self::StoryDataOpen(source),
            DataKind::Weapon => Self::WeaponDataOpen(source),
            DataKind::Item => Self::ItemDataOpen(source),
            DataKind::Monster => Self::MonsterOpen(source),
            DataKind::Npc => Self::NpcOpen(source),
        }
    }

    /// Numeric code shown alongside the message.
    pub fn code(&self) -> i16 {
        match self {
            Self::MapIndexOpen(_) => -30,
            Self::MapDataOpen(_) => -31,
            Self::MapMismatch { .. } | Self::Overflow { .. } => -32,
            Self::StoryIndexOpen(_) => -33,
            Self::StoryDataOpen(_) => -34,
            Self::ItemIndexOpen(_) => -35,
            Self::ItemDataOpen(_) => -36,
            Self::WeaponIndexOpen(_) => -37,
            Self::WeaponDataOpen(_) => -38,
            Self::Allocation { .. } => -39,
            Self::MonsterOpen(_) => -43,
            Self::NpcOpen(_) => -44,
            Self::MonsterSeek { .. } => -45,
            Self::MonsterMismatch { .. } => -46,
            Self::Truncated { .. } | Self::Read { .. } => -47,
            Self::RecordNotFound { .. } => -48,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Allocation { .. } => MEMORY_TITLE,
            _ => DATAFILE_TITLE,
        }
    }

    /// Player-facing message.
    pub fn message(&self) -> String {
        match self {
            Self::MapIndexOpen(_) => "Unable to open MAP .idx file.".into(),
            Self::MapDataOpen(_) => "Unable to open MAP .dat file.".into(),
            Self::MapMismatch { .. } => {
                "The loaded MAP location does not match. Datafile consistency error!".into()
            }
            Self::StoryIndexOpen(_) => "Unable to open STORY .idx file.".into(),
            Self::StoryDataOpen(_) => "Unable to open STORY .dat file.".into(),
            Self::ItemIndexOpen(_) | Self::ItemDataOpen(_) => "Unable to open ITEM data.".into(),
            Self::WeaponIndexOpen(_) | Self::WeaponDataOpen(_) => {
                "Unable to open WEAPON data.".into()
            }
            Self::MonsterOpen(_) => "Unable to open MONSTER data.".into(),
            Self::NpcOpen(_) => "Unable to open NPC data.".into(),
            Self::MonsterSeek { catalog, .. } => format!(
                "Unable to locate {} record.",
                catalog.to_string().to_uppercase()
            ),
            Self::MonsterMismatch { catalog, .. } => format!(
                "The loaded {} does not match. Datafile consistency error!",
                catalog.to_string().to_uppercase()
            ),
            Self::Truncated { kind, .. } | Self::Read { kind, .. } => {
                format!("Unable to read sufficient bytes from {kind} .dat file.")
            }
            Self::RecordNotFound { kind, id } => format!("No {kind} record with id {id}."),
            Self::Overflow { kind, .. } => {
                format!("The loaded {kind} record is too large. Datafile consistency error!")
            }
            Self::Allocation { .. } => "Unable to allocate memory.".into(),
        }
    }

    pub fn report(&self) -> ErrorReport {
        ErrorReport::new(self.title(), self.message(), self.code())
    }
}

impl GameError for DataError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::RecordNotFound { .. } => ErrorSeverity::Validation,
            Self::Allocation { .. } => ErrorSeverity::Fatal,
            _ => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MapIndexOpen(_) => "DATA_MAP_INDEX_OPEN",
            Self::MapDataOpen(_) => "DATA_MAP_DATA_OPEN",
            Self::MapMismatch { .. } => "DATA_MAP_MISMATCH",
            Self::StoryIndexOpen(_) => "DATA_STORY_INDEX_OPEN",
            Self::StoryDataOpen(_) => "DATA_STORY_DATA_OPEN",
            Self::ItemIndexOpen(_) => "DATA_ITEM_INDEX_OPEN",
            Self::ItemDataOpen(_) => "DATA_ITEM_DATA_OPEN",
            Self::WeaponIndexOpen(_) => "DATA_WEAPON_INDEX_OPEN",
            Self::WeaponDataOpen(_) => "DATA_WEAPON_DATA_OPEN",
            Self::MonsterOpen(_) => "DATA_MONSTER_OPEN",
            Self::NpcOpen(_) => "DATA_NPC_OPEN",
            Self::MonsterSeek { .. } => "DATA_MONSTER_SEEK",
            Self::MonsterMismatch { .. } => "DATA_MONSTER_MISMATCH",
            Self::Truncated { .. } => "DATA_TRUNCATED",
            Self::Read { .. } => "DATA_READ",
            Self::RecordNotFound { .. } => "DATA_RECORD_NOT_FOUND",
            Self::Overflow { .. } => "DATA_OVERFLOW",
            Self::Allocation { .. } => "DATA_ALLOCATION",
        }
    }
}

impl From<DataError> for OracleError {
    fn from(error: DataError) -> Self {
        OracleError::Data {
            code: error.code(),
            title: error.title(),
            message: error.message(),
            severity: error.severity(),
        }
    }
}
