//! Oracle access errors.

use crate::error::{ErrorReport, ErrorSeverity, GameError};
use crate::state::{LocationId, TextId};

/// Which character catalog a lookup targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum CharacterSource {
    Monster,
    Npc,
}

/// Errors raised while fetching static data through an oracle.
///
/// Lookups of ids the backing store does not hold are validation errors.
/// `Data` wraps a storage failure that already carries its user-facing
/// title and numeric code.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    #[error("location {0} not found")]
    LocationNotFound(LocationId),

    #[error("story text {0} not found")]
    StoryNotFound(TextId),

    #[error("{catalog} {id} not found")]
    CharacterNotFound { catalog: CharacterSource, id: u8 },

    #[error("weapon {0} not found")]
    WeaponNotFound(u8),

    #[error("item {0} not found")]
    ItemNotFound(u8),

    #[error("{message} (code {code})")]
    Data {
        code: i16,
        title: &'static str,
        message: String,
        severity: ErrorSeverity,
    },
}

impl OracleError {
    /// Title, message and numeric code shown to the player.
    pub fn report(&self) -> ErrorReport {
        match self {
            Self::Data {
                code,
                title,
                message,
                ..
            } => ErrorReport::new(*title, message.clone(), *code),
            other => ErrorReport::new("Datafile Error!", other.to_string(), 0),
        }
    }
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Data { severity, .. } => *severity,
            Self::LocationNotFound(_)
            | Self::StoryNotFound(_)
            | Self::CharacterNotFound { .. }
            | Self::WeaponNotFound(_)
            | Self::ItemNotFound(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::LocationNotFound(_) => "ORACLE_LOCATION_NOT_FOUND",
            Self::StoryNotFound(_) => "ORACLE_STORY_NOT_FOUND",
            Self::CharacterNotFound { .. } => "ORACLE_CHARACTER_NOT_FOUND",
            Self::WeaponNotFound(_) => "ORACLE_WEAPON_NOT_FOUND",
            Self::ItemNotFound(_) => "ORACLE_ITEM_NOT_FOUND",
            Self::Data { .. } => "ORACLE_DATA",
        }
    }
}
