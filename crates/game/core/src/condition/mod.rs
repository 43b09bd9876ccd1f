//! Condition engine.
//!
//! Location records gate exits, spawns, loot and NPC appearances behind
//! blocks of 5-byte conditions. Each condition is decoded once, when the
//! location loads, into a [`Condition`]; a [`ConditionBlock`] pairs an ordered
//! list of them with the [`EvalPolicy`] that folds their results into one
//! verdict.
//!
//! Wire layout, `[kind, a, b, c, d]`:
//!
//! | kind | a | b | c | d |
//! |---|---|---|---|---|
//! | 0 | 0 always, 1 no monsters spawned | | | |
//! | 1, 2 | | attribute | threshold | |
//! | 3 | | party slot | member status | |
//! | 4 | 1 at most, 2 at least | location hi | location lo | count |
//! | 5 | 1 primary, 2 secondary | location hi | location lo | count |
//! | 6 | npc check | npc id | value hi | value lo |
//! | 7, 8 | 1 owned, 2 not owned | id | number | |
mod block;
mod check;
mod policy;

pub use block::{ConditionBlock, ConditionError, evaluate};
pub use policy::EvalPolicy;

use crate::config::GameConfig;
use crate::state::{ItemKind, LocationId, PartyMemberStatus, SpawnKind};

/// Raw condition bytes as stored in a location record.
pub type RawCondition = [u8; GameConfig::COND_LENGTH];

/// Statistic compared by player and party attribute conditions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::FromRepr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Attribute {
    Strength = 0x01,
    Dexterity = 0x02,
    Constitution = 0x03,
    Wisdom = 0x04,
    Intelligence = 0x06,
    Charisma = 0x07,
    HitPoints = 0x08,
    /// Session gold, shared by the whole party.
    Gold = 0x09,
    /// Damage the character has inflicted.
    DamageCaused = 0x0A,
    /// Damage the character has taken.
    InjuryTaken = 0x0B,
}

/// Direction of a visit-count comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VisitBound {
    AtMost,
    AtLeast,
}

/// What an NPC condition asks about the roster entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::FromRepr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum NpcCheck {
    /// Talked to at least `value` times.
    Talked = 0x01,
    Alive = 0x02,
    Dead = 0x03,
    /// Last talked to no more than `value` turns ago.
    TalkedWithin = 0x04,
    /// Last talked to at least `value` turns ago.
    TalkedBefore = 0x05,
}

/// Polarity of an item or weapon ownership condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Ownership {
    Owned,
    NotOwned,
}

/// A single decoded condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Condition {
    Always,
    NoMonstersSpawned,
    /// Party leader's attribute is at least `threshold`.
    PlayerAttribute { attribute: Attribute, threshold: u8 },
    /// Any party member's attribute is at least `threshold`.
    PartyAttribute { attribute: Attribute, threshold: u8 },
    PartyMember { slot: u8, status: PartyMemberStatus },
    MapVisit {
        location: LocationId,
        bound: VisitBound,
        count: u8,
    },
    MonsterDefeat {
        location: LocationId,
        spawn: SpawnKind,
        count: u8,
    },
    Npc { npc: u8, check: NpcCheck, value: u16 },
    Owns {
        kind: ItemKind,
        id: u8,
        polarity: Ownership,
        /// Quantity byte; carried through but not compared.
        number: u8,
    },
    /// Known kind with an unrecognised sub-kind, attribute or status.
    /// Counts as a single false result.
    Malformed(RawCondition),
    /// Unrecognised kind byte. Fails the whole block.
    Unsupported(RawCondition),
}

impl Condition {
    pub const KIND_SIMPLE: u8 = 0x00;
    pub const KIND_PLAYER_ATTRIBUTE: u8 = 0x01;
    pub const KIND_PARTY_ATTRIBUTE: u8 = 0x02;
    pub const KIND_PARTY_MEMBER: u8 = 0x03;
    pub const KIND_MAP_VISIT: u8 = 0x04;
    pub const KIND_MONSTER_DEFEAT: u8 = 0x05;
    pub const KIND_NPC: u8 = 0x06;
    pub const KIND_ITEM: u8 = 0x07;
    pub const KIND_WEAPON: u8 = 0x08;

    pub fn decode(raw: RawCondition) -> Self {
        let [kind, a, b, c, d] = raw;
        let malformed = Self::Malformed(raw);
        match kind {
            Self::KIND_SIMPLE => match a {
                0x00 => Self::Always,
                0x01 => Self::NoMonstersSpawned,
                _ => malformed,
            },
            Self::KIND_PLAYER_ATTRIBUTE | Self::KIND_PARTY_ATTRIBUTE => {
                let Some(attribute) = Attribute::from_repr(b) else {
                    return malformed;
                };
                if kind == Self::KIND_PLAYER_ATTRIBUTE {
                    Self::PlayerAttribute {
                        attribute,
                        threshold: c,
                    }
                } else {
                    Self::PartyAttribute {
                        attribute,
                        threshold: c,
                    }
                }
            }
            Self::KIND_PARTY_MEMBER => match PartyMemberStatus::from_repr(c) {
                Some(status) => Self::PartyMember { slot: b, status },
                None => malformed,
            },
            Self::KIND_MAP_VISIT => {
                let bound = match a {
                    0x01 => VisitBound::AtMost,
                    0x02 => VisitBound::AtLeast,
                    _ => return malformed,
                };
                Self::MapVisit {
                    location: u16::from_be_bytes([b, c]),
                    bound,
                    count: d,
                }
            }
            Self::KIND_MONSTER_DEFEAT => {
                let spawn = match a {
                    0x01 => SpawnKind::Primary,
                    0x02 => SpawnKind::Secondary,
                    _ => return malformed,
                };
                Self::MonsterDefeat {
                    location: u16::from_be_bytes([b, c]),
                    spawn,
                    count: d,
                }
            }
            Self::KIND_NPC => match NpcCheck::from_repr(a) {
                Some(check) => Self::Npc {
                    npc: b,
                    check,
                    value: u16::from_be_bytes([c, d]),
                },
                None => malformed,
            },
            Self::KIND_ITEM | Self::KIND_WEAPON => {
                let polarity = match a {
                    0x01 => Ownership::Owned,
                    0x02 => Ownership::NotOwned,
                    _ => return malformed,
                };
                let kind = if kind == Self::KIND_ITEM {
                    ItemKind::Item
                } else {
                    ItemKind::Weapon
                };
                Self::Owns {
                    kind,
                    id: b,
                    polarity,
                    number: c,
                }
            }
            _ => Self::Unsupported(raw),
        }
    }

    pub fn encode(&self) -> RawCondition {
        match *self {
            Self::Always => [Self::KIND_SIMPLE, 0x00, 0, 0, 0],
            Self::NoMonstersSpawned => [Self::KIND_SIMPLE, 0x01, 0, 0, 0],
            Self::PlayerAttribute {
                attribute,
                threshold,
            } => [Self::KIND_PLAYER_ATTRIBUTE, 0, attribute as u8, threshold, 0],
            Self::PartyAttribute {
                attribute,
                threshold,
            } => [Self::KIND_PARTY_ATTRIBUTE, 0, attribute as u8, threshold, 0],
            Self::PartyMember { slot, status } => {
                [Self::KIND_PARTY_MEMBER, 0, slot, status as u8, 0]
            }
            Self::MapVisit {
                location,
                bound,
                count,
            } => {
                let [hi, lo] = location.to_be_bytes();
                let sub = match bound {
                    VisitBound::AtMost => 0x01,
                    VisitBound::AtLeast => 0x02,
                };
                [Self::KIND_MAP_VISIT, sub, hi, lo, count]
            }
            Self::MonsterDefeat {
                location,
                spawn,
                count,
            } => {
                let [hi, lo] = location.to_be_bytes();
                let sub = match spawn {
                    SpawnKind::Primary => 0x01,
                    SpawnKind::Secondary => 0x02,
                };
                [Self::KIND_MONSTER_DEFEAT, sub, hi, lo, count]
            }
            Self::Npc { npc, check, value } => {
                let [hi, lo] = value.to_be_bytes();
                [Self::KIND_NPC, check as u8, npc, hi, lo]
            }
            Self::Owns {
                kind,
                id,
                polarity,
                number,
            } => {
                let tag = match kind {
                    ItemKind::Item => Self::KIND_ITEM,
                    ItemKind::Weapon => Self::KIND_WEAPON,
                };
                let sub = match polarity {
                    Ownership::Owned => 0x01,
                    Ownership::NotOwned => 0x02,
                };
                [tag, sub, id, number, 0]
            }
            Self::Malformed(raw) | Self::Unsupported(raw) => raw,
        }
    }

    pub const fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported(_))
    }
}
