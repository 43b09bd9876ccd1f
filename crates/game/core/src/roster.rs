//! Session-lifetime registry of every NPC the party has met.
//!
//! Records live in an append-only arena; a dense table maps the 8-bit NPC id
//! to its arena slot so lookups never scan.

use crate::error::{ErrorSeverity, GameError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    #[error("npc {id} has not been met")]
    NpcNotFound { id: u8 },
}

impl GameError for RosterError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NpcNotFound { .. } => "NPC_NOT_FOUND",
        }
    }
}

/// Interaction history of one NPC.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NpcRecord {
    pub id: u8,
    /// Saturates at 255.
    pub talked_count: u8,
    pub last_talked_turn: u16,
    /// Last dialogue the NPC delivered.
    pub last_dialogue: u8,
    /// Turn of death; `0` while alive.
    pub death_turn: u16,
}

impl NpcRecord {
    pub const fn new(id: u8) -> Self {
        Self {
            id,
            talked_count: 0,
            last_talked_turn: 0,
            last_dialogue: 0,
            death_turn: 0,
        }
    }

    pub const fn is_alive(&self) -> bool {
        self.death_turn == 0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NpcRoster {
    records: Vec<NpcRecord>,
    index: [Option<u16>; 256],
}

impl Default for NpcRoster {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            index: [None; 256],
        }
    }
}

impl NpcRoster {
    pub fn find(&self, id: u8) -> Option<&NpcRecord> {
        let slot = self.index[usize::from(id)]?;
        self.records.get(usize::from(slot))
    }

    fn find_mut(&mut self, id: u8) -> Result<&mut NpcRecord, RosterError> {
        self.index[usize::from(id)]
            .and_then(|slot| self.records.get_mut(usize::from(slot)))
            .ok_or(RosterError::NpcNotFound { id })
    }

    /// Registers `id` with zeroed counters. Registering a known id returns the
    /// existing record untouched.
    pub fn add(&mut self, id: u8) -> &NpcRecord {
        let slot = match self.index[usize::from(id)] {
            Some(slot) => usize::from(slot),
            None => {
                // At most 256 distinct ids, so the arena index always fits.
                let slot = self.records.len();
                self.records.push(NpcRecord::new(id));
                self.index[usize::from(id)] = Some(slot as u16);
                tracing::debug!(npc = id, "npc registered");
                slot
            }
        };
        &self.records[slot]
    }

    /// Marks the NPC dead at `turn`, or alive again.
    pub fn set_dead(&mut self, id: u8, is_dead: bool, turn: u16) -> Result<(), RosterError> {
        let record = self.find_mut(id)?;
        record.death_turn = if is_dead { turn } else { 0 };
        tracing::debug!(npc = id, is_dead, turn, "npc death state changed");
        Ok(())
    }

    /// Records a conversation at `turn`.
    pub fn increment_talk(&mut self, id: u8, dialogue: u8, turn: u16) -> Result<(), RosterError> {
        let record = self.find_mut(id)?;
        record.talked_count = record.talked_count.saturating_add(1);
        record.last_talked_turn = turn;
        record.last_dialogue = dialogue;
        Ok(())
    }

    /// Records in the order they were met.
    pub fn iter(&self) -> impl Iterator<Item = &NpcRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_is_idempotent() {
        let mut roster = NpcRoster::default();
        roster.add(5);
        roster.increment_talk(5, 1, 3).expect("registered");
        let again = roster.add(5);
        assert_eq!(again.talked_count, 1);
        assert_eq!(roster.iter().filter(|npc| npc.id == 5).count(), 1);
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn records_keep_encounter_order() {
        let mut roster = NpcRoster::default();
        for id in [9, 2, 255, 0] {
            roster.add(id);
        }
        let ids: Vec<u8> = roster.iter().map(|npc| npc.id).collect();
        assert_eq!(ids, [9, 2, 255, 0]);
        assert!(roster.find(0).is_some());
        assert!(roster.find(1).is_none());
    }

    #[test]
    fn talk_saturates_and_stamps_turn() {
        let mut roster = NpcRoster::default();
        roster.add(7);
        for turn in 0..300u16 {
            roster.increment_talk(7, 4, turn).expect("registered");
        }
        let record = roster.find(7).expect("registered");
        assert_eq!(record.talked_count, 255);
        assert_eq!(record.last_talked_turn, 299);
        assert_eq!(record.last_dialogue, 4);
    }

    #[test]
    fn death_toggles_with_turn_stamp() {
        let mut roster = NpcRoster::default();
        roster.add(3);
        roster.set_dead(3, true, 12).expect("registered");
        assert_eq!(roster.find(3).map(|npc| npc.death_turn), Some(12));
        assert!(!roster.find(3).is_some_and(NpcRecord::is_alive));
        roster.set_dead(3, false, 20).expect("registered");
        assert!(roster.find(3).is_some_and(NpcRecord::is_alive));
    }

    #[test]
    fn mutations_on_unknown_npc_fail() {
        let mut roster = NpcRoster::default();
        assert_eq!(
            roster.set_dead(8, true, 1),
            Err(RosterError::NpcNotFound { id: 8 })
        );
        assert_eq!(
            roster.increment_talk(8, 0, 1),
            Err(RosterError::NpcNotFound { id: 8 })
        );
        assert_eq!(
            RosterError::NpcNotFound { id: 8 }.error_code(),
            "NPC_NOT_FOUND"
        );
        assert!(roster.is_empty());
    }
}
