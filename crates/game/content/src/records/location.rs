//! Location records.
//!
//! ```text
//! id:u16 text:u16 name:[u8;32]
//! 4 x exit      (destination:u16 text:u16 block)
//! 2 x spawn     (chance:u8 count:u8 ids:[u8;count] block)
//! loot          (chance:u8 count:u8 (tag:u8 id:u8)*count block)
//! text_spawn:u16 text_after_spawn:u16 text_respawn:u16 text_after_respawn:u16
//! 3 x npc       (id:u8 block dialogue:u8 text:u16)
//!
//! block = policy:u8 count:u8 conditions:[[u8;5];count]
//! ```

use adventure_core::config::GameConfig;
use adventure_core::{ConditionBlock, ItemKind, LevelState, SpawnTable};

use crate::error::DecodeError;
use crate::reader::{ByteOrder, RecordReader};
use crate::writer::RecordWriter;

const EXIT_FIELDS: [&str; 4] = [
    "north conditions",
    "south conditions",
    "east conditions",
    "west conditions",
];
const NPC_FIELDS: [&str; 3] = ["npc 1 conditions", "npc 2 conditions", "npc 3 conditions"];

fn block(reader: &mut RecordReader<'_>, field: &'static str) -> Result<ConditionBlock, DecodeError> {
    let (policy, raw) = reader.condition_block(field)?;
    ConditionBlock::decode(policy, &raw).map_err(|_| DecodeError::Overflow {
        field,
        count: raw.len(),
        max: GameConfig::MAX_REQUIREMENTS,
    })
}

fn spawn_table(
    reader: &mut RecordReader<'_>,
    list: &'static str,
    conditions: &'static str,
) -> Result<SpawnTable, DecodeError> {
    let mut table = SpawnTable {
        chance: reader.u8()?,
        ..SpawnTable::default()
    };
    let count = usize::from(reader.u8()?);
    let ids = reader.take(count)?;
    if count > GameConfig::MAX_MONSTER_TYPES {
        return Err(DecodeError::Overflow {
            field: list,
            count,
            max: GameConfig::MAX_MONSTER_TYPES,
        });
    }
    table.monsters.extend(ids.iter().copied());
    table.requires = block(reader, conditions)?;
    Ok(table)
}

/// Decodes one location record.
///
/// The record id is returned as stored; checking it against the requested id
/// is the caller's job. Loot entries with a tag other than `w` or `i` are
/// skipped.
pub fn decode_location(bytes: &[u8], order: ByteOrder) -> Result<LevelState, DecodeError> {
    let mut reader = RecordReader::new(bytes, order);
    let mut level = LevelState {
        id: reader.u16()?,
        text_id: reader.u16()?,
        name: reader.fixed_str(GameConfig::MAX_LEVEL_NAME_SIZE)?,
        ..LevelState::default()
    };

    for (exit, field) in level.exits.iter_mut().zip(EXIT_FIELDS) {
        exit.destination = reader.u16()?;
        exit.text_id = reader.u16()?;
        exit.requires = block(&mut reader, field)?;
    }

    level.spawn = spawn_table(&mut reader, "spawn list", "spawn conditions")?;
    level.respawn = spawn_table(&mut reader, "respawn list", "respawn conditions")?;

    level.loot.chance = reader.u8()?;
    let total = usize::from(reader.u8()?);
    for _ in 0..total {
        let tag = reader.u8()?;
        let id = reader.u8()?;
        let (list, field) = match ItemKind::from_tag(tag) {
            Some(ItemKind::Weapon) => (&mut level.loot.weapons, "loot weapons"),
            Some(ItemKind::Item) => (&mut level.loot.items, "loot items"),
            None => {
                tracing::debug!(location = level.id, tag, id, "dropping loot entry with unknown tag");
                continue;
            }
        };
        if list.try_push(id).is_err() {
            return Err(DecodeError::Overflow {
                field,
                count: list.len() + 1,
                max: GameConfig::MAX_REWARD_ITEMS,
            });
        }
    }
    level.loot.requires = block(&mut reader, "loot conditions")?;

    level.text_spawn = reader.u16()?;
    level.text_after_spawn = reader.u16()?;
    level.text_respawn = reader.u16()?;
    level.text_after_respawn = reader.u16()?;

    for (slot, field) in level.npcs.iter_mut().zip(NPC_FIELDS) {
        slot.npc_id = reader.u8()?;
        slot.requires = block(&mut reader, field)?;
        slot.dialogue_id = reader.u8()?;
        slot.text_id = reader.u16()?;
    }

    if reader.remaining() > 0 {
        tracing::trace!(
            location = level.id,
            trailing = reader.remaining(),
            "location record has trailing bytes"
        );
    }
    Ok(level)
}

/// Encodes `level` as a location record. Runtime flags are not stored.
pub fn encode_location(level: &LevelState, order: ByteOrder) -> Vec<u8> {
    let mut writer = RecordWriter::new(order);
    writer
        .u16(level.id)
        .u16(level.text_id)
        .fixed_str(&level.name, GameConfig::MAX_LEVEL_NAME_SIZE);

    for exit in &level.exits {
        writer
            .u16(exit.destination)
            .u16(exit.text_id)
            .condition_block(&exit.requires);
    }

    for table in [&level.spawn, &level.respawn] {
        writer
            .u8(table.chance)
            .u8(table.monsters.len() as u8)
            .bytes(&table.monsters)
            .condition_block(&table.requires);
    }

    let loot = &level.loot;
    writer
        .u8(loot.chance)
        .u8((loot.weapons.len() + loot.items.len()) as u8);
    for &id in &loot.weapons {
        writer.u8(ItemKind::Weapon.tag()).u8(id);
    }
    for &id in &loot.items {
        writer.u8(ItemKind::Item.tag()).u8(id);
    }
    writer.condition_block(&loot.requires);

    writer
        .u16(level.text_spawn)
        .u16(level.text_after_spawn)
        .u16(level.text_respawn)
        .u16(level.text_after_respawn);

    for slot in &level.npcs {
        writer
            .u8(slot.npc_id)
            .condition_block(&slot.requires)
            .u8(slot.dialogue_id)
            .u16(slot.text_id);
    }
    writer.into_bytes()
}
