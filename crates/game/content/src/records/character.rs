//! Fixed-width monster and NPC records.

use adventure_core::catalog::{CharacterEquipment, SpriteSet};
use adventure_core::config::GameConfig;
use adventure_core::rules::StatusEffects;
use adventure_core::state::{Abilities, Formation};
use adventure_core::{CharacterKind, CharacterRecord};

use crate::error::DecodeError;
use crate::reader::{ByteOrder, RecordReader};
use crate::writer::RecordWriter;

/// Byte offset of record `id` in a character file, `None` for id 0.
pub fn record_offset(id: u8) -> Option<u64> {
    let slot = id.checked_sub(1)?;
    Some(u64::from(slot) * CharacterRecord::RECORD_SIZE as u64)
}

pub fn decode_character(bytes: &[u8], order: ByteOrder) -> Result<CharacterRecord, DecodeError> {
    let mut reader = RecordReader::new(bytes, order);
    let id = reader.u16()?;
    let name = reader.fixed_str(GameConfig::NAME_SIZE)?;
    let kind = CharacterKind::from_repr(reader.u8()?).unwrap_or_default();
    let sprite_type = reader.u8()?;
    let mut sprites = SpriteSet::default();
    for frames in sprites.animations_mut() {
        for frame in frames.iter_mut() {
            *frame = reader.u16()?;
        }
    }
    let portrait = reader.u16()?;
    let class = reader.u8()?;
    let level = reader.u8()?;
    let profile = reader.u16()?;
    let abilities = Abilities {
        str: reader.u8()?,
        dex: reader.u8()?,
        con: reader.u8()?,
        wis: reader.u8()?,
        int: reader.u8()?,
        chr: reader.u8()?,
    };
    let hp = reader.u16()?;
    let status = StatusEffects::from_bits_retain(reader.u32()?);
    let equipment = CharacterEquipment {
        head: reader.u16()?,
        body: reader.u16()?,
        option: reader.u16()?,
        weapon_right: reader.u16()?,
        weapon_left: reader.u16()?,
    };
    let formation = Formation::from_repr(reader.u8()?).unwrap_or_default();

    Ok(CharacterRecord {
        id,
        name,
        kind,
        sprite_type,
        sprites,
        portrait,
        class,
        level,
        profile,
        abilities,
        hp,
        status,
        equipment,
        formation,
    })
}

pub fn encode_character(record: &CharacterRecord, order: ByteOrder) -> Vec<u8> {
    let mut writer = RecordWriter::new(order);
    writer
        .u16(record.id)
        .fixed_str(&record.name, GameConfig::NAME_SIZE)
        .u8(record.kind as u8)
        .u8(record.sprite_type);
    for frames in record.sprites.animations() {
        for &frame in frames {
            writer.u16(frame);
        }
    }
    let abilities = record.abilities;
    let equipment = record.equipment;
    writer
        .u16(record.portrait)
        .u8(record.class)
        .u8(record.level)
        .u16(record.profile)
        .bytes(&[
            abilities.str,
            abilities.dex,
            abilities.con,
            abilities.wis,
            abilities.int,
            abilities.chr,
        ])
        .u16(record.hp)
        .u32(record.status.bits())
        .u16(equipment.head)
        .u16(equipment.body)
        .u16(equipment.option)
        .u16(equipment.weapon_right)
        .u16(equipment.weapon_left)
        .u8(record.formation as u8);
    writer.into_bytes()
}
