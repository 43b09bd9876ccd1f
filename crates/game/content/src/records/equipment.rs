//! Weapon and item records.

use adventure_core::catalog::DamageDice;
use adventure_core::config::GameConfig;
use adventure_core::{ItemRecord, WeaponRecord};

use crate::error::DecodeError;
use crate::reader::{ByteOrder, RecordReader};
use crate::writer::RecordWriter;

pub fn decode_weapon(bytes: &[u8], order: ByteOrder) -> Result<WeaponRecord, DecodeError> {
    let mut reader = RecordReader::new(bytes, order);
    let mut weapon = WeaponRecord {
        id: reader.u8()?,
        weapon_type: reader.u8()?,
        class: reader.u8()?,
        rarity: reader.u8()?,
        size: reader.u8()?,
        proficiencies: reader.array()?,
        name: reader.fixed_str(GameConfig::NAME_SIZE)?,
        crit_min: reader.u8()?,
        crit_max: reader.u8()?,
        crit_multiplier: reader.u8()?,
        ..WeaponRecord::default()
    };
    for dice in &mut weapon.damage {
        *dice = DamageDice {
            damage_type: reader.u8()?,
            dice: reader.u8()?,
            dice_type: reader.u8()?,
        };
    }
    weapon.versatile = reader.flag()?;
    weapon.finesse = reader.flag()?;
    weapon.silvered = reader.flag()?;
    weapon.bonus = reader.u8()?;
    weapon.value = reader.u16()?;
    weapon.text_id = reader.u16()?;
    Ok(weapon)
}

pub fn encode_weapon(weapon: &WeaponRecord, order: ByteOrder) -> Vec<u8> {
    let mut writer = RecordWriter::new(order);
    writer
        .u8(weapon.id)
        .u8(weapon.weapon_type)
        .u8(weapon.class)
        .u8(weapon.rarity)
        .u8(weapon.size)
        .bytes(&weapon.proficiencies)
        .fixed_str(&weapon.name, GameConfig::NAME_SIZE)
        .u8(weapon.crit_min)
        .u8(weapon.crit_max)
        .u8(weapon.crit_multiplier);
    for dice in &weapon.damage {
        writer.u8(dice.damage_type).u8(dice.dice).u8(dice.dice_type);
    }
    writer
        .flag(weapon.versatile)
        .flag(weapon.finesse)
        .flag(weapon.silvered)
        .u8(weapon.bonus)
        .u16(weapon.value)
        .u16(weapon.text_id);
    writer.into_bytes()
}

pub fn decode_item(bytes: &[u8], order: ByteOrder) -> Result<ItemRecord, DecodeError> {
    let mut reader = RecordReader::new(bytes, order);
    Ok(ItemRecord {
        id: reader.u8()?,
        name: reader.fixed_str(GameConfig::NAME_SIZE)?,
        class_limit: reader.u8()?,
        race_limit: reader.u8()?,
        item_type: reader.u8()?,
        slot: reader.u8()?,
        value: reader.u16()?,
        armour_class: reader.u8()?,
        armour_class_type: reader.u8()?,
        effects: reader.array()?,
        text_id: reader.u16()?,
    })
}

pub fn encode_item(item: &ItemRecord, order: ByteOrder) -> Vec<u8> {
    let mut writer = RecordWriter::new(order);
    writer
        .u8(item.id)
        .fixed_str(&item.name, GameConfig::NAME_SIZE)
        .u8(item.class_limit)
        .u8(item.race_limit)
        .u8(item.item_type)
        .u8(item.slot)
        .u16(item.value)
        .u8(item.armour_class)
        .u8(item.armour_class_type)
        .bytes(&item.effects)
        .u16(item.text_id);
    writer.into_bytes()
}
