//! Static catalog entries: characters, weapons and items.
//!
//! Catalog records are read-only once loaded and are shared through `Arc`
//! rather than copied into inventories or encounter slots.
mod character;
mod equipment;

pub use character::{
    CharacterEquipment, CharacterKind, CharacterRecord, SPRITE_FRAMES, SpriteSet,
};
pub use equipment::{DamageDice, ItemRecord, WeaponRecord};
