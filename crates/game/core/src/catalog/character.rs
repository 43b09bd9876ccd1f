use crate::config::GameConfig;
use crate::rules::{CharacterClass, HitDice, StatusEffects};
use crate::state::{Abilities, Formation};

/// What kind of character a record describes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::FromRepr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum CharacterKind {
    #[default]
    Monster = 0,
    Npc = 1,
    Boss = 2,
}

/// Number of animation frames per sprite class.
pub const SPRITE_FRAMES: usize = 4;

/// Bitmap ids for each animation a character can play. `0` is no frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpriteSet {
    pub resting: [u16; SPRITE_FRAMES],
    pub attack: [u16; SPRITE_FRAMES],
    pub magic: [u16; SPRITE_FRAMES],
    pub wounded: [u16; SPRITE_FRAMES],
    pub death: [u16; SPRITE_FRAMES],
}

impl SpriteSet {
    /// Animations in record order.
    pub fn animations(&self) -> [&[u16; SPRITE_FRAMES]; 5] {
        [
            &self.resting,
            &self.attack,
            &self.magic,
            &self.wounded,
            &self.death,
        ]
    }

    pub fn animations_mut(&mut self) -> [&mut [u16; SPRITE_FRAMES]; 5] {
        [
            &mut self.resting,
            &mut self.attack,
            &mut self.magic,
            &mut self.wounded,
            &mut self.death,
        ]
    }
}

/// Equipment slots of a character record; each holds a catalog id or `0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CharacterEquipment {
    pub head: u16,
    pub body: u16,
    pub option: u16,
    pub weapon_right: u16,
    pub weapon_left: u16,
}

/// A monster or NPC as stored in the character catalogs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CharacterRecord {
    pub id: u16,
    pub name: String,
    pub kind: CharacterKind,
    pub sprite_type: u8,
    pub sprites: SpriteSet,
    pub portrait: u16,
    /// Raw class byte; see [`CharacterRecord::class`].
    pub class: u8,
    pub level: u8,
    /// Attack, defence and aggression profile.
    pub profile: u16,
    pub abilities: Abilities,
    pub hp: u16,
    pub status: StatusEffects,
    pub equipment: CharacterEquipment,
    pub formation: Formation,
}

impl CharacterRecord {
    /// Size of one record in the character data files.
    pub const RECORD_SIZE: usize = 91;

    pub fn new(id: u16, name: impl Into<String>, kind: CharacterKind) -> Self {
        let mut name: String = name.into();
        name.truncate(GameConfig::NAME_SIZE);
        Self {
            id,
            name,
            kind,
            level: 1,
            abilities: Abilities::uniform(10),
            hp: 1,
            ..Self::default()
        }
    }

    pub fn class(&self) -> Option<CharacterClass> {
        CharacterClass::from_byte(self.class)
    }

    /// Hit dice rolled for this character on level-up.
    pub fn hit_dice(&self) -> HitDice {
        HitDice::for_class_byte(self.class, self.abilities.con)
    }
}
