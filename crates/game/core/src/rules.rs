//! Character rules: classes, races, status effects and the modifier tables
//! derived from them.
//!
//! These are 5th-edition-style rules reduced to what the engine tracks: an
//! ability modifier, a proficiency bonus and the hit die rolled on level-up.

use bitflags::bitflags;

/// Lowest ability modifier any score can produce.
pub const ABILITY_MODIFIER_MIN: i8 = -5;
/// Highest ability modifier any score can produce.
pub const ABILITY_MODIFIER_MAX: i8 = 10;
pub const PROFICIENCY_BONUS_MIN: u8 = 2;
pub const PROFICIENCY_BONUS_MAX: u8 = 6;

/// Character class as stored in the `class` byte of character records.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::FromRepr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[repr(u8)]
pub enum CharacterClass {
    /// The average peasant in the street.
    #[default]
    Untrained = 0,
    GenericMelee = 1,
    GenericRanged = 2,
    GenericMagic = 3,
    Barbarian = 4,
    Bard = 5,
    Cleric = 6,
    Druid = 7,
    Fighter = 8,
    Paladin = 9,
    Ranger = 10,
    Rogue = 11,
    Sorcerer = 12,
    Warlock = 13,
    Wizard = 14,
}

impl CharacterClass {
    /// Decodes a class byte; unknown values map to `None`.
    pub fn from_byte(byte: u8) -> Option<Self> {
        Self::from_repr(byte)
    }

    pub const fn as_byte(self) -> u8 {
        self as u8
    }

    /// Display label used on character sheets.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Untrained => "Untrained",
            Self::GenericMelee => "Generic, melee",
            Self::GenericRanged => "Generic, ranged",
            Self::GenericMagic => "Generic, magic",
            Self::Barbarian => "Barbarian",
            Self::Bard => "Bard",
            Self::Cleric => "Cleric",
            Self::Druid => "Druid",
            Self::Fighter => "Fighter",
            Self::Paladin => "Paladin",
            Self::Ranger => "Ranger",
            Self::Rogue => "Rogue",
            Self::Sorcerer => "Sorcerer",
            Self::Warlock => "Warlock",
            Self::Wizard => "Wizard",
        }
    }

    /// Proficiencies granted by this class.
    pub const fn proficiencies(self) -> &'static [Proficiency] {
        use Proficiency::*;
        match self {
            Self::Untrained => &[WeaponSimple, SaveConstitution],
            Self::GenericMelee => &[WeaponSimple, ArmourLight, SaveConstitution],
            Self::GenericRanged => &[WeaponSimple, CrossbowLight, SaveConstitution, ArmourLight],
            Self::GenericMagic => &[WeaponSimple, Staff, SaveConstitution],
            Self::Barbarian => &[
                ArmourLight,
                ArmourMedium,
                Shield,
                WeaponSimple,
                WeaponMartial,
                SaveStrength,
                SaveConstitution,
            ],
            Self::Bard => &[
                ArmourLight,
                WeaponSimple,
                CrossbowLight,
                SwordShort,
                SwordLong,
                Rapier,
                SaveDexterity,
                SaveCharisma,
            ],
            Self::Rogue => &[
                ArmourLight,
                WeaponSimple,
                CrossbowLight,
                SwordShort,
                SwordLong,
                Rapier,
                SaveDexterity,
                SaveIntelligence,
            ],
            Self::Cleric => &[
                ArmourLight,
                ArmourMedium,
                Shield,
                WeaponSimple,
                SaveCharisma,
                SaveWisdom,
            ],
            Self::Druid => &[
                ArmourLight,
                ArmourMedium,
                Shield,
                Dagger,
                Mace,
                Staff,
                Scimitar,
                SaveWisdom,
                SaveIntelligence,
            ],
            Self::Fighter => &[
                ArmourLight,
                ArmourMedium,
                ArmourHeavy,
                Shield,
                WeaponSimple,
                WeaponMartial,
                SaveStrength,
                SaveConstitution,
            ],
            Self::Paladin => &[
                ArmourLight,
                ArmourMedium,
                ArmourHeavy,
                Shield,
                WeaponSimple,
                WeaponMartial,
                SaveCharisma,
                SaveWisdom,
            ],
            Self::Ranger => &[
                ArmourLight,
                ArmourMedium,
                Shield,
                WeaponSimple,
                WeaponMartial,
                SaveStrength,
                SaveDexterity,
            ],
            Self::Sorcerer => &[Dagger, Staff, CrossbowLight, SaveCharisma, SaveConstitution],
            Self::Warlock => &[ArmourLight, WeaponSimple, SaveWisdom, SaveCharisma],
            Self::Wizard => &[Dagger, Staff, CrossbowLight, SaveIntelligence, SaveWisdom],
        }
    }

    /// Hit die rolled when a character of this class gains a level.
    pub const fn hit_die(self) -> u8 {
        match self {
            Self::Untrained => 4,
            Self::Bard
            | Self::Cleric
            | Self::Druid
            | Self::Rogue
            | Self::Sorcerer
            | Self::Warlock
            | Self::Wizard
            | Self::GenericMagic
            | Self::GenericRanged => 8,
            Self::GenericMelee | Self::Fighter | Self::Paladin | Self::Ranger => 10,
            Self::Barbarian => 12,
        }
    }
}

/// Die used for classes the engine does not recognise.
pub const FALLBACK_HIT_DIE: u8 = 6;

/// Character race byte.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::FromRepr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[repr(u8)]
pub enum Race {
    #[default]
    Unknown = 0,
    Human = 1,
    Beast = 2,
    Orc = 3,
    Elf = 4,
}

impl Race {
    /// Decodes a race byte; unknown values collapse to [`Race::Unknown`].
    pub fn from_byte(byte: u8) -> Self {
        Self::from_repr(byte).unwrap_or_default()
    }
}

/// Skills, armour and saving throws a class can be proficient in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::FromRepr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Proficiency {
    #[strum(serialize = "Armour (Light)")]
    ArmourLight = 1,
    #[strum(serialize = "Armour (Medium)")]
    ArmourMedium = 2,
    #[strum(serialize = "Armour (Heavy)")]
    ArmourHeavy = 3,
    #[strum(serialize = "Shields")]
    Shield = 4,
    #[strum(serialize = "Weapons (Simple)")]
    WeaponSimple = 5,
    #[strum(serialize = "Weapons (Martial)")]
    WeaponMartial = 6,
    #[strum(serialize = "Crossbow (Light)")]
    CrossbowLight = 7,
    #[strum(serialize = "Crossbow (Heavy)")]
    CrossbowHeavy = 8,
    #[strum(serialize = "Sword (Short)")]
    SwordShort = 9,
    #[strum(serialize = "Longsword")]
    SwordLong = 10,
    Scimitar = 11,
    Rapier = 12,
    Dagger = 13,
    Mace = 14,
    Staff = 15,
    #[strum(serialize = "Ranged")]
    WeaponRanged = 16,
    #[strum(serialize = "Magic")]
    WeaponMagic = 17,
    #[strum(serialize = "Saving Throw (Str.)")]
    SaveStrength = 18,
    #[strum(serialize = "Saving Throw (Con.)")]
    SaveConstitution = 19,
    #[strum(serialize = "Saving Throw (Dex.)")]
    SaveDexterity = 20,
    #[strum(serialize = "Saving Throw (Chr.)")]
    SaveCharisma = 21,
    #[strum(serialize = "Saving Throw (Wis.)")]
    SaveWisdom = 22,
    #[strum(serialize = "Saving Throw (Intl.)")]
    SaveIntelligence = 23,
}

bitflags! {
    /// 32-bit status-effect field carried by every character.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct StatusEffects: u32 {
        const BLINDED               = 1 << 0;
        const FRIGHTENED            = 1 << 1;
        const INCAPACITATED         = 1 << 2;
        const INVISIBLE             = 1 << 3;
        const PARALYZED             = 1 << 4;
        const POISONED              = 1 << 5;
        const PRONE                 = 1 << 6;
        const STUNNED               = 1 << 7;
        const UNCONSCIOUS           = 1 << 8;
        const EXHAUSTED             = 1 << 9;
        const BLEEDING              = 1 << 10;
        const BURNING               = 1 << 11;
        const SILENCED              = 1 << 12;
        const WEAKENED              = 1 << 13;
        const SLOWED                = 1 << 14;
        const CURSED                = 1 << 15;
        const POWERFUL              = 1 << 16;
        const BLESSED               = 1 << 17;
        const PRECISE               = 1 << 18;
        const FRENZY                = 1 << 19;
        const UNSTOPPABLE           = 1 << 20;
        const REGENERATION          = 1 << 21;
        const ELEMENTAL_RESISTANCE  = 1 << 22;
        const FIRE_RESISTANCE       = 1 << 23;
        const STALWART              = 1 << 24;
        const COLD_RESISTANCE       = 1 << 25;
        const POISON_RESISTANCE     = 1 << 26;
        const ACID_RESISTANCE       = 1 << 27;
        const THORNS                = 1 << 28;
        const LIGHTNING_RESISTANCE  = 1 << 29;
        const MAGICAL_RESISTANCE    = 1 << 30;
        const PHYSICAL_RESISTANCE   = 1 << 31;
    }
}

const STATUS_LABELS: [&str; 32] = [
    "Blinded",
    "Frightened",
    "Incapacitated",
    "Invisible",
    "Paralyzed",
    "Poisoned",
    "Prone",
    "Stunned",
    "Unconscious",
    "Exhausted",
    "Bleeding",
    "Burning",
    "Silenced",
    "Weakened",
    "Slowed",
    "Cursed",
    "Powerful",
    "Blessed",
    "Precise",
    "Frenzy",
    "Unstoppable",
    "Regeneration",
    "Elemental Res.",
    "Fire Res.",
    "Stalwart",
    "Cold Res.",
    "Poison Res.",
    "Acid Res.",
    "Thorns",
    "Lightning Res.",
    "Magical Res.",
    "Physical Res.",
];

impl StatusEffects {
    /// Labels of every active effect, lowest bit first.
    pub fn labels(self) -> impl Iterator<Item = &'static str> {
        (0..32usize).filter_map(move |bit| (self.bits() & (1u32 << bit) != 0).then_some(STATUS_LABELS[bit]))
    }
}

/// Modifier applied to rolls for a given ability score.
pub fn ability_modifier(score: u8) -> i8 {
    let value = (i16::from(score) - 10) / 2;
    value.clamp(i16::from(ABILITY_MODIFIER_MIN), i16::from(ABILITY_MODIFIER_MAX)) as i8
}

/// Bonus added to rolls the character is proficient in at `level`.
pub fn proficiency_bonus(level: u8) -> u8 {
    (level / 5 + PROFICIENCY_BONUS_MIN).min(PROFICIENCY_BONUS_MAX)
}

/// Proficiency bonus for `class` in `proficiency`, or 0 when not proficient.
pub fn proficiency_for(class: CharacterClass, level: u8, proficiency: Proficiency) -> u8 {
    if class.proficiencies().contains(&proficiency) {
        proficiency_bonus(level)
    } else {
        0
    }
}

/// Hit dice gained per level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HitDice {
    pub quantity: u8,
    pub die: u8,
    /// Constitution modifier added per level, never below +1.
    pub constitution_bonus: i8,
}

impl HitDice {
    /// Hit dice for a class byte and constitution score.
    pub fn for_class_byte(class: u8, constitution: u8) -> Self {
        let die = CharacterClass::from_byte(class).map_or(FALLBACK_HIT_DIE, CharacterClass::hit_die);
        Self {
            quantity: 1,
            die,
            constitution_bonus: ability_modifier(constitution).max(1),
        }
    }

    /// Maximum hit points at `level`: a full die at level 1, the rounded-up
    /// average for every level after that.
    pub fn max_hit_points(&self, level: u8) -> u16 {
        let bonus = self.constitution_bonus as i16;
        let first = i16::from(self.die) + bonus;
        let per_level = i16::from(self.die / 2 + 1) + bonus;
        let extra = i16::from(level.saturating_sub(1)) * per_level;
        (first + extra).max(1) as u16
    }
}
