//! Player characters, their inventories and the party that owns them.

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::rules::{CharacterClass, Race, StatusEffects};
use crate::state::StateError;

/// Kind of catalog entry an inventory slot points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ItemKind {
    Weapon,
    Item,
}

impl ItemKind {
    /// ASCII tag used in loot lists and packed inventory references.
    pub const fn tag(self) -> u8 {
        match self {
            Self::Weapon => b'w',
            Self::Item => b'i',
        }
    }

    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            b'w' => Some(Self::Weapon),
            b'i' => Some(Self::Item),
            _ => None,
        }
    }
}

/// Packed inventory reference: type tag in the high byte, catalog id in the low byte.
///
/// Inventories never own catalog data; the reference is resolved through the
/// weapon or item oracle when details are needed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemRef(u16);

impl ItemRef {
    pub const fn new(kind: ItemKind, id: u8) -> Self {
        Self(((kind.tag() as u16) << 8) | id as u16)
    }

    pub const fn weapon(id: u8) -> Self {
        Self::new(ItemKind::Weapon, id)
    }

    pub const fn item(id: u8) -> Self {
        Self::new(ItemKind::Item, id)
    }

    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u16 {
        self.0
    }

    pub const fn tag(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn kind(self) -> Option<ItemKind> {
        ItemKind::from_tag(self.tag())
    }

    pub const fn id(self) -> u8 {
        (self.0 & 0x00ff) as u8
    }

    pub fn matches(self, kind: ItemKind, id: u8) -> bool {
        self.tag() == kind.tag() && self.id() == id
    }
}

/// Standing of a character within the party.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::FromRepr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum PartyMemberStatus {
    /// Travelling with the party and alive.
    #[default]
    Present = 1,
    Dismissed = 2,
    Dead = 3,
}

/// Combat row a character takes when a fight starts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::FromRepr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Formation {
    #[default]
    Front = 0,
    Middle = 1,
    Rear = 2,
}

/// The six core ability scores.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Abilities {
    pub str: u8,
    pub dex: u8,
    pub con: u8,
    pub wis: u8,
    pub int: u8,
    pub chr: u8,
}

impl Abilities {
    pub const fn uniform(score: u8) -> Self {
        Self {
            str: score,
            dex: score,
            con: score,
            wis: score,
            int: score,
            chr: score,
        }
    }
}

/// A single player character.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub name: String,
    pub class: CharacterClass,
    pub race: Race,
    pub level: u8,
    pub abilities: Abilities,
    pub hp: u16,
    pub status: StatusEffects,
    pub member_status: PartyMemberStatus,
    pub formation: Formation,
    pub items: ArrayVec<ItemRef, { GameConfig::MAX_ITEMS }>,
    pub spells: ArrayVec<u8, { GameConfig::MAX_SPELLS }>,
    pub kills: u16,
    pub spells_cast: u16,
    /// Damage this character has inflicted.
    pub hits_caused: u32,
    /// Damage this character has taken.
    pub hits_taken: u32,
}

impl PlayerState {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            class: CharacterClass::default(),
            race: Race::default(),
            level: 1,
            abilities: Abilities::uniform(10),
            hp: 1,
            status: StatusEffects::empty(),
            member_status: PartyMemberStatus::Present,
            formation: Formation::Front,
            items: ArrayVec::new(),
            spells: ArrayVec::new(),
            kills: 0,
            spells_cast: 0,
            hits_caused: 0,
            hits_taken: 0,
        }
    }

    pub fn with_hp(mut self, hp: u16) -> Self {
        self.hp = hp;
        self
    }

    pub fn with_abilities(mut self, abilities: Abilities) -> Self {
        self.abilities = abilities;
        self
    }

    pub fn with_class(mut self, class: CharacterClass) -> Self {
        self.class = class;
        self
    }

    /// Adds an item reference to the inventory.
    pub fn give(&mut self, item: ItemRef) -> Result<(), StateError> {
        self.items
            .try_push(item)
            .map_err(|_| StateError::InventoryFull)
    }

    pub fn owns(&self, kind: ItemKind, id: u8) -> bool {
        self.items.iter().any(|item| item.matches(kind, id))
    }
}

/// Up to four player characters in fixed slots.
///
/// Slot numbers are 1-based, matching the member ids used by party
/// conditions. Slot 1 is the party leader.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Party {
    slots: [Option<PlayerState>; GameConfig::MAX_PLAYERS],
}

impl Party {
    pub fn new() -> Self {
        Self::default()
    }

    /// A party with only a leader.
    pub fn with_leader(leader: PlayerState) -> Self {
        let mut party = Self::new();
        party.slots[0] = Some(leader);
        party
    }

    /// Builds a party from members in slot order.
    pub fn from_members(
        members: impl IntoIterator<Item = PlayerState>,
    ) -> Result<Self, StateError> {
        let mut party = Self::new();
        for member in members {
            party.join(member)?;
        }
        Ok(party)
    }

    /// Places a character in the first free slot and returns its slot number.
    pub fn join(&mut self, member: PlayerState) -> Result<u8, StateError> {
        let index = self
            .slots
            .iter()
            .position(Option::is_none)
            .ok_or(StateError::PartyFull)?;
        self.slots[index] = Some(member);
        Ok(index as u8 + 1)
    }

    /// Member at a 1-based slot.
    pub fn get(&self, slot: u8) -> Option<&PlayerState> {
        let index = usize::from(slot).checked_sub(1)?;
        self.slots.get(index)?.as_ref()
    }

    pub fn get_mut(&mut self, slot: u8) -> Option<&mut PlayerState> {
        let index = usize::from(slot).checked_sub(1)?;
        self.slots.get_mut(index)?.as_mut()
    }

    pub fn leader(&self) -> Option<&PlayerState> {
        self.get(1)
    }

    pub fn leader_mut(&mut self) -> Option<&mut PlayerState> {
        self.get_mut(1)
    }

    /// Occupied slots in slot order.
    pub fn members(&self) -> impl Iterator<Item = &PlayerState> {
        self.slots.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.members().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
