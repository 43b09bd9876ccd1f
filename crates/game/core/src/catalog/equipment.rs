/// One damage component of a weapon: `dice` rolls of a `dice_type`-sided die.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DamageDice {
    pub damage_type: u8,
    pub dice: u8,
    pub dice_type: u8,
}

impl DamageDice {
    pub fn is_empty(&self) -> bool {
        self.dice == 0 || self.dice_type == 0
    }

    /// Highest total this component can roll.
    pub fn max_damage(&self) -> u16 {
        u16::from(self.dice) * u16::from(self.dice_type)
    }
}

/// Static weapon definition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WeaponRecord {
    pub id: u8,
    /// One-handed, two-handed and similar.
    pub weapon_type: u8,
    pub class: u8,
    pub rarity: u8,
    pub size: u8,
    /// Proficiencies that apply when wielding it.
    pub proficiencies: [u8; 2],
    pub name: String,
    pub crit_min: u8,
    pub crit_max: u8,
    pub crit_multiplier: u8,
    pub damage: [DamageDice; 3],
    pub versatile: bool,
    pub finesse: bool,
    pub silvered: bool,
    pub bonus: u8,
    pub value: u16,
    pub text_id: u16,
}

impl WeaponRecord {
    pub const RECORD_SIZE: usize = 45;

    /// Damage components that actually roll.
    pub fn damage_dice(&self) -> impl Iterator<Item = &DamageDice> {
        self.damage.iter().filter(|dice| !dice.is_empty())
    }
}

/// Static item definition: armour, trinkets and consumables.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ItemRecord {
    pub id: u8,
    pub name: String,
    pub class_limit: u8,
    pub race_limit: u8,
    pub item_type: u8,
    /// Equipment slot the item occupies.
    pub slot: u8,
    pub value: u16,
    pub armour_class: u8,
    pub armour_class_type: u8,
    pub effects: [u8; 5],
    pub text_id: u16,
}

impl ItemRecord {
    pub const RECORD_SIZE: usize = 34;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unused_damage_slots_are_skipped() {
        let weapon = WeaponRecord {
            damage: [
                DamageDice {
                    damage_type: 1,
                    dice: 1,
                    dice_type: 8,
                },
                DamageDice::default(),
                DamageDice {
                    damage_type: 3,
                    dice: 2,
                    dice_type: 4,
                },
            ],
            ..WeaponRecord::default()
        };
        let max: Vec<u16> = weapon.damage_dice().map(DamageDice::max_damage).collect();
        assert_eq!(max, [8, 8]);
    }
}
