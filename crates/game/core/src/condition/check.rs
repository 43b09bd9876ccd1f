//! Per-kind condition checks.

use super::{Attribute, Condition, NpcCheck, Ownership, VisitBound};
use crate::state::{GameState, LevelState, PlayerState, SpawnKind};

impl Attribute {
    /// Current value of the attribute for `pc`. Gold is session-wide.
    pub fn value(self, pc: &PlayerState, game: &GameState) -> u32 {
        match self {
            Self::Strength => pc.abilities.str.into(),
            Self::Dexterity => pc.abilities.dex.into(),
            Self::Constitution => pc.abilities.con.into(),
            Self::Wisdom => pc.abilities.wis.into(),
            Self::Intelligence => pc.abilities.int.into(),
            Self::Charisma => pc.abilities.chr.into(),
            Self::HitPoints => pc.hp.into(),
            Self::Gold => game.gold.into(),
            Self::DamageCaused => pc.hits_caused,
            Self::InjuryTaken => pc.hits_taken,
        }
    }
}

impl Condition {
    /// Evaluates one condition. Never mutates state; an NPC the roster has
    /// not seen yet reads as alive and never talked to.
    pub fn holds(&self, game: &GameState, level: &LevelState) -> bool {
        match *self {
            Self::Always => true,
            Self::NoMonstersSpawned => !level.has_spawned(),
            Self::PlayerAttribute {
                attribute,
                threshold,
            } => game
                .party
                .leader()
                .is_some_and(|pc| attribute.value(pc, game) >= u32::from(threshold)),
            Self::PartyAttribute {
                attribute,
                threshold,
            } => game
                .party
                .members()
                .any(|pc| attribute.value(pc, game) >= u32::from(threshold)),
            Self::PartyMember { slot, status } => game
                .party
                .get(slot)
                .is_some_and(|pc| pc.member_status == status),
            Self::MapVisit {
                location,
                bound,
                count,
            } => {
                let visits = game.visits.get(location);
                match bound {
                    VisitBound::AtMost => visits <= count,
                    VisitBound::AtLeast => visits >= count,
                }
            }
            Self::MonsterDefeat {
                location,
                spawn,
                count,
            } => {
                if game.visits.get(location) == 0 {
                    return false;
                }
                let defeats = match spawn {
                    SpawnKind::Primary => game.primary_defeats.get(location),
                    SpawnKind::Secondary => game.secondary_defeats.get(location),
                };
                defeats >= count
            }
            Self::Npc { npc, check, value } => {
                let Some(record) = game.npcs.find(npc) else {
                    return check == NpcCheck::Alive;
                };
                let since_talked = game.turn.wrapping_sub(record.last_talked_turn);
                match check {
                    NpcCheck::Talked => u16::from(record.talked_count) >= value,
                    NpcCheck::Alive => record.is_alive(),
                    NpcCheck::Dead => !record.is_alive(),
                    NpcCheck::TalkedWithin => since_talked <= value,
                    NpcCheck::TalkedBefore => since_talked >= value,
                }
            }
            Self::Owns {
                kind, id, polarity, ..
            } => match polarity {
                Ownership::Owned => game.party_owns(kind, id),
                // Fails on a match and fails after a scan without one.
                Ownership::NotOwned => false,
            },
            Self::Malformed(_) | Self::Unsupported(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ItemKind, ItemRef, Party, PartyMemberStatus};

    fn party_of(members: impl IntoIterator<Item = PlayerState>) -> GameState {
        GameState::new(Party::from_members(members).expect("fits"))
    }

    fn check(condition: Condition, game: &GameState) -> bool {
        condition.holds(game, &LevelState::default())
    }

    #[test]
    fn player_attribute_reads_the_leader_only() {
        let game = party_of([
            PlayerState::new("weak").with_hp(3),
            PlayerState::new("strong").with_hp(30),
        ]);
        let hp = |threshold| Condition::PlayerAttribute {
            attribute: Attribute::HitPoints,
            threshold,
        };
        assert!(check(hp(3), &game));
        assert!(!check(hp(4), &game));
        assert!(!check(hp(1), &GameState::default()));
    }

    #[test]
    fn party_attribute_is_any_member() {
        let mut clever = PlayerState::new("clever");
        clever.abilities.int = 14;
        let game = party_of([PlayerState::new("leader"), clever]);
        let int = |threshold| Condition::PartyAttribute {
            attribute: Attribute::Intelligence,
            threshold,
        };
        assert!(check(int(12), &game));
        assert!(!check(int(15), &game));
    }

    #[test]
    fn gold_and_combat_tallies() {
        let mut pc = PlayerState::new("veteran");
        pc.hits_caused = 300;
        pc.hits_taken = 2;
        let mut game = party_of([pc]);
        game.gold = 50;
        let attr = |attribute, threshold| Condition::PlayerAttribute {
            attribute,
            threshold,
        };
        assert!(check(attr(Attribute::Gold, 50), &game));
        assert!(!check(attr(Attribute::Gold, 51), &game));
        assert!(check(attr(Attribute::DamageCaused, 255), &game));
        assert!(!check(attr(Attribute::InjuryTaken, 3), &game));
    }

    #[test]
    fn party_member_status_compares_recorded_status() {
        let mut fallen = PlayerState::new("fallen");
        fallen.member_status = PartyMemberStatus::Dead;
        let game = party_of([PlayerState::new("leader"), fallen]);
        let member = |slot, status| Condition::PartyMember { slot, status };
        assert!(check(member(1, PartyMemberStatus::Present), &game));
        assert!(check(member(2, PartyMemberStatus::Dead), &game));
        assert!(!check(member(2, PartyMemberStatus::Present), &game));
        assert!(!check(member(3, PartyMemberStatus::Present), &game));
    }

    #[test]
    fn no_monsters_reads_level_flag() {
        let game = GameState::default();
        let mut level = LevelState::default();
        assert!(Condition::NoMonstersSpawned.holds(&game, &level));
        level.spawned = Some(SpawnKind::Secondary);
        assert!(!Condition::NoMonstersSpawned.holds(&game, &level));
    }

    #[test]
    fn map_visit_bounds() {
        let mut game = GameState::default();
        game.visits.set(7, 2);
        let visit = |bound, count| Condition::MapVisit {
            location: 7,
            bound,
            count,
        };
        assert!(check(visit(VisitBound::AtMost, 2), &game));
        assert!(!check(visit(VisitBound::AtMost, 1), &game));
        assert!(check(visit(VisitBound::AtLeast, 2), &game));
        assert!(!check(visit(VisitBound::AtLeast, 3), &game));
    }

    #[test]
    fn monster_defeat_requires_a_visit() {
        let mut game = GameState::default();
        game.primary_defeats.set(9, 5);
        game.secondary_defeats.set(9, 5);
        for spawn in [SpawnKind::Primary, SpawnKind::Secondary] {
            for count in [0, 1, 5, 255] {
                let defeat = Condition::MonsterDefeat {
                    location: 9,
                    spawn,
                    count,
                };
                assert!(!check(defeat, &game), "{spawn} {count}");
            }
        }
        game.visits.set(9, 1);
        let primary = |count| Condition::MonsterDefeat {
            location: 9,
            spawn: SpawnKind::Primary,
            count,
        };
        assert!(check(primary(0), &game));
        assert!(check(primary(5), &game));
        assert!(!check(primary(6), &game));
    }

    #[test]
    fn unseen_npc_is_alive_and_nothing_else() {
        let game = GameState::default();
        let npc = |check| Condition::Npc {
            npc: 42,
            check,
            value: 0,
        };
        assert!(check(npc(NpcCheck::Alive), &game));
        assert!(!check(npc(NpcCheck::Dead), &game));
        assert!(!check(npc(NpcCheck::TalkedWithin), &game));
        assert!(!check(npc(NpcCheck::TalkedBefore), &game));
        assert!(!check(npc(NpcCheck::Talked), &game));
        assert!(game.npcs.find(42).is_none());
    }

    #[test]
    fn known_npc_timers_and_death() {
        let mut game = GameState::default();
        game.npcs.add(5);
        game.turn = 10;
        game.npcs.increment_talk(5, 0, game.turn).expect("registered");
        game.turn = 14;
        let npc = |check, value| Condition::Npc {
            npc: 5,
            check,
            value,
        };
        assert!(check(npc(NpcCheck::Talked, 1), &game));
        assert!(!check(npc(NpcCheck::Talked, 2), &game));
        assert!(check(npc(NpcCheck::TalkedWithin, 4), &game));
        assert!(!check(npc(NpcCheck::TalkedWithin, 3), &game));
        assert!(check(npc(NpcCheck::TalkedBefore, 4), &game));
        assert!(!check(npc(NpcCheck::TalkedBefore, 5), &game));
        assert!(check(npc(NpcCheck::Alive, 0), &game));

        game.npcs.set_dead(5, true, game.turn).expect("registered");
        assert!(check(npc(NpcCheck::Dead, 0), &game));
        assert!(!check(npc(NpcCheck::Alive, 0), &game));
    }

    #[test]
    fn npc_timer_survives_turn_wrap() {
        let mut game = GameState::default();
        game.npcs.add(1);
        game.npcs
            .increment_talk(1, 0, u16::MAX - 1)
            .expect("registered");
        game.turn = 2;
        let within = Condition::Npc {
            npc: 1,
            check: NpcCheck::TalkedWithin,
            value: 4,
        };
        assert!(check(within, &game));
    }

    /// "Not owned" is the negation of a full party scan: a match anywhere
    /// fails it, no match anywhere passes it.
    #[test]
    fn not_owned_never_passes() {
        let mut carrier = PlayerState::new("carrier");
        carrier.give(ItemRef::item(3)).expect("room");
        carrier.give(ItemRef::item(3)).expect("room");
        let mut game = party_of([PlayerState::new("leader"), carrier]);
        game.party
            .get_mut(1)
            .expect("leader")
            .give(ItemRef::weapon(3))
            .expect("room");
        let owns = |kind, polarity| Condition::Owns {
            kind,
            id: 3,
            polarity,
            number: 1,
        };
        assert!(check(owns(ItemKind::Item, Ownership::Owned), &game));
        assert!(!check(owns(ItemKind::Item, Ownership::NotOwned), &game));
        assert!(check(owns(ItemKind::Weapon, Ownership::Owned), &game));
        assert!(!check(owns(ItemKind::Weapon, Ownership::NotOwned), &game));

        let empty = party_of([PlayerState::new("empty-handed")]);
        assert!(!check(owns(ItemKind::Item, Ownership::Owned), &empty));
        assert!(!check(owns(ItemKind::Item, Ownership::NotOwned), &empty));
        assert!(!check(owns(ItemKind::Weapon, Ownership::NotOwned), &empty));
    }
}
