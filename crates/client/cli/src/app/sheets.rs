//! Text for the player and debug screens.

use std::fmt::Write;

use adventure_core::rules::{HitDice, ability_modifier, proficiency_bonus};
use adventure_core::{DebugReport, GameState, PlayerState};

fn signed(value: i8) -> String {
    format!("{value:+}")
}

fn member(out: &mut String, slot: usize, pc: &PlayerState) {
    let dice = HitDice::for_class_byte(pc.class.as_byte(), pc.abilities.con);
    let _ = writeln!(
        out,
        "{slot}. {}, level {} {} {}",
        pc.name,
        pc.level,
        pc.race,
        pc.class.label()
    );
    let _ = writeln!(
        out,
        "   HP {}/{}  Proficiency +{}  Kills {}  Items {}",
        pc.hp,
        dice.max_hit_points(pc.level),
        proficiency_bonus(pc.level),
        pc.kills,
        pc.items.len()
    );
    let abilities = pc.abilities;
    let scores = [
        ("STR", abilities.str),
        ("DEX", abilities.dex),
        ("CON", abilities.con),
        ("WIS", abilities.wis),
        ("INT", abilities.int),
        ("CHR", abilities.chr),
    ];
    let line: Vec<String> = scores
        .iter()
        .map(|(name, score)| format!("{name} {score} ({})", signed(ability_modifier(*score))))
        .collect();
    let _ = writeln!(out, "   {}", line.join("  "));
    let status: Vec<&str> = pc.status.labels().collect();
    if !status.is_empty() {
        let _ = writeln!(out, "   Status: {}", status.join(", "));
    }
}

/// One block per party member.
pub fn player_sheet(game: &GameState) -> String {
    let mut out = String::new();
    for (index, pc) in game.party.members().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        member(&mut out, index + 1, pc);
    }
    let _ = write!(out, "\nGold: {}", game.gold);
    out
}

pub fn debug_sheet(game: &GameState) -> String {
    let report = DebugReport::collect(game);
    format!(
        "Party members: {}\n\
         NPCs met: {}\n\
         Locations discovered: {}\n\
         Locations with primary defeats: {}\n\
         Locations with secondary defeats: {}\n\
         Turn: {}",
        report.party_size,
        report.npcs_met,
        report.locations_discovered,
        report.primary_defeat_locations,
        report.secondary_defeat_locations,
        game.turn,
    )
}
