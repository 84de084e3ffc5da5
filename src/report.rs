use crate::battle::{BattleReport, HpSample, TurnEvent};
use crate::model::{display_name, title_case, CreatureProfile, MoveProfile};
use crate::setup::Matchup;
use anyhow::Context;
use phf::phf_map;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;

static STAT_LABELS: phf::Map<&'static str, &'static str> = phf_map! {
    "hp" => "HP",
    "attack" => "Attack",
    "defense" => "Defense",
    "special-attack" => "Sp. Atk",
    "special-defense" => "Sp. Def",
    "speed" => "Speed",
};

pub fn stat_label(key: &str) -> String {
    STAT_LABELS
        .get(key)
        .map(|label| label.to_string())
        .unwrap_or_else(|| display_name(key))
}

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "—".to_string())
}

pub fn render_profile(profile: &CreatureProfile) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", profile.display_name());
    if let Some(sprite) = &profile.sprite {
        let _ = writeln!(out, "  Sprite: {sprite}");
    }
    let types: Vec<String> = profile.types.iter().map(|t| display_name(t)).collect();
    let _ = writeln!(out, "  Types: {}", types.join(" / "));
    for (key, value) in profile.stats.iter() {
        let _ = writeln!(out, "  {:<8} {value:>4}", stat_label(key));
    }
    out
}

pub fn render_move(move_def: &MoveProfile) -> String {
    format!(
        "{}: power {}, accuracy {}, type {}, class {:?}",
        move_def.display_name(),
        or_dash(move_def.power),
        or_dash(move_def.accuracy),
        display_name(&move_def.move_type),
        move_def.damage_class,
    )
}

pub fn render_stat_comparison(a: &CreatureProfile, b: &CreatureProfile) -> String {
    let (name_a, name_b) = (a.display_name(), b.display_name());
    let mut out = String::new();
    let _ = writeln!(out, "{:<8} {:>12} {:>12}", "Stat", name_a, name_b);
    for ((key, va), (_, vb)) in a.stats.iter().zip(b.stats.iter()) {
        let marker = match va.cmp(&vb) {
            std::cmp::Ordering::Greater => "<",
            std::cmp::Ordering::Less => ">",
            std::cmp::Ordering::Equal => "=",
        };
        let _ = writeln!(out, "{:<8} {va:>12} {vb:>12}  {marker}", stat_label(key));
    }
    out
}

pub fn render_log(log: &[TurnEvent]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>5}  {:<14} {:<16} {:>6} {:>6}  {:>10}  Note",
        "Round", "Attacker", "Move", "Damage", "Eff", "Defender HP"
    );
    for event in log {
        let _ = writeln!(
            out,
            "{:>5}  {:<14} {:<16} {:>6} {:>6}  {:>10}  {}",
            event.round,
            event.attacker,
            event.move_name,
            event.damage,
            format!("x{}", event.effectiveness),
            event.defender_hp,
            event.note
        );
    }
    out
}

/// One row per round. Samples come in (A, B) pairs, so mirror matches still get two columns.
pub fn render_hp_trace(trace: &[HpSample]) -> String {
    let mut out = String::new();
    let _ = write!(out, "{:>5}", "Round");
    for sample in trace.iter().take(2) {
        let _ = write!(out, " {:>12}", title_case(&sample.creature));
    }
    out.push('\n');
    for pair in trace.chunks(2) {
        let _ = write!(out, "{:>5}", pair[0].round);
        for sample in pair {
            let _ = write!(out, " {:>12}", sample.hp);
        }
        out.push('\n');
    }
    out
}

pub fn render_winner(report: &BattleReport) -> String {
    if report.outcome.is_decisive() {
        format!("{} wins the battle after {} rounds!", report.winner, report.rounds())
    } else {
        report.winner.clone()
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    matchup: &'a Matchup,
    battle: &'a BattleReport,
}

pub fn write_json(matchup: &Matchup, battle: &BattleReport, path: &Path) -> anyhow::Result<()> {
    let body = serde_json::to_string_pretty(&JsonReport { matchup, battle })
        .context("Failed to serialize battle report")?;
    std::fs::write(path, body)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stat_labels_cover_catalog_keys() {
        assert_eq!(stat_label("special-attack"), "Sp. Atk");
        assert_eq!(stat_label("hp"), "HP");
        assert_eq!(stat_label("accuracy"), "Accuracy");
    }

    #[test]
    fn hp_trace_groups_samples_by_round() {
        let sample = |round, creature: &str, hp| HpSample {
            round,
            creature: creature.to_string(),
            hp,
        };
        let trace = vec![
            sample(0, "eevee", 55),
            sample(0, "ditto", 48),
            sample(1, "eevee", 40),
            sample(1, "ditto", 0),
        ];
        let rendered = render_hp_trace(&trace);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Eevee") && lines[0].contains("Ditto"));
        assert!(lines[2].trim_start().starts_with('1'));
        assert!(lines[2].trim_end().ends_with('0'));
    }
}
