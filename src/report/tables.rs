use std::fmt::Write as _;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use colored::Colorize;
use serde::Serialize;

use crate::domain::{ClassOrder, CycleInfo, CycleProgress, Match, MatchStatus, Player, StandingRow};
use crate::league::{standings, ClosureReport, CyclePhase, Movement};

const DATE_FORMAT: &str = "%d/%m/%Y";

pub fn render_dashboard(cycle: &CycleInfo, progress: &CycleProgress, phase: CyclePhase) -> String {
    let mut out = String::new();

    let label = match phase {
        CyclePhase::Inactive => "Inactive".dimmed(),
        CyclePhase::Active => "Active".green(),
        CyclePhase::ResolvingPendingMatches => "Closing".yellow(),
    };
    let _ = writeln!(out, "Cycle: {}", label);

    if phase == CyclePhase::Inactive {
        return out;
    }

    let _ = writeln!(
        out,
        "Period: {} to {}",
        format_date(cycle.start_date),
        format_date(cycle.end_date)
    );
    let _ = writeln!(
        out,
        "Matches: {} total, {} settled, {} pending ({:.1}%)",
        progress.total,
        progress.settled,
        progress.pending(),
        progress.percent()
    );
    out
}

/// One table per class, top tier first, with 1-based positions
pub fn render_standings(rows: &[StandingRow], order: &ClassOrder) -> String {
    if rows.is_empty() {
        return "No standings yet.\n".to_string();
    }

    let mut out = String::new();
    for (class, ranked) in standings::by_class(rows, order) {
        let _ = writeln!(out, "{}", format!("Class {}", class).bold());
        let _ = writeln!(
            out,
            "{:>3}  {:<24} {:>4} {:>4} {:>4} {:>4} {:>5}",
            "Pos", "Name", "Pts", "MP", "W", "L", "SD"
        );
        for (idx, row) in ranked.iter().enumerate() {
            let _ = writeln!(
                out,
                "{:>3}  {:<24} {:>4} {:>4} {:>4} {:>4} {:>+5}",
                idx + 1,
                row.name,
                row.points,
                row.matches_played,
                row.wins,
                row.losses,
                row.set_diff
            );
        }
        out.push('\n');
    }
    out
}

pub fn render_matches(matches: &[Match], order: &ClassOrder) -> String {
    if matches.is_empty() {
        return "No matches in this cycle.\n".to_string();
    }

    let mut out = String::new();
    for class in order.arrange(matches.iter().map(|m| m.class.as_str())) {
        let _ = writeln!(out, "{}", format!("Class {} matches", class).bold());
        for game in matches.iter().filter(|m| m.class == class) {
            let status = format!("{:<9}", game.status().as_str());
            let status = match game.status() {
                MatchStatus::Pending => status.yellow(),
                MatchStatus::Finalized => status.green(),
                MatchStatus::Walkover => status.cyan(),
            };
            let _ = writeln!(
                out,
                "{:>4}  {:<36} {:<4} {} {}",
                game.id,
                game.label(),
                game.result(),
                status,
                game.details()
            );
        }
        out.push('\n');
    }
    out
}

pub fn render_roster(players: &[Player], order: &ClassOrder) -> String {
    if players.is_empty() {
        return "No players registered.\n".to_string();
    }

    let mut out = String::new();
    for class in order.arrange(players.iter().map(|p| p.class.as_str())) {
        let names: Vec<&str> = players
            .iter()
            .filter(|p| p.class == class)
            .map(|p| p.name.as_str())
            .collect();
        let _ = writeln!(
            out,
            "{} ({}): {}",
            format!("Class {}", class).bold(),
            names.len(),
            names.join(", ")
        );
    }
    out
}

pub fn render_closure(report: &ClosureReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Cycle closed, {} matches cleared.", report.cleared_matches);

    if report.moves.is_empty() {
        let _ = writeln!(out, "No class changes.");
        return out;
    }

    for class_move in &report.moves {
        let arrow = match class_move.movement {
            Movement::Promoted => "▲".green(),
            Movement::Relegated => "▼".red(),
        };
        let _ = writeln!(
            out,
            "{} {} {}: {} -> {}",
            arrow, class_move.player, class_move.movement, class_move.from, class_move.to
        );
    }
    out
}

#[derive(Serialize)]
struct ClassTable<'a> {
    class: &'a str,
    rows: Vec<RankedRow<'a>>,
}

#[derive(Serialize)]
struct RankedRow<'a> {
    position: usize,
    #[serde(flatten)]
    row: &'a StandingRow,
}

/// Standings grouped per class as pretty JSON
pub fn standings_json(rows: &[StandingRow], order: &ClassOrder) -> Result<String> {
    let grouped = standings::by_class(rows, order);
    let tables: Vec<ClassTable> = grouped
        .iter()
        .map(|(class, ranked)| ClassTable {
            class,
            rows: ranked
                .iter()
                .enumerate()
                .map(|(idx, row)| RankedRow {
                    position: idx + 1,
                    row,
                })
                .collect(),
        })
        .collect();

    serde_json::to_string_pretty(&tables).context("Failed to serialize standings")
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| "N/A".to_string())
}
