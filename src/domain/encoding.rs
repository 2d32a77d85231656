use std::sync::OnceLock;

use anyhow::{bail, Context, Result};
use regex::Regex;

use super::models::{Outcome, ScoreLine, SetScore, Side};

/// Result string of a match that has not been settled
pub const RESULT_SENTINEL: &str = "-";
pub const WALKOVER_DETAILS: &str = "W.O.";
pub const DOUBLE_FORFEIT_DETAILS: &str = "Derrota Dupla";
const SUPER_TIEBREAK_SUFFIX: &str = " (STB)";

pub fn format_result(sets_a: u32, sets_b: u32) -> String {
    format!("{}x{}", sets_a, sets_b)
}

pub fn format_details(line: &ScoreLine) -> String {
    let mut parts: Vec<String> = line
        .sets
        .iter()
        .map(|set| format!("{}x{}", set.a, set.b))
        .collect();

    if line.super_tiebreak {
        if let Some(last) = parts.last_mut() {
            last.push_str(SUPER_TIEBREAK_SUFFIX);
        }
    }

    parts.join(", ")
}

fn compile_set_regex() -> Result<Regex> {
    Regex::new(r"(\d+)x(\d+)(\s*\(STB\))?").context("Failed to compile set score regex")
}

fn set_regex() -> Result<&'static Regex> {
    static SET_REGEX: OnceLock<Regex> = OnceLock::new();
    if let Some(regex) = SET_REGEX.get() {
        return Ok(regex);
    }
    let regex = compile_set_regex()?;
    Ok(SET_REGEX.get_or_init(|| regex))
}

/// Recover the set scores from a details string such as `"6x7, 7x6, 10x8 (STB)"`.
/// Text without any set score yields `None`.
pub fn parse_details(details: &str) -> Result<Option<ScoreLine>> {
    let mut sets = Vec::new();
    let mut super_tiebreak = false;

    for captures in set_regex()?.captures_iter(details) {
        let a = captures[1]
            .parse::<u32>()
            .with_context(|| format!("Set score out of range in {:?}", details))?;
        let b = captures[2]
            .parse::<u32>()
            .with_context(|| format!("Set score out of range in {:?}", details))?;
        sets.push(SetScore::new(a, b));
        super_tiebreak |= captures.get(3).is_some();
    }

    if sets.is_empty() {
        return Ok(None);
    }

    Ok(Some(ScoreLine {
        sets,
        super_tiebreak,
    }))
}

/// Flat score list for pre-filling an edit, in input order
pub fn flatten_scores(line: &ScoreLine) -> Vec<u32> {
    line.sets.iter().flat_map(|set| [set.a, set.b]).collect()
}

// --- Storage encoding ---

pub fn outcome_kind(outcome: &Outcome) -> &'static str {
    match outcome {
        Outcome::Pending => "pending",
        Outcome::Played(_) => "played",
        Outcome::Walkover { winner: Side::A } => "walkover_a",
        Outcome::Walkover { winner: Side::B } => "walkover_b",
        Outcome::DoubleForfeit => "double_forfeit",
    }
}

/// Inverse of [`outcome_kind`] + [`Outcome::details`]
pub fn decode_outcome(kind: &str, details: &str) -> Result<Outcome> {
    let outcome = match kind {
        "pending" => Outcome::Pending,
        "played" => {
            let line = parse_details(details)?
                .with_context(|| format!("Unreadable set breakdown: {:?}", details))?;
            Outcome::Played(line)
        }
        "walkover_a" => Outcome::Walkover { winner: Side::A },
        "walkover_b" => Outcome::Walkover { winner: Side::B },
        "double_forfeit" => Outcome::DoubleForfeit,
        other => bail!("Unknown match outcome kind: {}", other),
    };
    Ok(outcome)
}
