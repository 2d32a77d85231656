use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::domain::{encoding, Match};

/// `matches` table row. `result`, `details` and `status` are the display
/// strings; `outcome` is the structured kind the engine reads back.
#[derive(Debug, Clone)]
pub struct MatchRow {
    pub id: i64,
    pub class: String,
    pub player_a: String,
    pub player_b: String,
    pub outcome: String,
    pub result: String,
    pub details: String,
    pub status: String,
    pub played_on: Option<NaiveDate>,
}

impl MatchRow {
    pub fn from_match(game: &Match) -> Self {
        Self {
            id: game.id,
            class: game.class.clone(),
            player_a: game.player_a.clone(),
            player_b: game.player_b.clone(),
            outcome: encoding::outcome_kind(&game.outcome).to_string(),
            result: game.result(),
            details: game.details(),
            status: game.status().as_str().to_string(),
            played_on: game.date,
        }
    }

    pub fn into_match(self) -> Result<Match> {
        let outcome = encoding::decode_outcome(&self.outcome, &self.details)
            .with_context(|| format!("Failed to decode match {}", self.id))?;

        Ok(Match {
            id: self.id,
            class: self.class,
            player_a: self.player_a,
            player_b: self.player_b,
            outcome,
            date: self.played_on,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CycleInfoRow {
    pub active: bool,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Outcome, ScoreLine, SetScore};

    #[test]
    fn test_row_keeps_display_strings() {
        let mut game = Match::pending(3, "B", "Ana", "Bia");
        game.outcome = Outcome::Played(ScoreLine {
            sets: vec![SetScore::new(6, 4), SetScore::new(6, 2)],
            super_tiebreak: false,
        });

        let row = MatchRow::from_match(&game);
        assert_eq!(row.outcome, "played");
        assert_eq!(row.result, "2x0");
        assert_eq!(row.details, "6x4, 6x2");
        assert_eq!(row.status, "Finalized");
        assert_eq!(row.into_match().unwrap(), game);
    }
}
