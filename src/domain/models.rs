use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::encoding;

pub type MatchId = i64;

/// Rostered player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub class: String,
}

impl Player {
    pub fn new(name: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            class: class.into(),
        }
    }
}

/// Which of the two match slots a player occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

/// Games won by each side in one set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetScore {
    pub a: u32,
    pub b: u32,
}

impl SetScore {
    pub fn new(a: u32, b: u32) -> Self {
        Self { a, b }
    }

    /// Level sets are credited to nobody
    pub fn winner(&self) -> Option<Side> {
        if self.a > self.b {
            Some(Side::A)
        } else if self.b > self.a {
            Some(Side::B)
        } else {
            None
        }
    }
}

/// Validated set-by-set scoreline. When `super_tiebreak` is set the last
/// set is the super tie-break.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreLine {
    pub sets: Vec<SetScore>,
    pub super_tiebreak: bool,
}

impl ScoreLine {
    pub fn sets_won(&self) -> (u32, u32) {
        self.sets
            .iter()
            .fold((0, 0), |(a, b), set| match set.winner() {
                Some(Side::A) => (a + 1, b),
                Some(Side::B) => (a, b + 1),
                None => (a, b),
            })
    }
}

/// How a match was settled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Pending,
    Played(ScoreLine),
    Walkover { winner: Side },
    DoubleForfeit,
}

impl Outcome {
    pub fn status(&self) -> MatchStatus {
        match self {
            Outcome::Pending => MatchStatus::Pending,
            Outcome::Played(_) | Outcome::DoubleForfeit => MatchStatus::Finalized,
            Outcome::Walkover { .. } => MatchStatus::Walkover,
        }
    }

    /// Sets credited to (A, B); `None` while the match is still open
    pub fn sets_won(&self) -> Option<(u32, u32)> {
        match self {
            Outcome::Pending => None,
            Outcome::Played(line) => Some(line.sets_won()),
            Outcome::Walkover { winner: Side::A } => Some((2, 0)),
            Outcome::Walkover { winner: Side::B } => Some((0, 2)),
            Outcome::DoubleForfeit => Some((0, 0)),
        }
    }

    pub fn result(&self) -> String {
        match self.sets_won() {
            Some((a, b)) => encoding::format_result(a, b),
            None => encoding::RESULT_SENTINEL.to_string(),
        }
    }

    pub fn details(&self) -> String {
        match self {
            Outcome::Pending => String::new(),
            Outcome::Played(line) => encoding::format_details(line),
            Outcome::Walkover { .. } => encoding::WALKOVER_DETAILS.to_string(),
            Outcome::DoubleForfeit => encoding::DOUBLE_FORFEIT_DETAILS.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    Pending,
    Finalized,
    Walkover,
}

impl MatchStatus {
    pub fn as_str(&self) -> &str {
        match self {
            MatchStatus::Pending => "Pending",
            MatchStatus::Finalized => "Finalized",
            MatchStatus::Walkover => "Walkover",
        }
    }
}

/// One round-robin pairing inside a class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub class: String,
    pub player_a: String,
    pub player_b: String,
    pub outcome: Outcome,
    pub date: Option<NaiveDate>,
}

impl Match {
    pub fn pending(
        id: MatchId,
        class: impl Into<String>,
        player_a: impl Into<String>,
        player_b: impl Into<String>,
    ) -> Self {
        Self {
            id,
            class: class.into(),
            player_a: player_a.into(),
            player_b: player_b.into(),
            outcome: Outcome::Pending,
            date: None,
        }
    }

    pub fn status(&self) -> MatchStatus {
        self.outcome.status()
    }

    pub fn result(&self) -> String {
        self.outcome.result()
    }

    pub fn details(&self) -> String {
        self.outcome.details()
    }

    pub fn is_pending(&self) -> bool {
        self.outcome == Outcome::Pending
    }

    pub fn player(&self, side: Side) -> &str {
        match side {
            Side::A => &self.player_a,
            Side::B => &self.player_b,
        }
    }

    pub fn involves(&self, name: &str) -> bool {
        self.player_a == name || self.player_b == name
    }

    pub fn label(&self) -> String {
        format!("{} vs {}", self.player_a, self.player_b)
    }
}

/// Singleton cycle record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleInfo {
    pub active: bool,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Derived per-player table row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingRow {
    pub name: String,
    pub class: String,
    pub points: u32,
    pub matches_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub sets_won: u32,
    pub sets_lost: u32,
    pub set_diff: i32,
}

impl StandingRow {
    pub fn new(name: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            class: class.into(),
            points: 0,
            matches_played: 0,
            wins: 0,
            losses: 0,
            sets_won: 0,
            sets_lost: 0,
            set_diff: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_strings() {
        let line = ScoreLine {
            sets: vec![SetScore::new(6, 7), SetScore::new(7, 6), SetScore::new(10, 8)],
            super_tiebreak: true,
        };
        let played = Outcome::Played(line);
        assert_eq!(played.result(), "2x1");
        assert_eq!(played.status(), MatchStatus::Finalized);

        assert_eq!(Outcome::Pending.result(), "-");
        assert_eq!(Outcome::Pending.details(), "");

        let walkover = Outcome::Walkover { winner: Side::B };
        assert_eq!(walkover.result(), "0x2");
        assert_eq!(walkover.details(), "W.O.");
        assert_eq!(walkover.status(), MatchStatus::Walkover);

        assert_eq!(Outcome::DoubleForfeit.result(), "0x0");
        assert_eq!(Outcome::DoubleForfeit.status(), MatchStatus::Finalized);
    }

    #[test]
    fn test_player_by_side() {
        let game = Match::pending(1, "A", "Ana", "Bia");
        assert_eq!(game.player(Side::A), "Ana");
        assert_eq!(game.player(Side::B), "Bia");
        assert!(game.involves("Bia"));
    }

    #[test]
    fn test_level_set_has_no_winner() {
        assert_eq!(SetScore::new(6, 6).winner(), None);
        assert_eq!(SetScore::new(0, 6).winner(), Some(Side::B));
    }
}
