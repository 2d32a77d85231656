use crate::domain::{Match, MatchId};

/// Round-robin pairings for one class.
///
/// Every unordered pair of the roster appears exactly once, in combinatorial
/// order over the roster sequence. Ids are assigned consecutively from
/// `first_id`. Fewer than two players yields no matches.
pub fn generate(class: &str, roster: &[String], first_id: MatchId) -> Vec<Match> {
    if roster.len() < 2 {
        return Vec::new();
    }

    let mut matches = Vec::with_capacity(pair_count(roster.len()));
    let mut next_id = first_id;

    for (i, player_a) in roster.iter().enumerate() {
        for player_b in &roster[i + 1..] {
            if player_a == player_b {
                continue;
            }
            matches.push(Match::pending(next_id, class, player_a, player_b));
            next_id += 1;
        }
    }

    matches
}

pub fn pair_count(players: usize) -> usize {
    players * players.saturating_sub(1) / 2
}
