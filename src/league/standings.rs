use std::collections::HashMap;

use crate::domain::{ClassOrder, Match, MatchStatus, Player, StandingRow};

const POINTS_STRAIGHT_WIN: u32 = 3;
const POINTS_THREE_SET_WIN: u32 = 2;
const POINTS_THREE_SET_LOSS: u32 = 1;

/// Rank every rostered player from the settled matches.
///
/// Rows are ordered by class tier, then points, then set difference (both
/// descending). Remaining ties keep roster order. Double forfeits and matches
/// naming players who left the roster contribute nothing. Without players or
/// without matches there is no table at all.
pub fn compute(players: &[Player], matches: &[Match], order: &ClassOrder) -> Vec<StandingRow> {
    if players.is_empty() || matches.is_empty() {
        return Vec::new();
    }

    let mut rows: Vec<StandingRow> = players
        .iter()
        .map(|p| StandingRow::new(&p.name, &p.class))
        .collect();

    let index: HashMap<&str, usize> = players
        .iter()
        .enumerate()
        .map(|(idx, p)| (p.name.as_str(), idx))
        .collect();

    for game in matches.iter().filter(|m| counts_towards_table(m)) {
        let Some((sets_a, sets_b)) = game.outcome.sets_won() else {
            continue;
        };
        if sets_a == 0 && sets_b == 0 {
            continue;
        }

        let (Some(&a), Some(&b)) = (
            index.get(game.player_a.as_str()),
            index.get(game.player_b.as_str()),
        ) else {
            log::debug!("Skipping match {} with an unrostered player", game.id);
            continue;
        };

        apply_match(&mut rows, a, b, sets_a, sets_b);
    }

    for row in &mut rows {
        row.set_diff = row.sets_won as i32 - row.sets_lost as i32;
    }

    rows.sort_by(|x, y| {
        order
            .compare(&x.class, &y.class)
            .then_with(|| y.points.cmp(&x.points))
            .then_with(|| y.set_diff.cmp(&x.set_diff))
    });

    rows
}

/// Standings split per class, top tier first, keeping the rank order inside
pub fn by_class<'a>(
    rows: &'a [StandingRow],
    order: &ClassOrder,
) -> Vec<(String, Vec<&'a StandingRow>)> {
    order
        .arrange(rows.iter().map(|r| r.class.as_str()))
        .into_iter()
        .map(|class| {
            let members = rows.iter().filter(|r| r.class == class).collect();
            (class, members)
        })
        .collect()
}

fn counts_towards_table(game: &Match) -> bool {
    matches!(game.status(), MatchStatus::Finalized | MatchStatus::Walkover)
}

fn apply_match(rows: &mut [StandingRow], a: usize, b: usize, sets_a: u32, sets_b: u32) {
    credit_sets(&mut rows[a], sets_a, sets_b);
    credit_sets(&mut rows[b], sets_b, sets_a);

    if sets_a > sets_b {
        award(rows, a, b, sets_b);
    } else if sets_b > sets_a {
        award(rows, b, a, sets_a);
    }
}

fn credit_sets(row: &mut StandingRow, won: u32, lost: u32) {
    row.matches_played += 1;
    row.sets_won += won;
    row.sets_lost += lost;
}

fn award(rows: &mut [StandingRow], winner: usize, loser: usize, loser_sets: u32) {
    rows[winner].wins += 1;
    rows[loser].losses += 1;

    if loser_sets == 0 {
        rows[winner].points += POINTS_STRAIGHT_WIN;
    } else {
        rows[winner].points += POINTS_THREE_SET_WIN;
        if loser_sets == 1 {
            rows[loser].points += POINTS_THREE_SET_LOSS;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Outcome, ScoreLine, SetScore, Side};

    fn played(id: i64, a: &str, b: &str, sets: &[(u32, u32)], stb: bool) -> Match {
        let mut game = Match::pending(id, "A", a, b);
        game.outcome = Outcome::Played(ScoreLine {
            sets: sets.iter().map(|&(x, y)| SetScore::new(x, y)).collect(),
            super_tiebreak: stb,
        });
        game
    }

    fn row<'a>(rows: &'a [StandingRow], name: &str) -> &'a StandingRow {
        rows.iter().find(|r| r.name == name).unwrap()
    }

    #[test]
    fn test_three_set_loss_earns_a_point() {
        let players = vec![Player::new("Ana", "A"), Player::new("Bia", "A")];
        let matches = vec![played(1, "Ana", "Bia", &[(6, 7), (7, 6), (10, 8)], true)];

        let rows = compute(&players, &matches, &ClassOrder::lexicographic());

        let ana = row(&rows, "Ana");
        assert_eq!((ana.points, ana.wins, ana.losses), (2, 1, 0));
        assert_eq!((ana.sets_won, ana.sets_lost, ana.set_diff), (2, 1, 1));

        let bia = row(&rows, "Bia");
        assert_eq!((bia.points, bia.wins, bia.losses), (1, 0, 1));
        assert_eq!(bia.set_diff, -1);
    }

    #[test]
    fn test_walkover_scores_like_straight_sets() {
        let players = vec![Player::new("Ana", "A"), Player::new("Bia", "A")];
        let mut game = Match::pending(1, "A", "Ana", "Bia");
        game.outcome = Outcome::Walkover { winner: Side::B };

        let rows = compute(&players, &[game], &ClassOrder::lexicographic());

        assert_eq!(rows[0].name, "Bia");
        assert_eq!(rows[0].points, 3);
        assert_eq!((rows[0].sets_won, rows[0].sets_lost), (2, 0));
        assert_eq!(rows[1].points, 0);
        assert_eq!((rows[1].sets_won, rows[1].sets_lost), (0, 2));
        assert!(rows.iter().all(|r| r.matches_played == 1));
    }

    #[test]
    fn test_double_forfeit_contributes_nothing() {
        let players = vec![Player::new("Ana", "A"), Player::new("Bia", "A")];
        let mut game = Match::pending(1, "A", "Ana", "Bia");
        game.outcome = Outcome::DoubleForfeit;

        let rows = compute(&players, &[game], &ClassOrder::lexicographic());
        assert!(rows.iter().all(|r| r.matches_played == 0 && r.points == 0));
    }

    #[test]
    fn test_pending_and_unrostered_matches_are_ignored() {
        let players = vec![Player::new("Ana", "A"), Player::new("Bia", "A")];
        let matches = vec![
            Match::pending(1, "A", "Ana", "Bia"),
            played(2, "Ana", "Gone", &[(6, 0), (6, 0)], false),
        ];

        let rows = compute(&players, &matches, &ClassOrder::lexicographic());
        assert!(rows.iter().all(|r| r.matches_played == 0));
    }

    #[test]
    fn test_ordering_by_class_points_then_set_diff() {
        let players = vec![
            Player::new("Caio", "B"),
            Player::new("Ana", "A"),
            Player::new("Bia", "A"),
            Player::new("Duda", "A"),
        ];
        let matches = vec![
            played(1, "Ana", "Bia", &[(6, 4), (4, 6), (10, 5)], true),
            played(2, "Duda", "Bia", &[(6, 4), (6, 4)], false),
            played(3, "Bia", "Ana", &[(6, 4), (6, 4)], false),
        ];

        let rows = compute(&players, &matches, &ClassOrder::lexicographic());
        let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();

        assert_eq!(names, vec!["Bia", "Duda", "Ana", "Caio"]);
    }

    #[test]
    fn test_set_difference_breaks_points_tie() {
        let players = vec![
            Player::new("Caio", "A"),
            Player::new("Bia", "A"),
            Player::new("Ana", "A"),
            Player::new("Duda", "A"),
        ];
        let matches = vec![
            played(1, "Ana", "Bia", &[(6, 2), (6, 2)], false),
            played(2, "Caio", "Bia", &[(6, 2), (2, 6), (10, 4)], true),
            played(3, "Caio", "Duda", &[(6, 2), (2, 6), (4, 10)], true),
        ];

        let rows = compute(&players, &matches, &ClassOrder::lexicographic());
        let table: Vec<_> = rows
            .iter()
            .map(|r| (r.name.as_str(), r.points, r.set_diff))
            .collect();

        assert_eq!(
            table,
            vec![("Ana", 3, 2), ("Caio", 3, 0), ("Duda", 2, 1), ("Bia", 1, -3)]
        );
    }

    #[test]
    fn test_configured_order_puts_top_tier_first() {
        let players = vec![
            Player::new("Ana", "Silver"),
            Player::new("Caio", "Silver"),
            Player::new("Bia", "Gold"),
            Player::new("Duda", "Gold"),
        ];
        let matches = vec![played(1, "Ana", "Caio", &[(6, 3), (6, 3)], false)];
        let order = ClassOrder::new(["Gold", "Silver"]);

        let rows = compute(&players, &matches, &order);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].class, "Gold");

        let grouped = by_class(&rows, &order);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[1].0, "Silver");
        assert_eq!(grouped[1].1[0].name, "Ana");
    }

    #[test]
    fn test_recomputation_is_identical() {
        let players = vec![
            Player::new("Ana", "A"),
            Player::new("Bia", "A"),
            Player::new("Caio", "A"),
        ];
        let matches = vec![
            played(1, "Ana", "Bia", &[(6, 1), (6, 1)], false),
            played(2, "Caio", "Bia", &[(6, 1), (6, 1)], false),
        ];
        let order = ClassOrder::lexicographic();

        assert_eq!(
            compute(&players, &matches, &order),
            compute(&players, &matches, &order)
        );
    }

    #[test]
    fn test_empty_inputs() {
        let order = ClassOrder::lexicographic();
        let players = vec![Player::new("Ana", "A"), Player::new("Bia", "A")];
        let matches = vec![played(1, "Ana", "Bia", &[(6, 0), (6, 0)], false)];

        assert!(compute(&[], &[], &order).is_empty());
        assert!(compute(&players, &[], &order).is_empty());
        assert!(compute(&[], &matches, &order).is_empty());
    }
}
