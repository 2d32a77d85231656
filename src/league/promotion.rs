use std::fmt;

use serde::Serialize;

use crate::domain::{ClassOrder, Player, StandingRow};

use super::standings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Movement {
    Promoted,
    Relegated,
}

impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Movement::Promoted => write!(f, "promoted"),
            Movement::Relegated => write!(f, "relegated"),
        }
    }
}

/// One class reassignment decided at cycle close
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassMove {
    pub player: String,
    pub from: String,
    pub to: String,
    pub movement: Movement,
}

/// Decide promotions and relegations from final standings.
///
/// Classes are walked top tier first. A class with more than `count` ranked
/// players sends its bottom `count` down and, unless it is the top tier, its
/// top `count` up. Classes of `count` players or fewer neither send nor
/// receive anyone. When both cuts catch the same player the promotion stands.
pub fn plan_moves(rows: &[StandingRow], order: &ClassOrder, count: usize) -> Vec<ClassMove> {
    let classes = standings::by_class(rows, order);
    let movable = |tier: usize| classes.get(tier).filter(|(_, ranked)| ranked.len() > count);
    let mut moves: Vec<ClassMove> = Vec::new();

    for (tier, (class, _)) in classes.iter().enumerate() {
        let Some((_, ranked)) = movable(tier) else {
            continue;
        };

        let below = movable(tier + 1).map(|(c, _)| c);
        let above = tier.checked_sub(1).and_then(movable).map(|(c, _)| c);

        if let Some(below) = below {
            for row in &ranked[ranked.len() - count..] {
                record(&mut moves, row, class, below, Movement::Relegated);
            }
        }

        if let Some(above) = above {
            for row in &ranked[..count] {
                record(&mut moves, row, class, above, Movement::Promoted);
            }
        }
    }

    moves
}

/// Reassign classes in one pass over the roster
pub fn apply_moves(players: &mut [Player], moves: &[ClassMove]) {
    for player in players.iter_mut() {
        if let Some(class_move) = moves.iter().find(|m| m.player == player.name) {
            player.class = class_move.to.clone();
        }
    }
}

fn record(moves: &mut Vec<ClassMove>, row: &StandingRow, from: &str, to: &str, movement: Movement) {
    let class_move = ClassMove {
        player: row.name.clone(),
        from: from.to_string(),
        to: to.to_string(),
        movement,
    };

    match moves.iter_mut().find(|m| m.player == row.name) {
        Some(existing) => *existing = class_move,
        None => moves.push(class_move),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(entries: &[(&str, &str, u32)]) -> Vec<StandingRow> {
        entries
            .iter()
            .map(|&(name, class, points)| {
                let mut row = StandingRow::new(name, class);
                row.points = points;
                row
            })
            .collect()
    }

    fn destination<'a>(moves: &'a [ClassMove], player: &str) -> Option<&'a str> {
        moves
            .iter()
            .find(|m| m.player == player)
            .map(|m| m.to.as_str())
    }

    #[test]
    fn test_three_classes_of_three() {
        let rows = ranked(&[
            ("A1", "A", 6),
            ("A2", "A", 3),
            ("A3", "A", 0),
            ("B1", "B", 6),
            ("B2", "B", 3),
            ("B3", "B", 0),
            ("C1", "C", 6),
            ("C2", "C", 3),
            ("C3", "C", 0),
        ]);

        let moves = plan_moves(&rows, &ClassOrder::lexicographic(), 2);

        assert_eq!(destination(&moves, "A1"), None);
        assert_eq!(destination(&moves, "A2"), Some("B"));
        assert_eq!(destination(&moves, "A3"), Some("B"));
        assert_eq!(destination(&moves, "B1"), Some("A"));
        assert_eq!(destination(&moves, "B2"), Some("A"));
        assert_eq!(destination(&moves, "B3"), Some("C"));
        assert_eq!(destination(&moves, "C1"), Some("B"));
        assert_eq!(destination(&moves, "C2"), Some("B"));
        assert_eq!(destination(&moves, "C3"), None);
    }

    #[test]
    fn test_class_of_two_neither_sends_nor_receives() {
        let rows = ranked(&[
            ("A1", "A", 3),
            ("A2", "A", 0),
            ("B1", "B", 6),
            ("B2", "B", 3),
            ("B3", "B", 0),
            ("C1", "C", 3),
            ("C2", "C", 0),
        ]);

        let moves = plan_moves(&rows, &ClassOrder::lexicographic(), 2);

        assert_eq!(destination(&moves, "A1"), None);
        assert_eq!(destination(&moves, "A2"), None);
        assert_eq!(destination(&moves, "C1"), None);
        assert_eq!(destination(&moves, "C2"), None);
        assert!(moves.is_empty());
    }

    #[test]
    fn test_two_player_tier_is_skipped_not_bridged() {
        let rows = ranked(&[
            ("A1", "A", 6),
            ("A2", "A", 3),
            ("A3", "A", 0),
            ("B1", "B", 3),
            ("B2", "B", 0),
            ("C1", "C", 6),
            ("C2", "C", 3),
            ("C3", "C", 0),
        ]);

        let moves = plan_moves(&rows, &ClassOrder::lexicographic(), 2);
        assert!(moves.is_empty());
    }

    #[test]
    fn test_large_class_moves_exactly_two_each_way() {
        let rows = ranked(&[
            ("A1", "A", 9),
            ("A2", "A", 6),
            ("A3", "A", 3),
            ("B1", "B", 9),
            ("B2", "B", 6),
            ("B3", "B", 4),
            ("B4", "B", 3),
            ("B5", "B", 0),
        ]);

        let moves = plan_moves(&rows, &ClassOrder::lexicographic(), 2);
        let promoted: Vec<_> = moves
            .iter()
            .filter(|m| m.movement == Movement::Promoted)
            .map(|m| m.player.as_str())
            .collect();
        let relegated: Vec<_> = moves
            .iter()
            .filter(|m| m.movement == Movement::Relegated)
            .map(|m| m.player.as_str())
            .collect();

        assert_eq!(promoted, vec!["B1", "B2"]);
        // B is the bottom tier here, so only A relegates
        assert_eq!(relegated, vec!["A2", "A3"]);
        assert_eq!(destination(&moves, "B3"), None);
    }

    #[test]
    fn test_single_class_never_moves() {
        let rows = ranked(&[("A1", "A", 6), ("A2", "A", 3), ("A3", "A", 0)]);
        assert!(plan_moves(&rows, &ClassOrder::lexicographic(), 2).is_empty());
    }

    #[test]
    fn test_configured_order_decides_direction() {
        let rows = ranked(&[
            ("G1", "Gold", 6),
            ("G2", "Gold", 3),
            ("G3", "Gold", 0),
            ("S1", "Silver", 6),
            ("S2", "Silver", 3),
            ("S3", "Silver", 0),
        ]);
        let order = ClassOrder::new(["Gold", "Silver"]);

        let moves = plan_moves(&rows, &order, 2);
        assert_eq!(destination(&moves, "S1"), Some("Gold"));
        assert_eq!(destination(&moves, "G3"), Some("Silver"));
        assert_eq!(destination(&moves, "G1"), None);
    }

    #[test]
    fn test_apply_moves() {
        let mut players = vec![Player::new("A3", "A"), Player::new("B1", "B")];
        let moves = vec![
            ClassMove {
                player: "A3".to_string(),
                from: "A".to_string(),
                to: "B".to_string(),
                movement: Movement::Relegated,
            },
            ClassMove {
                player: "B1".to_string(),
                from: "B".to_string(),
                to: "A".to_string(),
                movement: Movement::Promoted,
            },
        ];

        apply_moves(&mut players, &moves);
        assert_eq!(players[0].class, "B");
        assert_eq!(players[1].class, "A");
    }
}
