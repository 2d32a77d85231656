use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use super::models::MatchRow;
use crate::domain::Match;

pub fn list_all(conn: &Connection) -> Result<Vec<Match>> {
    let sql = "SELECT id, class, player_a, player_b, outcome, result, details, status, played_on FROM matches ORDER BY id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_match_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to read matches")?;

    rows.into_iter().map(MatchRow::into_match).collect()
}

/// Delete-all then insert; callers wrap this in a transaction
pub fn replace_all(conn: &Connection, matches: &[Match]) -> Result<()> {
    conn.execute("DELETE FROM matches", [])
        .context("Failed to clear matches")?;

    let sql = "INSERT INTO matches (id, class, player_a, player_b, outcome, result, details, status, played_on) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";
    let mut stmt = conn.prepare(sql)?;

    for game in matches {
        let row = MatchRow::from_match(game);
        stmt.execute(params![
            row.id,
            row.class,
            row.player_a,
            row.player_b,
            row.outcome,
            row.result,
            row.details,
            row.status,
            row.played_on
        ])
        .with_context(|| format!("Failed to insert match {}", row.id))?;
    }

    Ok(())
}

fn parse_match_row(row: &rusqlite::Row) -> rusqlite::Result<MatchRow> {
    Ok(MatchRow {
        id: row.get(0)?,
        class: row.get(1)?,
        player_a: row.get(2)?,
        player_b: row.get(3)?,
        outcome: row.get(4)?,
        result: row.get(5)?,
        details: row.get(6)?,
        status: row.get(7)?,
        played_on: row.get(8)?,
    })
}
