use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use crate::domain::Player;

pub fn list_all(conn: &Connection) -> Result<Vec<Player>> {
    let sql = "SELECT name, class FROM players ORDER BY rowid";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_player_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to read players")?;

    Ok(rows)
}

/// Delete-all then insert; callers wrap this in a transaction
pub fn replace_all(conn: &Connection, players: &[Player]) -> Result<()> {
    conn.execute("DELETE FROM players", [])
        .context("Failed to clear players")?;

    let mut stmt = conn.prepare("INSERT INTO players (name, class) VALUES (?1, ?2)")?;
    for player in players {
        stmt.execute(params![player.name, player.class])
            .with_context(|| format!("Failed to insert player {}", player.name))?;
    }

    Ok(())
}

fn parse_player_row(row: &rusqlite::Row) -> rusqlite::Result<Player> {
    Ok(Player {
        name: row.get(0)?,
        class: row.get(1)?,
    })
}
