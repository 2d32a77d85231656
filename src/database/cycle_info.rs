use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::models::CycleInfoRow;
use crate::domain::CycleInfo;

pub fn find(conn: &Connection) -> Result<Option<CycleInfo>> {
    let sql = "SELECT active, start_date, end_date FROM cycle_info WHERE id = 1";

    let row = conn
        .query_row(sql, [], parse_cycle_info_row)
        .optional()
        .context("Failed to query cycle info")?;

    Ok(row.map(|r| CycleInfo {
        active: r.active,
        start_date: r.start_date,
        end_date: r.end_date,
    }))
}

/// Singleton row: delete then insert
pub fn replace(conn: &Connection, info: &CycleInfo) -> Result<()> {
    conn.execute("DELETE FROM cycle_info", [])
        .context("Failed to clear cycle info")?;

    conn.execute(
        "INSERT INTO cycle_info (id, active, start_date, end_date) VALUES (1, ?1, ?2, ?3)",
        params![info.active, info.start_date, info.end_date],
    )
    .context("Failed to insert cycle info")
    .map(|_| ())
}

fn parse_cycle_info_row(row: &rusqlite::Row) -> rusqlite::Result<CycleInfoRow> {
    Ok(CycleInfoRow {
        active: row.get(0)?,
        start_date: row.get(1)?,
        end_date: row.get(2)?,
    })
}
