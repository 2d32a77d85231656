use anyhow::{Context, Result};
use log::debug;
use rusqlite::Connection;

use super::connection::{create_memory_pool, create_pool, get_connection, DbPool};
use super::{cycle_info, matches, players, setup};
use crate::domain::{CycleInfo, Match, Player};
use crate::errors::{load_context, save_context};

/// Several entities written as one unit
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub players: Option<&'a [Player]>,
    pub matches: &'a [Match],
    pub cycle: &'a CycleInfo,
}

/// Source of truth the league engine reads from and writes to.
/// Every save replaces the stored entity as a whole, all-or-nothing.
pub trait Storage {
    fn load_players(&self) -> Result<Vec<Player>>;
    fn save_players(&self, players: &[Player]) -> Result<()>;
    fn load_matches(&self) -> Result<Vec<Match>>;
    fn save_matches(&self, matches: &[Match]) -> Result<()>;
    fn load_cycle_info(&self) -> Result<Option<CycleInfo>>;
    fn save_cycle_info(&self, info: &CycleInfo) -> Result<()>;
    /// Write matches, cycle info and optionally players in a single transaction
    fn save_snapshot(&self, snapshot: Snapshot<'_>) -> Result<()>;
}

pub struct SqliteStorage {
    pool: DbPool,
}

impl SqliteStorage {
    pub fn open(database_path: &str) -> Result<Self> {
        let pool = create_pool(database_path)?;
        Self::with_pool(pool)
    }

    pub fn in_memory() -> Result<Self> {
        Self::with_pool(create_memory_pool()?)
    }

    pub fn with_pool(pool: DbPool) -> Result<Self> {
        let storage = Self { pool };
        let conn = get_connection(&storage.pool)?;
        setup::ensure_schema(&conn)?;
        Ok(storage)
    }

    fn read<T, F>(&self, entity: &str, read: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = get_connection(&self.pool)?;
        read(&*conn).with_context(|| load_context(entity))
    }

    fn write<F>(&self, entity: &str, write: F) -> Result<()>
    where
        F: FnOnce(&Connection) -> Result<()>,
    {
        let mut conn = get_connection(&self.pool)?;
        let tx = conn
            .transaction()
            .with_context(|| save_context(entity))?;

        write(&*tx).with_context(|| save_context(entity))?;
        tx.commit().with_context(|| save_context(entity))?;

        debug!("Saved {}", entity);
        Ok(())
    }
}

impl Storage for SqliteStorage {
    fn load_players(&self) -> Result<Vec<Player>> {
        self.read("players", players::list_all)
    }

    fn save_players(&self, roster: &[Player]) -> Result<()> {
        self.write("players", |conn| players::replace_all(conn, roster))
    }

    fn load_matches(&self) -> Result<Vec<Match>> {
        self.read("matches", matches::list_all)
    }

    fn save_matches(&self, games: &[Match]) -> Result<()> {
        self.write("matches", |conn| matches::replace_all(conn, games))
    }

    fn load_cycle_info(&self) -> Result<Option<CycleInfo>> {
        self.read("cycle info", cycle_info::find)
    }

    fn save_cycle_info(&self, info: &CycleInfo) -> Result<()> {
        self.write("cycle info", |conn| cycle_info::replace(conn, info))
    }

    fn save_snapshot(&self, snapshot: Snapshot<'_>) -> Result<()> {
        self.write("league snapshot", |conn| {
            if let Some(roster) = snapshot.players {
                players::replace_all(conn, roster)?;
            }
            matches::replace_all(conn, snapshot.matches)?;
            cycle_info::replace(conn, snapshot.cycle)
        })
    }
}
