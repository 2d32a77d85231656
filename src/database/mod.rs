pub mod connection;
pub mod cycle_info;
pub mod matches;
pub mod models;
pub mod players;
pub mod setup;
pub mod storage;

pub use connection::{create_memory_pool, create_pool, get_connection, DbConn, DbPool};
pub use models::*;
pub use storage::{Snapshot, SqliteStorage, Storage};
