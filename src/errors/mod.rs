use thiserror::Error;

use crate::domain::MatchId;

/// Input rejected before any state is touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("every score field must be filled in with a whole number")]
    IncompleteOrNonNumeric,
    #[error("scoreline must give exactly one side two sets")]
    InvalidScoreline,
    #[error("a cycle needs at least two players and one class with two or more players")]
    InsufficientPlayers,
}

/// Persistence failure surfaced from the storage layer
#[derive(Debug, Error)]
#[error(transparent)]
pub struct StorageError(#[from] anyhow::Error);

/// Failure of a single league command
#[derive(Debug, Error)]
pub enum LeagueError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("a cycle is already active")]
    CycleAlreadyActive,
    #[error("no cycle is active")]
    NoActiveCycle,
    #[error("match {0} does not exist")]
    MatchNotFound(MatchId),
    #[error("match {0} is already settled")]
    MatchNotPending(MatchId),
    #[error("{0} match(es) are still pending")]
    PendingMatches(usize),
    #[error("closing was not requested for this cycle")]
    CloseNotRequested,
    #[error("roster change rejected: {0}")]
    Roster(String),
    #[error("storage failure: {0}")]
    Storage(#[from] StorageError),
}

/// Add context to storage reads
pub fn load_context(entity: &str) -> String {
    format!("Failed to load {}", entity)
}

/// Add context to storage writes
pub fn save_context(entity: &str) -> String {
    format!("Failed to save {}", entity)
}

/// Wrap a storage result as a league failure
pub fn with_storage<T>(result: anyhow::Result<T>) -> Result<T, LeagueError> {
    result.map_err(|e| LeagueError::Storage(StorageError::from(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context as _;

    #[test]
    fn test_storage_error_keeps_context() {
        let failed: anyhow::Result<()> =
            Err(anyhow::anyhow!("disk full")).context(save_context("matches"));
        let err = with_storage(failed).unwrap_err();
        assert!(matches!(err, LeagueError::Storage(_)));
        assert!(err.to_string().contains("Failed to save matches"));
    }

    #[test]
    fn test_validation_converts_into_league_error() {
        let err: LeagueError = ValidationError::InvalidScoreline.into();
        assert!(matches!(err, LeagueError::Validation(ValidationError::InvalidScoreline)));
    }
}
