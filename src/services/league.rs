use chrono::NaiveDate;
use log::info;

use crate::config::LeagueSettings;
use crate::database::{Snapshot, Storage};
use crate::domain::{
    encoding, CycleProgress, LeagueState, Match, MatchId, Outcome, Player, Side, StandingRow,
};
use crate::errors::{with_storage, LeagueError};
use crate::league::{
    validator, CloseReadiness, ClosureReport, CycleController, CyclePhase, Resolution,
};

/// Binds the cycle engine to a storage backend.
///
/// Each command runs against a copy of the current state; the copy replaces
/// the live state only after the storage write succeeded.
pub struct LeagueService<S: Storage> {
    storage: S,
    controller: CycleController,
    state: LeagueState,
}

impl<S: Storage> LeagueService<S> {
    pub fn new(storage: S, settings: LeagueSettings) -> Result<Self, LeagueError> {
        let state = load_state(&storage)?;
        info!(
            "Loaded {} players, {} matches (cycle active: {})",
            state.players().len(),
            state.matches().len(),
            state.cycle().active
        );

        Ok(Self {
            storage,
            controller: CycleController::new(settings),
            state,
        })
    }

    /// Drop in-memory state and read everything back from storage
    pub fn reload(&mut self) -> Result<(), LeagueError> {
        self.state = load_state(&self.storage)?;
        Ok(())
    }

    pub fn state(&self) -> &LeagueState {
        &self.state
    }

    pub fn controller(&self) -> &CycleController {
        &self.controller
    }

    pub fn phase(&self) -> CyclePhase {
        self.controller.phase(&self.state)
    }

    pub fn progress(&self) -> CycleProgress {
        CycleProgress::from_matches(self.state.matches())
    }

    pub fn standings(&mut self) -> Vec<StandingRow> {
        self.controller.cached_standings(&mut self.state).to_vec()
    }

    pub fn pending_matches(&self) -> Vec<&Match> {
        self.state.pending_matches().collect()
    }

    // --- Cycle commands ---

    pub fn open_cycle(
        &mut self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<(), LeagueError> {
        let next = self.controller.open_cycle(&self.state, start_date, end_date)?;
        with_storage(self.storage.save_snapshot(Snapshot {
            players: None,
            matches: next.matches(),
            cycle: next.cycle(),
        }))?;
        self.state = next;
        Ok(())
    }

    /// Validate raw score fields and record them
    pub fn record_scores<T: AsRef<str>>(
        &mut self,
        id: MatchId,
        raw: &[T],
        super_tiebreak: bool,
        date: Option<NaiveDate>,
    ) -> Result<(), LeagueError> {
        let line = validator::validate_raw(raw, super_tiebreak)?;
        let next = self.controller.record_result(&self.state, id, line, date)?;
        self.commit_matches(next)
    }

    pub fn record_result(
        &mut self,
        id: MatchId,
        scores: &[u32],
        super_tiebreak: bool,
        date: Option<NaiveDate>,
    ) -> Result<(), LeagueError> {
        let line = validator::validate(scores, super_tiebreak)?;
        let next = self.controller.record_result(&self.state, id, line, date)?;
        self.commit_matches(next)
    }

    pub fn record_walkover(
        &mut self,
        id: MatchId,
        winner: Side,
        date: Option<NaiveDate>,
    ) -> Result<(), LeagueError> {
        let next = self.controller.record_walkover(&self.state, id, winner, date)?;
        self.commit_matches(next)
    }

    pub fn record_double_forfeit(
        &mut self,
        id: MatchId,
        date: Option<NaiveDate>,
    ) -> Result<(), LeagueError> {
        let next = self.controller.record_double_forfeit(&self.state, id, date)?;
        self.commit_matches(next)
    }

    pub fn undo_result(&mut self, id: MatchId) -> Result<(), LeagueError> {
        let next = self.controller.undo_result(&self.state, id)?;
        self.commit_matches(next)
    }

    /// Scores of a played match as entered, for editing it
    pub fn edit_scores(&self, id: MatchId) -> Result<Option<(Vec<u32>, bool)>, LeagueError> {
        let game = self
            .state
            .find_match(id)
            .ok_or(LeagueError::MatchNotFound(id))?;

        Ok(match &game.outcome {
            Outcome::Played(line) => Some((encoding::flatten_scores(line), line.super_tiebreak)),
            _ => None,
        })
    }

    /// Session-only: nothing is written until the close is confirmed
    pub fn request_close(&mut self) -> Result<CloseReadiness, LeagueError> {
        let (next, readiness) = self.controller.request_close(&self.state)?;
        self.state = next;
        Ok(readiness)
    }

    pub fn resolve_pending(
        &mut self,
        id: MatchId,
        resolution: Resolution,
    ) -> Result<(), LeagueError> {
        let next = self.controller.resolve_pending(&self.state, id, resolution)?;
        self.commit_matches(next)
    }

    /// Roster moves, match wipe and deactivation land in one transaction
    pub fn confirm_close(&mut self) -> Result<ClosureReport, LeagueError> {
        let (next, report) = self.controller.confirm_close(&self.state)?;
        with_storage(self.storage.save_snapshot(Snapshot {
            players: Some(next.players()),
            matches: next.matches(),
            cycle: next.cycle(),
        }))?;
        self.state = next;
        Ok(report)
    }

    // --- Roster commands ---

    pub fn add_player(&mut self, player: Player) -> Result<(), LeagueError> {
        let next = self.controller.add_player(&self.state, player)?;
        self.commit_players(next)
    }

    pub fn remove_player(&mut self, name: &str) -> Result<(), LeagueError> {
        let next = self.controller.remove_player(&self.state, name)?;
        self.commit_players(next)
    }

    pub fn set_class(&mut self, name: &str, class: &str) -> Result<(), LeagueError> {
        let next = self.controller.set_class(&self.state, name, class)?;
        self.commit_players(next)
    }

    pub fn replace_roster(&mut self, players: Vec<Player>) -> Result<(), LeagueError> {
        let next = self.controller.replace_roster(&self.state, players)?;
        self.commit_players(next)
    }

    fn commit_matches(&mut self, next: LeagueState) -> Result<(), LeagueError> {
        with_storage(self.storage.save_matches(next.matches()))?;
        self.state = next;
        Ok(())
    }

    fn commit_players(&mut self, next: LeagueState) -> Result<(), LeagueError> {
        with_storage(self.storage.save_players(next.players()))?;
        self.state = next;
        Ok(())
    }
}

fn load_state<S: Storage>(storage: &S) -> Result<LeagueState, LeagueError> {
    let players = with_storage(storage.load_players())?;
    let matches = with_storage(storage.load_matches())?;
    let cycle = with_storage(storage.load_cycle_info())?.unwrap_or_default();
    Ok(LeagueState::new(players, matches, cycle))
}
