use chrono::NaiveDate;
use log::{debug, info};

use crate::config::LeagueSettings;
use crate::domain::{
    CycleInfo, LeagueState, MatchId, Outcome, Player, ScoreLine, Side, StandingRow,
};
use crate::errors::{LeagueError, ValidationError};

use super::promotion::{self, ClassMove};
use super::{match_generator, standings};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclePhase {
    Inactive,
    Active,
    ResolvingPendingMatches,
}

/// Forced settlement of a match left pending at close time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Walkover { winner: Side },
    DoubleForfeit,
}

impl Resolution {
    fn outcome(self) -> Outcome {
        match self {
            Resolution::Walkover { winner } => Outcome::Walkover { winner },
            Resolution::DoubleForfeit => Outcome::DoubleForfeit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseReadiness {
    Ready,
    /// Matches that must be resolved before the cycle can close
    Pending(Vec<MatchId>),
}

/// What a confirmed close did to the league
#[derive(Debug, Clone)]
pub struct ClosureReport {
    pub final_standings: Vec<StandingRow>,
    pub moves: Vec<ClassMove>,
    pub cleared_matches: usize,
}

/// Drives the cycle lifecycle. Every command reads the given state and
/// returns the next one; the input is never modified.
#[derive(Debug, Clone, Default)]
pub struct CycleController {
    settings: LeagueSettings,
}

impl CycleController {
    pub fn new(settings: LeagueSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &LeagueSettings {
        &self.settings
    }

    pub fn phase(&self, state: &LeagueState) -> CyclePhase {
        if !state.cycle().active {
            CyclePhase::Inactive
        } else if state.close_requested() {
            CyclePhase::ResolvingPendingMatches
        } else {
            CyclePhase::Active
        }
    }

    pub fn standings(&self, state: &LeagueState) -> Vec<StandingRow> {
        standings::compute(state.players(), state.matches(), &self.settings.class_order)
    }

    /// Standings through the state's cache
    pub fn cached_standings<'a>(&self, state: &'a mut LeagueState) -> &'a [StandingRow] {
        let order = &self.settings.class_order;
        state.standings_with(|players, matches| standings::compute(players, matches, order))
    }

    pub fn open_cycle(
        &self,
        state: &LeagueState,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<LeagueState, LeagueError> {
        if state.cycle().active {
            return Err(LeagueError::CycleAlreadyActive);
        }
        if state.players().len() < 2 {
            return Err(ValidationError::InsufficientPlayers.into());
        }

        let classes = self
            .settings
            .class_order
            .arrange(state.players().iter().map(|p| p.class.as_str()));

        let mut matches = Vec::new();
        for class in &classes {
            let roster = roster_of(state.players(), class);
            let generated = match_generator::generate(class, &roster, matches.len() as MatchId + 1);
            debug!("Class {}: {} players, {} matches", class, roster.len(), generated.len());
            matches.extend(generated);
        }

        if matches.is_empty() {
            return Err(ValidationError::InsufficientPlayers.into());
        }

        let mut next = state.clone();
        *next.matches_mut() = matches;
        *next.cycle_mut() = CycleInfo {
            active: true,
            start_date,
            end_date,
        };
        next.set_close_requested(false);

        info!(
            "Opened cycle with {} matches across {} classes",
            next.matches().len(),
            classes.len()
        );
        Ok(next)
    }

    /// Record a played scoreline. Settled matches may be overwritten.
    pub fn record_result(
        &self,
        state: &LeagueState,
        id: MatchId,
        line: ScoreLine,
        date: Option<NaiveDate>,
    ) -> Result<LeagueState, LeagueError> {
        self.settle(state, id, Outcome::Played(line), date)
    }

    pub fn record_walkover(
        &self,
        state: &LeagueState,
        id: MatchId,
        winner: Side,
        date: Option<NaiveDate>,
    ) -> Result<LeagueState, LeagueError> {
        self.settle(state, id, Outcome::Walkover { winner }, date)
    }

    pub fn record_double_forfeit(
        &self,
        state: &LeagueState,
        id: MatchId,
        date: Option<NaiveDate>,
    ) -> Result<LeagueState, LeagueError> {
        self.settle(state, id, Outcome::DoubleForfeit, date)
    }

    /// Put a match back to pending
    pub fn undo_result(
        &self,
        state: &LeagueState,
        id: MatchId,
    ) -> Result<LeagueState, LeagueError> {
        self.require_active(state)?;
        let mut next = state.clone();
        let game = next.match_mut(id).ok_or(LeagueError::MatchNotFound(id))?;
        game.outcome = Outcome::Pending;
        game.date = None;

        info!("Match {} ({}) reset to pending", id, game.label());
        Ok(next)
    }

    /// Enter the resolving phase and report what still blocks the close
    pub fn request_close(
        &self,
        state: &LeagueState,
    ) -> Result<(LeagueState, CloseReadiness), LeagueError> {
        self.require_active(state)?;
        let mut next = state.clone();
        next.set_close_requested(true);

        let pending: Vec<MatchId> = next.pending_matches().map(|m| m.id).collect();
        if pending.is_empty() {
            return Ok((next, CloseReadiness::Ready));
        }

        info!("Close requested with {} pending matches", pending.len());
        Ok((next, CloseReadiness::Pending(pending)))
    }

    /// Settle one straggler by walkover or double forfeit
    pub fn resolve_pending(
        &self,
        state: &LeagueState,
        id: MatchId,
        resolution: Resolution,
    ) -> Result<LeagueState, LeagueError> {
        if self.phase(state) != CyclePhase::ResolvingPendingMatches {
            return Err(LeagueError::CloseNotRequested);
        }
        let game = state.find_match(id).ok_or(LeagueError::MatchNotFound(id))?;
        if !game.is_pending() {
            return Err(LeagueError::MatchNotPending(id));
        }

        self.settle(state, id, resolution.outcome(), None)
    }

    /// Apply promotion/relegation, clear the matches and deactivate the cycle
    pub fn confirm_close(
        &self,
        state: &LeagueState,
    ) -> Result<(LeagueState, ClosureReport), LeagueError> {
        if self.phase(state) != CyclePhase::ResolvingPendingMatches {
            return Err(LeagueError::CloseNotRequested);
        }
        let pending = state.pending_matches().count();
        if pending > 0 {
            return Err(LeagueError::PendingMatches(pending));
        }

        let final_standings = self.standings(state);
        let moves = promotion::plan_moves(
            &final_standings,
            &self.settings.class_order,
            self.settings.movement_count,
        );

        let mut next = state.clone();
        promotion::apply_moves(next.players_mut(), &moves);
        let cleared_matches = next.matches().len();
        next.matches_mut().clear();
        next.cycle_mut().active = false;
        next.set_close_requested(false);

        for class_move in &moves {
            info!(
                "{} {}: {} -> {}",
                class_move.player, class_move.movement, class_move.from, class_move.to
            );
        }
        info!("Cycle closed, {} matches cleared", cleared_matches);

        Ok((
            next,
            ClosureReport {
                final_standings,
                moves,
                cleared_matches,
            },
        ))
    }

    // --- Roster ---

    pub fn add_player(
        &self,
        state: &LeagueState,
        player: Player,
    ) -> Result<LeagueState, LeagueError> {
        let player = normalize(player)?;
        if state.find_player(&player.name).is_some() {
            return Err(LeagueError::Roster(format!("{} is already registered", player.name)));
        }

        let mut next = state.clone();
        next.players_mut().push(player);
        Ok(next)
    }

    /// Players referenced by the active cycle cannot leave the roster
    pub fn remove_player(
        &self,
        state: &LeagueState,
        name: &str,
    ) -> Result<LeagueState, LeagueError> {
        if state.find_player(name).is_none() {
            return Err(LeagueError::Roster(format!("{} is not registered", name)));
        }
        self.ensure_not_scheduled(state, name)?;

        let mut next = state.clone();
        next.players_mut().retain(|p| p.name != name);
        Ok(next)
    }

    pub fn set_class(
        &self,
        state: &LeagueState,
        name: &str,
        class: &str,
    ) -> Result<LeagueState, LeagueError> {
        let class = class.trim();
        if class.is_empty() {
            return Err(LeagueError::Roster("class must not be empty".to_string()));
        }

        let mut next = state.clone();
        let player = next
            .players_mut()
            .iter_mut()
            .find(|p| p.name == name)
            .ok_or_else(|| LeagueError::Roster(format!("{} is not registered", name)))?;
        player.class = class.to_string();
        Ok(next)
    }

    /// Replace the whole roster, as a bulk edit would
    pub fn replace_roster(
        &self,
        state: &LeagueState,
        players: Vec<Player>,
    ) -> Result<LeagueState, LeagueError> {
        let mut roster: Vec<Player> = Vec::with_capacity(players.len());
        for player in players {
            let player = normalize(player)?;
            if roster.iter().any(|p| p.name == player.name) {
                return Err(LeagueError::Roster(format!("{} appears twice", player.name)));
            }
            roster.push(player);
        }

        for current in state.players() {
            if !roster.iter().any(|p| p.name == current.name) {
                self.ensure_not_scheduled(state, &current.name)?;
            }
        }

        let mut next = state.clone();
        *next.players_mut() = roster;
        Ok(next)
    }

    fn settle(
        &self,
        state: &LeagueState,
        id: MatchId,
        outcome: Outcome,
        date: Option<NaiveDate>,
    ) -> Result<LeagueState, LeagueError> {
        self.require_active(state)?;
        let mut next = state.clone();
        let game = next.match_mut(id).ok_or(LeagueError::MatchNotFound(id))?;
        game.outcome = outcome;
        game.date = date;

        info!(
            "Match {} ({}) settled: {} [{}]",
            id,
            game.label(),
            game.result(),
            game.details()
        );
        Ok(next)
    }

    fn require_active(&self, state: &LeagueState) -> Result<(), LeagueError> {
        if state.cycle().active {
            Ok(())
        } else {
            Err(LeagueError::NoActiveCycle)
        }
    }

    fn ensure_not_scheduled(&self, state: &LeagueState, name: &str) -> Result<(), LeagueError> {
        if state.cycle().active && state.matches().iter().any(|m| m.involves(name)) {
            return Err(LeagueError::Roster(format!(
                "{} has matches in the active cycle",
                name
            )));
        }
        Ok(())
    }
}

fn roster_of(players: &[Player], class: &str) -> Vec<String> {
    players
        .iter()
        .filter(|p| p.class == class)
        .map(|p| p.name.clone())
        .collect()
}

fn normalize(player: Player) -> Result<Player, LeagueError> {
    let name = player.name.trim();
    let class = player.class.trim();
    if name.is_empty() || class.is_empty() {
        return Err(LeagueError::Roster(
            "player name and class must not be empty".to_string(),
        ));
    }
    Ok(Player::new(name, class))
}
