use super::models::{CycleInfo, Match, MatchId, Player, StandingRow};

/// Everything the engine knows about the league at one point in time.
///
/// Engine commands take a state by reference and hand back a new one, so a
/// failed command or a failed save never leaves a half-applied state behind.
/// Standings are derived and cached; every mutable accessor drops the cache.
#[derive(Debug, Clone, Default)]
pub struct LeagueState {
    players: Vec<Player>,
    matches: Vec<Match>,
    cycle: CycleInfo,
    close_requested: bool,
    standings: Option<Vec<StandingRow>>,
}

impl LeagueState {
    pub fn new(players: Vec<Player>, matches: Vec<Match>, cycle: CycleInfo) -> Self {
        Self {
            players,
            matches,
            cycle,
            close_requested: false,
            standings: None,
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn cycle(&self) -> &CycleInfo {
        &self.cycle
    }

    pub fn close_requested(&self) -> bool {
        self.close_requested
    }

    pub fn find_match(&self, id: MatchId) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == id)
    }

    pub fn find_player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    pub fn pending_matches(&self) -> impl Iterator<Item = &Match> {
        self.matches.iter().filter(|m| m.is_pending())
    }

    pub fn players_mut(&mut self) -> &mut Vec<Player> {
        self.standings = None;
        &mut self.players
    }

    pub fn matches_mut(&mut self) -> &mut Vec<Match> {
        self.standings = None;
        &mut self.matches
    }

    pub fn match_mut(&mut self, id: MatchId) -> Option<&mut Match> {
        self.matches_mut().iter_mut().find(|m| m.id == id)
    }

    pub fn cycle_mut(&mut self) -> &mut CycleInfo {
        &mut self.cycle
    }

    pub fn set_close_requested(&mut self, requested: bool) {
        self.close_requested = requested;
    }

    pub fn cached_standings(&self) -> Option<&[StandingRow]> {
        self.standings.as_deref()
    }

    /// Cached standings, computing them with `compute` on a miss
    pub fn standings_with<F>(&mut self, compute: F) -> &[StandingRow]
    where
        F: FnOnce(&[Player], &[Match]) -> Vec<StandingRow>,
    {
        if self.standings.is_none() {
            self.standings = Some(compute(&self.players, &self.matches));
        }
        self.standings.as_deref().unwrap_or_default()
    }
}
