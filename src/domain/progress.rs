use serde::Serialize;

use super::models::Match;

/// Settlement progress of the open cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CycleProgress {
    pub total: usize,
    pub settled: usize,
}

impl CycleProgress {
    pub fn from_matches(matches: &[Match]) -> Self {
        Self {
            total: matches.len(),
            settled: matches.iter().filter(|m| !m.is_pending()).count(),
        }
    }

    pub fn pending(&self) -> usize {
        self.total - self.settled
    }

    pub fn percent(&self) -> f64 {
        if is_empty(self.total) {
            return 0.0;
        }
        self.settled as f64 / self.total as f64 * 100.0
    }

    pub fn is_complete(&self) -> bool {
        self.settled == self.total
    }
}

fn is_empty(total: usize) -> bool {
    total == 0
}
