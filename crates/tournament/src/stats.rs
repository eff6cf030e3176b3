//! Win/loss/draw bookkeeping for a tournament

use arena_core::Outcome;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which policy moves first during a tournament phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Policy A moves first
    AFirst,
    /// Policy B moves first
    BFirst,
}

impl Phase {
    pub const ALL: [Phase; 2] = [Phase::AFirst, Phase::BFirst];
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::AFirst => write!(f, "A first"),
            Phase::BFirst => write!(f, "B first"),
        }
    }
}

/// Aggregate result of a tournament between policy A and policy B.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentStats {
    pub wins_a: u32,
    pub wins_b: u32,
    /// Draws plus any non-decisive terminal outcome
    pub draws: u32,
}

impl TournamentStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one episode result in, crediting whoever held the winning seat.
    pub fn record(&mut self, phase: Phase, outcome: Outcome) {
        match (phase, outcome) {
            (Phase::AFirst, Outcome::FirstMoverWin) | (Phase::BFirst, Outcome::SecondMoverWin) => {
                self.wins_a += 1
            }
            (Phase::AFirst, Outcome::SecondMoverWin) | (Phase::BFirst, Outcome::FirstMoverWin) => {
                self.wins_b += 1
            }
            (_, Outcome::Draw) | (_, Outcome::Other(_)) => self.draws += 1,
        }
    }

    pub fn total_games(&self) -> u32 {
        self.wins_a + self.wins_b + self.draws
    }

    /// Score from A's perspective (1 for win, 0.5 for draw, 0 for loss)
    pub fn score_a(&self) -> f64 {
        let total = self.total_games() as f64;
        if total == 0.0 {
            return 0.5;
        }
        (self.wins_a as f64 + 0.5 * self.draws as f64) / total
    }

    /// A's share of the decisive games, None if every game was drawn.
    pub fn win_rate_a(&self) -> Option<f64> {
        let decisive = self.wins_a + self.wins_b;
        if decisive == 0 {
            return None;
        }
        Some(self.wins_a as f64 / decisive as f64)
    }

    /// `(wins_a, wins_b, draws)`
    pub fn as_tuple(&self) -> (u32, u32, u32) {
        (self.wins_a, self.wins_b, self.draws)
    }
}

impl fmt::Display for TournamentStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.wins_a, self.wins_b, self.draws)
    }
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod stats_tests;
