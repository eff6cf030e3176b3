use serde::{Deserialize, Serialize};
use std::fmt;

/// Index into the fixed-size action space of a game.
pub type Action = usize;

/// Terminal value a rules engine reports for a drawn game.
///
/// Zero is reserved for "still running", so draws use a small non-zero value.
pub const DRAW_VALUE: f32 = 1e-4;

/// The side to move.
///
/// `First` is the canonical `+1` player and always moves on ply 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    First,
    Second,
}

impl Player {
    pub fn other(self) -> Player {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    /// `+1` for the first mover, `-1` for the second.
    pub fn sign(self) -> i8 {
        match self {
            Player::First => 1,
            Player::Second => -1,
        }
    }

    pub fn idx(self) -> usize {
        match self {
            Player::First => 0,
            Player::Second => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}", self.sign())
    }
}

/// How a finished episode ended, seen from the first mover.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    FirstMoverWin,
    SecondMoverWin,
    Draw,
    /// Any other terminal value a rules engine with a richer outcome space reports.
    /// Counted with draws.
    Other(f32),
}

impl Outcome {
    /// Classify a raw terminal value reported from the first mover's perspective.
    ///
    /// Returns `None` for values that cannot describe a finished game: zero
    /// (the "still running" marker) and non-finite numbers.
    pub fn from_terminal_value(value: f32) -> Option<Outcome> {
        if !value.is_finite() || value == 0.0 {
            return None;
        }
        let outcome = if value == 1.0 {
            Outcome::FirstMoverWin
        } else if value == -1.0 {
            Outcome::SecondMoverWin
        } else if value == DRAW_VALUE {
            Outcome::Draw
        } else {
            Outcome::Other(value)
        };
        Some(outcome)
    }

    /// The raw terminal value this outcome was classified from.
    pub fn value(self) -> f32 {
        match self {
            Outcome::FirstMoverWin => 1.0,
            Outcome::SecondMoverWin => -1.0,
            Outcome::Draw => DRAW_VALUE,
            Outcome::Other(v) => v,
        }
    }

    /// The player that won, if any.
    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::FirstMoverWin => Some(Player::First),
            Outcome::SecondMoverWin => Some(Player::Second),
            Outcome::Draw | Outcome::Other(_) => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::FirstMoverWin => write!(f, "1-0"),
            Outcome::SecondMoverWin => write!(f, "0-1"),
            Outcome::Draw => write!(f, "1/2"),
            Outcome::Other(v) => write!(f, "other({v})"),
        }
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
