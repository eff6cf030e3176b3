//! Rules-engine interface.
//!
//! The arena never looks inside a board. Everything it needs (fresh boards,
//! canonical views, legality, transitions, termination) goes through [`Game`].

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

use crate::types::{Action, Player};

/// Errors a rules engine reports when asked to apply an action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("action {action} is outside the action space of size {size}")]
    ActionOutOfRange { action: Action, size: usize },

    #[error("action {action} is not legal in this position")]
    IllegalAction { action: Action },
}

/// Ply indices (1-based) on which an evaluation run may replace the
/// policy's choice with a uniformly random legal action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<u32>", into = "Vec<u32>")]
pub struct EarlyMoveWindow {
    plies: Vec<u32>,
}

impl EarlyMoveWindow {
    /// Only the very first ply.
    pub fn first_ply() -> Self {
        Self { plies: vec![1] }
    }

    /// An explicit set of plies. Zero is ignored since plies start at 1.
    pub fn plies(plies: impl IntoIterator<Item = u32>) -> Self {
        let mut plies: Vec<u32> = plies.into_iter().filter(|&p| p > 0).collect();
        plies.sort_unstable();
        plies.dedup();
        Self { plies }
    }

    pub fn none() -> Self {
        Self { plies: Vec::new() }
    }

    #[inline]
    pub fn contains(&self, ply: u32) -> bool {
        self.plies.binary_search(&ply).is_ok()
    }

    pub fn is_empty(&self) -> bool {
        self.plies.is_empty()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.plies
    }
}

impl From<Vec<u32>> for EarlyMoveWindow {
    fn from(plies: Vec<u32>) -> Self {
        Self::plies(plies)
    }
}

impl From<EarlyMoveWindow> for Vec<u32> {
    fn from(window: EarlyMoveWindow) -> Self {
        window.plies
    }
}

impl Default for EarlyMoveWindow {
    fn default() -> Self {
        Self::first_ply()
    }
}

/// A two-player, perfect-information, turn-alternating game.
///
/// Terminal values follow one convention everywhere: `game_ended(board, p)`
/// returns `0.0` while the game is running, `1.0` if `p` has won, `-1.0` if
/// `p` has lost, and any other finite value (conventionally
/// [`DRAW_VALUE`](crate::DRAW_VALUE)) for draws or richer outcomes.
pub trait Game {
    type Board: Clone + Debug;

    /// Short identifier used in logs and reports.
    fn name(&self) -> &str;

    fn initial_board(&self) -> Self::Board;

    /// The board as seen by `player`, so one policy can play either side.
    fn canonical_form(&self, board: &Self::Board, player: Player) -> Self::Board;

    /// Legality mask of length [`Game::action_size`] for the player to move
    /// on a canonical board.
    fn legal_moves(&self, board: &Self::Board) -> Vec<bool>;

    /// Apply `action` for `player`, returning the new board and the next mover.
    fn next_state(
        &self,
        board: &Self::Board,
        player: Player,
        action: Action,
    ) -> Result<(Self::Board, Player), RulesError>;

    fn game_ended(&self, board: &Self::Board, player: Player) -> f32;

    fn action_size(&self) -> usize;

    /// Plies eligible for the evaluation-mode random opening.
    ///
    /// Games whose first move carries no information (symmetric openings)
    /// should return a later ply.
    fn early_move_window(&self) -> EarlyMoveWindow {
        EarlyMoveWindow::first_ply()
    }
}

/// Indices of the set entries of a legality mask.
pub fn legal_actions(mask: &[bool]) -> Vec<Action> {
    mask.iter()
        .enumerate()
        .filter_map(|(action, &legal)| legal.then_some(action))
        .collect()
}

/// Whether `action` is inside the mask and marked legal.
#[inline]
pub fn is_legal(mask: &[bool], action: Action) -> bool {
    mask.get(action).copied().unwrap_or(false)
}
