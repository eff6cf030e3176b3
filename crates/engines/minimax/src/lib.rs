//! Minimax Policy
//!
//! Negamax search with alpha-beta pruning over any arena game.
//! With enough depth this plays small games such as 3×3 tic-tac-toe
//! perfectly, which makes it the reference opponent for search-backed
//! policies.

mod search;

use arena_core::{Action, Game, Policy};

pub use search::{pick_best_action, SearchOutcome, WIN_SCORE};

/// Depth used when none is given; enough to solve 3×3 tic-tac-toe.
pub const DEFAULT_DEPTH: u8 = 9;

/// Policy that searches the game tree to a fixed depth.
///
/// Stateless between moves: every call searches from scratch, so there is
/// no search memory to reset.
#[derive(Debug, Clone)]
pub struct MinimaxPolicy {
    depth: u8,
    /// Node counter for the last search
    nodes: u64,
    /// Score of the last chosen action
    last_score: i32,
}

impl MinimaxPolicy {
    pub fn new(depth: u8) -> Self {
        Self {
            depth,
            nodes: 0,
            last_score: 0,
        }
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Nodes visited by the most recent search.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn last_score(&self) -> i32 {
        self.last_score
    }
}

impl Default for MinimaxPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}

impl<G: Game> Policy<G> for MinimaxPolicy {
    fn select_action(&mut self, game: &G, board: &G::Board) -> Action {
        self.nodes = 0;
        let outcome = pick_best_action(game, board, self.depth, &mut self.nodes);
        let (action, score) = outcome.best_action.unwrap_or((0, 0));
        self.last_score = score;
        action
    }

    fn name(&self) -> &str {
        "Minimax"
    }
}
