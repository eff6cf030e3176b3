//! Scripted Policies
//!
//! Policies that follow a fixed rule instead of searching:
//! - [`FirstLegalPolicy`] always plays the lowest-index legal action
//! - [`RandomPolicy`] picks uniformly among legal actions
//!
//! Useful as baselines (any real policy should easily beat random play) and
//! as deterministic opponents for testing the arena itself.

use arena_core::{legal_actions, Action, Game, Policy};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[cfg(test)]
mod lib_tests;

/// Plays the lowest-index legal action. Fully deterministic.
#[derive(Debug, Clone, Default)]
pub struct FirstLegalPolicy;

impl FirstLegalPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl<G: Game> Policy<G> for FirstLegalPolicy {
    fn select_action(&mut self, game: &G, board: &G::Board) -> Action {
        game.legal_moves(board)
            .iter()
            .position(|&legal| legal)
            .unwrap_or(0)
    }

    fn name(&self) -> &str {
        "FirstLegal"
    }
}

/// Picks a legal action uniformly at random.
///
/// Seeded policies replay the same sequence of choices given the same
/// sequence of positions.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: ChaCha8Rng,
}

impl RandomPolicy {
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Game> Policy<G> for RandomPolicy {
    fn select_action(&mut self, game: &G, board: &G::Board) -> Action {
        let actions = legal_actions(&game.legal_moves(board));
        actions.choose(&mut self.rng).copied().unwrap_or(0)
    }

    fn name(&self) -> &str {
        "Random"
    }
}
