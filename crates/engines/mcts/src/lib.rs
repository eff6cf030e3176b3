//! Monte-Carlo Tree Search Policy
//!
//! A search-backed policy whose statistics persist across the moves of one
//! episode and are dropped by [`Policy::reset_search_memory`] before the
//! next one.
//!
//! # Architecture
//!
//! - [`SearchTree`]: transposition table of visit counts and mean values,
//!   keyed by canonical board
//! - PUCT selection with uniform priors, random-rollout leaf evaluation
//! - Final choice by visit count, greedy or temperature-sampled

mod config;
mod search;
mod tree;

use std::hash::Hash;

use arena_core::{Action, Game, Policy};
use rand::distributions::{Distribution, WeightedIndex};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

pub use config::MctsConfig;
pub use search::{action_probs, simulate};
pub use tree::{EdgeStats, NodeStats, SearchTree};

/// Tree-search policy with per-episode search memory.
pub struct MctsPolicy<G: Game>
where
    G::Board: Hash + Eq,
{
    config: MctsConfig,
    tree: SearchTree<G::Board>,
    rng: ChaCha8Rng,
    name: String,
}

impl<G: Game> MctsPolicy<G>
where
    G::Board: Hash + Eq,
{
    pub fn new(config: MctsConfig) -> Self {
        let rng = seeded_rng(config.seed);
        let name = format!("MCTS-{}", config.num_simulations);
        Self {
            config,
            tree: SearchTree::new(),
            rng,
            name,
        }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Read-only view of the search memory.
    pub fn tree(&self) -> &SearchTree<G::Board> {
        &self.tree
    }

    /// Run the configured number of simulations from `board` and return the
    /// visit-count distribution at the given temperature.
    pub fn action_probs(&mut self, game: &G, board: &G::Board, temperature: f32) -> Vec<f32> {
        for _ in 0..self.config.num_simulations {
            simulate(game, &mut self.tree, board, self.config.c_puct, &mut self.rng);
        }
        action_probs(&self.tree, board, game.action_size(), temperature)
    }
}

fn seeded_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

impl<G> Policy<G> for MctsPolicy<G>
where
    G: Game,
    G::Board: Hash + Eq + Send,
{
    fn select_action(&mut self, game: &G, board: &G::Board) -> Action {
        let temperature = self.config.temperature;
        let probs = self.action_probs(game, board, temperature);

        debug!(
            policy = %self.name,
            nodes = self.tree.len(),
            visits = self.tree.total_visits(),
            "search finished"
        );

        let action = if temperature <= 0.0 {
            probs.iter().position(|&p| p > 0.0)
        } else {
            WeightedIndex::new(&probs)
                .ok()
                .map(|dist| dist.sample(&mut self.rng))
        };

        // no statistics (terminal root or zero simulations): first legal action
        action.unwrap_or_else(|| {
            game.legal_moves(board)
                .iter()
                .position(|&legal| legal)
                .unwrap_or(0)
        })
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn reset_search_memory(&mut self) {
        self.tree.clear();
        if self.config.seed.is_some() {
            self.rng = seeded_rng(self.config.seed);
        }
    }
}

#[cfg(test)]
mod lib_tests;
