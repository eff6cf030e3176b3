//! Simulation step: selection, expansion, rollout and backup.
//!
//! Every board passed around here is canonical, so the side to move is
//! always `Player::First` and values flip sign between parent and child.

use std::hash::Hash;

use arena_core::{legal_actions, Action, Game, Player};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::tree::{NodeStats, SearchTree};

/// Small constant so the exploration term is non-zero at unvisited nodes.
const EPS: f32 = 1e-8;

/// Upper bound on rollout length; games that never end score neutral.
const MAX_ROLLOUT_PLIES: usize = 1_000;

/// Clamp a terminal value to the [-1, 1] value range used by the search.
#[inline]
fn as_value(terminal: f32) -> f32 {
    terminal.clamp(-1.0, 1.0)
}

/// Canonical board of the opponent after the side to move plays `action`.
fn child_board<G: Game>(game: &G, board: &G::Board, action: Action) -> Option<G::Board> {
    let (next, mover) = game.next_state(board, Player::First, action).ok()?;
    Some(game.canonical_form(&next, mover))
}

/// Run one simulation from `board`, returning its value for the side to move.
pub fn simulate<G, R>(
    game: &G,
    tree: &mut SearchTree<G::Board>,
    board: &G::Board,
    c_puct: f32,
    rng: &mut R,
) -> f32
where
    G: Game,
    G::Board: Hash + Eq,
    R: Rng + ?Sized,
{
    let action = match tree.get(board) {
        None => {
            let terminal = game.game_ended(board, Player::First);
            let valid = game.legal_moves(board);
            tree.insert(board.clone(), NodeStats::new(terminal, valid));
            if terminal != 0.0 {
                return as_value(terminal);
            }
            return rollout(game, board, rng);
        }
        Some(node) if node.terminal != 0.0 => return as_value(node.terminal),
        Some(node) => match select_edge(node, c_puct) {
            Some(action) => action,
            None => return 0.0,
        },
    };

    let value = match child_board(game, board, action) {
        Some(child) => -simulate(game, tree, &child, c_puct, rng),
        None => 0.0,
    };

    if let Some(node) = tree.get_mut(board) {
        let edge = &mut node.edges[action];
        edge.q = (edge.visits as f32 * edge.q + value) / (edge.visits as f32 + 1.0);
        edge.visits += 1;
        node.visits += 1;
    }

    value
}

/// PUCT selection with uniform priors over legal actions.
fn select_edge(node: &NodeStats, c_puct: f32) -> Option<Action> {
    let legal = node.legal_count();
    if legal == 0 {
        return None;
    }
    let prior = 1.0 / legal as f32;
    let sqrt_n = (node.visits as f32 + EPS).sqrt();

    let mut best: Option<(Action, f32)> = None;
    for (action, edge) in node.edges.iter().enumerate() {
        if !node.valid[action] {
            continue;
        }
        let u = edge.q + c_puct * prior * sqrt_n / (1.0 + edge.visits as f32);
        if best.map_or(true, |(_, b)| u > b) {
            best = Some((action, u));
        }
    }
    best.map(|(action, _)| action)
}

/// Uniformly random playout; value for the side to move at `board`.
fn rollout<G, R>(game: &G, board: &G::Board, rng: &mut R) -> f32
where
    G: Game,
    R: Rng + ?Sized,
{
    let mut board = board.clone();
    let mut sign = 1.0;
    for _ in 0..MAX_ROLLOUT_PLIES {
        let terminal = game.game_ended(&board, Player::First);
        if terminal != 0.0 {
            return sign * as_value(terminal);
        }
        let actions = legal_actions(&game.legal_moves(&board));
        let Some(&action) = actions.choose(rng) else {
            return 0.0;
        };
        match child_board(game, &board, action) {
            Some(child) => board = child,
            None => return 0.0,
        }
        sign = -sign;
    }
    0.0
}

/// Visit-count distribution over the action space at `board`.
///
/// With `temperature == 0` all mass goes to the most visited action
/// (lowest index on ties).
pub fn action_probs<B: Hash + Eq>(
    tree: &SearchTree<B>,
    board: &B,
    action_size: usize,
    temperature: f32,
) -> Vec<f32> {
    let mut probs = vec![0.0; action_size];
    let Some(node) = tree.get(board) else {
        return probs;
    };
    let counts: Vec<u32> = node.edges.iter().map(|e| e.visits).collect();

    if temperature <= 0.0 {
        let mut best = None;
        for (action, &n) in counts.iter().enumerate() {
            if n > 0 && best.map_or(true, |(_, b)| n > b) {
                best = Some((action, n));
            }
        }
        if let Some((action, _)) = best {
            probs[action] = 1.0;
        }
        return probs;
    }

    let weights: Vec<f64> = counts
        .iter()
        .map(|&n| (n as f64).powf(1.0 / temperature as f64))
        .collect();
    let total: f64 = weights.iter().sum();
    if total > 0.0 {
        for (p, w) in probs.iter_mut().zip(weights) {
            *p = (w / total) as f32;
        }
    }
    probs
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
