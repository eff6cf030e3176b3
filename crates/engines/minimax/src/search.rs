//! Negamax search with alpha-beta pruning

use arena_core::{legal_actions, Action, Game, Player};

/// Score of a won position found at the root. Wins found deeper score less,
/// so the search prefers the fastest win and the slowest loss.
pub const WIN_SCORE: i32 = 100_000;

/// Result from pick_best_action.
pub struct SearchOutcome {
    /// Best action found (None if no legal actions exist)
    pub best_action: Option<(Action, i32)>,
}

/// Searches a canonical board and returns the best action with its score.
///
/// # Arguments
/// * `game` - Rules engine
/// * `board` - Canonical board (player to move is always `Player::First`)
/// * `depth` - Maximum search depth in plies
/// * `nodes` - Counter for nodes searched (for statistics)
pub fn pick_best_action<G: Game>(
    game: &G,
    board: &G::Board,
    depth: u8,
    nodes: &mut u64,
) -> SearchOutcome {
    let actions = legal_actions(&game.legal_moves(board));
    if actions.is_empty() {
        return SearchOutcome { best_action: None };
    }

    let mut best = actions[0];
    let mut best_score = i32::MIN + 1;
    let mut alpha = i32::MIN / 2;
    let beta = i32::MAX / 2;

    for action in actions {
        let Some(child) = child_board(game, board, action) else {
            continue;
        };
        *nodes += 1;

        let score = -negamax(game, &child, depth.saturating_sub(1), 1, -beta, -alpha, nodes);

        // strict comparison keeps the lowest index among equal scores
        if score > best_score {
            best_score = score;
            best = action;
        }
        if best_score > alpha {
            alpha = best_score;
        }
    }

    SearchOutcome {
        best_action: Some((best, best_score)),
    }
}

/// Canonical board of the opponent after the side to move plays `action`.
fn child_board<G: Game>(game: &G, board: &G::Board, action: Action) -> Option<G::Board> {
    let (next, mover) = game.next_state(board, Player::First, action).ok()?;
    Some(game.canonical_form(&next, mover))
}

/// Score of a finished position for the side to move, or None if running.
fn terminal_score(value: f32, ply: i32) -> Option<i32> {
    if value == 0.0 {
        None
    } else if value >= 1.0 {
        Some(WIN_SCORE - ply)
    } else if value <= -1.0 {
        Some(-(WIN_SCORE - ply))
    } else {
        // draws and partial outcomes, scaled well below any win
        Some((value * 1000.0) as i32)
    }
}

/// Recursive negamax search with alpha-beta pruning.
fn negamax<G: Game>(
    game: &G,
    board: &G::Board,
    depth: u8,
    ply: i32,
    mut alpha: i32,
    beta: i32,
    nodes: &mut u64,
) -> i32 {
    if let Some(score) = terminal_score(game.game_ended(board, Player::First), ply) {
        return score;
    }

    if depth == 0 {
        return 0;
    }

    let mut best = i32::MIN + 1;

    for action in legal_actions(&game.legal_moves(board)) {
        let Some(child) = child_board(game, board, action) else {
            continue;
        };
        *nodes += 1;

        let score = -negamax(game, &child, depth - 1, ply + 1, -beta, -alpha, nodes);

        if score > best {
            best = score;
        }
        if best > alpha {
            alpha = best;
        }
        if alpha >= beta {
            break; // Beta cutoff
        }
    }

    if best == i32::MIN + 1 {
        // running game without legal actions; treat as neutral
        return 0;
    }
    best
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
