use super::*;
use arena_core::{TicTacToe, TicTacToeBoard};

fn policy() -> MctsPolicy<TicTacToe> {
    MctsPolicy::new(MctsConfig::for_testing())
}

#[test]
fn mcts_returns_legal_action() {
    let game = TicTacToe::new(3);
    let board = TicTacToeBoard::from_rows(&["xo.", "ox.", "..o"]);
    let mut mcts = policy();
    let action = mcts.select_action(&game, &board);
    assert!(game.legal_moves(&board)[action]);
}

#[test]
fn mcts_takes_immediate_win() {
    let game = TicTacToe::new(3);
    let board = TicTacToeBoard::from_rows(&["xx.", "oo.", "..."]);
    let mut mcts = MctsPolicy::new(MctsConfig {
        num_simulations: 300,
        ..MctsConfig::for_testing()
    });
    assert_eq!(mcts.select_action(&game, &board), 2);
}

#[test]
fn search_memory_persists_between_moves() {
    let game = TicTacToe::new(3);
    let mut mcts = policy();
    mcts.select_action(&game, &game.initial_board());
    let after_first = mcts.tree().len();
    assert!(after_first > 0);

    let board = TicTacToeBoard::from_rows(&["x..", ".o.", "..."]);
    mcts.select_action(&game, &board);
    assert!(mcts.tree().len() >= after_first);
}

#[test]
fn reset_matches_fresh_policy() {
    let game = TicTacToe::new(3);
    let mut used = policy();
    used.select_action(&game, &game.initial_board());
    assert!(!used.tree().is_empty());

    used.reset_search_memory();
    let fresh = policy();
    assert_eq!(used.tree(), fresh.tree());
    assert_eq!(used.tree().total_visits(), 0);
}

#[test]
fn seeded_policy_replays_after_reset() {
    let game = TicTacToe::new(3);
    let board = game.initial_board();
    let mut mcts = policy();

    let first = mcts.select_action(&game, &board);
    let first_probs = action_probs(mcts.tree(), &board, 9, 1.0);

    mcts.reset_search_memory();
    let second = mcts.select_action(&game, &board);
    let second_probs = action_probs(mcts.tree(), &board, 9, 1.0);

    assert_eq!(first, second);
    assert_eq!(first_probs, second_probs);
}

#[test]
fn terminal_root_falls_back_to_first_legal() {
    let game = TicTacToe::new(3);
    let board = TicTacToeBoard::from_rows(&["ooo", "xx.", "x.."]);
    let mut mcts = policy();
    assert_eq!(mcts.select_action(&game, &board), 5);
}
