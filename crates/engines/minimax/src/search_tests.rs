use super::*;
use arena_core::{TicTacToe, TicTacToeBoard};

#[test]
fn test_pick_best_action_empty_board() {
    let game = TicTacToe::new(3);
    let mut nodes = 0;
    let result = pick_best_action(&game, &game.initial_board(), 9, &mut nodes);
    let (_, score) = result.best_action.unwrap();
    // perfect play from the empty board is a draw
    assert_eq!(score, 0);
    assert!(nodes > 0);
}

#[test]
fn test_pick_best_action_takes_immediate_win() {
    let game = TicTacToe::new(3);
    let board = TicTacToeBoard::from_rows(&["xx.", "oo.", "..."]);
    let mut nodes = 0;
    let (action, score) = pick_best_action(&game, &board, 9, &mut nodes)
        .best_action
        .unwrap();
    assert_eq!(action, 2);
    assert_eq!(score, WIN_SCORE - 1);
}

#[test]
fn test_pick_best_action_blocks_threat() {
    let game = TicTacToe::new(3);
    let board = TicTacToeBoard::from_rows(&["oo.", "x..", "..."]);
    let mut nodes = 0;
    let (action, _) = pick_best_action(&game, &board, 9, &mut nodes)
        .best_action
        .unwrap();
    assert_eq!(action, 2);
}

#[test]
fn test_pick_best_action_full_board() {
    let game = TicTacToe::new(3);
    let board = TicTacToeBoard::from_rows(&["xox", "xoo", "oxx"]);
    let mut nodes = 0;
    assert!(pick_best_action(&game, &board, 4, &mut nodes).best_action.is_none());
}
