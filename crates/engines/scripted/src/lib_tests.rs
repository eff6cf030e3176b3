use super::*;
use arena_core::{TicTacToe, TicTacToeBoard};

#[test]
fn first_legal_picks_lowest_empty_cell() {
    let game = TicTacToe::new(3);
    let board = TicTacToeBoard::from_rows(&["xo.", "...", "..."]);
    let mut policy = FirstLegalPolicy::new();
    assert_eq!(policy.select_action(&game, &board), 2);
}

#[test]
fn random_policy_returns_legal_action() {
    let game = TicTacToe::new(3);
    let board = TicTacToeBoard::from_rows(&["xox", "o.x", "oxo"]);
    let mut policy = RandomPolicy::with_seed(7);
    for _ in 0..20 {
        assert_eq!(policy.select_action(&game, &board), 4);
    }
}

#[test]
fn random_policy_is_reproducible_with_seed() {
    let game = TicTacToe::new(3);
    let board = game.initial_board();
    let mut a = RandomPolicy::with_seed(42);
    let mut b = RandomPolicy::with_seed(42);
    let picks_a: Vec<_> = (0..16).map(|_| a.select_action(&game, &board)).collect();
    let picks_b: Vec<_> = (0..16).map(|_| b.select_action(&game, &board)).collect();
    assert_eq!(picks_a, picks_b);
}

#[test]
fn random_policy_covers_several_actions() {
    let game = TicTacToe::new(3);
    let board = game.initial_board();
    let mut policy = RandomPolicy::with_seed(3);
    let mut seen = [false; 9];
    for _ in 0..200 {
        seen[policy.select_action(&game, &board)] = true;
    }
    assert!(seen.iter().filter(|&&s| s).count() > 1);
}
