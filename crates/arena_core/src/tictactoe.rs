//! Tic-tac-toe on an n×n board.
//!
//! A complete line of n own pieces (row, column or diagonal) wins; a full
//! board without one is a draw. Used as the reference rules engine for the
//! arena and its tests.

use std::fmt;

use crate::game::{EarlyMoveWindow, Game, RulesError};
use crate::types::{Action, Player, DRAW_VALUE};

/// Board cells hold `+1` for the first mover, `-1` for the second, `0` if empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TicTacToeBoard {
    n: usize,
    cells: Vec<i8>,
}

impl TicTacToeBoard {
    pub fn empty(n: usize) -> Self {
        Self {
            n,
            cells: vec![0; n * n],
        }
    }

    /// Build a board from rows, e.g. `["x.o", "...", "..."]`.
    /// `x` is the first mover, `o` the second, anything else is empty.
    /// Missing cells at the end of a row are empty.
    pub fn from_rows(rows: &[&str]) -> Self {
        let n = rows.len();
        let mut cells = Vec::with_capacity(n * n);
        for row in rows {
            let start = cells.len();
            for ch in row.chars().take(n) {
                cells.push(match ch {
                    'x' | 'X' => 1,
                    'o' | 'O' => -1,
                    _ => 0,
                });
            }
            // short rows are padded with empty cells
            cells.resize(start + n, 0);
        }
        Self { n, cells }
    }

    pub fn size(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn cell(&self, action: Action) -> i8 {
        self.cells[action]
    }

    pub fn cells(&self) -> &[i8] {
        &self.cells
    }

    pub fn pieces(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&c| c != 0)
    }

    /// Whether `stone` owns a complete row, column or diagonal.
    pub fn has_line(&self, stone: i8) -> bool {
        let n = self.n;
        if n == 0 {
            return false;
        }
        let at = |row: usize, col: usize| self.cells[row * n + col];

        let row_win = (0..n).any(|r| (0..n).all(|c| at(r, c) == stone));
        let col_win = (0..n).any(|c| (0..n).all(|r| at(r, c) == stone));
        let diag = (0..n).all(|i| at(i, i) == stone);
        let anti = (0..n).all(|i| at(i, n - 1 - i) == stone);

        row_win || col_win || diag || anti
    }

    fn flipped(&self) -> Self {
        Self {
            n: self.n,
            cells: self.cells.iter().map(|&c| -c).collect(),
        }
    }
}

impl fmt::Display for TicTacToeBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for col in 0..self.n {
            write!(f, "{col} ")?;
        }
        writeln!(f)?;
        writeln!(f, "  {}", "-".repeat(self.n * 2 + 1))?;
        for row in 0..self.n {
            write!(f, "{row} |")?;
            for col in 0..self.n {
                let ch = match self.cells[row * self.n + col] {
                    1 => 'X',
                    -1 => 'O',
                    _ => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f, "|")?;
        }
        write!(f, "  {}", "-".repeat(self.n * 2 + 1))
    }
}

/// Tic-tac-toe rules engine.
#[derive(Debug, Clone)]
pub struct TicTacToe {
    n: usize,
    name: String,
    window: EarlyMoveWindow,
}

impl TicTacToe {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            name: format!("tictactoe-{n}x{n}"),
            window: EarlyMoveWindow::first_ply(),
        }
    }

    /// Override the plies eligible for random-opening injection.
    pub fn with_early_move_window(mut self, window: EarlyMoveWindow) -> Self {
        self.window = window;
        self
    }

    pub fn size(&self) -> usize {
        self.n
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new(3)
    }
}

impl Game for TicTacToe {
    type Board = TicTacToeBoard;

    fn name(&self) -> &str {
        &self.name
    }

    fn initial_board(&self) -> TicTacToeBoard {
        TicTacToeBoard::empty(self.n)
    }

    fn canonical_form(&self, board: &TicTacToeBoard, player: Player) -> TicTacToeBoard {
        match player {
            Player::First => board.clone(),
            Player::Second => board.flipped(),
        }
    }

    fn legal_moves(&self, board: &TicTacToeBoard) -> Vec<bool> {
        board.cells.iter().map(|&c| c == 0).collect()
    }

    fn next_state(
        &self,
        board: &TicTacToeBoard,
        player: Player,
        action: Action,
    ) -> Result<(TicTacToeBoard, Player), RulesError> {
        let size = self.action_size();
        if action >= size {
            return Err(RulesError::ActionOutOfRange { action, size });
        }
        if board.cells[action] != 0 {
            return Err(RulesError::IllegalAction { action });
        }
        let mut next = board.clone();
        next.cells[action] = player.sign();
        Ok((next, player.other()))
    }

    fn game_ended(&self, board: &TicTacToeBoard, player: Player) -> f32 {
        let me = player.sign();
        if board.has_line(me) {
            1.0
        } else if board.has_line(-me) {
            -1.0
        } else if board.is_full() {
            DRAW_VALUE
        } else {
            0.0
        }
    }

    fn action_size(&self) -> usize {
        self.n * self.n
    }

    fn early_move_window(&self) -> EarlyMoveWindow {
        self.window.clone()
    }
}

#[cfg(test)]
#[path = "tictactoe_tests.rs"]
mod tictactoe_tests;
