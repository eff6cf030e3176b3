//! Interactive policy reading actions from a terminal

use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

use arena_core::{is_legal, legal_actions, Action, CancelToken, Game, Policy};
use tracing::warn;

enum Reply {
    Action(Action),
    Invalid(String),
    Closed,
}

/// Asks a human for every move.
///
/// The board shown is canonical: `X` is always the human's own piece.
///
/// Once input is gone the policy cancels its token instead of moving for
/// the human; hand the same token to the arena so the tournament stops.
pub struct HumanPolicy<R, W> {
    input: R,
    output: W,
    cancel: CancelToken,
}

impl HumanPolicy<BufReader<Stdin>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> HumanPolicy<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            cancel: CancelToken::new(),
        }
    }

    /// Cancel `token` when input closes.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    fn prompt(&mut self, legal: &[Action]) -> io::Result<Reply> {
        let listed: Vec<String> = legal.iter().map(|a| a.to_string()).collect();
        write!(self.output, "Legal actions: [{}]\nYour move: ", listed.join(" "))?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(Reply::Closed);
        }
        let line = line.trim();
        Ok(match line.parse() {
            Ok(action) => Reply::Action(action),
            Err(_) => Reply::Invalid(line.to_string()),
        })
    }
}

impl<G, R, W> Policy<G> for HumanPolicy<R, W>
where
    G: Game,
    G::Board: std::fmt::Display,
    R: BufRead + Send,
    W: Write + Send,
{
    fn select_action(&mut self, game: &G, board: &G::Board) -> Action {
        let mask = game.legal_moves(board);
        let legal = legal_actions(&mask);
        // ignoring write failures; the prompt below reports them
        let _ = writeln!(self.output, "{board}");

        loop {
            match self.prompt(&legal) {
                Ok(Reply::Action(action)) if is_legal(&mask, action) => return action,
                Ok(Reply::Action(action)) => {
                    let _ = writeln!(self.output, "Action {action} is not legal");
                }
                Ok(Reply::Invalid(text)) => {
                    let _ = writeln!(self.output, "'{text}' is not an action number");
                }
                Ok(Reply::Closed) => {
                    warn!("input closed, cancelling the tournament");
                    self.cancel.cancel();
                    return legal.first().copied().unwrap_or(0);
                }
                Err(err) => {
                    warn!(error = %err, "reading input failed, cancelling the tournament");
                    self.cancel.cancel();
                    return legal.first().copied().unwrap_or(0);
                }
            }
        }
    }

    fn name(&self) -> &str {
        "Human"
    }
}

#[cfg(test)]
#[path = "players_tests.rs"]
mod players_tests;
