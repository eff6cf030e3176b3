//! Episode runner: plays one game between two policies

use arena_core::{
    is_legal, legal_actions, CancelToken, EarlyMoveWindow, Game, Outcome, Player, Policy,
};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, error, warn};

use crate::arena::ArenaOptions;
use crate::error::EpisodeError;

/// Display hook invoked with every board of a verbose episode.
///
/// Failures are logged and ignored; rendering never changes the game.
pub trait Renderer<B> {
    fn render(&mut self, board: &B) -> anyhow::Result<()>;
}

impl<B, F> Renderer<B> for F
where
    F: FnMut(&B) -> anyhow::Result<()>,
{
    fn render(&mut self, board: &B) -> anyhow::Result<()> {
        self(board)
    }
}

/// Result of a finished episode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeSummary {
    /// Outcome seen from the first mover
    pub outcome: Outcome,
    /// Number of actions applied
    pub plies: u32,
}

/// Plays single episodes of one game under fixed options.
pub struct EpisodeRunner<'a, G: Game> {
    game: &'a G,
    verbose: bool,
    /// Plies whose action is replaced by a random legal one (empty = never)
    override_window: EarlyMoveWindow,
    cancel: Option<CancelToken>,
}

impl<'a, G: Game> EpisodeRunner<'a, G> {
    pub fn new(game: &'a G, options: &ArenaOptions) -> Self {
        let override_window = if options.evaluation_random_opening {
            options
                .early_move_window
                .clone()
                .unwrap_or_else(|| game.early_move_window())
        } else {
            EarlyMoveWindow::none()
        };
        Self {
            game,
            verbose: options.verbose,
            override_window,
            cancel: None,
        }
    }

    /// Check `token` around every policy decision and abort once it is cancelled.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn override_window(&self) -> &EarlyMoveWindow {
        &self.override_window
    }

    /// Play one episode to the end.
    ///
    /// Both policies' search memory is reset before the first move. `rng`
    /// only feeds the random-opening override.
    pub fn play<R: Rng + ?Sized>(
        &self,
        first: &mut dyn Policy<G>,
        second: &mut dyn Policy<G>,
        mut renderer: Option<&mut (dyn Renderer<G::Board> + '_)>,
        rng: &mut R,
    ) -> Result<EpisodeSummary, EpisodeError> {
        let game = self.game;
        let mut board = game.initial_board();
        let mut mover = Player::First;
        let mut ply: u32 = 0;

        first.reset_search_memory();
        second.reset_search_memory();

        if self.verbose {
            render(&mut renderer, &board);
        }

        while game.game_ended(&board, mover) == 0.0 {
            ply += 1;

            if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
                return Err(EpisodeError::Cancelled { ply });
            }

            let canonical = game.canonical_form(&board, mover);
            let mask = game.legal_moves(&canonical);
            let action_size = game.action_size();
            if mask.len() != action_size {
                error!(ply, %mover, len = mask.len(), action_size, "legality mask has the wrong length");
                return Err(EpisodeError::MalformedMask {
                    ply,
                    len: mask.len(),
                    action_size,
                });
            }
            let legal = legal_actions(&mask);
            if legal.is_empty() {
                error!(ply, %mover, game = game.name(), "no legal actions in a running game");
                return Err(EpisodeError::NoLegalActions { ply, mover });
            }

            let policy: &mut dyn Policy<G> = match mover {
                Player::First => &mut *first,
                Player::Second => &mut *second,
            };
            let chosen = policy.select_action(game, &canonical);
            // a policy may cancel while choosing; its answer is not played
            if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
                return Err(EpisodeError::Cancelled { ply });
            }

            let action = if self.override_window.contains(ply) {
                // legal is non-empty, checked above
                let random = legal.choose(rng).copied().unwrap_or(chosen);
                debug!(ply, %mover, chosen, random, "random opening override");
                random
            } else if is_legal(&mask, chosen) {
                chosen
            } else {
                error!(ply, %mover, action = chosen, policy = policy.name(), "illegal action");
                return Err(EpisodeError::IllegalAction {
                    ply,
                    mover,
                    action: chosen,
                    policy: policy.name().to_string(),
                });
            };

            let (next, next_mover) = game
                .next_state(&board, mover, action)
                .map_err(|source| EpisodeError::Rules { ply, mover, source })?;
            if next_mover != mover.other() {
                return Err(EpisodeError::TurnOrder {
                    ply,
                    mover,
                    next: next_mover,
                });
            }
            board = next;

            if self.verbose {
                debug!(ply, %mover, action, "turn");
                render(&mut renderer, &board);
            }
            mover = next_mover;
        }

        let value = game.game_ended(&board, Player::First);
        let outcome = Outcome::from_terminal_value(value)
            .ok_or(EpisodeError::MalformedOutcome { ply, value })?;

        if self.verbose {
            debug!(plies = ply, result = %outcome, "game over");
        }

        Ok(EpisodeSummary { outcome, plies: ply })
    }
}

fn render<B>(renderer: &mut Option<&mut (dyn Renderer<B> + '_)>, board: &B) {
    if let Some(renderer) = renderer.as_deref_mut() {
        if let Err(err) = renderer.render(board) {
            warn!(error = %err, "render failed, continuing");
        }
    }
}

/// Play a single episode with a fresh runner.
///
/// `seed` feeds the random-opening override; pass the same seed to replay.
pub fn run_episode<G: Game>(
    game: &G,
    first: &mut dyn Policy<G>,
    second: &mut dyn Policy<G>,
    options: &ArenaOptions,
    seed: u64,
) -> Result<Outcome, EpisodeError> {
    let mut rng = crate::arena::episode_rng(seed, 0);
    EpisodeRunner::new(game, options)
        .play(first, second, None, &mut rng)
        .map(|summary| summary.outcome)
}

#[cfg(test)]
#[path = "episode_tests.rs"]
mod episode_tests;
