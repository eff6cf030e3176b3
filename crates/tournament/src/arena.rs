//! Tournament controller: balanced batches of episodes between two policies

use std::time::{Duration, Instant};

use arena_core::{CancelToken, EarlyMoveWindow, Game, Policy};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::episode::{EpisodeRunner, Renderer};
use crate::error::ArenaError;
use crate::progress::{ProgressEvent, ProgressObserver};
use crate::stats::{Phase, TournamentStats};

/// Options for a tournament. Immutable once the tournament starts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaOptions {
    /// Render every board and log every turn
    pub verbose: bool,
    /// Replace the policy's action by a random legal one on early plies
    pub evaluation_random_opening: bool,
    /// Plies eligible for the override (None = the game's own window)
    pub early_move_window: Option<EarlyMoveWindow>,
    /// Seed for the override randomness (None = fresh entropy per run)
    pub seed: Option<u64>,
}

impl ArenaOptions {
    /// Options for comparing two otherwise deterministic policies.
    pub fn evaluation(seed: u64) -> Self {
        Self {
            evaluation_random_opening: true,
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// The seed actually used for a run.
    pub(crate) fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| rand::thread_rng().gen())
    }
}

/// RNG for episode `episode` (0-based) of a run seeded with `seed`.
///
/// Each episode gets its own ChaCha stream, so results do not depend on the
/// order episodes are scheduled in.
pub fn episode_rng(seed: u64, episode: u32) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(episode as u64);
    rng
}

/// Number of episodes played per phase for a requested game count.
///
/// Odd counts drop the last game so both policies move first equally often.
#[inline]
pub fn games_per_phase(num_games: u32) -> u32 {
    num_games / 2
}

/// Pits policy A against policy B.
///
/// Half the episodes are played with A moving first, then half with B moving
/// first. The arena is consumed by [`Arena::play_games`], which releases
/// every borrowed policy, game, renderer and observer when it returns.
pub struct Arena<'a, G: Game> {
    player_a: &'a mut dyn Policy<G>,
    player_b: &'a mut dyn Policy<G>,
    game: &'a G,
    options: ArenaOptions,
    renderer: Option<&'a mut dyn Renderer<G::Board>>,
    observer: Option<&'a mut dyn ProgressObserver>,
    cancel: Option<CancelToken>,
}

impl<'a, G: Game> Arena<'a, G> {
    pub fn new(
        player_a: &'a mut dyn Policy<G>,
        player_b: &'a mut dyn Policy<G>,
        game: &'a G,
        options: ArenaOptions,
    ) -> Self {
        Self {
            player_a,
            player_b,
            game,
            options,
            renderer: None,
            observer: None,
            cancel: None,
        }
    }

    /// Board display used when `options.verbose` is set.
    pub fn with_renderer(mut self, renderer: &'a mut dyn Renderer<G::Board>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn with_observer(mut self, observer: &'a mut dyn ProgressObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn options(&self) -> &ArenaOptions {
        &self.options
    }

    /// Play `num_games / 2` episodes with A first, then as many with B first.
    ///
    /// Returns the aggregate statistics, or the first fatal episode error;
    /// nothing from a failed episode is counted.
    pub fn play_games(self, num_games: u32) -> Result<TournamentStats, ArenaError> {
        let Arena {
            player_a,
            player_b,
            game,
            options,
            mut renderer,
            mut observer,
            cancel,
        } = self;

        let per_phase = games_per_phase(num_games);
        let total = per_phase * 2;
        let seed = options.resolve_seed();

        let mut runner = EpisodeRunner::new(game, &options);
        if let Some(token) = cancel {
            runner = runner.with_cancel(token);
        }

        info!(
            game = game.name(),
            player_a = player_a.name(),
            player_b = player_b.name(),
            requested = num_games,
            episodes = total,
            seed,
            "starting tournament"
        );
        if let Some(observer) = observer.as_deref_mut() {
            observer.on_start(total);
        }

        let mut stats = TournamentStats::new();
        let started = Instant::now();
        let mut episode: u32 = 0;

        for phase in Phase::ALL {
            info!(%phase, episodes = per_phase, "starting phase");

            for _ in 0..per_phase {
                let (first, second): (&mut dyn Policy<G>, &mut dyn Policy<G>) = match phase {
                    Phase::AFirst => (&mut *player_a, &mut *player_b),
                    Phase::BFirst => (&mut *player_b, &mut *player_a),
                };

                let mut rng = episode_rng(seed, episode);
                let summary = runner
                    .play(first, second, renderer.as_deref_mut(), &mut rng)
                    .map_err(|source| ArenaError::Episode {
                        episode: episode + 1,
                        phase,
                        first_mover: first.name().to_string(),
                        second_mover: second.name().to_string(),
                        source,
                    })?;

                stats.record(phase, summary.outcome);
                episode += 1;

                if let Some(observer) = observer.as_deref_mut() {
                    let elapsed = started.elapsed();
                    observer.on_episode(&ProgressEvent {
                        episode,
                        total,
                        phase,
                        outcome: summary.outcome,
                        plies: summary.plies,
                        elapsed,
                        mean_episode_time: mean_time(elapsed, episode),
                        stats,
                    });
                }
            }
        }

        info!(
            wins_a = stats.wins_a,
            wins_b = stats.wins_b,
            draws = stats.draws,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "tournament finished"
        );
        if let Some(observer) = observer.as_deref_mut() {
            observer.on_finish(&stats);
        }

        Ok(stats)
    }
}

pub(crate) fn mean_time(elapsed: Duration, episodes: u32) -> Duration {
    if episodes == 0 {
        Duration::ZERO
    } else {
        elapsed / episodes
    }
}

/// Run a tournament without renderer or progress observer.
///
/// Returns `(wins_a, wins_b, draws)` as [`TournamentStats`].
pub fn run_tournament<G: Game>(
    player_a: &mut dyn Policy<G>,
    player_b: &mut dyn Policy<G>,
    game: &G,
    num_games: u32,
    options: ArenaOptions,
) -> Result<TournamentStats, ArenaError> {
    Arena::new(player_a, player_b, game, options).play_games(num_games)
}

#[cfg(test)]
#[path = "arena_tests.rs"]
mod arena_tests;
