//! Parallel tournaments over independent episodes
//!
//! Episodes share nothing but the rules engine: each one builds its own
//! policies from the factories, its own board and its own RNG stream, and
//! the results are folded in episode order afterwards.

use arena_core::{CancelToken, Game, Outcome, Policy};
use rayon::prelude::*;
use tracing::info;

use crate::arena::{episode_rng, games_per_phase, ArenaOptions};
use crate::episode::EpisodeRunner;
use crate::error::ArenaError;
use crate::stats::{Phase, TournamentStats};

/// Boxed policy as produced by a factory.
pub type BoxedPolicy<G> = Box<dyn Policy<G>>;

/// Phase of a 0-based episode index.
fn phase_of(episode: u32, per_phase: u32) -> Phase {
    if episode < per_phase {
        Phase::AFirst
    } else {
        Phase::BFirst
    }
}

/// Run a balanced tournament with episodes spread over the rayon pool.
///
/// `make_a` and `make_b` are called once per episode, so every episode
/// starts from freshly built policies. Statistics are folded phase by phase
/// in episode order; the failure with the lowest episode index is returned.
/// With deterministic policies the result equals the sequential
/// [`run_tournament`](crate::run_tournament) with the same seed.
pub fn run_tournament_parallel<G, FA, FB>(
    game: &G,
    make_a: FA,
    make_b: FB,
    num_games: u32,
    options: &ArenaOptions,
    cancel: Option<CancelToken>,
) -> Result<TournamentStats, ArenaError>
where
    G: Game + Sync,
    FA: Fn() -> BoxedPolicy<G> + Sync,
    FB: Fn() -> BoxedPolicy<G> + Sync,
{
    let per_phase = games_per_phase(num_games);
    let total = per_phase * 2;
    let seed = options.resolve_seed();

    let mut runner = EpisodeRunner::new(game, options);
    if let Some(token) = cancel {
        runner = runner.with_cancel(token);
    }

    info!(
        game = game.name(),
        episodes = total,
        threads = rayon::current_num_threads(),
        seed,
        "starting parallel tournament"
    );

    let outcomes: Vec<Result<Outcome, ArenaError>> = (0..total)
        .into_par_iter()
        .map(|episode| {
            let phase = phase_of(episode, per_phase);
            let mut a = make_a();
            let mut b = make_b();
            let (first, second) = match phase {
                Phase::AFirst => (&mut a, &mut b),
                Phase::BFirst => (&mut b, &mut a),
            };

            let mut rng = episode_rng(seed, episode);
            runner
                .play(&mut **first, &mut **second, None, &mut rng)
                .map(|summary| summary.outcome)
                .map_err(|source| ArenaError::Episode {
                    episode: episode + 1,
                    phase,
                    first_mover: first.name().to_string(),
                    second_mover: second.name().to_string(),
                    source,
                })
        })
        .collect();

    let mut stats = TournamentStats::new();
    for (episode, outcome) in (0..total).zip(outcomes) {
        stats.record(phase_of(episode, per_phase), outcome?);
    }

    info!(
        wins_a = stats.wins_a,
        wins_b = stats.wins_b,
        draws = stats.draws,
        "parallel tournament finished"
    );

    Ok(stats)
}

#[cfg(test)]
#[path = "parallel_tests.rs"]
mod parallel_tests;
