use super::*;
use crate::error::EpisodeError;
use crate::progress::RecordingProgress;
use arena_core::{Action, Outcome, Player, RulesError, TicTacToe, TicTacToeBoard};
use mcts_engine::{MctsConfig, MctsPolicy};
use minimax_engine::MinimaxPolicy;
use scripted_engine::{FirstLegalPolicy, RandomPolicy};

/// Fixed-length game that the first mover always wins. The board counts
/// plies, so a policy asked at board 0 is moving first.
struct Race {
    length: u32,
}

impl Game for Race {
    type Board = u32;

    fn name(&self) -> &str {
        "race"
    }

    fn initial_board(&self) -> u32 {
        0
    }

    fn canonical_form(&self, board: &u32, _player: Player) -> u32 {
        *board
    }

    fn legal_moves(&self, _board: &u32) -> Vec<bool> {
        vec![true]
    }

    fn next_state(
        &self,
        board: &u32,
        player: Player,
        action: Action,
    ) -> Result<(u32, Player), RulesError> {
        if action != 0 {
            return Err(RulesError::ActionOutOfRange { action, size: 1 });
        }
        Ok((board + 1, player.other()))
    }

    fn game_ended(&self, board: &u32, player: Player) -> f32 {
        if *board < self.length {
            0.0
        } else {
            player.sign() as f32
        }
    }

    fn action_size(&self) -> usize {
        1
    }
}

/// Counts the episodes in which it moved first.
#[derive(Default)]
struct SeatCounter {
    moved_first: u32,
    resets: u32,
}

impl Policy<Race> for SeatCounter {
    fn select_action(&mut self, _game: &Race, board: &u32) -> Action {
        if *board == 0 {
            self.moved_first += 1;
        }
        0
    }

    fn name(&self) -> &str {
        "SeatCounter"
    }

    fn reset_search_memory(&mut self) {
        self.resets += 1;
    }
}

/// Plays legally until its `fail_on`-th episode, then answers garbage.
struct Flaky {
    episodes: u32,
    fail_on: u32,
}

impl Policy<Race> for Flaky {
    fn select_action(&mut self, _game: &Race, _board: &u32) -> Action {
        if self.episodes == self.fail_on {
            99
        } else {
            0
        }
    }

    fn name(&self) -> &str {
        "Flaky"
    }

    fn reset_search_memory(&mut self) {
        self.episodes += 1;
    }
}

#[test]
fn test_games_per_phase_drops_odd_game() {
    assert_eq!(games_per_phase(0), 0);
    assert_eq!(games_per_phase(1), 0);
    assert_eq!(games_per_phase(10), 5);
    assert_eq!(games_per_phase(11), 5);
}

#[test]
fn test_counts_sum_to_played_episodes() {
    let game = Race { length: 3 };
    for requested in [0, 1, 2, 7, 10] {
        let stats = run_tournament(
            &mut SeatCounter::default(),
            &mut SeatCounter::default(),
            &game,
            requested,
            ArenaOptions::default(),
        )
        .unwrap();
        assert_eq!(stats.total_games(), 2 * (requested / 2));
    }
}

#[test]
fn test_each_policy_moves_first_half_the_time() {
    let game = Race { length: 3 };
    let mut a = SeatCounter::default();
    let mut b = SeatCounter::default();
    let stats = run_tournament(&mut a, &mut b, &game, 7, ArenaOptions::default()).unwrap();

    assert_eq!(a.moved_first, 3);
    assert_eq!(b.moved_first, 3);
    assert_eq!(a.resets, 6);
    assert_eq!(b.resets, 6);
    // the first mover always wins this game
    assert_eq!(stats.as_tuple(), (3, 3, 0));
}

#[test]
fn test_first_legal_mirror_tournament() {
    let game = TicTacToe::new(3);
    let stats = run_tournament(
        &mut FirstLegalPolicy::new(),
        &mut FirstLegalPolicy::new(),
        &game,
        4,
        ArenaOptions::default(),
    )
    .unwrap();
    assert_eq!(stats.as_tuple(), (2, 2, 0));
}

#[test]
fn test_minimax_never_loses_to_random() {
    let game = TicTacToe::new(3);
    let stats = run_tournament(
        &mut MinimaxPolicy::default(),
        &mut RandomPolicy::with_seed(42),
        &game,
        10,
        ArenaOptions::default(),
    )
    .unwrap();
    assert_eq!(stats.wins_b, 0);
    assert_eq!(stats.total_games(), 10);
}

/// Every board of a verbose first-legal mirror match, split per episode.
fn recorded_boards(options: ArenaOptions, num_games: u32) -> Vec<Vec<TicTacToeBoard>> {
    let game = TicTacToe::new(3);
    let mut boards = Vec::new();
    {
        let mut record = |board: &TicTacToeBoard| -> anyhow::Result<()> {
            boards.push(board.clone());
            Ok(())
        };
        Arena::new(
            &mut FirstLegalPolicy::new(),
            &mut FirstLegalPolicy::new(),
            &game,
            ArenaOptions {
                verbose: true,
                ..options
            },
        )
        .with_renderer(&mut record)
        .play_games(num_games)
        .unwrap();
    }

    let mut episodes: Vec<Vec<TicTacToeBoard>> = Vec::new();
    for board in boards {
        if board.pieces() == 0 {
            episodes.push(Vec::new());
        }
        if let Some(episode) = episodes.last_mut() {
            episode.push(board);
        }
    }
    episodes
}

/// Cell taken on ply 1 of every episode.
fn openings(episodes: &[Vec<TicTacToeBoard>]) -> Vec<usize> {
    episodes
        .iter()
        .map(|boards| {
            boards[1]
                .cells()
                .iter()
                .position(|&cell| cell != 0)
                .unwrap()
        })
        .collect()
}

#[test]
fn test_same_seed_same_boards() {
    let first = recorded_boards(ArenaOptions::evaluation(4), 10);
    let second = recorded_boards(ArenaOptions::evaluation(4), 10);
    assert_eq!(first.len(), 10);
    assert_eq!(first, second);
}

#[test]
fn test_seed_changes_openings() {
    // default window: only ply 1 is replaced
    let one = recorded_boards(ArenaOptions::evaluation(1), 10);
    let two = recorded_boards(ArenaOptions::evaluation(2), 10);
    assert_eq!(one.len(), 10);
    assert_eq!(two.len(), 10);

    let (open_one, open_two) = (openings(&one), openings(&two));
    assert_ne!(open_one, open_two);
    // without the override the first mover always opens on cell 0
    assert!(open_one.iter().chain(&open_two).any(|&cell| cell != 0));
}

#[test]
fn test_openings_vary_only_on_overridden_ply() {
    let game = TicTacToe::new(3);
    for seed in 0..10 {
        // first-legal never plays an illegal move once the override is done
        run_tournament(
            &mut FirstLegalPolicy::new(),
            &mut FirstLegalPolicy::new(),
            &game,
            10,
            ArenaOptions::evaluation(seed),
        )
        .unwrap();
    }

    // no override: every opening is the policy's own choice
    let quiet = recorded_boards(ArenaOptions::default(), 4);
    assert_eq!(openings(&quiet), vec![0, 0, 0, 0]);
}

#[test]
fn test_wider_window_replays_with_same_seed() {
    let options = ArenaOptions {
        early_move_window: Some(EarlyMoveWindow::plies(1..=3)),
        ..ArenaOptions::evaluation(17)
    };
    assert_eq!(
        recorded_boards(options.clone(), 20),
        recorded_boards(options, 20)
    );
}

#[test]
fn test_episode_error_aborts_tournament() {
    let game = Race { length: 3 };
    let mut flaky = Flaky {
        episodes: 0,
        fail_on: 5,
    };
    let mut other = SeatCounter::default();
    let mut progress = RecordingProgress::default();

    let err = Arena::new(&mut flaky, &mut other, &game, ArenaOptions::default())
        .with_observer(&mut progress)
        .play_games(8)
        .unwrap_err();

    let ArenaError::Episode {
        episode,
        phase,
        ref first_mover,
        ref second_mover,
        ..
    } = err;
    assert_eq!(episode, 5);
    assert_eq!(phase, Phase::BFirst);
    assert_eq!(first_mover, "SeatCounter");
    assert_eq!(second_mover, "Flaky");
    assert!(matches!(
        err.episode_error(),
        EpisodeError::IllegalAction {
            ply: 2,
            action: 99,
            ..
        }
    ));

    // nothing is reported for the failed episode or after it
    assert_eq!(progress.events.len(), 4);
    assert_eq!(progress.finished_with, None);
}

#[test]
fn test_observer_sees_every_episode() {
    let game = Race { length: 2 };
    let mut progress = RecordingProgress::default();
    let stats = Arena::new(
        &mut SeatCounter::default(),
        &mut SeatCounter::default(),
        &game,
        ArenaOptions::default(),
    )
    .with_observer(&mut progress)
    .play_games(4)
    .unwrap();

    assert_eq!(progress.started_with, Some(4));
    assert_eq!(progress.finished_with, Some(stats));

    let episodes: Vec<u32> = progress.events.iter().map(|e| e.episode).collect();
    assert_eq!(episodes, vec![1, 2, 3, 4]);
    let phases: Vec<Phase> = progress.events.iter().map(|e| e.phase).collect();
    assert_eq!(
        phases,
        vec![Phase::AFirst, Phase::AFirst, Phase::BFirst, Phase::BFirst]
    );

    let last = progress.events.last().unwrap();
    assert_eq!(last.total, 4);
    assert_eq!(last.stats, stats);
    assert_eq!(last.eta(), Duration::ZERO);
    assert!(progress.events.iter().all(|e| e.plies == 2));
}

#[test]
fn test_observer_does_not_change_results() {
    let game = TicTacToe::new(3);
    let options = ArenaOptions::evaluation(3);
    let quiet = run_tournament(
        &mut FirstLegalPolicy::new(),
        &mut FirstLegalPolicy::new(),
        &game,
        12,
        options.clone(),
    )
    .unwrap();

    let mut progress = RecordingProgress::default();
    let observed = Arena::new(
        &mut FirstLegalPolicy::new(),
        &mut FirstLegalPolicy::new(),
        &game,
        options,
    )
    .with_observer(&mut progress)
    .play_games(12)
    .unwrap();

    assert_eq!(quiet, observed);
}

#[test]
fn test_search_memory_does_not_leak_between_episodes() {
    // a seeded tree search replays the same game every episode of a phase
    let game = TicTacToe::new(3);
    let mut mcts = MctsPolicy::<TicTacToe>::new(MctsConfig::for_testing());
    let mut progress = RecordingProgress::default();
    Arena::new(
        &mut mcts,
        &mut FirstLegalPolicy::new(),
        &game,
        ArenaOptions::default(),
    )
    .with_observer(&mut progress)
    .play_games(6)
    .unwrap();

    let trace: Vec<(Outcome, u32)> = progress
        .events
        .iter()
        .map(|e| (e.outcome, e.plies))
        .collect();
    assert_eq!(trace[0], trace[1]);
    assert_eq!(trace[1], trace[2]);
    assert_eq!(trace[3], trace[4]);
    assert_eq!(trace[4], trace[5]);
}

#[test]
fn test_cancelled_tournament() {
    let game = Race { length: 3 };
    let token = CancelToken::new();
    token.cancel();
    let err = Arena::new(
        &mut SeatCounter::default(),
        &mut SeatCounter::default(),
        &game,
        ArenaOptions::default(),
    )
    .with_cancel(token)
    .play_games(4)
    .unwrap_err();
    assert_eq!(err.episode_error(), &EpisodeError::Cancelled { ply: 1 });
}

#[test]
fn test_renderer_used_across_episodes() {
    let game = Race { length: 2 };
    let mut boards = Vec::new();
    {
        let mut record = |board: &u32| -> anyhow::Result<()> {
            boards.push(*board);
            Ok(())
        };
        Arena::new(
            &mut SeatCounter::default(),
            &mut SeatCounter::default(),
            &game,
            ArenaOptions {
                verbose: true,
                ..Default::default()
            },
        )
        .with_renderer(&mut record)
        .play_games(2)
        .unwrap();
    }
    assert_eq!(boards, vec![0, 1, 2, 0, 1, 2]);
}

#[test]
fn test_episode_rng_streams_differ() {
    let mut a = episode_rng(1, 0);
    let mut b = episode_rng(1, 1);
    let mut a2 = episode_rng(1, 0);
    let x: u64 = a.gen();
    assert_ne!(x, b.gen::<u64>());
    assert_eq!(x, a2.gen::<u64>());
}

#[test]
fn test_mean_time() {
    assert_eq!(mean_time(Duration::from_secs(10), 0), Duration::ZERO);
    assert_eq!(mean_time(Duration::from_secs(10), 4), Duration::from_millis(2500));
}
