//! Tournament CLI
//!
//! Pit two policies against each other on tic-tac-toe and report the score.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use arena_core::{CancelToken, EarlyMoveWindow, Game, TicTacToe};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info};

use tournament::{
    run_tournament_parallel, Arena, ConsoleRenderer, LogProgress, PitConfig,
    PolicySpec, ProgressEvent, ProgressObserver, TournamentReport, TournamentStats,
};

#[derive(Parser, Debug)]
#[command(name = "pit", about = "Run a balanced tournament between two policies")]
struct Cli {
    /// TOML config file; flags below override its fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Policy A: first-legal, random[:seed], minimax[:depth], mcts[:sims] or human
    #[arg(short = 'a', long)]
    player_a: Option<PolicySpec>,

    /// Policy B, same syntax as policy A
    #[arg(short = 'b', long)]
    player_b: Option<PolicySpec>,

    /// Games to play; an odd count plays one less
    #[arg(short = 'n', long)]
    games: Option<u32>,

    /// Tic-tac-toe board side length
    #[arg(long)]
    board_size: Option<usize>,

    /// Seed for random openings
    #[arg(long)]
    seed: Option<u64>,

    /// Print every board
    #[arg(short, long)]
    verbose: bool,

    /// Replace early moves with random legal ones
    #[arg(long)]
    random_opening: bool,

    /// Plies eligible for random openings, e.g. 1,2
    #[arg(long, value_delimiter = ',')]
    early_move_window: Option<Vec<u32>>,

    /// Spread episodes over all cores
    #[arg(long)]
    parallel: bool,

    /// Write the JSON report here
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long, default_value = "info")]
    log_level: String,

    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,
}

impl Cli {
    fn into_config(self) -> Result<(PitConfig, String, bool)> {
        let mut config = match &self.config {
            Some(path) => PitConfig::load(path)?,
            None => PitConfig::default(),
        };

        if let Some(spec) = self.player_a {
            config.player_a = spec;
        }
        if let Some(spec) = self.player_b {
            config.player_b = spec;
        }
        if let Some(games) = self.games {
            config.games = games;
        }
        if let Some(size) = self.board_size {
            config.board_size = size;
        }
        if self.seed.is_some() {
            config.arena.seed = self.seed;
        }
        if let Some(plies) = self.early_move_window {
            config.arena.early_move_window = Some(EarlyMoveWindow::from(plies));
        }
        if self.output.is_some() {
            config.output = self.output;
        }
        config.arena.verbose |= self.verbose;
        config.arena.evaluation_random_opening |= self.random_opening;
        config.parallel |= self.parallel;

        Ok((config, self.log_level, self.no_progress))
    }
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Progress bar on stderr, one tick per episode.
struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    fn new() -> Result<Self> {
        let bar = ProgressBar::hidden();
        bar.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes (A-B-D: {msg}) eta {eta}")
                .context("invalid progress bar template")?
                .progress_chars("=>-"),
        );
        Ok(Self { bar })
    }
}

impl ProgressObserver for BarProgress {
    fn on_start(&mut self, total: u32) {
        self.bar.set_length(total as u64);
        self.bar.set_draw_target(indicatif::ProgressDrawTarget::stderr());
    }

    fn on_episode(&mut self, event: &ProgressEvent) {
        self.bar.set_position(event.episode as u64);
        self.bar.set_message(event.stats.to_string());
    }

    fn on_finish(&mut self, stats: &TournamentStats) {
        self.bar.finish_with_message(stats.to_string());
    }
}

fn main() -> Result<()> {
    let (mut config, log_level, no_progress) = Cli::parse().into_config()?;
    init_tracing(&log_level);

    let interactive = config.player_a.is_interactive() || config.player_b.is_interactive();
    if config.parallel && interactive {
        bail!("human players cannot take part in a parallel tournament");
    }
    if config.board_size == 0 {
        bail!("board size must be at least 1");
    }

    // fix the seed up front so the report can replay the run
    let seed = *config.arena.seed.get_or_insert_with(rand::random);
    let game = TicTacToe::new(config.board_size);
    info!(
        game = game.name(),
        player_a = %config.player_a,
        player_b = %config.player_b,
        games = config.games,
        seed,
        parallel = config.parallel,
        "pit starting"
    );

    let started = Instant::now();
    let (names, result) = if config.parallel {
        let (spec_a, spec_b) = (&config.player_a, &config.player_b);
        let names = (
            spec_a.build().name().to_string(),
            spec_b.build().name().to_string(),
        );
        let result = run_tournament_parallel(
            &game,
            || spec_a.build(),
            || spec_b.build(),
            config.games,
            &config.arena,
            None,
        );
        (names, result)
    } else {
        // a human whose input closes stops the whole run
        let cancel = CancelToken::new();
        let mut a = config.player_a.build_with_cancel(&cancel);
        let mut b = config.player_b.build_with_cancel(&cancel);
        let names = (a.name().to_string(), b.name().to_string());

        let mut renderer = ConsoleRenderer::stdout();
        let mut observer: Option<Box<dyn ProgressObserver>> = if no_progress {
            None
        } else if config.arena.verbose || interactive {
            Some(Box::new(LogProgress))
        } else {
            Some(Box::new(BarProgress::new()?))
        };

        let mut arena = Arena::new(&mut *a, &mut *b, &game, config.arena.clone())
            .with_cancel(cancel.clone());
        if config.arena.verbose {
            arena = arena.with_renderer(&mut renderer);
        }
        if let Some(observer) = observer.as_mut() {
            arena = arena.with_observer(&mut **observer);
        }
        (names, arena.play_games(config.games))
    };

    let stats = match result {
        Ok(stats) => stats,
        Err(err) => {
            error!(error = %err, "tournament aborted");
            return Err(err.into());
        }
    };

    let report = TournamentReport::new(
        game.name(),
        &names.0,
        &names.1,
        config.games,
        config.arena.clone(),
        stats,
        started.elapsed().as_secs_f64(),
    );
    report.print_report();

    if let Some(path) = &config.output {
        report.save(path)?;
        info!(path = %path.display(), "report saved");
    }

    Ok(())
}
