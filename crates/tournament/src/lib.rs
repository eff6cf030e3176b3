//! Tournament Runner for two-player game policies
//!
//! This crate provides infrastructure for:
//! - Playing single episodes between two policies ([`EpisodeRunner`])
//! - Balanced tournaments where each policy moves first equally often ([`Arena`])
//! - Running the episodes of a tournament in parallel ([`run_tournament_parallel`])
//! - Progress reporting and JSON result files
//!
//! # Usage
//!
//! ```bash
//! # Minimax against a seeded random policy, 100 games
//! cargo run -p tournament --bin pit -- --player-a minimax --player-b random:7 --games 100
//!
//! # Evaluation run with random first moves, from a config file
//! cargo run -p tournament --bin pit -- --config pit.toml --random-opening --seed 3
//! ```
//!
//! ```
//! use arena_core::TicTacToe;
//! use scripted_engine::FirstLegalPolicy;
//! use tournament::{run_tournament, ArenaOptions};
//!
//! let game = TicTacToe::new(3);
//! let stats = run_tournament(
//!     &mut FirstLegalPolicy::new(),
//!     &mut FirstLegalPolicy::new(),
//!     &game,
//!     4,
//!     ArenaOptions::default(),
//! )
//! .unwrap();
//! assert_eq!(stats.as_tuple(), (2, 2, 0));
//! ```

mod arena;
mod config;
mod episode;
mod error;
mod parallel;
mod players;
mod progress;
mod render;
mod results;
mod stats;

pub use arena::*;
pub use config::*;
pub use episode::*;
pub use error::*;
pub use parallel::*;
pub use players::*;
pub use progress::*;
pub use render::*;
pub use results::*;
pub use stats::*;
