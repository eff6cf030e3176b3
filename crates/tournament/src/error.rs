//! Error types for episodes, tournaments and result files

use std::path::PathBuf;

use arena_core::{Action, Player, RulesError};
use thiserror::Error;

use crate::stats::Phase;

/// Fatal failure while playing one episode.
///
/// Every variant carries the ply (1-based) so the failure can be replayed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EpisodeError {
    #[error("policy '{policy}' chose illegal action {action} for player {mover} on ply {ply}")]
    IllegalAction {
        ply: u32,
        mover: Player,
        action: Action,
        policy: String,
    },

    #[error("no legal actions for player {mover} on ply {ply} but the game is not over")]
    NoLegalActions { ply: u32, mover: Player },

    #[error("legality mask on ply {ply} has {len} entries but the action space has {action_size}")]
    MalformedMask {
        ply: u32,
        len: usize,
        action_size: usize,
    },

    #[error("rules engine handed the move to {next} after player {mover} moved on ply {ply}")]
    TurnOrder { ply: u32, mover: Player, next: Player },

    #[error("rules engine rejected action for player {mover} on ply {ply}: {source}")]
    Rules {
        ply: u32,
        mover: Player,
        #[source]
        source: RulesError,
    },

    #[error("terminal value {value} after ply {ply} is not a valid outcome")]
    MalformedOutcome { ply: u32, value: f32 },

    #[error("episode cancelled before ply {ply}")]
    Cancelled { ply: u32 },
}

/// Fatal failure that aborts a whole tournament.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArenaError {
    #[error("episode {episode} ({phase}: {first_mover} vs {second_mover}) failed: {source}")]
    Episode {
        /// 1-based index over the whole tournament
        episode: u32,
        phase: Phase,
        first_mover: String,
        second_mover: String,
        #[source]
        source: EpisodeError,
    },
}

impl ArenaError {
    /// The underlying episode failure.
    pub fn episode_error(&self) -> &EpisodeError {
        match self {
            ArenaError::Episode { source, .. } => source,
        }
    }
}

/// Errors reading or writing configuration and result files.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to {operation} {}: {source}", path.display())]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid policy spec '{spec}': {reason}")]
    PolicySpec { spec: String, reason: String },
}
