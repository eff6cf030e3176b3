//! Progress reporting side channel
//!
//! Observers are told about every finished episode. They cannot influence
//! the tournament; a tournament without an observer behaves identically.

use std::time::Duration;

use arena_core::Outcome;
use tracing::info;

use crate::stats::{Phase, TournamentStats};

/// Snapshot sent after every finished episode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressEvent {
    /// 1-based episode number within the tournament
    pub episode: u32,
    /// Episodes the tournament will play in total
    pub total: u32,
    pub phase: Phase,
    pub outcome: Outcome,
    pub plies: u32,
    /// Wall time since the tournament started
    pub elapsed: Duration,
    pub mean_episode_time: Duration,
    /// Running totals including this episode
    pub stats: TournamentStats,
}

impl ProgressEvent {
    /// Estimated time left at the current mean episode time.
    pub fn eta(&self) -> Duration {
        self.mean_episode_time * self.total.saturating_sub(self.episode)
    }
}

/// Receives tournament progress.
pub trait ProgressObserver {
    fn on_start(&mut self, _total: u32) {}

    fn on_episode(&mut self, event: &ProgressEvent);

    fn on_finish(&mut self, _stats: &TournamentStats) {}
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_episode(&mut self, _event: &ProgressEvent) {}
}

/// Logs one line per episode through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl ProgressObserver for LogProgress {
    fn on_episode(&mut self, event: &ProgressEvent) {
        info!(
            episode = event.episode,
            total = event.total,
            phase = %event.phase,
            result = %event.outcome,
            plies = event.plies,
            mean_episode_ms = event.mean_episode_time.as_millis() as u64,
            eta_s = event.eta().as_secs(),
            score = %event.stats,
            "episode finished"
        );
    }
}

/// Keeps every event; handy for inspecting a run after the fact.
#[derive(Debug, Clone, Default)]
pub struct RecordingProgress {
    pub started_with: Option<u32>,
    pub events: Vec<ProgressEvent>,
    pub finished_with: Option<TournamentStats>,
}

impl ProgressObserver for RecordingProgress {
    fn on_start(&mut self, total: u32) {
        self.started_with = Some(total);
    }

    fn on_episode(&mut self, event: &ProgressEvent) {
        self.events.push(*event);
    }

    fn on_finish(&mut self, stats: &TournamentStats) {
        self.finished_with = Some(*stats);
    }
}

#[cfg(test)]
#[path = "progress_tests.rs"]
mod progress_tests;
