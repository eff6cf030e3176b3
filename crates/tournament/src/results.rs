//! Tournament results storage and reporting

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::arena::{games_per_phase, ArenaOptions};
use crate::error::ReportError;
use crate::stats::TournamentStats;

/// Complete record of one tournament
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentReport {
    /// Rules engine the tournament was played on
    pub game: String,
    pub player_a: String,
    pub player_b: String,
    /// Games asked for; an odd count plays one game less
    pub games_requested: u32,
    pub games_played: u32,
    /// Options used
    pub options: ArenaOptions,
    pub stats: TournamentStats,
    pub elapsed_secs: f64,
}

impl TournamentReport {
    pub fn new(
        game: &str,
        player_a: &str,
        player_b: &str,
        games_requested: u32,
        options: ArenaOptions,
        stats: TournamentStats,
        elapsed_secs: f64,
    ) -> Self {
        Self {
            game: game.to_string(),
            player_a: player_a.to_string(),
            player_b: player_b.to_string(),
            games_requested,
            games_played: games_per_phase(games_requested) * 2,
            options,
            stats,
            elapsed_secs,
        }
    }

    /// Save results to JSON file
    pub fn save(&self, path: &Path) -> Result<(), ReportError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| ReportError::Io {
            operation: "write",
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load results from JSON file
    pub fn load(path: &Path) -> Result<Self, ReportError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ReportError::Io {
            operation: "read",
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Generate a text report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str(&format!("=== Tournament: {} ===\n\n", self.game));
        report.push_str(&format!(
            "Games: {} played ({} requested), random opening: {}\n\n",
            self.games_played,
            self.games_requested,
            if self.options.evaluation_random_opening {
                "on"
            } else {
                "off"
            }
        ));

        report.push_str(&format!(
            "{:<20} vs {:<20} {:>5}-{:<5}-{:<5}\n",
            "Player A", "Player B", "W", "L", "D"
        ));
        report.push_str(&"-".repeat(60));
        report.push('\n');
        report.push_str(&format!(
            "{:<20} vs {:<20} {:>5}-{:<5}-{:<5}\n",
            self.player_a, self.player_b, self.stats.wins_a, self.stats.wins_b, self.stats.draws
        ));
        report.push_str(&format!(
            "\nScore A: {:.1}%  Time: {:.2}s\n",
            self.stats.score_a() * 100.0,
            self.elapsed_secs
        ));

        report
    }

    /// Print report to stdout
    pub fn print_report(&self) {
        println!("{}", self.generate_report());
    }
}

#[cfg(test)]
#[path = "results_tests.rs"]
mod results_tests;
