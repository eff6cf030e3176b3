//! Configuration for the `pit` command
//!
//! Loaded from a TOML file; command-line flags override individual fields.
//!
//! ```toml
//! board_size = 3
//! games = 20
//! parallel = false
//!
//! [arena]
//! evaluation_random_opening = true
//! early_move_window = [1]
//! seed = 7
//!
//! [player_a]
//! kind = "mcts"
//! simulations = 400
//!
//! [player_b]
//! kind = "minimax"
//! depth = 9
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use arena_core::{CancelToken, Policy, TicTacToe};
use mcts_engine::{MctsConfig, MctsPolicy};
use minimax_engine::{MinimaxPolicy, DEFAULT_DEPTH};
use scripted_engine::{FirstLegalPolicy, RandomPolicy};
use serde::{Deserialize, Serialize};

use crate::arena::ArenaOptions;
use crate::error::ReportError;
use crate::players::HumanPolicy;

/// Which policy to field, with its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PolicySpec {
    FirstLegal,
    Random {
        #[serde(default)]
        seed: Option<u64>,
    },
    Minimax {
        #[serde(default = "default_depth")]
        depth: u8,
    },
    Mcts {
        #[serde(default = "default_simulations")]
        simulations: u32,
        #[serde(default = "default_c_puct")]
        c_puct: f32,
        #[serde(default)]
        temperature: f32,
        #[serde(default)]
        seed: Option<u64>,
    },
    Human,
}

fn default_depth() -> u8 {
    DEFAULT_DEPTH
}

fn default_simulations() -> u32 {
    MctsConfig::default().num_simulations
}

fn default_c_puct() -> f32 {
    MctsConfig::default().c_puct
}

impl PolicySpec {
    pub fn is_interactive(&self) -> bool {
        matches!(self, PolicySpec::Human)
    }

    /// Build a fresh policy for tic-tac-toe.
    pub fn build(&self) -> Box<dyn Policy<TicTacToe>> {
        self.build_with_cancel(&CancelToken::new())
    }

    /// Like [`PolicySpec::build`], but an interactive policy cancels `cancel`
    /// when its input closes.
    pub fn build_with_cancel(&self, cancel: &CancelToken) -> Box<dyn Policy<TicTacToe>> {
        match self {
            PolicySpec::FirstLegal => Box::new(FirstLegalPolicy::new()),
            PolicySpec::Random { seed } => Box::new(match seed {
                Some(seed) => RandomPolicy::with_seed(*seed),
                None => RandomPolicy::new(),
            }),
            PolicySpec::Minimax { depth } => Box::new(MinimaxPolicy::new(*depth)),
            PolicySpec::Mcts {
                simulations,
                c_puct,
                temperature,
                seed,
            } => Box::new(MctsPolicy::<TicTacToe>::new(MctsConfig {
                num_simulations: *simulations,
                c_puct: *c_puct,
                temperature: *temperature,
                seed: *seed,
            })),
            PolicySpec::Human => Box::new(HumanPolicy::stdio().with_cancel(cancel.clone())),
        }
    }
}

/// Parses `kind[:param]`, e.g. `random:7`, `minimax:4`, `mcts:400`.
impl FromStr for PolicySpec {
    type Err = ReportError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ReportError::PolicySpec {
            spec: spec.to_string(),
            reason: reason.to_string(),
        };
        let (kind, param) = match spec.split_once(':') {
            Some((kind, param)) => (kind, Some(param)),
            None => (spec, None),
        };

        match kind.to_lowercase().as_str() {
            "first-legal" | "first" => Ok(PolicySpec::FirstLegal),
            "random" => {
                let seed = param
                    .map(|p| p.parse().map_err(|_| invalid("seed must be an integer")))
                    .transpose()?;
                Ok(PolicySpec::Random { seed })
            }
            "minimax" => {
                let depth = param
                    .map(|p| p.parse().map_err(|_| invalid("depth must be 0-255")))
                    .transpose()?
                    .unwrap_or(DEFAULT_DEPTH);
                Ok(PolicySpec::Minimax { depth })
            }
            "mcts" => {
                let simulations = param
                    .map(|p| p.parse().map_err(|_| invalid("simulations must be an integer")))
                    .transpose()?
                    .unwrap_or_else(default_simulations);
                Ok(PolicySpec::Mcts {
                    simulations,
                    c_puct: default_c_puct(),
                    temperature: 0.0,
                    seed: None,
                })
            }
            "human" => Ok(PolicySpec::Human),
            _ => Err(invalid(
                "expected first-legal, random, minimax, mcts or human",
            )),
        }
    }
}

impl fmt::Display for PolicySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicySpec::FirstLegal => write!(f, "first-legal"),
            PolicySpec::Random { seed: Some(seed) } => write!(f, "random:{seed}"),
            PolicySpec::Random { seed: None } => write!(f, "random"),
            PolicySpec::Minimax { depth } => write!(f, "minimax:{depth}"),
            PolicySpec::Mcts { simulations, .. } => write!(f, "mcts:{simulations}"),
            PolicySpec::Human => write!(f, "human"),
        }
    }
}

/// Everything the `pit` command needs to run a tournament.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PitConfig {
    /// Tic-tac-toe board side length
    pub board_size: usize,
    pub games: u32,
    /// Spread episodes over all cores
    pub parallel: bool,
    /// Where to write the JSON report
    pub output: Option<PathBuf>,
    pub arena: ArenaOptions,
    pub player_a: PolicySpec,
    pub player_b: PolicySpec,
}

impl Default for PitConfig {
    fn default() -> Self {
        Self {
            board_size: 3,
            games: 10,
            parallel: false,
            output: None,
            arena: ArenaOptions::default(),
            player_a: PolicySpec::Minimax {
                depth: DEFAULT_DEPTH,
            },
            player_b: PolicySpec::Random { seed: None },
        }
    }
}

impl PitConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ReportError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ReportError> {
        let text = std::fs::read_to_string(path).map_err(|source| ReportError::Io {
            operation: "read",
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
