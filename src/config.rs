use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{MlErr, Result, arch::Mlp};

/// The hyperparameters of the network itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// `[input, hidden1, hidden2, classes]`
    pub sizes: [usize; 4],
    pub beta: f32,
    pub momentum: f32,
    /// Seeds the weight initialization, the thread's generator is used when absent.
    pub seed: Option<u64>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            sizes: [2, 3, 3, 2],
            beta: Mlp::DEFAULT_BETA,
            momentum: Mlp::DEFAULT_MOMENTUM,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub eta: f32,
    pub iterations: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            eta: 0.25,
            iterations: 1000,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub model: ModelConfig,
    pub training: TrainingConfig,
}

impl Config {
    /// Parses a JSON configuration, any missing field takes its default value.
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Reads and parses the JSON configuration at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|e| MlErr::Config(format!("{}: {e}", path.display())))?;

        Self::from_json_str(&raw)
    }
}
