use color_eyre::eyre::WrapErr;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Settings shared by the analyses. Every field may be left out of the file,
/// and every field can be overridden on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// How many scrambles to collect statistics over.
    pub trials: usize,
    /// How many random moves make up each scramble.
    pub scramble_moves: usize,
    /// Seed for the scrambles. A random seed is used if absent.
    pub seed: Option<u64>,
    /// How many of the most common values to print per distribution.
    pub top: usize,
    /// The most states a single subgroup enumeration may visit.
    pub max_orbit_states: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            trials: 10_000,
            scramble_moves: 20,
            seed: None,
            top: 10,
            max_orbit_states: 5_000_000,
        }
    }
}

impl AnalysisConfig {
    /// Read the configuration from a TOML file.
    pub fn load(path: &Path) -> color_eyre::Result<AnalysisConfig> {
        let text = fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read the configuration file {path:?}"))?;
        toml::from_str(&text)
            .wrap_err_with(|| format!("Failed to parse the configuration file {path:?}"))
    }

    /// The configuration from `path`, or the defaults if there is none.
    pub fn load_or_default(path: Option<&Path>) -> color_eyre::Result<AnalysisConfig> {
        path.map_or_else(|| Ok(AnalysisConfig::default()), AnalysisConfig::load)
    }
}
