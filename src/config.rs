use crate::error::{FilterError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default locations, relative to the working directory, used when no config
/// file or command-line override is given.
const DEFAULT_INPUT: &str = "data/courses_enriched.json";
const DEFAULT_OUTPUT: &str = "data/courses_final.json";

#[derive(Debug, Deserialize)]
pub struct Config {
    /// Enriched catalog dump to read.
    #[serde(default = "default_input")]
    pub input: PathBuf,
    /// Destination for the cleaned dataset.
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

fn default_input() -> PathBuf {
    PathBuf::from(DEFAULT_INPUT)
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: default_input(),
            output: default_output(),
        }
    }
}

impl Config {
    /// Loads the config file at `path`, or falls back to defaults when the
    /// file does not exist. A present-but-malformed file is a hard error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let config_content = fs::read_to_string(path).map_err(|e| {
            FilterError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }
}
