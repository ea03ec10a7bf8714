use std::path::Path;

use anyhow::{Context, Result};
use knnapi::DatasetSource;
use serde::Deserialize;

/// Service configuration, read from an optional TOML file.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Address the HTTP server binds to.
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Reference dataset, a file path or an http(s) URL.
    #[serde(default = "default_dataset")]
    pub dataset: DatasetSource,

    /// Value of `Access-Control-Allow-Origin`.
    #[serde(default = "default_allow_origin")]
    pub allow_origin: String,
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}
fn default_dataset() -> DatasetSource {
    DatasetSource::from("data/sample.csv")
}
fn default_allow_origin() -> String {
    "*".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind: default_bind(),
            dataset: default_dataset(),
            allow_origin: default_allow_origin(),
        }
    }
}

impl Config {
    /// Reads the config file at `path`, or returns the defaults when no path
    /// was given.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let Some(path) = path else {
            return Ok(Config::default());
        };

        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&toml_str).context("failed to parse TOML config")?;

        Ok(config)
    }

    /// Replaces the dataset source when one was given on the command line.
    pub fn override_dataset(&mut self, dataset: Option<String>) {
        if let Some(dataset) = dataset {
            self.dataset = DatasetSource::from(dataset);
        }
    }
}
