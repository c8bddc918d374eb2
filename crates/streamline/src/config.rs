//! Layered configuration
//!
//! Later layers override earlier ones:
//! 1. built-in defaults
//! 2. user config (`<config dir>/streamline/streamline.toml`)
//! 3. project config (`./streamline.toml`)
//! 4. an explicit `--config` file
//! 5. environment variables (`STREAMLINE_MODE`, `STREAMLINE_OUTPUT`)
//!
//! Command line flags are applied on top by the binary.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use etcetera::BaseStrategy;
use log::debug;
use serde::Deserialize;

use crate::merge::{DEFAULT_HEADER, MergeMode};

pub const CONFIG_FILE_NAME: &str = "streamline.toml";
pub const DEFAULT_OUTPUT: &str = "streamline_assembly.dart";

const ENV_MODE: &str = "STREAMLINE_MODE";
const ENV_OUTPUT: &str = "STREAMLINE_OUTPUT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Merge gate policy
    pub mode: MergeMode,
    /// Provenance comment at the top of the merged file
    pub header: String,
    /// Where the merged file is written
    pub output: PathBuf,
    /// File extensions accepted by ingestion, without the dot
    pub extensions: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: MergeMode::default(),
            header: DEFAULT_HEADER.to_owned(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            extensions: vec!["dart".to_owned()],
        }
    }
}

/// One configuration layer as written on disk; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigLayer {
    mode: Option<MergeMode>,
    header: Option<String>,
    output: Option<PathBuf>,
    extensions: Option<Vec<String>>,
}

impl Config {
    /// Load configuration from every standard location plus `explicit`
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(user) = user_config_path().filter(|p| p.is_file()) {
            config.merge_file(&user)?;
        }

        let project = PathBuf::from(CONFIG_FILE_NAME);
        if project.is_file() {
            config.merge_file(&project)?;
        }

        if let Some(explicit) = explicit {
            config.merge_file(explicit)?;
        }

        config.apply_env()?;
        Ok(config)
    }

    /// Overlay the keys present in the TOML file at `path`
    pub fn merge_file(&mut self, path: &Path) -> Result<()> {
        debug!("Loading config layer from {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        self.merge_toml(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Overlay the keys present in `text`
    pub fn merge_toml(&mut self, text: &str) -> Result<()> {
        let layer: ConfigLayer = toml::from_str(text)?;
        if let Some(mode) = layer.mode {
            self.mode = mode;
        }
        if let Some(header) = layer.header {
            self.header = header;
        }
        if let Some(output) = layer.output {
            self.output = output;
        }
        if let Some(extensions) = layer.extensions {
            self.extensions = extensions
                .into_iter()
                .map(|ext| ext.trim_start_matches('.').to_owned())
                .collect();
        }
        Ok(())
    }

    /// Overlay `STREAMLINE_MODE` and `STREAMLINE_OUTPUT` when set
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(mode) = std::env::var(ENV_MODE) {
            self.mode = mode
                .parse()
                .with_context(|| format!("Invalid value in {ENV_MODE}"))?;
        }
        if let Ok(output) = std::env::var(ENV_OUTPUT) {
            self.output = PathBuf::from(output);
        }
        Ok(())
    }

    /// Whether ingestion accepts a file at `path`
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|allowed| allowed == ext))
    }
}

/// `<user config dir>/streamline/streamline.toml`, if a home directory exists
pub fn user_config_path() -> Option<PathBuf> {
    let strategy = etcetera::choose_base_strategy().ok()?;
    Some(strategy.config_dir().join("streamline").join(CONFIG_FILE_NAME))
}
