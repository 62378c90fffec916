//! Shell configuration loaded from TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShellError};

/// Session-level settings for a shell instance.
///
/// Every field has a default, so an empty TOML document is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Initial working directory. Must be absolute.
    pub home: String,
    /// Text appended to the directory name to form the prompt.
    pub prompt_suffix: String,
    /// Maximum number of history entries kept (0 = unlimited).
    pub history_limit: usize,
    /// Whether the embedding application seeds the demo file tree.
    pub seed_demo_files: bool,
    /// Command lines run before the first input event.
    pub startup: Vec<String>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            home: "/home".to_string(),
            prompt_suffix: " % ".to_string(),
            history_limit: 100,
            seed_demo_files: true,
            startup: Vec::new(),
        }
    }
}

impl ShellConfig {
    /// Parse a config from a TOML string.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ShellError::Config(format!("{}: {e}", path.display())))?;
        log::debug!("loaded shell config from {}", path.display());
        Self::from_toml_str(&text)
    }

    fn validate(&self) -> Result<()> {
        if !self.home.starts_with('/') {
            return Err(ShellError::Config(format!(
                "home must be an absolute path: {}",
                self.home
            )));
        }
        Ok(())
    }
}
