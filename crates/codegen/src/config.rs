use crate::error::{CodegenError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "memberwise.toml";

#[derive(Debug, Deserialize)]
pub struct Config {
    pub version: String,
    pub source: SourceConfig,
    #[serde(default)]
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Deserialize)]
pub struct SourceConfig {
    /// Files or directories scanned for `#[memberwise_init]` structs.
    pub paths: Vec<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Where `run` writes the expansion listing.
    pub path: PathBuf,
}

impl Config {
    /// Looks for `memberwise.toml` in `start_dir` and its ancestors. Returns
    /// the config and the directory it was found in; configured paths are
    /// relative to that directory.
    pub fn find_and_load(start_dir: &Path) -> Result<(Self, PathBuf)> {
        let mut current_dir = start_dir.to_path_buf();

        loop {
            let config_path = current_dir.join(CONFIG_FILE);
            if config_path.exists() {
                let config = Self::load(&config_path)?;
                config.validate(&current_dir)?;
                return Ok((config, current_dir));
            }

            if !current_dir.pop() {
                return Err(CodegenError::ConfigNotFound(start_dir.to_path_buf()));
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    fn load(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "loading config");
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn validate(&self, root: &Path) -> Result<()> {
        for path in &self.source.paths {
            if !root.join(path).exists() {
                return Err(CodegenError::InvalidPath(path.clone()));
            }
        }

        if let Some(output) = &self.output {
            if let Some(parent) = output.path.parent() {
                if !root.join(parent).exists() {
                    return Err(CodegenError::InvalidPath(parent.to_path_buf()));
                }
            }
        }

        Ok(())
    }
}
