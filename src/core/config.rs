use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use super::policy::FilterPolicy;

pub const REPO_CONFIG_FILE: &str = ".srcmerge.toml";
pub const DEFAULT_OUTPUT: &str = "all_code.txt";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_output")]
    pub output: PathBuf,

    #[serde(default)]
    pub policy: FilterPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            output: default_output(),
            policy: FilterPolicy::default(),
        }
    }
}

impl Config {
    /// Where the report goes when walking `root`. A relative `output` is
    /// taken relative to `root`, not to the working directory.
    pub fn output_in(&self, root: &Path) -> PathBuf {
        if self.output.is_absolute() || root == Path::new(".") || root.as_os_str().is_empty() {
            self.output.clone()
        } else {
            root.join(&self.output)
        }
    }
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

/// Loads the first config found: `explicit`, then `<root>/.srcmerge.toml`,
/// then the global config file. Falls back to built-in defaults.
///
/// Never writes anything to disk.
pub fn load_config(explicit: Option<&Path>, root: &Path) -> anyhow::Result<Config> {
    if let Some(path) = explicit {
        return read_config(path);
    }

    let mut candidates = vec![root.join(REPO_CONFIG_FILE)];
    if let Ok(global) = get_config_path() {
        candidates.push(global);
    }

    match candidates.iter().find(|path| path.is_file()) {
        Some(path) => read_config(path),
        None => {
            tracing::debug!("no config file found, using defaults");
            Ok(Config::default())
        }
    }
}

pub fn read_config(path: &Path) -> anyhow::Result<Config> {
    let config_str = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config: Config = toml::from_str(&config_str)
        .with_context(|| format!("invalid config file {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

pub fn save_repo_config(path: &Path, config: &Config) -> anyhow::Result<()> {
    let config_str = toml::to_string_pretty(config)?;
    fs::write(path, config_str)
        .with_context(|| format!("failed to write config file {}", path.display()))?;
    Ok(())
}

pub fn get_config_path() -> anyhow::Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
        .join("srcmerge");
    Ok(config_dir.join("config.toml"))
}
