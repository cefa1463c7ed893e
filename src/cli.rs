use std::path::PathBuf;

use anyhow::bail;
use clap::{Parser, ValueEnum};

use srcmerge::{Config, FilterPolicy, PolicyMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CliPolicyMode {
    Include,
    Exclude,
}

impl From<CliPolicyMode> for PolicyMode {
    fn from(mode: CliPolicyMode) -> Self {
        match mode {
            CliPolicyMode::Include => PolicyMode::Include,
            CliPolicyMode::Exclude => PolicyMode::Exclude,
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "srcmerge",
    about = "Flatten a project's source files into a single text file",
    version
)]
pub struct Cli {
    /// Directory to walk. Its .srcmerge.toml is loaded, and a relative
    /// output path (from the config or -o) is written inside it
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Report file to write, relative to --root (default: all_code.txt)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file to load instead of the repo or global one
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the global config file path and exit
    #[arg(long)]
    pub config_path: bool,

    /// Save the resolved settings to <root>/.srcmerge.toml
    #[arg(long)]
    pub save_config: bool,

    /// Filtering mode
    #[arg(short, long, value_enum)]
    pub mode: Option<CliPolicyMode>,

    /// Directory prefixes to export (include mode)
    #[arg(long, value_delimiter = ',')]
    pub include_dir: Option<Vec<String>>,

    /// File names or relative paths to export (include mode)
    #[arg(long, value_delimiter = ',')]
    pub include_file: Option<Vec<String>>,

    /// Directory names to prune at any depth (exclude mode)
    #[arg(long, value_delimiter = ',')]
    pub exclude_dir: Option<Vec<String>>,

    /// File names never exported (exclude mode)
    #[arg(long, value_delimiter = ',')]
    pub exclude_file: Option<Vec<String>>,

    /// Required file suffix, e.g. ".cs". An empty value lifts the
    /// restriction in include mode.
    #[arg(long)]
    pub ext: Option<String>,

    /// Log each exported file and pruned directory
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Layers the command-line overrides on top of a loaded config.
    pub fn apply(&self, mut config: Config) -> anyhow::Result<Config> {
        if let Some(ref output) = self.output {
            config.output = output.clone();
        }

        if let Some(mode) = self.mode {
            let mode = PolicyMode::from(mode);
            if config.policy.mode() != mode {
                config.policy = FilterPolicy::defaults_for(mode);
            }
        }

        match &mut config.policy {
            FilterPolicy::Include(policy) => {
                if self.exclude_dir.is_some() || self.exclude_file.is_some() {
                    bail!("--exclude-dir and --exclude-file require --mode exclude");
                }
                if let Some(ref dirs) = self.include_dir {
                    policy.include_dirs = dirs.iter().cloned().collect();
                }
                if let Some(ref files) = self.include_file {
                    policy.include_files = files.iter().cloned().collect();
                }
                if let Some(ref ext) = self.ext {
                    policy.extension = (!ext.is_empty()).then(|| ext.clone());
                }
            }
            FilterPolicy::Exclude(policy) => {
                if self.include_dir.is_some() || self.include_file.is_some() {
                    bail!("--include-dir and --include-file require --mode include");
                }
                if let Some(ref dirs) = self.exclude_dir {
                    policy.exclude_dirs = dirs.iter().cloned().collect();
                }
                if let Some(ref files) = self.exclude_file {
                    policy.exclude_files = files.iter().cloned().collect();
                }
                if let Some(ref ext) = self.ext {
                    policy.extension = ext.clone();
                }
            }
        }

        Ok(config)
    }
}
