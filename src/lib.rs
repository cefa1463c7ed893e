pub mod core;
pub mod exporter;
pub mod output;
pub mod walker;

pub use crate::core::{
    decode, get_config_path, load_config, save_repo_config, Config, Decoded, ExclusionPolicy,
    FileEntry, FilterPolicy, InclusionPolicy, PolicyMode, RelativePath, TextEncoding,
    REPO_CONFIG_FILE,
};
pub use exporter::{export, read_entry, ExportSummary, Exporter};
pub use output::ReportWriter;
pub use walker::{walk, walk_with, Candidate};
