pub mod config;
pub mod decode;
pub mod policy;
pub mod types;

pub use config::{get_config_path, load_config, save_repo_config, Config, REPO_CONFIG_FILE};
pub use decode::{decode, Decoded, TextEncoding};
pub use policy::{ExclusionPolicy, FilterPolicy, InclusionPolicy, PolicyMode};
pub use types::{FileEntry, RelativePath};
