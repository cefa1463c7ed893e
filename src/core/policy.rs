use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::types::RelativePath;

pub const DEFAULT_EXTENSION: &str = ".cs";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyMode {
    Include,
    Exclude,
}

/// Decides which directories are entered and which files are exported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum FilterPolicy {
    Include(InclusionPolicy),
    Exclude(ExclusionPolicy),
}

/// Allowlist of directory prefixes and file names.
///
/// With `extension` set, files must carry that suffix and only directories
/// under an include prefix (or the root) are considered at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InclusionPolicy {
    #[serde(default)]
    pub include_dirs: BTreeSet<String>,

    #[serde(default)]
    pub include_files: BTreeSet<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
}

/// Blocklist of directory names pruned at every depth, plus file names
/// that are never exported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionPolicy {
    #[serde(default)]
    pub exclude_dirs: BTreeSet<String>,

    #[serde(default)]
    pub exclude_files: BTreeSet<String>,

    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

fn string_set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for InclusionPolicy {
    fn default() -> Self {
        InclusionPolicy {
            include_dirs: string_set(&[
                "Models",
                "Services",
                "ViewModels",
                "Views",
                "Platforms/Android",
            ]),
            include_files: string_set(&[
                "Program.cs",
                "App.xml",
                "App.xml.cs",
                "AppShell.xaml",
                "AppShell.xaml.cs",
                "MainPage.xaml",
                "MainPage.xaml.cs",
                "MauiProgram.cs",
            ]),
            extension: None,
        }
    }
}

impl Default for ExclusionPolicy {
    fn default() -> Self {
        ExclusionPolicy {
            exclude_dirs: string_set(&["bin", "obj", ".git", ".vs", ".vscode", "node_modules"]),
            exclude_files: BTreeSet::new(),
            extension: default_extension(),
        }
    }
}

impl Default for FilterPolicy {
    fn default() -> Self {
        FilterPolicy::Include(InclusionPolicy::default())
    }
}

impl FilterPolicy {
    pub fn defaults_for(mode: PolicyMode) -> Self {
        match mode {
            PolicyMode::Include => FilterPolicy::Include(InclusionPolicy::default()),
            PolicyMode::Exclude => FilterPolicy::Exclude(ExclusionPolicy::default()),
        }
    }

    pub fn mode(&self) -> PolicyMode {
        match self {
            FilterPolicy::Include(_) => PolicyMode::Include,
            FilterPolicy::Exclude(_) => PolicyMode::Exclude,
        }
    }

    /// Whether the walk may enter `dir`. A `false` here prunes the whole
    /// subtree; nothing below it is ever listed.
    pub fn should_descend(&self, dir: &RelativePath) -> bool {
        if dir.is_root() {
            return true;
        }
        match self {
            FilterPolicy::Include(policy) => policy.should_descend(dir),
            FilterPolicy::Exclude(policy) => !policy.exclude_dirs.contains(dir.file_name()),
        }
    }

    /// Whether `file` is exported. Assumes its ancestors passed
    /// [`FilterPolicy::should_descend`].
    pub fn should_include(&self, file: &RelativePath) -> bool {
        match self {
            FilterPolicy::Include(policy) => policy.should_include(file),
            FilterPolicy::Exclude(policy) => policy.should_include(file),
        }
    }
}

impl InclusionPolicy {
    fn matches_dir_prefix(&self, path: &str) -> bool {
        self.include_dirs
            .iter()
            .any(|dir| path.starts_with(dir.as_str()))
    }

    fn leads_to_include_dir(&self, dir: &str) -> bool {
        self.include_dirs.iter().any(|include| {
            include
                .strip_prefix(dir)
                .is_some_and(|rest| rest.starts_with('/'))
        })
    }

    fn should_descend(&self, dir: &RelativePath) -> bool {
        // Bare file-name matches can appear anywhere unless restricted.
        if self.extension.is_none() {
            return true;
        }
        self.matches_dir_prefix(dir.as_str()) || self.leads_to_include_dir(dir.as_str())
    }

    fn should_include(&self, file: &RelativePath) -> bool {
        if let Some(ref extension) = self.extension {
            if !file.file_name().ends_with(extension.as_str()) {
                return false;
            }
            let parent = file.parent();
            if !parent.is_root() && !self.matches_dir_prefix(parent.as_str()) {
                return false;
            }
        }

        self.matches_dir_prefix(file.as_str())
            || self.include_files.contains(file.as_str())
            || self.include_files.contains(file.file_name())
    }
}

impl ExclusionPolicy {
    fn should_include(&self, file: &RelativePath) -> bool {
        let name = file.file_name();
        name.ends_with(self.extension.as_str()) && !self.exclude_files.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(s: &str) -> RelativePath {
        RelativePath::from(s)
    }

    fn inclusion(dirs: &[&str], files: &[&str], extension: Option<&str>) -> FilterPolicy {
        FilterPolicy::Include(InclusionPolicy {
            include_dirs: string_set(dirs),
            include_files: string_set(files),
            extension: extension.map(str::to_string),
        })
    }

    fn exclusion(dirs: &[&str], files: &[&str], extension: &str) -> FilterPolicy {
        FilterPolicy::Exclude(ExclusionPolicy {
            exclude_dirs: string_set(dirs),
            exclude_files: string_set(files),
            extension: extension.to_string(),
        })
    }

    #[test]
    fn test_inclusion_matches_prefix_path_or_bare_name() {
        let policy = inclusion(&["Models", "Platforms/Android"], &["Program.cs", "Data/Db.cs"], None);

        let cases = vec![
            ("Models/User.cs", true),
            ("Models/Nested/Deep.txt", true),
            ("Platforms/Android/MainActivity.cs", true),
            ("Platforms/iOS/AppDelegate.cs", false),
            ("Program.cs", true),
            ("Sub/Program.cs", true),
            ("Data/Db.cs", true),
            ("Other/Data/Db.cs", false),
            ("Notes.txt", false),
        ];

        for (path, expected) in cases {
            assert_eq!(policy.should_include(&rel(path)), expected, "Failed for path: {path}");
        }
    }

    #[test]
    fn test_inclusion_prefix_is_plain_string_prefix() {
        let policy = inclusion(&["Models"], &[], None);
        assert!(policy.should_include(&rel("ModelsLegacy/Old.cs")));
    }

    #[test]
    fn test_general_inclusion_descends_everywhere() {
        let policy = inclusion(&["Models"], &["Program.cs"], None);
        assert!(policy.should_descend(&rel("bin")));
        assert!(policy.should_descend(&rel("Sub/Deeper")));
    }

    #[test]
    fn test_restricted_inclusion_requires_extension_and_directory() {
        let policy = inclusion(&["Models", "Platforms/Android"], &["Program.cs", "App.xaml"], Some(".cs"));

        let cases = vec![
            ("Models/User.cs", true),
            ("Models/User.txt", false),
            ("Program.cs", true),
            ("App.xaml", false),
            ("Sub/Program.cs", false),
            ("Platforms/Android/MainActivity.cs", true),
        ];

        for (path, expected) in cases {
            assert_eq!(policy.should_include(&rel(path)), expected, "Failed for path: {path}");
        }
    }

    #[test]
    fn test_restricted_inclusion_prunes_unrelated_directories() {
        let policy = inclusion(&["Models", "Platforms/Android"], &[], Some(".cs"));

        assert!(policy.should_descend(&rel("Models")));
        assert!(policy.should_descend(&rel("Models/Nested")));
        assert!(policy.should_descend(&rel("Platforms")));
        assert!(policy.should_descend(&rel("Platforms/Android")));
        assert!(!policy.should_descend(&rel("Platforms/iOS")));
        assert!(!policy.should_descend(&rel("Plat")));
        assert!(!policy.should_descend(&rel("bin")));
    }

    #[test]
    fn test_exclusion_prunes_by_bare_name_at_any_depth() {
        let policy = exclusion(&["bin", "obj"], &[], ".cs");

        assert!(!policy.should_descend(&rel("bin")));
        assert!(!policy.should_descend(&rel("src/App/bin")));
        assert!(!policy.should_descend(&rel("obj")));
        assert!(policy.should_descend(&rel("binaries")));
        assert!(policy.should_descend(&rel("Models")));
        assert!(policy.should_descend(&RelativePath::default()));
    }

    #[test]
    fn test_exclusion_file_rules() {
        let policy = exclusion(&[], &["AssemblyInfo.cs"], ".cs");

        assert!(policy.should_include(&rel("Models/User.cs")));
        assert!(!policy.should_include(&rel("Properties/AssemblyInfo.cs")));
        assert!(!policy.should_include(&rel("Notes.txt")));
    }

    #[test]
    fn test_defaults_for_mode() {
        assert_eq!(FilterPolicy::defaults_for(PolicyMode::Include).mode(), PolicyMode::Include);
        match FilterPolicy::defaults_for(PolicyMode::Exclude) {
            FilterPolicy::Exclude(policy) => {
                assert!(policy.exclude_dirs.contains("bin"));
                assert_eq!(policy.extension, ".cs");
            }
            other => panic!("unexpected policy: {other:?}"),
        }
    }
}
