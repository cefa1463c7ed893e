use std::fmt;
use std::path::{Component, Path};

/// A path relative to the traversal root, always joined with `/`.
///
/// The root itself is the empty path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct RelativePath(String);

impl RelativePath {
    /// Builds a relative path from `path`, which must live under `root`.
    pub fn from_root(root: &Path, path: &Path) -> Option<Self> {
        let stripped = path.strip_prefix(root).ok()?;
        let parts: Vec<String> = stripped
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        Some(RelativePath(parts.join("/")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Last component, or the empty string for the root.
    pub fn file_name(&self) -> &str {
        match self.0.rsplit_once('/') {
            Some((_, name)) => name,
            None => &self.0,
        }
    }

    pub fn parent(&self) -> RelativePath {
        match self.0.rsplit_once('/') {
            Some((parent, _)) => RelativePath(parent.to_string()),
            None => RelativePath::default(),
        }
    }
}

impl From<&str> for RelativePath {
    fn from(s: &str) -> Self {
        let normalized = s.replace('\\', "/");
        RelativePath(normalized.trim_matches('/').to_string())
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone)]
pub struct FileEntry {
    pub path: RelativePath,
    pub content: String,
}
