use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use walkdir::{DirEntry, WalkDir};

use crate::core::{FilterPolicy, RelativePath};

/// A file that passed the policy and is ready to be read.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub path: PathBuf,
    pub relative: RelativePath,
}

/// Walks `root` top-down, yielding every file `policy` accepts.
///
/// Within a directory, files come before subdirectories and both are
/// sorted by name, so the order is stable between runs. Directories
/// rejected by [`FilterPolicy::should_descend`] are never read. `skip`
/// is a canonical path that is never yielded (the report being written).
pub fn walk<'a>(
    root: &'a Path,
    policy: &'a FilterPolicy,
    skip: Option<&'a Path>,
) -> impl Iterator<Item = Result<Candidate>> + 'a {
    walk_with(
        root,
        move |dir| policy.should_descend(dir),
        move |file| policy.should_include(file),
        skip,
    )
}

/// Same traversal as [`walk`], driven by two predicates: `descend` is asked
/// once per directory below the root before it is read, and `include` once
/// per regular file in the directories that were entered.
pub fn walk_with<'a, D, I>(
    root: &'a Path,
    mut descend: D,
    include: I,
    skip: Option<&'a Path>,
) -> impl Iterator<Item = Result<Candidate>> + 'a
where
    D: FnMut(&RelativePath) -> bool + 'a,
    I: Fn(&RelativePath) -> bool + 'a,
{
    WalkDir::new(root)
        .follow_links(false)
        .sort_by(files_first)
        .into_iter()
        .filter_entry(move |entry| should_enter(entry, root, &mut descend))
        .filter_map(move |entry| match entry {
            Ok(entry) => to_candidate(entry, root, &include, skip).map(Ok),
            Err(err) => {
                let location = err
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| root.display().to_string());
                Some(Err(
                    anyhow::Error::new(err).context(format!("failed to walk {location}"))
                ))
            }
        })
}

fn files_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

fn should_enter<D>(entry: &DirEntry, root: &Path, descend: &mut D) -> bool
where
    D: FnMut(&RelativePath) -> bool,
{
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return true;
    }

    let Some(relative) = RelativePath::from_root(root, entry.path()) else {
        return false;
    };

    let enter = descend(&relative);
    if !enter {
        tracing::debug!(dir = %relative, "pruned directory");
    }
    enter
}

fn is_regular_file(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && entry.path().is_file())
}

// Compares resolved paths, so links to the report are caught too.
fn is_skipped(entry: &DirEntry, skip: Option<&Path>) -> bool {
    let Some(skip) = skip else {
        return false;
    };
    fs::canonicalize(entry.path())
        .map(|path| path == skip)
        .unwrap_or(false)
}

fn to_candidate<I>(
    entry: DirEntry,
    root: &Path,
    include: &I,
    skip: Option<&Path>,
) -> Option<Candidate>
where
    I: Fn(&RelativePath) -> bool,
{
    if !is_regular_file(&entry) {
        return None;
    }

    let relative = RelativePath::from_root(root, entry.path())?;
    if !include(&relative) || is_skipped(&entry, skip) {
        return None;
    }

    Some(Candidate {
        path: entry.into_path(),
        relative,
    })
}
