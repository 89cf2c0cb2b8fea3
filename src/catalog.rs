//! Startup scan that builds the immutable list of note candidates.

use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("cannot read notes directory {}: {source}", path.display())]
    Root {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),
    #[error("failed to scan notes directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Collect every file under `root` whose name ends in `.{extension}`, as
/// paths relative to `root` joined with `/`. A file named just `.{extension}`
/// counts too.
///
/// Files of a directory are listed before the contents of its
/// subdirectories, and each level is sorted by name, so the order is stable
/// across runs.
pub fn scan(root: &Path, extension: &str) -> Result<Vec<String>, ScanError> {
    let meta = std::fs::metadata(root).map_err(|source| ScanError::Root {
        path: root.to_path_buf(),
        source,
    })?;
    if !meta.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    let suffix = format!(".{extension}");
    let mut notes = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(false)
        .sort_by(files_first_then_name)
    {
        let entry = entry?;
        // Follows symlinks, so linked note files are picked up too
        if !entry.path().is_file() {
            continue;
        }
        if !has_suffix(&entry, &suffix) {
            continue;
        }
        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        notes.push(candidate_name(relative));
    }

    tracing::info!(root = %root.display(), count = notes.len(), "scanned notes");
    Ok(notes)
}

fn files_first_then_name(a: &DirEntry, b: &DirEntry) -> std::cmp::Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

fn has_suffix(entry: &DirEntry, suffix: &str) -> bool {
    entry
        .file_name()
        .as_encoded_bytes()
        .ends_with(suffix.as_bytes())
}

fn candidate_name(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
