use crate::error::ScanError;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Classification of a filesystem entry met during traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkItem {
    Directory(PathBuf),
    Symlink(PathBuf),
    File(PathBuf),
    Other(PathBuf),
}

impl WalkItem {
    pub fn classify(entry: &DirEntry) -> Self {
        let path = entry.path().to_path_buf();
        let file_type = entry.file_type();

        if file_type.is_symlink() {
            WalkItem::Symlink(path)
        } else if file_type.is_dir() {
            WalkItem::Directory(path)
        } else if file_type.is_file() {
            WalkItem::File(path)
        } else {
            WalkItem::Other(path)
        }
    }
}

/// Counts for a single root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    pub files: usize,
    pub symlinks: usize,
    pub errors: usize,
}

/// A base name starting with `.` marks a hidden entry. `.` and `..` do not.
///
/// Only the first byte is inspected, so names that are not valid UTF-8 are
/// classified too.
pub fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|name| {
            let bytes = name.as_encoded_bytes();
            bytes.first() == Some(&b'.') && bytes != b"." && bytes != b".."
        })
        .unwrap_or(false)
}

/// Hidden directories are pruned at every depth, roots included.
fn is_pruned(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() && is_hidden(entry.path())
}

/// Walk `root` and call `on_file` for every regular file that survives pruning.
///
/// Hidden directories are never entered and symlinks are never followed,
/// including when `root` itself is a symlink. Errors on individual entries
/// are logged and the walk carries on with their siblings.
pub fn walk(root: &Path, mut on_file: impl FnMut(PathBuf)) -> WalkStats {
    let mut stats = WalkStats::default();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .follow_root_links(false)
        .into_iter()
        .filter_entry(|entry| !is_pruned(entry));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::warn!("{}", ScanError::traversal(err));
                stats.errors += 1;
                continue;
            }
        };

        match WalkItem::classify(&entry) {
            WalkItem::File(path) => {
                stats.files += 1;
                on_file(path);
            }
            WalkItem::Symlink(path) => {
                log::debug!("Skipping symlink {}", path.display());
                stats.symlinks += 1;
            }
            WalkItem::Directory(_) => {}
            WalkItem::Other(path) => {
                log::debug!("Skipping special file {}", path.display());
            }
        }
    }

    stats
}
