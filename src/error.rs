use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while loading the dictionary or scanning a tree.
///
/// Only [`ScanError::DictionaryLoad`] and [`ScanError::WorkerPool`] stop a
/// run. The rest are reported as diagnostics and the offending line, file or
/// entry is skipped.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Failed to read dictionary {}: {source}", path.display())]
    DictionaryLoad {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Skipping malformed dictionary line {line} (missing `->`): {text:?}")]
    MalformedRule { line: usize, text: String },

    #[error("Failed to open {}: {source}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to walk {}: {source}", display_opt(path))]
    Traversal {
        path: Option<PathBuf>,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to start scan workers: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

fn display_opt(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<unknown>".to_string())
}

impl ScanError {
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ScanError::DictionaryLoad { .. } | ScanError::WorkerPool(_)
        )
    }

    pub fn traversal(source: walkdir::Error) -> Self {
        Self::Traversal {
            path: source.path().map(|p| p.to_path_buf()),
            source,
        }
    }
}
