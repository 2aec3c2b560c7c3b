pub mod checker;
pub mod cli;
pub mod config;
pub mod dict;
pub mod error;
pub mod pipeline;
pub mod sink;
pub mod walker;

pub use checker::dictionary::{CorrectionEntry, Dictionary};
pub use checker::SpellScanner;
pub use config::Config;
pub use error::ScanError;
pub use sink::{CollectingSink, FindingSink};

use serde::Serialize;
use std::path::PathBuf;

/// One dictionary hit in a scanned file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Finding {
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    pub word: String,
    pub fix: String,
    pub autofix: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub reason: String,
}

/// Totals for one run over all roots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    pub files_scanned: usize,
    pub files_skipped: usize,
    pub files_failed: usize,
    pub walk_errors: usize,
    pub findings: usize,
}
