pub mod case;
pub mod dictionary;
pub mod tokenizer;

use crate::error::ScanError;
use crate::sink::FindingSink;
use crate::{Config, Finding};
use case::adapt_case;
use dictionary::Dictionary;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tokenizer::{is_binary, Token, TokenizerKind, BINARY_SNIFF_LEN};

/// What happened to a file handed to [`SpellScanner::scan_file`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    Scanned { findings: usize },
    Binary,
}

/// Matches file content against a [`Dictionary`] and reports findings.
pub struct SpellScanner {
    dictionary: Dictionary,
    tokenizer: TokenizerKind,
    include_candidates: bool,
}

impl SpellScanner {
    pub fn new(dictionary: Dictionary, config: &Config) -> Self {
        Self::with_options(dictionary, config.tokenizer(), config.include_candidates())
    }

    pub fn with_options(
        dictionary: Dictionary,
        tokenizer: TokenizerKind,
        include_candidates: bool,
    ) -> Self {
        Self {
            dictionary,
            tokenizer,
            include_candidates,
        }
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Scan one file, emitting findings into `sink` in token order.
    ///
    /// Files with a NUL byte in their first kilobyte are skipped as binary.
    /// The file handle is closed before this returns on every path.
    pub fn scan_file(&self, path: &Path, sink: &dyn FindingSink) -> Result<FileOutcome, ScanError> {
        let mut file = File::open(path).map_err(|source| ScanError::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;

        let read_err = |source: io::Error| ScanError::FileRead {
            path: path.to_path_buf(),
            source,
        };

        let mut buf = Vec::with_capacity(BINARY_SNIFF_LEN);
        file.by_ref()
            .take(BINARY_SNIFF_LEN as u64)
            .read_to_end(&mut buf)
            .map_err(read_err)?;

        if is_binary(&buf) {
            log::debug!("Skipping binary file {}", path.display());
            return Ok(FileOutcome::Binary);
        }

        file.read_to_end(&mut buf).map_err(read_err)?;
        drop(file);

        let content = String::from_utf8_lossy(&buf);
        let findings = self.scan_text(path, &content, sink);
        Ok(FileOutcome::Scanned { findings })
    }

    /// Scan already-decoded content attributed to `path`. Returns the number
    /// of findings emitted.
    pub fn scan_text(&self, path: &Path, content: &str, sink: &dyn FindingSink) -> usize {
        let mut count = 0;
        for token in self.tokenizer.tokenize(content) {
            if let Some(finding) = self.check_token(path, token) {
                sink.emit(finding);
                count += 1;
            }
        }
        count
    }

    fn check_token(&self, path: &Path, token: Token<'_>) -> Option<Finding> {
        let entry = self.dictionary.get(&token.text.to_lowercase())?;

        if !entry.autofix && !self.include_candidates {
            return None;
        }

        Some(Finding {
            path: path.to_path_buf(),
            line: token.line,
            word: token.text.to_string(),
            fix: adapt_case(token.text, &entry.correction),
            autofix: entry.autofix,
            reason: entry.reason.clone(),
        })
    }
}
