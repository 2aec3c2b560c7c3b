use crate::error::ScanError;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

const RULE_SEPARATOR: &str = "->";

/// A single correction rule, keyed by its lowercase misspelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionEntry {
    pub misspelling: String,
    pub correction: String,
    pub autofix: bool,
    pub reason: String,
}

/// Immutable lookup table from lowercase misspelling to its correction.
///
/// Built once before any scan starts and then only read, so it is shared
/// across scan tasks by reference.
#[derive(Debug, Default)]
pub struct Dictionary {
    entries: HashMap<String, CorrectionEntry>,
    malformed: Vec<usize>,
}

impl Dictionary {
    /// Load a correction table from disk.
    pub fn load_from_path(path: &Path) -> Result<Self, ScanError> {
        let file = File::open(path).map_err(|source| ScanError::DictionaryLoad {
            path: path.to_path_buf(),
            source,
        })?;

        let dictionary =
            Self::from_reader(BufReader::new(file)).map_err(|source| ScanError::DictionaryLoad {
                path: path.to_path_buf(),
                source,
            })?;

        log::debug!(
            "Loaded {} rules from {}",
            dictionary.len(),
            path.display()
        );
        Ok(dictionary)
    }

    /// Parse `misspelling->correction[,reason]` lines from any buffered source.
    ///
    /// Malformed lines, including lines that are not valid UTF-8, are logged
    /// and skipped. Only I/O failures abort the load. A later rule for the
    /// same key replaces an earlier one.
    pub fn from_reader<R: BufRead>(reader: R) -> io::Result<Self> {
        let mut dictionary = Self::default();

        for (idx, raw) in reader.split(b'\n').enumerate() {
            let mut raw = raw?;
            let line_no = idx + 1;

            if raw.last() == Some(&b'\r') {
                raw.pop();
            }

            let rule = match std::str::from_utf8(&raw) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => parse_rule(line),
                Err(_) => None,
            };

            match rule {
                Some(entry) => {
                    dictionary.entries.insert(entry.misspelling.clone(), entry);
                }
                None => {
                    log::warn!(
                        "{}",
                        ScanError::MalformedRule {
                            line: line_no,
                            text: String::from_utf8_lossy(&raw).into_owned(),
                        }
                    );
                    dictionary.malformed.push(line_no);
                }
            }
        }

        Ok(dictionary)
    }

    /// Look up an already-lowercased word.
    pub fn get(&self, word_lower: &str) -> Option<&CorrectionEntry> {
        self.entries.get(word_lower)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn autofix_count(&self) -> usize {
        self.entries.values().filter(|e| e.autofix).count()
    }

    /// 1-based line numbers that were skipped while loading.
    pub fn malformed_lines(&self) -> &[usize] {
        &self.malformed
    }
}

/// Parse one rule line. Returns `None` when the line is malformed.
pub fn parse_rule(line: &str) -> Option<CorrectionEntry> {
    let (key, rhs) = line.split_once(RULE_SEPARATOR)?;

    let misspelling = key.trim().to_lowercase();
    let rhs = rhs.trim();

    let (correction, autofix, reason) = match rhs.rfind(',') {
        None => (rhs, true, ""),
        Some(comma) if comma == rhs.len() - 1 => (&rhs[..comma], false, ""),
        Some(comma) => (&rhs[..comma], false, rhs[comma + 1..].trim()),
    };
    let correction = correction.trim();

    if misspelling.is_empty() || correction.is_empty() {
        return None;
    }

    Some(CorrectionEntry {
        misspelling,
        correction: correction.to_string(),
        autofix,
        reason: reason.to_string(),
    })
}
