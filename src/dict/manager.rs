use crate::checker::dictionary::Dictionary;
use crate::error::ScanError;
use colored::*;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryInfo {
    pub path: PathBuf,
    pub rules: usize,
    pub autofix: usize,
    pub candidates: usize,
    pub malformed_lines: Vec<usize>,
}

pub fn inspect(path: &Path) -> Result<DictionaryInfo, ScanError> {
    let dictionary = Dictionary::load_from_path(path)?;
    let autofix = dictionary.autofix_count();

    Ok(DictionaryInfo {
        path: path.to_path_buf(),
        rules: dictionary.len(),
        autofix,
        candidates: dictionary.len() - autofix,
        malformed_lines: dictionary.malformed_lines().to_vec(),
    })
}

pub fn show_info(path: &Path, colored: bool) -> Result<(), ScanError> {
    let info = inspect(path)?;
    let path_str = info.path.display().to_string();

    if colored {
        println!("{} {}", "Dictionary:".bold(), path_str.cyan());
    } else {
        println!("Dictionary: {}", path_str);
    }
    println!("  Rules:      {}", info.rules);
    println!("  Autofix:    {}", info.autofix);
    println!("  Candidates: {}", info.candidates);

    if info.malformed_lines.is_empty() {
        return Ok(());
    }

    let lines = info
        .malformed_lines
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    if colored {
        println!("  {} {}", "Malformed lines:".yellow(), lines);
    } else {
        println!("  Malformed lines: {}", lines);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_inspect_counts_rules() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dictionary.txt");
        std::fs::write(
            &path,
            "teh->the\nclas->class,\n# not a rule\nans->and, too short\n",
        )
        .unwrap();

        let info = inspect(&path).unwrap();
        assert_eq!(info.rules, 3);
        assert_eq!(info.autofix, 1);
        assert_eq!(info.candidates, 2);
        assert_eq!(info.malformed_lines, vec![3]);
    }

    #[test]
    fn test_inspect_missing_file() {
        let dir = tempdir().unwrap();
        assert!(inspect(&dir.path().join("missing.txt")).is_err());
    }
}
