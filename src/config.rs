use crate::checker::tokenizer::TokenizerKind;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const LOCAL_CONFIG: &str = ".spellfix.toml";
const DEFAULT_DICTIONARY: &str = "dictionary.txt";

/// One configuration layer. Unset fields fall through to the layer below,
/// so a higher layer can restore a default that a lower one changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Correction table; resolved by [`Config::dictionary_path`] when unset.
    pub dictionary: Option<PathBuf>,
    pub tokenizer: Option<TokenizerKind>,
    /// Also report rules that are not marked for autofix.
    pub include_candidates: Option<bool>,
    /// Maximum number of files scanned concurrently.
    pub jobs: Option<usize>,
}

/// Values given on the command line. `None`/`false` leaves the file config alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub dictionary: Option<PathBuf>,
    pub tokenizer: Option<TokenizerKind>,
    pub include_candidates: bool,
    pub jobs: Option<usize>,
}

impl Config {
    /// Load configuration with priority: CLI args > local config > global config > defaults
    pub fn load(overrides: Overrides) -> Result<Self> {
        let mut config = Self::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                config = config.merge(Self::from_file(&global_path)?);
            }
        }

        let local_path = PathBuf::from(LOCAL_CONFIG);
        if local_path.exists() {
            config = config.merge(Self::from_file(&local_path)?);
        }

        Ok(config.apply(overrides))
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Every field set in `other` replaces the value in `self`.
    fn merge(self, other: Self) -> Self {
        Self {
            dictionary: other.dictionary.or(self.dictionary),
            tokenizer: other.tokenizer.or(self.tokenizer),
            include_candidates: other.include_candidates.or(self.include_candidates),
            jobs: other.jobs.or(self.jobs),
        }
    }

    fn apply(self, overrides: Overrides) -> Self {
        self.merge(Self {
            dictionary: overrides.dictionary,
            tokenizer: overrides.tokenizer,
            include_candidates: overrides.include_candidates.then_some(true),
            jobs: overrides.jobs,
        })
    }

    pub fn tokenizer(&self) -> TokenizerKind {
        self.tokenizer.unwrap_or_default()
    }

    pub fn include_candidates(&self) -> bool {
        self.include_candidates.unwrap_or(false)
    }

    /// The configured dictionary, else `./dictionary.txt` when present, else
    /// the per-user data directory.
    pub fn dictionary_path(&self) -> PathBuf {
        if let Some(path) = &self.dictionary {
            return path.clone();
        }

        let local = PathBuf::from(DEFAULT_DICTIONARY);
        if local.exists() {
            return local;
        }

        Self::data_dir()
            .map(|dir| dir.join(DEFAULT_DICTIONARY))
            .unwrap_or(local)
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "spellfix").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "spellfix").map(|dirs| dirs.data_dir().to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.tokenizer(), TokenizerKind::Words);
        assert!(!config.include_candidates());
        assert!(config.dictionary.is_none());
        assert!(config.jobs.is_none());
    }

    #[test]
    fn test_parse_toml() {
        let config: Config = toml::from_str(
            r#"
            dictionary = "/usr/share/spellfix/dictionary.txt"
            tokenizer = "whitespace"
            jobs = 4
            "#,
        )
        .unwrap();
        assert_eq!(
            config.dictionary,
            Some(PathBuf::from("/usr/share/spellfix/dictionary.txt"))
        );
        assert_eq!(config.tokenizer, Some(TokenizerKind::Whitespace));
        assert_eq!(config.jobs, Some(4));
        assert_eq!(config.include_candidates, None);
    }

    #[test]
    fn test_merge_configs() {
        let base = Config {
            jobs: Some(2),
            ..Default::default()
        };
        let local = Config {
            tokenizer: Some(TokenizerKind::Whitespace),
            ..Default::default()
        };

        let merged = base.merge(local);
        assert_eq!(merged.tokenizer(), TokenizerKind::Whitespace);
        assert_eq!(merged.jobs, Some(2));
    }

    #[test]
    fn test_local_config_restores_defaults() {
        let global: Config = toml::from_str(
            r#"
            tokenizer = "whitespace"
            include_candidates = true
            "#,
        )
        .unwrap();
        let local: Config = toml::from_str(
            r#"
            tokenizer = "words"
            include_candidates = false
            "#,
        )
        .unwrap();

        let merged = Config::default().merge(global).merge(local);
        assert_eq!(merged.tokenizer(), TokenizerKind::Words);
        assert!(!merged.include_candidates());
    }

    #[test]
    fn test_unset_fields_fall_through() {
        let global: Config = toml::from_str(r#"tokenizer = "whitespace""#).unwrap();
        let local: Config = toml::from_str("jobs = 3").unwrap();

        let merged = Config::default().merge(global).merge(local);
        assert_eq!(merged.tokenizer(), TokenizerKind::Whitespace);
        assert_eq!(merged.jobs, Some(3));
    }

    #[test]
    fn test_absent_cli_flag_keeps_file_value() {
        let file = Config {
            include_candidates: Some(true),
            ..Default::default()
        };
        let applied = file.apply(Overrides::default());
        assert!(applied.include_candidates());
    }

    #[test]
    fn test_overrides_win() {
        let file = Config {
            dictionary: Some(PathBuf::from("from-file.txt")),
            tokenizer: Some(TokenizerKind::Whitespace),
            include_candidates: Some(false),
            ..Default::default()
        };
        let applied = file.apply(Overrides {
            dictionary: Some(PathBuf::from("from-cli.txt")),
            tokenizer: Some(TokenizerKind::Words),
            include_candidates: true,
            jobs: Some(8),
        });

        assert_eq!(applied.dictionary, Some(PathBuf::from("from-cli.txt")));
        assert_eq!(applied.tokenizer(), TokenizerKind::Words);
        assert!(applied.include_candidates());
        assert_eq!(applied.jobs, Some(8));
        assert_eq!(applied.dictionary_path(), PathBuf::from("from-cli.txt"));
    }
}
