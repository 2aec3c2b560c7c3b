use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How many leading bytes are inspected when deciding whether a file is binary.
pub const BINARY_SNIFF_LEN: usize = 1024;

lazy_static! {
    static ref WORD: Regex = Regex::new(r"[\w-]+").unwrap();
}

/// Policy used to cut file content into candidate words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenizerKind {
    /// Whitespace-delimited tokens, punctuation left attached, no line numbers.
    Whitespace,
    /// Runs of word characters and hyphens, with 1-based line numbers.
    #[default]
    Words,
}

impl FromStr for TokenizerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "whitespace" | "ws" => Ok(TokenizerKind::Whitespace),
            "words" | "word" => Ok(TokenizerKind::Words),
            _ => Err(format!("Unknown tokenizer: {}", s)),
        }
    }
}

impl fmt::Display for TokenizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenizerKind::Whitespace => write!(f, "whitespace"),
            TokenizerKind::Words => write!(f, "words"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub line: Option<usize>,
}

impl TokenizerKind {
    /// Split `content` into tokens in the order they appear.
    pub fn tokenize<'a>(&self, content: &'a str) -> Vec<Token<'a>> {
        match self {
            TokenizerKind::Whitespace => content
                .split_whitespace()
                .map(|text| Token { text, line: None })
                .collect(),
            TokenizerKind::Words => content
                .lines()
                .enumerate()
                .flat_map(|(idx, line)| {
                    WORD.find_iter(line).map(move |m| Token {
                        text: m.as_str(),
                        line: Some(idx + 1),
                    })
                })
                .collect(),
        }
    }
}

/// A NUL byte anywhere in the sniff window marks the content as binary.
pub fn is_binary(head: &[u8]) -> bool {
    head.iter().take(BINARY_SNIFF_LEN).any(|&b| b == 0)
}
