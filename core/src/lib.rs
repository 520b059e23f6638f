//! hanseg-core
//!
//! Maximum-probability Chinese word segmentation and TF-IDF keyword
//! extraction.
//!
//! A plain-text frequency dictionary is loaded once into an immutable
//! prefix trie. Each `cut` call decodes the sentence into code points,
//! builds a per-position DAG of candidate word spans, runs a reverse
//! dynamic-programming sweep that maximizes the summed log-frequency of
//! the chosen path, and re-encodes the winning tokens. The keyword
//! extractor consumes that token stream together with an IDF table and a
//! stop-word list.
//!
//! Public API:
//! - `Segmenter` - dictionary loading plus `cut` / `cut_tokens`
//! - `KeywordExtractor` - TF-IDF ranking over segmentation output
//! - `Dictionary`, `WordEntry` - the loaded frequency dictionary
//! - `Config` - resource paths and defaults, TOML-backed
//! - `InitError`, `CutError`, `DecodeError` - the error surface

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub mod error;
pub use error::{CutError, DecodeError, InitError};

pub mod transcode;

pub mod trie;
pub use trie::TrieNode;

pub mod dict;
pub use dict::{Dictionary, WordEntry};

pub mod segmenter;
pub use segmenter::{Segmenter, Token};

pub mod keyword;
pub use keyword::KeywordExtractor;

/// Resource locations and defaults for an embedding application.
///
/// The library constructors take explicit paths; this struct exists for
/// callers (the CLI included) that want the paths in one TOML file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Segmentation dictionary, `WORD FREQ [TAG]` per line.
    pub dict: PathBuf,

    /// IDF table for keyword extraction, `WORD IDF` per line.
    pub idf: Option<PathBuf>,

    /// Stop-word list, one token per line.
    pub stop_words: Option<PathBuf>,

    /// Default keyword count when the caller does not pass one.
    pub top_n: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dict: PathBuf::from("dict.txt"),
            idf: None,
            stop_words: None,
            top_n: 20,
        }
    }
}

impl Config {
    /// Read and parse a TOML config file.
    pub fn load_toml<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self::from_toml_str(&std::fs::read_to_string(path)?)?)
    }

    /// Write the config to `path` as pretty-printed TOML.
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Parse a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Render the config as pretty-printed TOML.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_toml_roundtrip() {
        let cfg = Config {
            dict: PathBuf::from("data/dict.txt"),
            idf: Some(PathBuf::from("data/idf.txt")),
            stop_words: None,
            top_n: 5,
        };
        let s = cfg.to_toml_string().unwrap();
        let back = Config::from_toml_str(&s).unwrap();
        assert_eq!(back.dict, cfg.dict);
        assert_eq!(back.idf, cfg.idf);
        assert_eq!(back.stop_words, None);
        assert_eq!(back.top_n, 5);
    }

    #[test]
    fn config_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.top_n, 20);
        assert!(cfg.idf.is_none());
    }
}
