//! Frequency dictionary backing the maximum-probability segmenter.
//!
//! The on-disk format is newline-delimited UTF-8, one `WORD FREQ [TAG]`
//! entry per line (whitespace-separated; the part-of-speech tag is
//! accepted and ignored). Loading is two-phase: every line is parsed
//! before any structure is committed, so a failed load never leaves a
//! half-built dictionary behind.
//!
//! After load the dictionary is immutable. Entries live in an arena
//! (`Vec<WordEntry>`) and the trie's terminal nodes store `u32` handles
//! into it, which is what the segmenter's DAG records as well.

use crate::error::InitError;
use crate::transcode;
use crate::trie::TrieNode;
use ahash::AHashMap;
use std::path::Path;
use tracing::{debug, info, warn};

/// A dictionary entry: the surface form plus its corpus statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct WordEntry {
    pub text: String,
    /// Surface length in code points (the cursor advance during assembly).
    pub len: usize,
    pub freq: u64,
    /// `ln(freq / total_freq)`; strictly negative for loaded entries.
    pub log_freq: f64,
}

/// Immutable prefix-tree dictionary over code points.
#[derive(Debug)]
pub struct Dictionary {
    root: TrieNode,
    entries: Vec<WordEntry>,
    total_freq: u64,
    min_log_freq: f64,
}

impl Dictionary {
    /// Load a dictionary from a `WORD FREQ [TAG]` text file.
    ///
    /// Blank and malformed lines are skipped with a log entry; the load
    /// succeeds as long as at least one entry with a positive frequency
    /// remains.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, InitError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| InitError::Io {
            path: path.into(),
            source: e,
        })?;
        let content = transcode::validate(&bytes)?;

        // Phase one: parse everything before building anything.
        let mut parsed: Vec<(String, u64)> = Vec::new();
        for (lineno, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                debug!(lineno = lineno + 1, "skipping blank dictionary line");
                continue;
            }
            let mut fields = line.split_whitespace();
            let word = fields.next();
            let freq = fields.next().and_then(|f| f.parse::<u64>().ok());
            match (word, freq) {
                (Some(w), Some(f)) => parsed.push((w.to_string(), f)),
                _ => warn!(lineno = lineno + 1, line, "skipping malformed dictionary line"),
            }
        }

        let dict = Self::from_entries(parsed)?;
        info!(
            path = %path.display(),
            entries = dict.len(),
            total_freq = dict.total_freq,
            min_log_freq = dict.min_log_freq,
            "dictionary loaded"
        );
        Ok(dict)
    }

    /// Commit phase: normalize frequencies and build the trie from
    /// in-memory `(word, freq)` pairs. This is also the construction seam
    /// used by tests and embedders.
    ///
    /// A duplicate surface form keeps its last occurrence, so the trie
    /// holds exactly one entry per word. Zero-frequency pairs are dropped:
    /// `ln(0)` would poison the floor score, and a zero-probability word
    /// could never be selected anyway.
    pub fn from_entries<I>(pairs: I) -> Result<Self, InitError>
    where
        I: IntoIterator<Item = (String, u64)>,
    {
        let mut index: AHashMap<String, usize> = AHashMap::new();
        let mut words: Vec<(String, u64)> = Vec::new();
        for (text, freq) in pairs {
            if freq == 0 {
                debug!(word = %text, "ignoring zero-frequency dictionary entry");
                continue;
            }
            match index.get(&text) {
                Some(&i) => {
                    debug!(word = %text, "duplicate dictionary word, last occurrence wins");
                    words[i].1 = freq;
                }
                None => {
                    index.insert(text.clone(), words.len());
                    words.push((text, freq));
                }
            }
        }

        let total_freq: u64 = words.iter().map(|(_, f)| f).sum();
        if words.is_empty() || total_freq == 0 {
            return Err(InitError::EmptyDict);
        }

        let total = total_freq as f64;
        let mut root = TrieNode::new();
        let mut entries = Vec::with_capacity(words.len());
        let mut min_log_freq = f64::MAX;
        for (text, freq) in words {
            let log_freq = (freq as f64 / total).ln();
            if log_freq < min_log_freq {
                min_log_freq = log_freq;
            }
            root.insert(&text, entries.len() as u32);
            entries.push(WordEntry {
                len: text.chars().count(),
                text,
                freq,
                log_freq,
            });
        }

        Ok(Self {
            root,
            entries,
            total_freq,
            min_log_freq,
        })
    }

    /// Every dictionary span starting at `start` in `sentence`, as
    /// `(end_exclusive, handle)` pairs in ascending end order.
    pub fn matches_from(&self, sentence: &[char], start: usize) -> Vec<(usize, u32)> {
        self.root.walk_matches(sentence, start)
    }

    /// Resolve a handle produced by [`Dictionary::matches_from`].
    pub fn entry(&self, handle: u32) -> &WordEntry {
        &self.entries[handle as usize]
    }

    /// Exact-word membership test.
    pub fn contains(&self, word: &str) -> bool {
        self.root.contains(word)
    }

    /// The floor score: `min(log_freq)` over all loaded entries. Used as
    /// the weight of any single-character span the dictionary does not
    /// know.
    pub fn min_log_freq(&self) -> f64 {
        self.min_log_freq
    }

    /// Sum of all entry frequencies (the normalization denominator).
    pub fn total_freq(&self) -> u64 {
        self.total_freq
    }

    /// Number of distinct entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict(pairs: &[(&str, u64)]) -> Dictionary {
        Dictionary::from_entries(pairs.iter().map(|(w, f)| (w.to_string(), *f)))
            .expect("dictionary")
    }

    #[test]
    fn log_freq_is_normalized_over_total() {
        let d = dict(&[("中国", 75), ("天安门", 25)]);
        assert_eq!(d.total_freq(), 100);
        let zhongguo = d
            .matches_from(&"中国".chars().collect::<Vec<_>>(), 0)
            .pop()
            .map(|(_, h)| d.entry(h).log_freq)
            .unwrap();
        assert!((zhongguo - 0.75f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn min_log_freq_is_the_rarest_entry() {
        let d = dict(&[("我", 10000), ("爱", 5000), ("北京", 3000), ("天安门", 2000)]);
        let expected = (2000f64 / 20000f64).ln();
        assert!((d.min_log_freq() - expected).abs() < 1e-12);
        // Floor never exceeds any entry's own score.
        for w in ["我", "爱", "北京", "天安门"] {
            let chars: Vec<char> = w.chars().collect();
            let (_, h) = *d.matches_from(&chars, 0).last().unwrap();
            assert!(d.min_log_freq() <= d.entry(h).log_freq);
        }
    }

    #[test]
    fn duplicate_word_keeps_last_frequency() {
        let d = Dictionary::from_entries(vec![
            ("中国".to_string(), 100),
            ("中国".to_string(), 400),
        ])
        .unwrap();
        assert_eq!(d.len(), 1);
        assert_eq!(d.total_freq(), 400);
    }

    #[test]
    fn zero_frequency_entries_are_dropped() {
        let d = Dictionary::from_entries(vec![
            ("中国".to_string(), 100),
            ("鬼话".to_string(), 0),
        ])
        .unwrap();
        assert_eq!(d.len(), 1);
        assert!(!d.contains("鬼话"));
        assert!(d.min_log_freq().is_finite());
    }

    #[test]
    fn all_zero_entries_fail_as_empty() {
        let err = Dictionary::from_entries(vec![("中".to_string(), 0)]).unwrap_err();
        assert!(matches!(err, InitError::EmptyDict));
        let err = Dictionary::from_entries(Vec::new()).unwrap_err();
        assert!(matches!(err, InitError::EmptyDict));
    }

    #[test]
    fn matches_from_finds_every_span() {
        let d = dict(&[("中", 500), ("中国", 5000), ("国人", 1000)]);
        let sentence: Vec<char> = "中国人".chars().collect();
        let at0: Vec<usize> = d.matches_from(&sentence, 0).iter().map(|&(e, _)| e).collect();
        assert_eq!(at0, vec![1, 2]);
        let at1: Vec<usize> = d.matches_from(&sentence, 1).iter().map(|&(e, _)| e).collect();
        assert_eq!(at1, vec![3]);
        assert!(d.matches_from(&sentence, 2).is_empty());
    }
}
