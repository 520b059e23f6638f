//! TF-IDF keyword extraction over segmentation output.
//!
//! The extractor shares a read-only [`Segmenter`] and two loaded tables:
//! an IDF map (`WORD IDF` per line) and a stop-word set (one token per
//! line, taken verbatim). Words missing from the IDF table fall back to
//! the arithmetic mean of the loaded values.

use crate::error::{CutError, InitError};
use crate::segmenter::Segmenter;
use crate::transcode;
use ahash::{AHashMap, AHashSet};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Ranks the words of a document by term frequency times inverse document
/// frequency.
#[derive(Debug)]
pub struct KeywordExtractor {
    segmenter: Arc<Segmenter>,
    idf: AHashMap<String, f64>,
    idf_average: f64,
    stop_words: AHashSet<String>,
}

impl KeywordExtractor {
    /// Build an extractor over a shared segmenter, loading the IDF table
    /// and stop-word list from disk.
    pub fn new<P: AsRef<Path>>(
        segmenter: Arc<Segmenter>,
        idf_path: P,
        stop_word_path: P,
    ) -> Result<Self, InitError> {
        let (idf, idf_average) = load_idf(idf_path.as_ref())?;
        let stop_words = load_stop_words(stop_word_path.as_ref())?;
        info!(
            idf_entries = idf.len(),
            idf_average,
            stop_words = stop_words.len(),
            "keyword extractor ready"
        );
        Ok(Self {
            segmenter,
            idf,
            idf_average,
            stop_words,
        })
    }

    /// The mean IDF used for words missing from the table.
    pub fn idf_average(&self) -> f64 {
        self.idf_average
    }

    /// Extract the `top_n` highest-scoring keywords of `input` with their
    /// scores, descending. `top_n` is clamped to the number of candidates.
    ///
    /// Single-code-point tokens and stop words never qualify. Equal scores
    /// keep first-encounter order (the counting pass runs in token order
    /// and the sort is stable).
    pub fn extract(&self, input: &str, top_n: usize) -> Result<Vec<(String, f64)>, CutError> {
        let tokens = self.segmenter.cut_tokens(input)?;

        let mut order: Vec<String> = Vec::new();
        let mut tf: AHashMap<String, u64> = AHashMap::new();
        for token in tokens {
            if token.text.chars().count() == 1 {
                continue;
            }
            if self.stop_words.contains(&token.text) {
                continue;
            }
            match tf.get_mut(&token.text) {
                Some(count) => *count += 1,
                None => {
                    tf.insert(token.text.clone(), 1);
                    order.push(token.text);
                }
            }
        }

        let mut scored: Vec<(String, f64)> = order
            .into_iter()
            .map(|word| {
                let idf = self.idf.get(&word).copied().unwrap_or(self.idf_average);
                let count = tf[&word] as f64;
                (word, count * idf)
            })
            .collect();

        // Stable sort: ties stay in first-encounter order.
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_n);
        Ok(scored)
    }

    /// Words-only convenience over [`KeywordExtractor::extract`].
    pub fn extract_keywords(&self, input: &str, top_n: usize) -> Result<Vec<String>, CutError> {
        Ok(self
            .extract(input, top_n)?
            .into_iter()
            .map(|(word, _)| word)
            .collect())
    }
}

/// Load a `WORD IDF` table. Malformed lines are skipped with a warning;
/// at least one finite value must survive. Returns the map and the
/// arithmetic mean over distinct loaded words.
fn load_idf(path: &Path) -> Result<(AHashMap<String, f64>, f64), InitError> {
    let bytes = std::fs::read(path).map_err(|e| InitError::Io {
        path: path.into(),
        source: e,
    })?;
    let content = transcode::validate(&bytes)?;

    let mut idf: AHashMap<String, f64> = AHashMap::new();
    let mut sum = 0.0;
    for (lineno, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let mut fields = line.split_whitespace();
        let word = fields.next();
        let value = fields.next().and_then(|v| v.parse::<f64>().ok());
        match (word, value) {
            (Some(w), Some(v)) if v.is_finite() => {
                if let Some(prev) = idf.insert(w.to_string(), v) {
                    sum -= prev;
                }
                sum += v;
            }
            _ => warn!(lineno = lineno + 1, line, "skipping malformed idf line"),
        }
    }

    if idf.is_empty() {
        return Err(InitError::EmptyIdf);
    }
    let mean = sum / idf.len() as f64;
    Ok((idf, mean))
}

/// Load a stop-word list, one token per line, verbatim. An empty line
/// yields the empty-string stop word, which never matches a token.
fn load_stop_words(path: &Path) -> Result<AHashSet<String>, InitError> {
    let bytes = std::fs::read(path).map_err(|e| InitError::Io {
        path: path.into(),
        source: e,
    })?;
    let content = transcode::validate(&bytes)?;
    Ok(content.lines().map(str::to_string).collect())
}
