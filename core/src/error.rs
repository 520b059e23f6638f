//! Error types for dictionary loading and segmentation.
//!
//! Initialization failures are fatal to the instance being built: a failed
//! `load` returns an error and leaves nothing half-constructed behind.
//! Per-call failures (`CutError`) return to the caller and leave the
//! segmenter reusable.

use std::path::PathBuf;
use thiserror::Error;

/// Failure while loading a dictionary, IDF table or stop-word list.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The dictionary file yielded no usable entry, or the frequencies
    /// summed to zero.
    #[error("dictionary contains no usable entries")]
    EmptyDict,

    /// The IDF table yielded no usable entry.
    #[error("idf table contains no usable entries")]
    EmptyIdf,

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Malformed UTF-8 encountered at a byte boundary (file contents or raw
/// input). `offset` is the index of the first byte that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("malformed utf-8 at byte offset {offset}")]
pub struct DecodeError {
    pub offset: usize,
}

/// Failure during a `cut` call. The segmenter stays usable afterwards and
/// no partial token list is produced.
#[derive(Debug, Error)]
pub enum CutError {
    #[error("cut called with empty input")]
    EmptyInput,

    #[error(transparent)]
    Decode(#[from] DecodeError),
}
