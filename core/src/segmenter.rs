//! Maximum-probability segmentation.
//!
//! For each sentence a per-call context is built: one cell per code point,
//! each holding the DAG of dictionary spans that start there. A reverse
//! dynamic-programming sweep then picks, at every position, the outgoing
//! edge whose log-frequency plus the best suffix weight is maximal, and
//! the assembler walks the chosen edges from the front to emit tokens.
//!
//! Spans the dictionary knows score their entry's `log_freq`; a bare code
//! point with no dictionary hit scores the dictionary's floor
//! (`min_log_freq`). The context is owned by the in-flight call, so a
//! shared `Segmenter` serves concurrent `cut` calls without locking.

use crate::dict::Dictionary;
use crate::error::{CutError, InitError};
use crate::transcode;
use std::path::Path;

/// An outgoing DAG edge: a dictionary word, or a single code point the
/// dictionary does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    /// Handle into the dictionary's entry arena.
    Known(u32),
    /// Fallback span of exactly one code point.
    Single,
}

/// Per-position cell of the segmentation context.
///
/// `dag` maps inclusive end positions to edges and is kept sorted by
/// ascending end, which fixes the solver's iteration order and therefore
/// its tie-break.
struct SegmentChar {
    ch: char,
    dag: Vec<(usize, Edge)>,
    /// Best path score from this position to the end of the sentence.
    weight: f64,
    /// The edge that achieves `weight`.
    best: Edge,
}

impl SegmentChar {
    fn new(ch: char) -> Self {
        Self {
            ch,
            dag: Vec::new(),
            weight: 0.0,
            best: Edge::Single,
        }
    }
}

/// A segmented token carrying its dictionary statistics. Out-of-vocabulary
/// single characters come out with `freq = 0` and the floor score.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text: String,
    pub freq: u64,
    pub log_freq: f64,
}

/// Maximum-probability segmenter: owns the dictionary, orchestrates
/// decode, DAG construction, the DP sweep and token assembly.
#[derive(Debug)]
pub struct Segmenter {
    dict: Dictionary,
}

impl Segmenter {
    /// Load the dictionary at `dict_path` and build a segmenter around it.
    pub fn new<P: AsRef<Path>>(dict_path: P) -> Result<Self, InitError> {
        Ok(Self {
            dict: Dictionary::load(dict_path)?,
        })
    }

    /// Build a segmenter from an already-loaded dictionary.
    pub fn from_dictionary(dict: Dictionary) -> Self {
        Self { dict }
    }

    /// Read-only access to the loaded dictionary.
    pub fn dictionary(&self) -> &Dictionary {
        &self.dict
    }

    /// Segment `input` into surface strings.
    ///
    /// For a fixed dictionary and identical input the output is
    /// byte-identical across runs: the DAG is scanned in ascending end
    /// order and ties keep the first edge seen.
    pub fn cut(&self, input: &str) -> Result<Vec<String>, CutError> {
        Ok(self
            .cut_tokens(input)?
            .into_iter()
            .map(|t| t.text)
            .collect())
    }

    /// Segment `input`, keeping per-token frequency data.
    pub fn cut_tokens(&self, input: &str) -> Result<Vec<Token>, CutError> {
        if input.is_empty() {
            return Err(CutError::EmptyInput);
        }
        let sentence = transcode::decode(input);
        let mut ctx: Vec<SegmentChar> = sentence.iter().copied().map(SegmentChar::new).collect();
        self.build_dag(&sentence, &mut ctx);
        self.solve(&mut ctx);
        Ok(self.assemble(&ctx))
    }

    /// Record, for each start position, every dictionary span beginning
    /// there. A position with no single-character dictionary hit gets the
    /// fallback edge to itself, so every cell ends up with at least one
    /// outgoing edge.
    fn build_dag(&self, sentence: &[char], ctx: &mut [SegmentChar]) {
        for i in 0..ctx.len() {
            let mut has_single = false;
            for (end, handle) in self.dict.matches_from(sentence, i) {
                if end - 1 == i {
                    has_single = true;
                }
                ctx[i].dag.push((end - 1, Edge::Known(handle)));
            }
            if !has_single {
                // The one-code-point span sorts before every other end.
                ctx[i].dag.insert(0, (i, Edge::Single));
            }
        }
    }

    /// Reverse sweep: `weight(i)` is the best achievable score from `i` to
    /// the end, with `weight(N) = 0` as the sentinel beyond the last
    /// position. Edges are scanned in ascending end order and replaced
    /// only on a strictly greater score, so the first maximal edge wins
    /// ties.
    fn solve(&self, ctx: &mut [SegmentChar]) {
        let n = ctx.len();
        let floor = self.dict.min_log_freq();
        for i in (0..n).rev() {
            let mut best: Option<(f64, Edge)> = None;
            for &(end, edge) in &ctx[i].dag {
                let mut score = match edge {
                    Edge::Known(handle) => self.dict.entry(handle).log_freq,
                    Edge::Single => floor,
                };
                if end + 1 < n {
                    score += ctx[end + 1].weight;
                }
                match best {
                    Some((w, _)) if score <= w => {}
                    _ => best = Some((score, edge)),
                }
            }
            // Every cell has at least one edge after build_dag.
            let (weight, edge) = best.unwrap_or((floor, Edge::Single));
            ctx[i].weight = weight;
            ctx[i].best = edge;
        }
    }

    /// Walk the chosen edges from position 0 and materialize tokens. The
    /// emitted texts concatenate back to the input sentence.
    fn assemble(&self, ctx: &[SegmentChar]) -> Vec<Token> {
        let floor = self.dict.min_log_freq();
        let mut tokens = Vec::new();
        let mut i = 0;
        while i < ctx.len() {
            match ctx[i].best {
                Edge::Known(handle) => {
                    let entry = self.dict.entry(handle);
                    tokens.push(Token {
                        text: entry.text.clone(),
                        freq: entry.freq,
                        log_freq: entry.log_freq,
                    });
                    i += entry.len;
                }
                Edge::Single => {
                    tokens.push(Token {
                        text: ctx[i].ch.to_string(),
                        freq: 0,
                        log_freq: floor,
                    });
                    i += 1;
                }
            }
        }
        tokens
    }
}
