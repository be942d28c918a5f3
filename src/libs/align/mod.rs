//! Pairwise global alignment.
//!
//! * [`nw`]: Needleman-Wunsch over a full score matrix
//! * [`hirschberg`]: the same optimum in linear working memory
//! * [`edit`]: unit-cost edit distance, no substitution matrix

pub mod edit;
pub mod hirschberg;
pub mod nw;

pub use edit::{EditAlignment, EditCosts, MAX_EDIT_COST};

use crate::libs::error::TracError;
use crate::libs::table::SubMatrix;

/// Gap symbol in aligned output.
pub const GAP: u8 = b'-';

pub const DEFAULT_GAP_PENALTY: i32 = -2;

/// Largest gap penalty magnitude accepted, keeping DP scores within `i32`.
pub const MAX_GAP_MAGNITUDE: i32 = 1 << 10;

/// Above this many DP cells `AlignMethod::Auto` switches to Hirschberg.
pub const DEFAULT_LINEAR_THRESHOLD: usize = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignParams {
    /// Score added per gap column, zero or negative
    pub gap: i32,
}

impl Default for AlignParams {
    fn default() -> Self {
        Self {
            gap: DEFAULT_GAP_PENALTY,
        }
    }
}

impl AlignParams {
    pub fn new(gap: i32) -> Result<Self, TracError> {
        if gap > 0 {
            return Err(TracError::config(format!(
                "gap penalty must not be positive, got {}",
                gap
            )));
        }
        if gap < -MAX_GAP_MAGNITUDE {
            return Err(TracError::config(format!(
                "gap penalty must be at least {}, got {}",
                -MAX_GAP_MAGNITUDE,
                gap
            )));
        }
        Ok(Self { gap })
    }
}

/// One optimal global alignment of two sequences.
///
/// `first` and `second` have equal length; no column is a gap in both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    pub first: String,
    pub second: String,
    pub score: i32,
}

impl Alignment {
    pub(crate) fn from_columns(first: Vec<u8>, second: Vec<u8>, score: i32) -> Self {
        Self {
            first: String::from_utf8_lossy(&first).to_string(),
            second: String::from_utf8_lossy(&second).to_string(),
            score,
        }
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.first.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_empty()
    }

    /// Columns where both sides carry the same symbol.
    pub fn matches(&self) -> usize {
        self.first
            .bytes()
            .zip(self.second.bytes())
            .filter(|(x, y)| x == y && *x != GAP)
            .count()
    }
}

/// Removes gap symbols.
pub fn ungap(aligned: &str) -> String {
    aligned.chars().filter(|&c| c != GAP as char).collect()
}

/// Sum of column scores: `gap` for a gap column, else the matrix score.
pub fn column_score(first: &[u8], second: &[u8], matrix: &SubMatrix, gap: i32) -> i32 {
    first
        .iter()
        .zip(second)
        .map(|(&x, &y)| {
            if x == GAP || y == GAP {
                gap
            } else {
                matrix.get(x, y)
            }
        })
        .sum()
}

/// Fails on a gap symbol or a symbol outside `matrix`.
///
/// `-` is rejected even when the matrix lists it, since aligned output uses
/// it for gap columns.
pub(crate) fn check_input(seq: &[u8], matrix: &SubMatrix) -> Result<(), TracError> {
    if seq.contains(&GAP) {
        return Err(TracError::UnknownSymbol { symbol: GAP as char });
    }
    matrix.check_seq(seq)
}

pub trait PairAligner {
    fn align(&self, a: &[u8], b: &[u8]) -> Result<Alignment, TracError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignMethod {
    /// Quadratic-space dynamic programming
    Full,
    /// Hirschberg divide and conquer
    Linear,
    /// `Linear` once `len(a) * len(b)` exceeds the cell count, else `Full`
    Auto(usize),
}

impl Default for AlignMethod {
    fn default() -> Self {
        AlignMethod::Auto(DEFAULT_LINEAR_THRESHOLD)
    }
}

impl AlignMethod {
    pub fn from_name(name: &str, threshold: usize) -> Result<Self, TracError> {
        match name {
            "full" => Ok(AlignMethod::Full),
            "linear" => Ok(AlignMethod::Linear),
            "auto" => Ok(AlignMethod::Auto(threshold)),
            _ => Err(TracError::config(format!("unknown alignment method {:?}", name))),
        }
    }
}

/// Substitution-scored aligner choosing its algorithm per pair.
#[derive(Debug, Clone, Copy)]
pub struct Aligner<'a> {
    matrix: &'a SubMatrix,
    params: AlignParams,
    method: AlignMethod,
}

impl<'a> Aligner<'a> {
    pub fn new(matrix: &'a SubMatrix, params: AlignParams, method: AlignMethod) -> Self {
        Self {
            matrix,
            params,
            method,
        }
    }

    pub fn method_for(&self, a: &[u8], b: &[u8]) -> AlignMethod {
        match self.method {
            AlignMethod::Auto(threshold) => {
                if a.len().saturating_mul(b.len()) > threshold {
                    AlignMethod::Linear
                } else {
                    AlignMethod::Full
                }
            }
            m => m,
        }
    }
}

impl PairAligner for Aligner<'_> {
    fn align(&self, a: &[u8], b: &[u8]) -> Result<Alignment, TracError> {
        match self.method_for(a, b) {
            AlignMethod::Linear => {
                hirschberg::Hirschberg::new(self.matrix, self.params).align(a, b)
            }
            _ => nw::NeedlemanWunsch::new(self.matrix, self.params).align(a, b),
        }
    }
}
