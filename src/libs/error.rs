//! Error kinds shared by every stage of the pipeline.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TracError {
    /// Lookup-table text does not parse into the expected shape
    #[error("Malformed table at line {line}: {message}")]
    MalformedTable { line: usize, message: String },

    /// A codon window has no entry in the codon table
    #[error("No codon table entry for {codon:?} at offset {offset}")]
    Translation { codon: String, offset: usize },

    /// A symbol is absent from the substitution matrix
    #[error("Unknown symbol {symbol:?} in substitution matrix lookup")]
    UnknownSymbol { symbol: char },

    /// Parameters that make alignment or clustering degenerate
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TracError {
    pub fn malformed<S: Into<String>>(line: usize, message: S) -> Self {
        Self::MalformedTable {
            line,
            message: message.into(),
        }
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Configuration(message.into())
    }
}

/// A translation failure localized to one input sequence and frame.
#[derive(Debug)]
pub struct SeqFailure {
    pub index: usize,
    pub name: String,
    pub frame: usize,
    pub error: TracError,
}

impl std::fmt::Display for SeqFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "sequence {} ({}) frame {}: {}",
            self.index, self.name, self.frame, self.error
        )
    }
}

/// A failure localized to the pair `(i, j)` of a batch.
#[derive(Debug)]
pub struct PairFailure {
    pub i: usize,
    pub j: usize,
    pub error: TracError,
}

impl std::fmt::Display for PairFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pair ({}, {}): {}", self.i, self.j, self.error)
    }
}
