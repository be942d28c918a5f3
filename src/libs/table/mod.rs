//! Lookup tables: the codon table and the amino-acid substitution matrix.
//!
//! Both are built once from tab-separated text, either a file or one of the
//! built-in presets, and are immutable afterwards.

pub mod codon;
pub mod sub_matrix;

pub use codon::CodonTable;
pub use sub_matrix::SubMatrix;

/// Non-empty, non-comment lines with their 1-based line numbers.
pub(crate) fn data_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim_end_matches('\r')))
        .filter(|(_, line)| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
}
