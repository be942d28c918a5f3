//! All-pairs alignment over a sequence collection.
//!
//! Pairs `(i, j)` with `i < j` are produced in lexicographic order, `i` outer
//! and `j` inner. The order is the same whether or not the work runs in
//! parallel.

use rayon::prelude::*;

use crate::libs::align::{edit, Alignment, EditAlignment, EditCosts, PairAligner};
use crate::libs::error::{PairFailure, TracError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairAlignment {
    pub i: usize,
    pub j: usize,
    pub alignment: Alignment,
}

#[derive(Debug, Default)]
pub struct PairsReport {
    pub alignments: Vec<PairAlignment>,
    pub failures: Vec<PairFailure>,
}

impl PairsReport {
    /// `(i, j, score)` in pair order.
    pub fn scores(&self) -> Vec<(usize, usize, i32)> {
        self.alignments
            .iter()
            .map(|p| (p.i, p.j, p.alignment.score))
            .collect()
    }

    /// Aligned rows, two per pair, in pair order.
    pub fn rows(&self) -> Vec<&str> {
        self.alignments
            .iter()
            .flat_map(|p| [p.alignment.first.as_str(), p.alignment.second.as_str()])
            .collect()
    }
}

/// Every unordered pair of `0..n`, no self-pairs.
///
/// ```
/// assert_eq!(
///     trac::libs::pairs::pair_index(3),
///     vec![(0, 1), (0, 2), (1, 2)]
/// );
/// assert!(trac::libs::pairs::pair_index(1).is_empty());
/// ```
pub fn pair_index(n: usize) -> Vec<(usize, usize)> {
    (0..n)
        .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
        .collect()
}

/// Runs `f` on `parallel` threads, or on the caller's thread when `parallel <= 1`.
pub(crate) fn with_pool<T, F>(parallel: usize, f: F) -> Result<T, TracError>
where
    T: Send,
    F: FnOnce() -> T + Send,
{
    if parallel <= 1 {
        return Ok(f());
    }
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(parallel)
        .build()
        .map_err(|e| TracError::config(format!("cannot build thread pool: {}", e)))?;
    Ok(pool.install(f))
}

/// Aligns every pair of `seqs`.
///
/// A pair that fails is recorded in `failures` and the batch continues.
pub fn all_pairs<S, A>(seqs: &[S], aligner: &A, parallel: usize) -> Result<PairsReport, TracError>
where
    S: AsRef<[u8]> + Sync,
    A: PairAligner + Sync,
{
    let index = pair_index(seqs.len());
    log::info!("Aligning {} pairs of {} sequences", index.len(), seqs.len());

    let align_one = |&(i, j): &(usize, usize)| {
        (i, j, aligner.align(seqs[i].as_ref(), seqs[j].as_ref()))
    };
    let results: Vec<_> = if parallel <= 1 {
        index.iter().map(align_one).collect()
    } else {
        // collect() on an indexed parallel iterator keeps the input order
        with_pool(parallel, || index.par_iter().map(align_one).collect::<Vec<_>>())?
    };

    let mut report = PairsReport::default();
    for (i, j, result) in results {
        match result {
            Ok(alignment) => report.alignments.push(PairAlignment { i, j, alignment }),
            Err(error) => {
                log::warn!("Failed to align pair ({}, {}): {}", i, j, error);
                report.failures.push(PairFailure { i, j, error });
            }
        }
    }

    Ok(report)
}

/// Edit-distance alignment of every pair of `seqs`, in pair order.
pub fn all_pairs_edit<S>(seqs: &[S], costs: EditCosts) -> Vec<(usize, usize, EditAlignment)>
where
    S: AsRef<[u8]>,
{
    pair_index(seqs.len())
        .into_iter()
        .map(|(i, j)| (i, j, edit::align(seqs[i].as_ref(), seqs[j].as_ref(), costs)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::align::{AlignMethod, AlignParams, Aligner};
    use crate::libs::table::SubMatrix;

    #[test]
    fn test_pair_order() {
        assert_eq!(
            pair_index(4),
            vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]
        );
        assert!(pair_index(0).is_empty());
        assert_eq!(pair_index(10).len(), 45);
    }

    #[test]
    fn test_all_pairs() {
        let m = SubMatrix::blosum62();
        let aligner = Aligner::new(&m, AlignParams::default(), AlignMethod::Full);
        let seqs = ["CCCC", "CCC", "MKV"];
        let report = all_pairs(&seqs, &aligner, 1).unwrap();

        assert!(report.failures.is_empty());
        let pairs: Vec<(usize, usize)> = report.alignments.iter().map(|p| (p.i, p.j)).collect();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (1, 2)]);
        assert_eq!(report.scores()[0], (0, 1, 25));
        assert_eq!(report.rows().len(), 6);
    }

    #[test]
    fn test_failures_do_not_abort() {
        let m = SubMatrix::blosum62();
        let aligner = Aligner::new(&m, AlignParams::default(), AlignMethod::Full);
        let seqs = ["CCCC", "CJC", "CCC"];
        let report = all_pairs(&seqs, &aligner, 1).unwrap();

        assert_eq!(report.alignments.len(), 1);
        assert_eq!((report.alignments[0].i, report.alignments[0].j), (0, 2));
        let failed: Vec<(usize, usize)> = report.failures.iter().map(|f| (f.i, f.j)).collect();
        assert_eq!(failed, vec![(0, 1), (1, 2)]);
        assert!(matches!(
            report.failures[0].error,
            TracError::UnknownSymbol { symbol: 'J' }
        ));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let m = SubMatrix::blosum62();
        let aligner = Aligner::new(&m, AlignParams::default(), AlignMethod::Linear);
        let seqs: Vec<String> = (0..12)
            .map(|k| "MKVLAAGIVGHEAGAWGHEE".chars().cycle().skip(k).take(10 + k).collect())
            .collect();

        let serial = all_pairs(&seqs, &aligner, 1).unwrap();
        let parallel = all_pairs(&seqs, &aligner, 4).unwrap();
        assert_eq!(serial.alignments, parallel.alignments);
        assert_eq!(serial.alignments.len(), 66);
    }

    #[test]
    fn test_all_pairs_edit() {
        let seqs = ["kitten", "sitting", "kit"];
        let res = all_pairs_edit(&seqs, EditCosts::default());
        assert_eq!(res.len(), 3);
        assert_eq!((res[0].0, res[0].1, res[0].2.cost), (0, 1, 5));
        assert!(res[0].2.swapped);
        assert_eq!(res[1].2.cost, 3);
        assert!(!res[1].2.swapped);
    }
}
