//! DBSCAN over pairwise similarity.
//!
//! `eps` is a *minimum similarity*, not a maximum distance. Two sequences
//! are neighbors when their [`similarity`] is at least `eps`, so raising
//! `eps` makes neighborhoods stricter, the opposite of distance-based DBSCAN.

use std::collections::VecDeque;

use rayon::prelude::*;

use crate::libs::align::GAP;
use crate::libs::error::{PairFailure, TracError};
use crate::libs::pairs::{pair_index, with_pool};
use crate::libs::table::SubMatrix;

pub const NOISE: i32 = -1;
pub const DEFAULT_EPS: i32 = 30;
pub const DEFAULT_MIN_POINTS: usize = 3;

/// Position-wise similarity of two sequences.
///
/// The shorter one is padded with gaps to the longer length. Each position
/// scores `gap` if either side is a gap, otherwise the matrix score.
///
/// ```
/// use trac::libs::cluster::similarity;
/// use trac::libs::table::SubMatrix;
/// let m = SubMatrix::blosum62();
/// assert_eq!(similarity(b"CCCC", b"CCC", &m, -2).unwrap(), 9 * 3 - 2);
/// assert_eq!(similarity(b"CC-C", b"CCCC", &m, -2).unwrap(), 9 * 3 - 2);
/// ```
pub fn similarity(a: &[u8], b: &[u8], matrix: &SubMatrix, gap: i32) -> Result<i32, TracError> {
    let len = a.len().max(b.len());
    let mut score = 0;
    for k in 0..len {
        let x = a.get(k).copied().unwrap_or(GAP);
        let y = b.get(k).copied().unwrap_or(GAP);
        if x == GAP || y == GAP {
            score += gap;
        } else {
            score += matrix.score(x, y)?;
        }
    }
    Ok(score)
}

/// Symmetric similarity scores for a collection.
///
/// A pair whose score cannot be computed is `None` and is never a neighbor.
pub struct SimilarityMatrix {
    size: usize,
    cells: Vec<Option<i32>>,
}

impl SimilarityMatrix {
    /// Scores each unordered pair once, on `parallel` threads.
    pub fn build<S>(
        seqs: &[S],
        matrix: &SubMatrix,
        gap: i32,
        parallel: usize,
    ) -> Result<(Self, Vec<PairFailure>), TracError>
    where
        S: AsRef<[u8]> + Sync,
    {
        let size = seqs.len();
        let mut pairs: Vec<(usize, usize)> = (0..size).map(|i| (i, i)).collect();
        pairs.extend(pair_index(size));

        let score_one = |&(i, j): &(usize, usize)| {
            (i, j, similarity(seqs[i].as_ref(), seqs[j].as_ref(), matrix, gap))
        };
        let scored: Vec<_> = if parallel <= 1 {
            pairs.iter().map(score_one).collect()
        } else {
            with_pool(parallel, || pairs.par_iter().map(score_one).collect::<Vec<_>>())?
        };

        let mut sim = Self {
            size,
            cells: vec![None; size * size],
        };
        let mut failures = vec![];
        for (i, j, result) in scored {
            match result {
                Ok(score) => {
                    sim.cells[i * size + j] = Some(score);
                    sim.cells[j * size + i] = Some(score);
                }
                Err(error) => {
                    if i != j {
                        log::warn!("Failed to score pair ({}, {}): {}", i, j, error);
                        failures.push(PairFailure { i, j, error });
                    }
                }
            }
        }

        Ok((sim, failures))
    }

    pub fn get(&self, i: usize, j: usize) -> Option<i32> {
        self.cells[i * self.size + j]
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

/// Density-based clustering over [`SimilarityMatrix`].
///
/// A point first labelled noise that lies in a core point's neighborhood is
/// later absorbed into that cluster as a border point. The original program
/// only relabelled unlabelled points, so its noise stayed noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dbscan {
    /// Minimum similarity for two sequences to be neighbors
    pub eps: i32,
    /// Minimum neighborhood size, the point itself included, of a core point
    pub min_points: usize,
}

impl Default for Dbscan {
    fn default() -> Self {
        Self {
            eps: DEFAULT_EPS,
            min_points: DEFAULT_MIN_POINTS,
        }
    }
}

#[derive(Debug, Default)]
pub struct ClusterReport {
    /// One label per input: cluster ids from 1, `-1` for noise
    pub labels: Vec<i32>,
    pub failures: Vec<PairFailure>,
}

impl ClusterReport {
    pub fn n_clusters(&self) -> usize {
        self.labels.iter().copied().max().unwrap_or(0).max(0) as usize
    }

    /// Member indices per cluster in ascending id order, then noise points as
    /// singletons.
    pub fn clusters(&self) -> Vec<Vec<usize>> {
        let mut groups = vec![vec![]; self.n_clusters()];
        let mut noise = vec![];
        for (idx, &label) in self.labels.iter().enumerate() {
            if label > 0 {
                groups[(label - 1) as usize].push(idx);
            } else {
                noise.push(vec![idx]);
            }
        }
        groups.extend(noise);
        groups
    }
}

impl Dbscan {
    pub fn new(eps: i32, min_points: usize) -> Result<Self, TracError> {
        if min_points < 1 {
            return Err(TracError::config("min_points must be at least 1"));
        }
        Ok(Self { eps, min_points })
    }

    /// Indices whose similarity to `p` is at least `eps`, ascending, `p` included.
    pub fn neighbors(&self, sim: &SimilarityMatrix, p: usize) -> Vec<usize> {
        (0..sim.len())
            .filter(|&q| matches!(sim.get(q, p), Some(s) if s >= self.eps))
            .collect()
    }

    /// Labels every sequence in `seqs`.
    pub fn run<S>(
        &self,
        seqs: &[S],
        matrix: &SubMatrix,
        gap: i32,
        parallel: usize,
    ) -> Result<ClusterReport, TracError>
    where
        S: AsRef<[u8]> + Sync,
    {
        let (sim, failures) = SimilarityMatrix::build(seqs, matrix, gap, parallel)?;
        let labels = self.labels(&sim);
        log::info!(
            "DBSCAN eps={} min_points={}: {} sequences",
            self.eps,
            self.min_points,
            labels.len()
        );
        Ok(ClusterReport { labels, failures })
    }

    /// Clusters a precomputed similarity matrix.
    pub fn labels(&self, sim: &SimilarityMatrix) -> Vec<i32> {
        let n = sim.len();
        let mut visited = vec![false; n];
        let mut labels = vec![0i32; n];
        let mut cluster = 0;

        for p in 0..n {
            if visited[p] {
                continue;
            }
            visited[p] = true;

            let neighbors = self.neighbors(sim, p);
            if neighbors.len() < self.min_points {
                labels[p] = NOISE;
                continue;
            }

            cluster += 1;
            labels[p] = cluster;

            let mut seeds: VecDeque<usize> = neighbors.into();
            while let Some(q) = seeds.pop_front() {
                if !visited[q] {
                    visited[q] = true;
                    let expansion = self.neighbors(sim, q);
                    if expansion.len() >= self.min_points {
                        seeds.extend(expansion);
                    }
                }
                // unlabelled or noise: becomes a member, possibly a border point
                if labels[q] <= 0 {
                    labels[q] = cluster;
                }
            }
        }

        labels
    }
}
