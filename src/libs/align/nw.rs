use super::{check_input, AlignParams, Alignment, PairAligner, GAP};
use crate::libs::error::TracError;
use crate::libs::table::SubMatrix;

/// Full `(n+1) x (m+1)` score matrix, row-major.
pub struct ScoreMatrix {
    cells: Vec<i32>,
    width: usize,
}

impl ScoreMatrix {
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> i32 {
        self.cells[i * self.width + j]
    }

    #[inline]
    fn set(&mut self, i: usize, j: usize, v: i32) {
        self.cells[i * self.width + j] = v;
    }
}

/// Fills the Needleman-Wunsch matrix. Symbols must already be checked
/// against `matrix`.
pub fn score_matrix(a: &[u8], b: &[u8], matrix: &SubMatrix, gap: i32) -> ScoreMatrix {
    let (n, m) = (a.len(), b.len());
    let mut s = ScoreMatrix {
        cells: vec![0; (n + 1) * (m + 1)],
        width: m + 1,
    };

    for i in 0..=n {
        s.set(i, 0, i as i32 * gap);
    }
    for j in 0..=m {
        s.set(0, j, j as i32 * gap);
    }

    for i in 1..=n {
        let x = a[i - 1];
        for j in 1..=m {
            let diag = s.get(i - 1, j - 1) + matrix.get(x, b[j - 1]);
            let up = s.get(i - 1, j) + gap;
            let left = s.get(i, j - 1) + gap;
            s.set(i, j, diag.max(up).max(left));
        }
    }

    s
}

/// The last row of the score matrix, `S[n][0..=m]`, kept in two rows of memory.
pub fn last_row(a: &[u8], b: &[u8], matrix: &SubMatrix, gap: i32) -> Vec<i32> {
    let m = b.len();
    let mut prev: Vec<i32> = (0..=m).map(|j| j as i32 * gap).collect();
    let mut curr = vec![0; m + 1];

    for (i, &x) in a.iter().enumerate() {
        curr[0] = (i as i32 + 1) * gap;
        for j in 1..=m {
            let diag = prev[j - 1] + matrix.get(x, b[j - 1]);
            let up = prev[j] + gap;
            let left = curr[j - 1] + gap;
            curr[j] = diag.max(up).max(left);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev
}

/// Walks back from `(n, m)` to `(0, 0)`.
///
/// Ties go to the diagonal first, then up (gap in `b`), then left (gap in
/// `a`). Returns the aligned columns.
pub fn traceback(
    a: &[u8],
    b: &[u8],
    s: &ScoreMatrix,
    matrix: &SubMatrix,
    gap: i32,
) -> (Vec<u8>, Vec<u8>) {
    let mut out_a = Vec::with_capacity(a.len() + b.len());
    let mut out_b = Vec::with_capacity(a.len() + b.len());

    let (mut i, mut j) = (a.len(), b.len());
    while i > 0 || j > 0 {
        let here = s.get(i, j);
        if i > 0 && j > 0 && here == s.get(i - 1, j - 1) + matrix.get(a[i - 1], b[j - 1]) {
            out_a.push(a[i - 1]);
            out_b.push(b[j - 1]);
            i -= 1;
            j -= 1;
        } else if i > 0 && here == s.get(i - 1, j) + gap {
            out_a.push(a[i - 1]);
            out_b.push(GAP);
            i -= 1;
        } else {
            out_a.push(GAP);
            out_b.push(b[j - 1]);
            j -= 1;
        }
    }

    out_a.reverse();
    out_b.reverse();
    (out_a, out_b)
}

/// Quadratic-space global alignment.
#[derive(Debug, Clone, Copy)]
pub struct NeedlemanWunsch<'a> {
    matrix: &'a SubMatrix,
    params: AlignParams,
}

impl<'a> NeedlemanWunsch<'a> {
    pub fn new(matrix: &'a SubMatrix, params: AlignParams) -> Self {
        Self { matrix, params }
    }

    /// Alignment of already validated input.
    pub(crate) fn align_checked(&self, a: &[u8], b: &[u8]) -> (Vec<u8>, Vec<u8>, i32) {
        let s = score_matrix(a, b, self.matrix, self.params.gap);
        let (out_a, out_b) = traceback(a, b, &s, self.matrix, self.params.gap);
        (out_a, out_b, s.get(a.len(), b.len()))
    }
}

impl PairAligner for NeedlemanWunsch<'_> {
    fn align(&self, a: &[u8], b: &[u8]) -> Result<Alignment, TracError> {
        check_input(a, self.matrix)?;
        check_input(b, self.matrix)?;

        let (out_a, out_b, score) = self.align_checked(a, b);
        Ok(Alignment::from_columns(out_a, out_b, score))
    }
}
