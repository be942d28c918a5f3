use super::GAP;
use crate::libs::error::TracError;

/// Largest accepted insertion/deletion or substitution cost, keeping DP costs
/// within `u32`.
pub const MAX_EDIT_COST: u32 = 1 << 10;

/// Costs for the edit-distance alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditCosts {
    /// Cost of one insertion or deletion
    pub indel: u32,
    /// Cost of replacing one symbol by another
    pub substitution: u32,
}

impl Default for EditCosts {
    fn default() -> Self {
        Self {
            indel: 1,
            substitution: 2,
        }
    }
}

impl EditCosts {
    pub fn new(indel: u32, substitution: u32) -> Result<Self, TracError> {
        if indel == 0 {
            return Err(TracError::config("insertion/deletion cost must be positive"));
        }
        if indel > MAX_EDIT_COST || substitution > MAX_EDIT_COST {
            return Err(TracError::config(format!(
                "edit costs must not exceed {}, got indel {} and substitution {}",
                MAX_EDIT_COST, indel, substitution
            )));
        }
        Ok(Self {
            indel,
            substitution,
        })
    }
}

/// A minimum-cost alignment of two raw sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditAlignment {
    /// Aligned form of the longer operand
    pub first: String,
    /// Aligned form of the shorter operand
    pub second: String,
    pub cost: u32,
    /// `true` when the operands were swapped, i.e. `first` holds the caller's `b`
    pub swapped: bool,
}

/// Aligns `a` and `b` with unit-style costs and no substitution matrix.
///
/// The longer operand always ends up in `first`; when `b` is strictly longer
/// than `a` the two are swapped and `swapped` is set.
///
/// ```
/// use trac::libs::align::{edit, EditCosts};
/// let aln = edit::align(b"CCC", b"CCCC", EditCosts::default());
/// assert!(aln.swapped);
/// assert_eq!(aln.first, "CCCC");
/// assert_eq!(aln.cost, 1);
/// ```
pub fn align(a: &[u8], b: &[u8], costs: EditCosts) -> EditAlignment {
    let (a, b, swapped) = if a.len() < b.len() {
        (b, a, true)
    } else {
        (a, b, false)
    };

    let (n, m) = (a.len(), b.len());
    let width = m + 1;
    let mut d = vec![0u32; (n + 1) * width];
    for i in 0..=n {
        d[i * width] = i as u32 * costs.indel;
    }
    for j in 0..=m {
        d[j] = j as u32 * costs.indel;
    }

    let sub = |x: u8, y: u8| if x == y { 0 } else { costs.substitution };

    for i in 1..=n {
        for j in 1..=m {
            let diag = d[(i - 1) * width + j - 1] + sub(a[i - 1], b[j - 1]);
            let up = d[(i - 1) * width + j] + costs.indel;
            let left = d[i * width + j - 1] + costs.indel;
            d[i * width + j] = diag.min(up).min(left);
        }
    }

    let mut out_a = Vec::with_capacity(n + m);
    let mut out_b = Vec::with_capacity(n + m);
    let (mut i, mut j) = (n, m);
    while i > 0 || j > 0 {
        let here = d[i * width + j];
        if i > 0 && j > 0 && here == d[(i - 1) * width + j - 1] + sub(a[i - 1], b[j - 1]) {
            out_a.push(a[i - 1]);
            out_b.push(b[j - 1]);
            i -= 1;
            j -= 1;
        } else if i > 0 && here == d[(i - 1) * width + j] + costs.indel {
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

    EditAlignment {
        first: String::from_utf8_lossy(&out_a).to_string(),
        second: String::from_utf8_lossy(&out_b).to_string(),
        cost: d[n * width + m],
        swapped,
    }
}
