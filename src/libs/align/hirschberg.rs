use super::nw::{last_row, NeedlemanWunsch};
use super::{check_input, column_score, AlignParams, Alignment, PairAligner, GAP};
use crate::libs::error::TracError;
use crate::libs::table::SubMatrix;

/// Linear-space global alignment (Hirschberg, 1975).
///
/// Splits `a` in half at every level, so the recursion depth is
/// `ceil(log2(len(a)))`.
#[derive(Debug, Clone, Copy)]
pub struct Hirschberg<'a> {
    matrix: &'a SubMatrix,
    params: AlignParams,
}

impl<'a> Hirschberg<'a> {
    pub fn new(matrix: &'a SubMatrix, params: AlignParams) -> Self {
        Self { matrix, params }
    }

    fn recurse(&self, a: &[u8], b: &[u8], out_a: &mut Vec<u8>, out_b: &mut Vec<u8>) {
        if a.is_empty() || b.is_empty() {
            out_a.extend(a.iter().copied().chain(std::iter::repeat(GAP).take(b.len())));
            out_b.extend(std::iter::repeat(GAP).take(a.len()).chain(b.iter().copied()));
        } else if a.len() == 1 || b.len() == 1 {
            let (za, zb, _) = NeedlemanWunsch::new(self.matrix, self.params).align_checked(a, b);
            out_a.extend(za);
            out_b.extend(zb);
        } else {
            let mid_a = a.len() / 2;
            let (a_left, a_right) = a.split_at(mid_a);

            let score_l = last_row(a_left, b, self.matrix, self.params.gap);
            let a_rev: Vec<u8> = a_right.iter().rev().copied().collect();
            let b_rev: Vec<u8> = b.iter().rev().copied().collect();
            let score_r = last_row(&a_rev, &b_rev, self.matrix, self.params.gap);

            let mid_b = partition(&score_l, &score_r);
            let (b_left, b_right) = b.split_at(mid_b);

            self.recurse(a_left, b_left, out_a, out_b);
            self.recurse(a_right, b_right, out_a, out_b);
        }
    }
}

/// Split point in `b`: the `i` maximizing `score_l[i] + score_r[len - 1 - i]`.
///
/// Scanning uses `>=`, so the highest index among equal sums is returned.
pub fn partition(score_l: &[i32], score_r: &[i32]) -> usize {
    let len = score_l.len();
    let mut max_sum = i32::MIN;
    let mut index = 0;
    for i in 0..len {
        let sum = score_l[i] + score_r[len - 1 - i];
        if sum >= max_sum {
            max_sum = sum;
            index = i;
        }
    }
    index
}

impl PairAligner for Hirschberg<'_> {
    fn align(&self, a: &[u8], b: &[u8]) -> Result<Alignment, TracError> {
        check_input(a, self.matrix)?;
        check_input(b, self.matrix)?;

        let mut out_a = Vec::with_capacity(a.len() + b.len());
        let mut out_b = Vec::with_capacity(a.len() + b.len());
        self.recurse(a, b, &mut out_a, &mut out_b);

        let score = column_score(&out_a, &out_b, self.matrix, self.params.gap);
        Ok(Alignment::from_columns(out_a, out_b, score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::align::ungap;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    const AMINO: &[u8] = b"ARNDCQEGHILKMFPSTWYV";

    fn random_protein(rng: &mut SmallRng, len: usize) -> Vec<u8> {
        (0..len).map(|_| AMINO[rng.gen_range(0..AMINO.len())]).collect()
    }

    #[test]
    fn test_partition_ties() {
        // sums: 12, 25, 25, 12
        assert_eq!(partition(&[-4, 7, 18, 16], &[-4, 7, 18, 16]), 2);
        assert_eq!(partition(&[0], &[0]), 0);
        assert_eq!(partition(&[5, 1, 0], &[0, 0, 0]), 0);
    }

    #[test]
    fn test_matches_full_dp() {
        let m = SubMatrix::blosum62();
        let params = AlignParams::default();
        let full = NeedlemanWunsch::new(&m, params);
        let linear = Hirschberg::new(&m, params);

        let pairs: Vec<(&str, &str)> = vec![
            ("", ""),
            ("", "MKV"),
            ("MKV", ""),
            ("C", "C"),
            ("C", "MKVCL"),
            ("MKVCL", "W"),
            ("CCCC", "CCC"),
            ("HEAGAWGHEE", "PAWHEAE"),
            ("MKTAYIAKQRQISFVKSHFSRQLEERLGLIEVQAPILSRVGDGTQDNLSGAEKAVQVKVKALPDAQ",
             "MKTAYIAKQRQISFVKSHFSRQDILDLWIYHTQGYFPDWQNYTPGPGVRYPLTFGWCYKL"),
        ];
        for (a, b) in pairs {
            let x = full.align(a.as_bytes(), b.as_bytes()).unwrap();
            let y = linear.align(a.as_bytes(), b.as_bytes()).unwrap();
            assert_eq!(x.score, y.score, "{} / {}", a, b);
            assert_eq!(ungap(&y.first), a);
            assert_eq!(ungap(&y.second), b);
            assert_eq!(y.first.len(), y.second.len());
        }
    }

    #[test]
    fn test_random_pairs() {
        let m = SubMatrix::blosum62();
        let params = AlignParams::new(-4).unwrap();
        let full = NeedlemanWunsch::new(&m, params);
        let linear = Hirschberg::new(&m, params);
        let mut rng = SmallRng::seed_from_u64(42);

        for _ in 0..50 {
            let la = rng.gen_range(0..40);
            let lb = rng.gen_range(0..40);
            let a = random_protein(&mut rng, la);
            let b = random_protein(&mut rng, lb);

            let x = full.align(&a, &b).unwrap();
            let y = linear.align(&a, &b).unwrap();
            assert_eq!(x.score, y.score);
            assert_eq!(linear.align(&b, &a).unwrap().score, y.score);
            assert!(y
                .first
                .bytes()
                .zip(y.second.bytes())
                .all(|(p, q)| !(p == GAP && q == GAP)));
        }
    }

    #[test]
    fn test_unknown_symbol() {
        let m = SubMatrix::blosum62();
        let res = Hirschberg::new(&m, AlignParams::default()).align(b"CC", b"C-C");
        assert!(matches!(res, Err(TracError::UnknownSymbol { symbol: '-' })));
    }
}
