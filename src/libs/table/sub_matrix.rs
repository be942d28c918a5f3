use super::data_lines;
use crate::libs::error::TracError;

const BLOSUM62: &str = include_str!("../../../data/blosum62.tsv");

/// An amino-acid substitution matrix for sequence alignment scoring.
///
/// Stores scores for all pairs of bytes (256x256) and which bytes belong to
/// the alphabet. Lower-case symbols score like their upper-case forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubMatrix {
    matrix: Vec<i32>,
    known: Vec<bool>,
    alphabet: Vec<u8>,
}

impl SubMatrix {
    /// BLOSUM62 over `ARNDCQEGHILKMFPSTWYVBZX*`.
    pub fn blosum62() -> Self {
        Self::parse(BLOSUM62).expect("built-in BLOSUM62")
    }

    /// Load from name (preset) or file.
    pub fn from_name(name: &str) -> Result<Self, TracError> {
        match name.to_lowercase().as_str() {
            "blosum62" => Ok(Self::blosum62()),
            _ => Self::from_file(name),
        }
    }

    pub fn from_file(path: &str) -> Result<Self, TracError> {
        let text = crate::libs::io::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parses a square matrix.
    ///
    /// The first line lists the column symbols. Each following line holds one
    /// score per column, optionally preceded by the row symbol; rows appear in
    /// header order. Fields are separated by tabs or spaces, `#` starts a
    /// comment line.
    ///
    /// ```
    /// use trac::libs::table::SubMatrix;
    /// let labelled = SubMatrix::parse("C\tS\nC\t9\t-1\nS\t-1\t4\n").unwrap();
    /// let bare = SubMatrix::parse("C\tS\n9\t-1\n-1\t4\n").unwrap();
    /// assert_eq!(labelled, bare);
    /// assert_eq!(labelled.score(b'C', b'S').unwrap(), -1);
    /// assert_eq!(labelled.score(b's', b's').unwrap(), 4);
    /// ```
    pub fn parse(text: &str) -> Result<Self, TracError> {
        let mut lines = data_lines(text);

        let (header_line, header) = lines
            .next()
            .ok_or_else(|| TracError::malformed(0, "empty substitution matrix"))?;
        let symbols: Vec<u8> = header
            .split_whitespace()
            .map(|s| match s.as_bytes() {
                [b] => Ok(b.to_ascii_uppercase()),
                _ => Err(TracError::malformed(
                    header_line,
                    format!("header field {:?} is not one symbol", s),
                )),
            })
            .collect::<Result<_, _>>()?;
        if symbols.is_empty() {
            return Err(TracError::malformed(header_line, "header lists no symbols"));
        }
        for (i, s) in symbols.iter().enumerate() {
            if symbols[..i].contains(s) {
                return Err(TracError::malformed(
                    header_line,
                    format!("symbol {} appears twice in header", *s as char),
                ));
            }
        }

        let n = symbols.len();
        let mut m = Self {
            matrix: vec![0; 256 * 256],
            known: vec![false; 256],
            alphabet: symbols.clone(),
        };
        for &s in &symbols {
            m.known[s as usize] = true;
            m.known[s.to_ascii_lowercase() as usize] = true;
        }

        let mut rows_read = 0;
        for (lineno, line) in lines {
            if rows_read == n {
                return Err(TracError::malformed(
                    lineno,
                    format!("more rows than the {} header columns", n),
                ));
            }
            let row_char = symbols[rows_read];
            let parts: Vec<&str> = line.split_whitespace().collect();

            let values = if parts.len() == n + 1 {
                let label = parts[0].as_bytes();
                if label.len() != 1 || label[0].to_ascii_uppercase() != row_char {
                    return Err(TracError::malformed(
                        lineno,
                        format!("expected row {}, found {:?}", row_char as char, parts[0]),
                    ));
                }
                &parts[1..]
            } else if parts.len() == n {
                &parts[..]
            } else {
                return Err(TracError::malformed(
                    lineno,
                    format!(
                        "row {} has {} fields for {} columns",
                        row_char as char,
                        parts.len(),
                        n
                    ),
                ));
            };

            for (j, value) in values.iter().enumerate() {
                let score = value.parse::<i32>().map_err(|_| {
                    TracError::malformed(lineno, format!("score {:?} is not an integer", value))
                })?;
                m.set(row_char, symbols[j], score);
            }
            rows_read += 1;
        }

        if rows_read != n {
            return Err(TracError::malformed(
                text.lines().count(),
                format!("{} rows for {} columns", rows_read, n),
            ));
        }

        for (i, &a) in symbols.iter().enumerate() {
            for &b in &symbols[i + 1..] {
                if m.get(a, b) != m.get(b, a) {
                    return Err(TracError::malformed(
                        0,
                        format!(
                            "asymmetric scores {}/{} = {} but {}/{} = {}",
                            a as char,
                            b as char,
                            m.get(a, b),
                            b as char,
                            a as char,
                            m.get(b, a)
                        ),
                    ));
                }
            }
        }

        Ok(m)
    }

    // Fill all case combinations
    fn set(&mut self, r: u8, c: u8, score: i32) {
        let rows = [r, r.to_ascii_lowercase()];
        let cols = [c, c.to_ascii_lowercase()];
        for &r in &rows {
            for &c in &cols {
                self.matrix[(r as usize) * 256 + (c as usize)] = score;
            }
        }
    }

    /// Score without membership checks; symbols outside the alphabet score 0.
    #[inline]
    pub fn get(&self, c1: u8, c2: u8) -> i32 {
        self.matrix[(c1 as usize) * 256 + (c2 as usize)]
    }

    /// Get the substitution score for two symbols.
    pub fn score(&self, c1: u8, c2: u8) -> Result<i32, TracError> {
        self.check(c1)?;
        self.check(c2)?;
        Ok(self.get(c1, c2))
    }

    pub fn contains(&self, c: u8) -> bool {
        self.known[c as usize]
    }

    pub fn check(&self, c: u8) -> Result<(), TracError> {
        if self.contains(c) {
            Ok(())
        } else {
            Err(TracError::UnknownSymbol { symbol: c as char })
        }
    }

    /// Fails on the first symbol of `seq` outside the alphabet.
    pub fn check_seq(&self, seq: &[u8]) -> Result<(), TracError> {
        seq.iter().try_for_each(|&c| self.check(c))
    }

    /// Symbols in header order.
    pub fn alphabet(&self) -> &[u8] {
        &self.alphabet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blosum62() {
        let m = SubMatrix::blosum62();
        assert_eq!(m.alphabet().len(), 24);
        assert_eq!(m.get(b'C', b'C'), 9);
        assert_eq!(m.get(b'W', b'W'), 11);
        assert_eq!(m.get(b'A', b'R'), -1);
        assert_eq!(m.get(b'*', b'*'), 1);
        assert_eq!(m.get(b'*', b'A'), -4);
        assert_eq!(m.get(b'c', b'C'), 9);
        for &a in m.alphabet() {
            for &b in m.alphabet() {
                assert_eq!(m.get(a, b), m.get(b, a));
            }
        }
    }

    #[test]
    fn test_unknown_symbol() {
        let m = SubMatrix::blosum62();
        assert!(m.score(b'A', b'A').is_ok());
        assert!(matches!(
            m.score(b'A', b'J'),
            Err(TracError::UnknownSymbol { symbol: 'J' })
        ));
        assert!(matches!(
            m.check_seq(b"CCOC"),
            Err(TracError::UnknownSymbol { symbol: 'O' })
        ));
        assert!(!m.contains(b'-'));
    }

    #[test]
    fn test_row_count_mismatch() {
        let err = SubMatrix::parse("A\tC\nA\t4\t0\n").unwrap_err();
        assert!(matches!(err, TracError::MalformedTable { .. }));

        let err = SubMatrix::parse("A\tC\n4\t0\n0\t9\n1\t1\n").unwrap_err();
        assert!(matches!(err, TracError::MalformedTable { line: 4, .. }));
    }

    #[test]
    fn test_ragged_row() {
        let err = SubMatrix::parse("A\tC\nA\t4\t0\nC\t0\n").unwrap_err();
        assert!(matches!(err, TracError::MalformedTable { line: 3, .. }));
    }

    #[test]
    fn test_bad_values() {
        let err = SubMatrix::parse("A\tC\nA\t4\tx\nC\t0\t9\n").unwrap_err();
        assert!(matches!(err, TracError::MalformedTable { line: 2, .. }));

        // row label out of header order
        let err = SubMatrix::parse("A\tC\nC\t4\t0\nA\t0\t9\n").unwrap_err();
        assert!(matches!(err, TracError::MalformedTable { line: 2, .. }));

        let err = SubMatrix::parse("AB\tC\n").unwrap_err();
        assert!(matches!(err, TracError::MalformedTable { line: 1, .. }));

        assert!(SubMatrix::parse("").is_err());
    }

    #[test]
    fn test_asymmetric() {
        let err = SubMatrix::parse("A\tC\n4\t1\n0\t9\n").unwrap_err();
        assert!(matches!(err, TracError::MalformedTable { .. }));
    }
}
