use indexmap::IndexMap;

use super::data_lines;
use crate::libs::error::TracError;

const STANDARD: &str = include_str!("../../../data/codon_standard.tsv");

/// Stop marker used by the built-in table.
pub const STOP: u8 = b'*';

/// Codon to amino-acid mapping.
///
/// Keys are upper-case three-symbol codons. Lookups never fall back to a
/// default: an absent codon is reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodonTable {
    map: IndexMap<[u8; 3], u8>,
}

impl CodonTable {
    /// NCBI translation table 1.
    pub fn standard() -> Self {
        Self::parse(STANDARD).expect("built-in codon table")
    }

    /// Load from name (preset) or file.
    pub fn from_name(name: &str) -> Result<Self, TracError> {
        match name.to_lowercase().as_str() {
            "standard" => Ok(Self::standard()),
            _ => Self::from_file(name),
        }
    }

    pub fn from_file(path: &str) -> Result<Self, TracError> {
        let text = crate::libs::io::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parses `codon<TAB>amino` lines.
    ///
    /// ```
    /// let table = trac::libs::table::CodonTable::parse("TGT\tC\ntaa\t*\n").unwrap();
    /// assert_eq!(table.get(b"TGT"), Some(b'C'));
    /// assert_eq!(table.get(b"tgt"), Some(b'C'));
    /// assert_eq!(table.get(b"TAA"), Some(b'*'));
    /// assert_eq!(table.get(b"AAA"), None);
    /// ```
    pub fn parse(text: &str) -> Result<Self, TracError> {
        let mut map = IndexMap::new();

        for (lineno, line) in data_lines(text) {
            let fields: Vec<&str> = line.trim().split('\t').map(str::trim).collect();
            if fields.len() != 2 {
                return Err(TracError::malformed(
                    lineno,
                    format!("expected 2 tab-separated fields, found {}", fields.len()),
                ));
            }

            let codon = fields[0].as_bytes();
            if codon.len() != 3 {
                return Err(TracError::malformed(
                    lineno,
                    format!("codon {:?} is not three symbols", fields[0]),
                ));
            }
            let amino = fields[1].as_bytes();
            if amino.len() != 1 {
                return Err(TracError::malformed(
                    lineno,
                    format!("amino acid {:?} is not one symbol", fields[1]),
                ));
            }

            let key = [
                codon[0].to_ascii_uppercase(),
                codon[1].to_ascii_uppercase(),
                codon[2].to_ascii_uppercase(),
            ];
            let value = amino[0].to_ascii_uppercase();
            if let Some(prev) = map.insert(key, value) {
                if prev != value {
                    return Err(TracError::malformed(
                        lineno,
                        format!(
                            "codon {:?} maps to both {} and {}",
                            fields[0], prev as char, value as char
                        ),
                    ));
                }
            }
        }

        Ok(Self { map })
    }

    pub fn get(&self, codon: &[u8]) -> Option<u8> {
        if codon.len() != 3 {
            return None;
        }
        let key = [
            codon[0].to_ascii_uppercase(),
            codon[1].to_ascii_uppercase(),
            codon[2].to_ascii_uppercase(),
        ];
        self.map.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Whether all 64 codons over ACGT are present.
    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }

    /// Codons over ACGT that have no entry, in lexicographic order.
    pub fn missing(&self) -> Vec<String> {
        let bases = b"ACGT";
        let mut missing = vec![];
        for &a in bases {
            for &b in bases {
                for &c in bases {
                    if !self.map.contains_key(&[a, b, c]) {
                        missing.push(String::from_utf8_lossy(&[a, b, c]).to_string());
                    }
                }
            }
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_is_complete() {
        let table = CodonTable::standard();
        assert_eq!(table.len(), 64);
        assert!(table.is_complete());
        assert_eq!(table.get(b"ATG"), Some(b'M'));
        assert_eq!(table.get(b"TGT"), Some(b'C'));
        assert_eq!(table.get(b"TGA"), Some(STOP));
        assert_eq!(table.get(b"TAG"), Some(STOP));
        assert_eq!(table.get(b"GGG"), Some(b'G'));
    }

    #[test]
    fn test_partial_table() {
        let table = CodonTable::parse("# partial\nTGT\tC\n\nTGC\tC\n").unwrap();
        assert_eq!(table.len(), 2);
        assert!(!table.is_complete());
        assert_eq!(table.missing().len(), 62);
        assert_eq!(table.get(b"TG"), None);
    }

    #[test]
    fn test_malformed_lines() {
        let err = CodonTable::parse("TGT\tC\nTGC\n").unwrap_err();
        assert!(matches!(err, TracError::MalformedTable { line: 2, .. }));

        let err = CodonTable::parse("TGT\tC\textra\n").unwrap_err();
        assert!(matches!(err, TracError::MalformedTable { line: 1, .. }));

        let err = CodonTable::parse("TG\tC\n").unwrap_err();
        assert!(matches!(err, TracError::MalformedTable { line: 1, .. }));

        let err = CodonTable::parse("TGT\tCys\n").unwrap_err();
        assert!(matches!(err, TracError::MalformedTable { line: 1, .. }));
    }

    #[test]
    fn test_conflicting_duplicate() {
        assert!(CodonTable::parse("TGT\tC\nTGT\tC\n").is_ok());
        let err = CodonTable::parse("TGT\tC\ntgt\tW\n").unwrap_err();
        assert!(matches!(err, TracError::MalformedTable { line: 2, .. }));
    }

    #[test]
    fn test_from_name() {
        assert_eq!(CodonTable::from_name("Standard").unwrap(), CodonTable::standard());
        assert!(matches!(
            CodonTable::from_name("no/such/table.tsv").unwrap_err(),
            TracError::Io(_)
        ));
    }
}
