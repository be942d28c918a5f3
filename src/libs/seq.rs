use std::io::Cursor;

use crate::libs::error::TracError;

/// A nucleotide sequence extracted from a larger source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NtSeq {
    pub name: String,
    pub seq: String,
    /// Byte offsets `[begin, end)` in the source text, when the source is plain text
    pub span: Option<(usize, usize)>,
}

impl NtSeq {
    pub fn new(name: &str, seq: &str) -> Self {
        Self {
            name: name.to_string(),
            seq: seq.to_ascii_uppercase(),
            span: None,
        }
    }

    pub fn len(&self) -> usize {
        self.seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }
}

/// Extracts sequences from `text`.
///
/// FASTA is recognized by a leading `>`; anything else is treated as
/// whitespace-delimited sequences named `seq1`, `seq2`, ... in order.
///
/// ```
/// let seqs = trac::libs::seq::parse_sequences("tgttgt  ACG\nTTT\n").unwrap();
/// assert_eq!(seqs.len(), 3);
/// assert_eq!(seqs[0].seq, "TGTTGT");
/// assert_eq!(seqs[0].span, Some((0, 6)));
/// assert_eq!(seqs[2].name, "seq3");
/// ```
pub fn parse_sequences(text: &str) -> Result<Vec<NtSeq>, TracError> {
    if text.trim_start().starts_with('>') {
        parse_fasta(text)
    } else {
        Ok(parse_plain(text))
    }
}

fn parse_plain(text: &str) -> Vec<NtSeq> {
    let mut seqs = vec![];
    let mut begin: Option<usize> = None;

    // A trailing space closes the last token
    for (i, ch) in text.char_indices().chain(std::iter::once((text.len(), ' '))) {
        match (ch.is_whitespace(), begin) {
            (false, None) => begin = Some(i),
            (true, Some(b)) => {
                seqs.push(NtSeq {
                    name: format!("seq{}", seqs.len() + 1),
                    seq: text[b..i].to_ascii_uppercase(),
                    span: Some((b, i)),
                });
                begin = None;
            }
            _ => {}
        }
    }

    seqs
}

fn parse_fasta(text: &str) -> Result<Vec<NtSeq>, TracError> {
    let mut fa_in = noodles_fasta::io::Reader::new(Cursor::new(text.as_bytes()));

    let mut seqs = vec![];
    for result in fa_in.records() {
        let record = result?;
        let name = String::from_utf8_lossy(record.name()).to_string();
        let seq = String::from_utf8_lossy(record.sequence().as_ref()).to_string();
        seqs.push(NtSeq::new(&name, &seq));
    }

    Ok(seqs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_offsets() {
        let text = "TGTTGTTGTTGT\n  TGTTGTTGT \n";
        let seqs = parse_sequences(text).unwrap();
        assert_eq!(seqs.len(), 2);
        assert_eq!(seqs[0].span, Some((0, 12)));
        assert_eq!(seqs[1].span, Some((15, 24)));
        assert_eq!(&text[15..24], "TGTTGTTGT");
        assert_eq!(seqs[1].name, "seq2");
    }

    #[test]
    fn test_parse_plain_empty() {
        assert!(parse_sequences("").unwrap().is_empty());
        assert!(parse_sequences(" \n\t").unwrap().is_empty());
    }

    #[test]
    fn test_parse_fasta() {
        let seqs = parse_sequences(">s1 first\nTGTTGT\ntgt\n>s2\nACG\n").unwrap();
        assert_eq!(seqs.len(), 2);
        assert_eq!(seqs[0].name, "s1");
        assert_eq!(seqs[0].seq, "TGTTGTTGT");
        assert_eq!(seqs[0].span, None);
        assert_eq!(seqs[1].seq, "ACG");
    }
}
