//! Multi-frame codon translation.

use crate::libs::error::{SeqFailure, TracError};
use crate::libs::seq::NtSeq;
use crate::libs::table::CodonTable;

/// What to do with the 1-2 symbols left over after the last whole codon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapIncompleteCodon {
    /// Linear reading frame: trailing symbols are dropped.
    #[default]
    Discard,
    /// Circular sequence: the last partial codon is completed from the start.
    Wrap,
}

impl WrapIncompleteCodon {
    pub fn from_flag(wrap: bool) -> Self {
        if wrap {
            Self::Wrap
        } else {
            Self::Discard
        }
    }
}

/// A translated sequence and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProteinSeq {
    /// Index of the source nucleotide sequence
    pub source: usize,
    pub name: String,
    pub frame: usize,
    pub seq: String,
}

impl ProteinSeq {
    /// `name` for frame 0, `name_f1` / `name_f2` for the shifted frames.
    pub fn label(&self) -> String {
        if self.frame == 0 {
            self.name.clone()
        } else {
            format!("{}_f{}", self.name, self.frame)
        }
    }
}

pub struct Translator<'a> {
    table: &'a CodonTable,
    wrap: WrapIncompleteCodon,
}

impl<'a> Translator<'a> {
    pub fn new(table: &'a CodonTable, wrap: WrapIncompleteCodon) -> Self {
        Self { table, wrap }
    }

    /// Translates `nt` starting at offset `frame`.
    ///
    /// ```
    /// use trac::libs::table::CodonTable;
    /// use trac::libs::translate::{Translator, WrapIncompleteCodon};
    ///
    /// let table = CodonTable::parse("TGT\tC\n").unwrap();
    /// let translator = Translator::new(&table, WrapIncompleteCodon::Discard);
    /// assert_eq!(translator.translate(b"TGTTGTTGTTGT", 0).unwrap(), "CCCC");
    /// ```
    pub fn translate(&self, nt: &[u8], frame: usize) -> Result<String, TracError> {
        if frame > 2 {
            return Err(TracError::config(format!(
                "reading frame must be 0, 1 or 2, got {}",
                frame
            )));
        }

        let len = nt.len();
        let mut protein = String::with_capacity(len / 3 + 1);

        let mut offset = frame;
        loop {
            let codon: [u8; 3] = match self.wrap {
                WrapIncompleteCodon::Discard => {
                    if offset + 3 > len {
                        break;
                    }
                    [nt[offset], nt[offset + 1], nt[offset + 2]]
                }
                WrapIncompleteCodon::Wrap => {
                    if offset >= len {
                        break;
                    }
                    [nt[offset], nt[(offset + 1) % len], nt[(offset + 2) % len]]
                }
            };

            match self.table.get(&codon) {
                Some(amino) => protein.push(amino as char),
                None => {
                    return Err(TracError::Translation {
                        codon: String::from_utf8_lossy(&codon).to_string(),
                        offset,
                    })
                }
            }
            offset += 3;
        }

        Ok(protein)
    }

    /// All three frames, in frame order.
    pub fn translate_all_frames(&self, nt: &[u8]) -> Result<[String; 3], TracError> {
        Ok([
            self.translate(nt, 0)?,
            self.translate(nt, 1)?,
            self.translate(nt, 2)?,
        ])
    }

    /// Translates every sequence under each of `frames`.
    ///
    /// Proteins come out in input order, frames ascending within a sequence.
    /// A failing sequence/frame is reported and skipped; the rest continue.
    pub fn translate_records(
        &self,
        seqs: &[NtSeq],
        frames: &[usize],
    ) -> (Vec<ProteinSeq>, Vec<SeqFailure>) {
        let mut proteins = vec![];
        let mut failures = vec![];

        for (index, nt) in seqs.iter().enumerate() {
            for &frame in frames {
                match self.translate(nt.seq.as_bytes(), frame) {
                    Ok(seq) => proteins.push(ProteinSeq {
                        source: index,
                        name: nt.name.clone(),
                        frame,
                        seq,
                    }),
                    Err(error) => {
                        log::warn!(
                            "Failed to translate {} (#{}) frame {}: {}",
                            nt.name,
                            index,
                            frame,
                            error
                        );
                        failures.push(SeqFailure {
                            index,
                            name: nt.name.clone(),
                            frame,
                            error,
                        })
                    }
                }
            }
        }

        (proteins, failures)
    }
}
