use std::io::{BufRead, BufReader, BufWriter, Read, Write};

use crate::libs::error::TracError;

/// Opens `input` for buffered reading. `stdin` reads standard input; a `.gz`
/// extension is decompressed transparently.
///
/// ```
/// use std::io::BufRead;
/// let dir = tempfile::tempdir().unwrap();
/// let path = dir.path().join("dna.txt");
/// std::fs::write(&path, "ACGT\nTTGA\nCCCA\n").unwrap();
///
/// let reader = trac::reader(path.to_str().unwrap()).unwrap();
/// assert_eq!(reader.lines().count(), 3);
/// ```
pub fn reader(input: &str) -> Result<Box<dyn BufRead>, TracError> {
    let reader: Box<dyn BufRead> = if input == "stdin" {
        Box::new(BufReader::new(std::io::stdin()))
    } else {
        let path = std::path::Path::new(input);
        let file = std::fs::File::open(path)?;

        if path.extension() == Some(std::ffi::OsStr::new("gz")) {
            Box::new(BufReader::new(flate2::read::MultiGzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        }
    };

    Ok(reader)
}

/// Opens `output` for buffered writing. `stdout` writes to the screen.
pub fn writer(output: &str) -> Result<Box<dyn Write>, TracError> {
    let writer: Box<dyn Write> = if output == "stdout" {
        Box::new(BufWriter::new(std::io::stdout()))
    } else {
        Box::new(BufWriter::new(std::fs::File::create(output)?))
    };

    Ok(writer)
}

/// Reads the whole of `input` into memory.
pub fn read_to_string(input: &str) -> Result<String, TracError> {
    let mut reader = reader(input)?;
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    Ok(text)
}
