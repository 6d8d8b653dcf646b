use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::error::ReadError;

/// Opens a text input, transparently decompressing it when the path ends in `.gz`.
pub fn open_text<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead>, ReadError> {
    let path = path.as_ref();
    let f = File::open(path).map_err(|e| ReadError::io(path, e))?;

    let is_gz = path
        .extension()
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let reader: Box<dyn BufRead> = if is_gz {
        Box::new(BufReader::new(MultiGzDecoder::new(f)))
    } else {
        Box::new(BufReader::new(f))
    };
    Ok(reader)
}

/// Reads every line of a text input into memory, paired with its 1-based line number.
///
/// Line terminators (`\n` or `\r\n`) are stripped.
pub fn read_numbered_lines<P: AsRef<Path>>(path: P) -> Result<Vec<(usize, String)>, ReadError> {
    let path = path.as_ref();
    let reader = open_text(path)?;

    let mut lines = Vec::new();
    for (i, line_result) in reader.lines().enumerate() {
        let line = line_result.map_err(|e| ReadError::io(path, e))?;
        lines.push((i + 1, line));
    }
    Ok(lines)
}
