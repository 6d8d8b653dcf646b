//! One reader per tool output format. Each reads the whole file, validates
//! every row and returns a [`Table`](crate::table::Table); the first bad row
//! aborts the read.

pub mod classification_labels;
pub mod classification_report;
pub mod gene_headers;
pub mod hit_table;
pub mod linear_table;
pub mod relative_abundance;

pub use classification_labels::read_per_sequence_classification_labels;
pub use classification_report::read_classification_report_as_lineage_table;
pub use gene_headers::read_gene_prediction_headers;
pub use hit_table::read_profile_search_hit_table;
pub use linear_table::{read_taxonomic_linear_table, LinearTableOptions};
pub use relative_abundance::{read_relative_abundance_with_read_stats, RelativeAbundanceOptions};

use std::path::Path;
use std::str::FromStr;

use crate::error::{FormatError, ReadError};

/// Splits a line on `sep`, requiring exactly `n` fields.
pub(crate) fn split_exact<'a>(
    path: &Path,
    line_no: usize,
    line: &'a str,
    sep: char,
    n: usize,
) -> Result<Vec<&'a str>, ReadError> {
    let fields: Vec<&str> = line.split(sep).collect();
    if fields.len() != n {
        return Err(ReadError::format(
            path,
            line_no,
            FormatError::new(line, format!("{n} fields separated by {sep:?}, got {}", fields.len())),
        ));
    }
    Ok(fields)
}

/// Parses one field, reporting the path and line on failure.
pub(crate) fn parse_field<T: FromStr>(
    path: &Path,
    line_no: usize,
    value: &str,
    expected: &str,
) -> Result<T, ReadError> {
    value
        .parse()
        .map_err(|_| ReadError::format(path, line_no, FormatError::new(value, expected)))
}

/// Skips `metadata_lines` physical lines, then returns the first non-blank
/// line as the header together with the data lines after it.
pub(crate) fn split_header(
    lines: &[(usize, String)],
    metadata_lines: usize,
) -> Option<(&(usize, String), &[(usize, String)])> {
    let rest = lines.get(metadata_lines..)?;
    let pos = rest.iter().position(|(_, l)| !l.trim().is_empty())?;
    Some((&rest[pos], &rest[pos + 1..]))
}

/// Positions of the `required` columns in `header`.
pub(crate) fn locate_columns(
    path: &Path,
    header: &[&str],
    required: &[&str],
) -> Result<Vec<usize>, ReadError> {
    required
        .iter()
        .map(|&name| {
            header
                .iter()
                .position(|&h| h == name)
                .ok_or_else(|| ReadError::Schema {
                    path: path.to_path_buf(),
                    column: name.to_string(),
                })
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod test_util {
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Writes `contents` to a fresh temporary file.
    pub fn fixture(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }
}
