// src/readers/classification_labels.rs

use std::path::Path;

use super::{parse_field, split_exact};
use crate::error::{FormatError, ReadError};
use crate::io::read_numbered_lines;
use crate::table::Table;
use crate::types::{ClassFlag, ClassificationLabel};

/// Raw columns: flag, sequence ID, taxon, length, LCA k-mer mappings.
const RAW_FIELDS: usize = 5;

pub const INDEX_COLUMN: &str = "seq_id";
pub const COLUMNS: [&str; 4] = ["class_flag", "seq_length", "tax_name", "tax_id"];

/// Splits a `"<name> (taxid <id>)"` taxon field into name and numeric ID.
pub fn split_taxon_field(field: &str) -> Result<(&str, u64), FormatError> {
    let bad = || FormatError::new(field, "'<name> (taxid <id>)'");

    let inner = field.strip_suffix(')').ok_or_else(bad)?;
    let (name, id) = inner.rsplit_once(" (taxid ").ok_or_else(bad)?;
    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(bad());
    }
    let tax_id = id.parse().map_err(|_| bad())?;
    Ok((name, tax_id))
}

/// Reads per-sequence labels from Kraken 2 standard output run with `--use-names`.
///
/// ```text
/// C	read1	Escherichia coli (taxid 562)	150	562:116 0:10
/// U	read2	unclassified (taxid 0)	150	0:116
/// ```
///
/// The k-mer mapping column is dropped; rows are indexed by sequence ID.
pub fn read_per_sequence_classification_labels<P: AsRef<Path>>(
    path: P,
) -> Result<Table<ClassificationLabel>, ReadError> {
    let path = path.as_ref();
    let lines = read_numbered_lines(path)?;

    let mut rows = Vec::with_capacity(lines.len());
    for (line_no, line) in &lines {
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_exact(path, *line_no, line, '\t', RAW_FIELDS)?;

        let (tax_name, tax_id) =
            split_taxon_field(fields[2]).map_err(|e| ReadError::format(path, *line_no, e))?;

        rows.push(ClassificationLabel {
            seq_id: fields[1].to_string(),
            class_flag: parse_field(path, *line_no, fields[0], "class flag 'C' or 'U'")?,
            seq_length: parse_field(path, *line_no, fields[3], "a sequence length")?,
            tax_name: tax_name.to_string(),
            tax_id,
        });
    }

    let classified = rows
        .iter()
        .filter(|r| r.class_flag == ClassFlag::Classified)
        .count();
    log::info!(
        "Loaded {} sequence labels ({} classified) from {}",
        rows.len(),
        classified,
        path.display()
    );

    let columns = COLUMNS.iter().map(|c| c.to_string()).collect();
    Table::indexed(INDEX_COLUMN, columns, rows).map_err(|dup| dup.at(path))
}
