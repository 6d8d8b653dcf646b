// src/readers/classification_report.rs

use std::path::Path;

use super::{parse_field, split_exact};
use crate::error::{FormatError, ReadError};
use crate::io::read_numbered_lines;
use crate::lineage::{merge_adjacent_ranks, Rank, RANK_SEPARATOR, UNKNOWN};
use crate::table::Table;
use crate::types::{Decimal, LineageRow};

pub const COLUMNS: [&str; 3] = ["taxid", "count", "lineage"];

/// Turns a `;`-separated report lineage into the `|`-separated form.
///
/// Empty rank names become `Unknown`, one trailing `;` is dropped, whitespace
/// after a separator is trimmed, and the genus is prepended to the species.
pub fn normalize_report_lineage(raw: &str) -> Result<String, FormatError> {
    let trimmed = raw.strip_suffix(';').unwrap_or(raw);

    let tokens: Vec<String> = trimmed
        .split(';')
        .enumerate()
        .map(|(i, token)| {
            let token = if i > 0 { token.trim_start() } else { token };
            if token.ends_with("__") {
                format!("{token}{UNKNOWN}")
            } else {
                token.to_string()
            }
        })
        .collect();

    let joined = tokens.join(&RANK_SEPARATOR.to_string());
    merge_adjacent_ranks(&joined, Rank::Genus, Rank::Species)
}

/// Reads a three-column classification report (`taxid`, `count`, `lineage`),
/// as produced from a Kraken 2 report via a BIOM table.
///
/// ```text
/// 1423	52	k__Bacteria; p__Firmicutes; c__Bacilli; o__Bacillales; f__Bacillaceae; g__Bacillus; s__subtilis
/// ```
///
/// Lines starting with `#` are comments.
pub fn read_classification_report_as_lineage_table<P: AsRef<Path>>(
    path: P,
) -> Result<Table<LineageRow>, ReadError> {
    let path = path.as_ref();
    let lines = read_numbered_lines(path)?;

    let mut rows = Vec::with_capacity(lines.len());
    for (line_no, line) in &lines {
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        let fields = split_exact(path, *line_no, line, '\t', COLUMNS.len())?;

        let taxid: u64 = parse_field(path, *line_no, fields[0], "a numeric taxid")?;
        let count: Decimal = parse_field(path, *line_no, fields[1], "a numeric count")?;
        let lineage =
            normalize_report_lineage(fields[2]).map_err(|e| ReadError::format(path, *line_no, e))?;

        rows.push(LineageRow {
            taxid: format!("taxid_{taxid}"),
            count,
            lineage,
        });
    }

    log::info!("Loaded {} report taxa from {}", rows.len(), path.display());

    let columns = COLUMNS.iter().map(|c| c.to_string()).collect();
    Ok(Table::new(columns, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readers::test_util::fixture;

    #[test]
    fn test_report_row() {
        let file = fixture("123\t5\tk__Bacteria;p__Foo;g__Bar;s__baz;\n");
        let table = read_classification_report_as_lineage_table(file.path()).unwrap();

        assert_eq!(table.columns(), COLUMNS);
        assert_eq!(table.len(), 1);
        let row = &table.rows()[0];
        assert_eq!(row.taxid, "taxid_123");
        assert_eq!(row.count, 5.0);
        assert_eq!(row.lineage, "k__Bacteria|p__Foo|g__Bar|s__Bar baz");
    }

    #[test]
    fn test_empty_ranks_become_unknown() {
        assert_eq!(
            normalize_report_lineage("k__Bacteria;p__;c__").unwrap(),
            "k__Bacteria|p__Unknown|c__Unknown"
        );
        // an unnamed species is not merged with the genus
        assert_eq!(
            normalize_report_lineage("k__Bacteria; g__Bacillus; s__;").unwrap(),
            "k__Bacteria|g__Bacillus|s__Unknown"
        );
    }

    #[test]
    fn test_unnamed_genus_prefixes_species() {
        assert_eq!(
            normalize_report_lineage("k__Bacteria;g__;s__sp1").unwrap(),
            "k__Bacteria|g__Unknown|s__Unknown sp1"
        );
    }

    #[test]
    fn test_comments_and_blank_lines_are_skipped() {
        let file = fixture("# Constructed from biom file\n\n2\t10\tk__Bacteria\n");
        let table = read_classification_report_as_lineage_table(file.path()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].lineage, "k__Bacteria");
    }

    #[test]
    fn test_malformed_lineage_aborts_read() {
        let file = fixture("2\t10\tk__Bacteria\n3\t4\tBacteria;Firmicutes\n");
        match read_classification_report_as_lineage_table(file.path()) {
            Err(ReadError::Format { line, source, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(source.value, "Bacteria");
            }
            other => panic!("expected Format error, got {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_taxid_is_format_error() {
        let file = fixture("abc\t1\tk__Bacteria\n");
        assert!(matches!(
            read_classification_report_as_lineage_table(file.path()),
            Err(ReadError::Format { line: 1, .. })
        ));
    }
}
