// src/readers/gene_headers.rs

use std::path::Path;

use super::parse_field;
use crate::error::{FormatError, ReadError};
use crate::io::read_numbered_lines;
use crate::table::Table;
use crate::types::GeneRecord;

const HEADER_FIELD_SEPARATOR: &str = " # ";
const HEADER_FIELDS: usize = 5;

pub const INDEX_COLUMN: &str = "prot_id";
pub const COLUMNS: [&str; 5] = ["contig_id", "start", "end", "strand", "info"];

/// Protein IDs are `<contig>_<gene number>`; the contig is everything before the last `_`.
pub fn contig_of(prot_id: &str) -> &str {
    prot_id.rsplit_once('_').map(|(contig, _)| contig).unwrap_or("")
}

/// Reads the `>` header lines of a Prodigal protein/gene FASTA.
///
/// ```text
/// >contig_1_1 # 2 # 1000 # 1 # ID=1_1;partial=10;start_type=Edge
/// MKV...
/// ```
///
/// Sequence lines are ignored. Every gene must have `start < end`; rows are
/// indexed by protein ID.
pub fn read_gene_prediction_headers<P: AsRef<Path>>(path: P) -> Result<Table<GeneRecord>, ReadError> {
    let path = path.as_ref();
    let lines = read_numbered_lines(path)?;

    let mut genes = Vec::new();
    for (line_no, line) in &lines {
        let Some(header) = line.strip_prefix('>') else {
            continue;
        };
        let header = header.trim();

        let fields: Vec<&str> = header.split(HEADER_FIELD_SEPARATOR).collect();
        if fields.len() != HEADER_FIELDS {
            return Err(ReadError::format(
                path,
                *line_no,
                FormatError::new(
                    header,
                    format!("{HEADER_FIELDS} fields separated by '{HEADER_FIELD_SEPARATOR}'"),
                ),
            ));
        }

        let prot_id = fields[0];
        let start: u64 = parse_field(path, *line_no, fields[1], "an integer start coordinate")?;
        let end: u64 = parse_field(path, *line_no, fields[2], "an integer end coordinate")?;
        if start >= end {
            return Err(ReadError::Assertion {
                path: path.to_path_buf(),
                line: *line_no,
                message: format!("gene '{prot_id}' has start {start} not below end {end}"),
            });
        }

        genes.push(GeneRecord {
            prot_id: prot_id.to_string(),
            contig_id: contig_of(prot_id).to_string(),
            start,
            end,
            strand: parse_field(path, *line_no, fields[3], "strand '1' or '-1'")?,
            info: fields[4].to_string(),
        });
    }

    log::info!("Loaded {} gene headers from {}", genes.len(), path.display());

    let columns = COLUMNS.iter().map(|c| c.to_string()).collect();
    Table::indexed(INDEX_COLUMN, columns, genes).map_err(|dup| dup.at(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readers::test_util::fixture;
    use crate::types::Strand;

    #[test]
    fn test_single_header() {
        let file = fixture(">p1_1 # 10 # 50 # 1 # some info\n");
        let table = read_gene_prediction_headers(file.path()).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.index_name(), Some("prot_id"));
        let gene = table.get("p1_1").unwrap();
        assert_eq!(
            gene,
            &GeneRecord {
                prot_id: "p1_1".to_string(),
                contig_id: "p1".to_string(),
                start: 10,
                end: 50,
                strand: Strand::Forward,
                info: "some info".to_string(),
            }
        );
        assert_eq!(
            table.to_tsv(),
            "prot_id\tcontig_id\tstart\tend\tstrand\tinfo\np1_1\tp1\t10\t50\t1\tsome info\n"
        );
    }

    #[test]
    fn test_sequence_lines_are_skipped() {
        let file = fixture(
            ">NODE_1_length_500_1 # 3 # 290 # -1 # ID=1_1;partial=10\n\
             MKVLAAGIVGLLLAG*\n\
             >NODE_1_length_500_2 # 300 # 498 # 1 # ID=1_2;partial=01\n\
             MSTNPKPQRKTKRNTNRRPQDVKFPGG\n",
        );
        let table = read_gene_prediction_headers(file.path()).unwrap();

        assert_eq!(table.len(), 2);
        let first = &table.rows()[0];
        assert_eq!(first.contig_id, "NODE_1_length_500");
        assert_eq!(first.strand, Strand::Reverse);
        assert_eq!(first.info, "ID=1_1;partial=10");
    }

    #[test]
    fn test_start_not_below_end_is_assertion_failure() {
        let file = fixture(">p1_1 # 10 # 50 # 1 # ok\n>p1_2 # 80 # 80 # 1 # bad\n");
        match read_gene_prediction_headers(file.path()) {
            Err(ReadError::Assertion { line, message, .. }) => {
                assert_eq!(line, 2);
                assert!(message.contains("p1_2"));
            }
            other => panic!("expected Assertion error, got {other:?}"),
        }
    }

    #[test]
    fn test_start_after_end_is_assertion_failure() {
        let file = fixture(">p1_1 # 90 # 10 # 1 # x\n");
        match read_gene_prediction_headers(file.path()) {
            Err(ReadError::Assertion { line, message, .. }) => {
                assert_eq!(line, 1);
                assert!(message.contains("p1_1"));
            }
            other => panic!("expected Assertion error, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_protein_id_is_integrity_error() {
        let file = fixture(">p1_1 # 10 # 50 # 1 # a\n>p1_1 # 60 # 90 # 1 # b\n");
        assert!(matches!(
            read_gene_prediction_headers(file.path()),
            Err(ReadError::Integrity { .. })
        ));
    }

    #[test]
    fn test_wrong_field_count_is_format_error() {
        let file = fixture(">p1_1 # 10 # 50 # 1\n");
        assert!(matches!(
            read_gene_prediction_headers(file.path()),
            Err(ReadError::Format { line: 1, .. })
        ));
    }

    #[test]
    fn test_contig_of() {
        assert_eq!(contig_of("k141_2_7"), "k141_2");
        assert_eq!(contig_of("single"), "");
    }
}
