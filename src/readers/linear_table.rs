// src/readers/linear_table.rs

use std::path::Path;

use super::{locate_columns, parse_field, split_exact, split_header};
use crate::error::ReadError;
use crate::io::read_numbered_lines;
use crate::table::Table;
use crate::types::{Decimal, LinearTableRow, TaxonField};

/// Lines preceding the column header (tool version and command line).
const METADATA_LINES: usize = 2;

pub const MOTU_COLUMN: &str = "#mOTU";
pub const TAXONOMY_COLUMN: &str = "consensus_taxonomy";
pub const TAX_ID_COLUMN: &str = "NCBI_tax_id";

const MOTU_SENTINEL: &str = "-1";
const TAXONOMY_SENTINEL: &str = "-1";
const TAX_ID_SENTINEL: &str = "NA";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinearTableOptions {
    /// Drop rows whose count in the first sample column is zero.
    pub drop_zero_counts: bool,
    /// Show the `-1` / `NA` sentinels as `"Unknown"`.
    pub replace_unknown: bool,
}

impl LinearTableOptions {
    pub fn drop_zero_counts(mut self, yes: bool) -> Self {
        self.drop_zero_counts = yes;
        self
    }

    pub fn replace_unknown(mut self, yes: bool) -> Self {
        self.replace_unknown = yes;
        self
    }
}

/// Reads a linear taxonomic profile (mOTUs `-C recall` style).
///
/// ```text
/// # git tag version 2.5.1 | motus version 2.5.1 | ...
/// # call: python motus profile ...
/// #mOTU	consensus_taxonomy	NCBI_tax_id	sample1
/// ref_mOTU_v25_00001	k__Bacteria|p__Firmicutes|...	1423	12
/// unassigned	-1	NA	3
/// ```
///
/// Every column besides the three named ones holds one sample's counts and
/// keeps its header as the column name, so a merged multi-sample profile
/// (`motus merge`) is read whole. At least one sample column is required.
pub fn read_taxonomic_linear_table<P: AsRef<Path>>(
    path: P,
    options: LinearTableOptions,
) -> Result<Table<LinearTableRow>, ReadError> {
    let path = path.as_ref();
    let lines = read_numbered_lines(path)?;

    let (header, data) = split_header(&lines, METADATA_LINES).ok_or_else(|| ReadError::Schema {
        path: path.to_path_buf(),
        column: MOTU_COLUMN.to_string(),
    })?;
    let header_fields: Vec<&str> = header.1.split('\t').collect();
    let pos = locate_columns(path, &header_fields, &[MOTU_COLUMN, TAXONOMY_COLUMN, TAX_ID_COLUMN])?;
    let sample_positions: Vec<usize> = (0..header_fields.len())
        .filter(|i| !pos.contains(i))
        .collect();
    if sample_positions.is_empty() {
        return Err(ReadError::Schema {
            path: path.to_path_buf(),
            column: "<sample>".to_string(),
        });
    }

    let mut rows = Vec::with_capacity(data.len());
    let mut dropped = 0usize;
    for (line_no, line) in data {
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_exact(path, *line_no, line, '\t', header_fields.len())?;
        let counts = sample_positions
            .iter()
            .map(|&i| parse_field::<Decimal>(path, *line_no, fields[i], "a numeric count"))
            .collect::<Result<Vec<_>, _>>()?;

        if options.drop_zero_counts && counts[0].value() <= 0.0 {
            dropped += 1;
            continue;
        }

        let mut row = LinearTableRow {
            motu: TaxonField::parse(fields[pos[0]], MOTU_SENTINEL),
            consensus_taxonomy: TaxonField::parse(fields[pos[1]], TAXONOMY_SENTINEL),
            ncbi_tax_id: TaxonField::parse(fields[pos[2]], TAX_ID_SENTINEL),
            counts,
        };
        if options.replace_unknown {
            row.motu = row.motu.replace_missing();
            row.consensus_taxonomy = row.consensus_taxonomy.replace_missing();
            row.ncbi_tax_id = row.ncbi_tax_id.replace_missing();
        }
        rows.push(row);
    }

    if dropped > 0 {
        log::debug!("Dropped {} zero-count rows from {}", dropped, path.display());
    }
    log::info!(
        "Loaded {} taxa across {} sample(s) from {}",
        rows.len(),
        sample_positions.len(),
        path.display()
    );

    let mut columns = vec![
        MOTU_COLUMN.to_string(),
        TAXONOMY_COLUMN.to_string(),
        TAX_ID_COLUMN.to_string(),
    ];
    columns.extend(sample_positions.iter().map(|&i| header_fields[i].to_string()));
    Ok(Table::new(columns, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readers::test_util::fixture;

    const PROFILE: &str = "\
# git tag version 2.5.1 |  motus version 2.5.1 | map_tax 2.5.1
# call: python motus profile -s reads.fq -c
#mOTU\tconsensus_taxonomy\tNCBI_tax_id\tsample1
ref_mOTU_v25_00001\tk__Bacteria|p__Firmicutes|g__Bacillus|s__Bacillus subtilis\t1423\t12
ref_mOTU_v25_00002\tk__Bacteria|p__Proteobacteria\t1224\t0
-1\t-1\tNA\t3
";

    #[test]
    fn test_reads_all_rows_by_default() {
        let file = fixture(PROFILE);
        let table = read_taxonomic_linear_table(file.path(), LinearTableOptions::default()).unwrap();

        assert_eq!(table.columns(), ["#mOTU", "consensus_taxonomy", "NCBI_tax_id", "sample1"]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.index_name(), None);

        let first = &table.rows()[0];
        assert_eq!(first.motu.as_str(), "ref_mOTU_v25_00001");
        assert_eq!(first.ncbi_tax_id.as_str(), "1423");
        assert_eq!(first.counts.len(), 1);
        assert_eq!(*first.count(), 12.0);

        // sentinels are tagged but still shown verbatim
        let unassigned = &table.rows()[2];
        assert_eq!(unassigned.motu, TaxonField::Missing("-1".to_string()));
        assert_eq!(unassigned.ncbi_tax_id.to_string(), "NA");
    }

    #[test]
    fn test_drop_zero_counts() {
        let file = fixture(PROFILE);
        let options = LinearTableOptions::default().drop_zero_counts(true);
        let table = read_taxonomic_linear_table(file.path(), options).unwrap();

        assert_eq!(table.len(), 2);
        assert!(table.iter().all(|r| r.count().value() > 0.0));
    }

    #[test]
    fn test_replace_unknown() {
        let file = fixture(PROFILE);
        let options = LinearTableOptions::default().replace_unknown(true);
        let table = read_taxonomic_linear_table(file.path(), options).unwrap();

        let unassigned = &table.rows()[2];
        assert_eq!(unassigned.motu.as_str(), "Unknown");
        assert_eq!(unassigned.consensus_taxonomy.as_str(), "Unknown");
        assert_eq!(unassigned.ncbi_tax_id.as_str(), "Unknown");
        // a real name is never touched
        assert_eq!(table.rows()[0].motu.as_str(), "ref_mOTU_v25_00001");
        assert!(table.to_tsv().ends_with("Unknown\tUnknown\tUnknown\t3\n"));
    }

    #[test]
    fn test_merged_profile_keeps_every_sample() {
        let merged = "\
# git tag version 2.5.1 |  motus version 2.5.1 | map_tax 2.5.1
# call: python motus merge -i a.motus,b.motus
#mOTU\tconsensus_taxonomy\tNCBI_tax_id\tsampleA\tsampleB
ref_mOTU_v25_00001\tk__Bacteria\t2\t12\t0.5
ref_mOTU_v25_00002\tk__Bacteria\t2\t0\t7
";
        let file = fixture(merged);
        let table = read_taxonomic_linear_table(file.path(), LinearTableOptions::default()).unwrap();

        assert_eq!(
            table.columns(),
            ["#mOTU", "consensus_taxonomy", "NCBI_tax_id", "sampleA", "sampleB"]
        );
        assert_eq!(table.rows()[0].counts[1], 0.5);
        assert!(table.to_tsv().contains("ref_mOTU_v25_00002\tk__Bacteria\t2\t0\t7\n"));

        // zero filtering looks at the first sample only
        let options = LinearTableOptions::default().drop_zero_counts(true);
        let table = read_taxonomic_linear_table(file.path(), options).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].motu.as_str(), "ref_mOTU_v25_00001");
    }

    #[test]
    fn test_profile_without_sample_column_is_schema_error() {
        let file = fixture("# a\n# b\n#mOTU\tconsensus_taxonomy\tNCBI_tax_id\nx\ty\t1\n");
        match read_taxonomic_linear_table(file.path(), LinearTableOptions::default()) {
            Err(ReadError::Schema { column, .. }) => assert_eq!(column, "<sample>"),
            other => panic!("expected Schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let file = fixture("# a\n# b\n#mOTU\tNCBI_tax_id\tsample1\nx\t1\t2\n");
        match read_taxonomic_linear_table(file.path(), LinearTableOptions::default()) {
            Err(ReadError::Schema { column, .. }) => assert_eq!(column, "consensus_taxonomy"),
            other => panic!("expected Schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_count_is_format_error() {
        let file = fixture("# a\n# b\n#mOTU\tconsensus_taxonomy\tNCBI_tax_id\ts\nx\ty\t1\tmany\n");
        assert!(matches!(
            read_taxonomic_linear_table(file.path(), LinearTableOptions::default()),
            Err(ReadError::Format { line: 4, .. })
        ));
    }
}
