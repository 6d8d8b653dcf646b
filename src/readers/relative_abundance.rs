// src/readers/relative_abundance.rs

use std::path::Path;

use super::{locate_columns, parse_field, split_exact, split_header};
use crate::error::ReadError;
use crate::io::read_numbered_lines;
use crate::lineage::{Rank, RANK_SEPARATOR};
use crate::table::Table;
use crate::types::{RelativeAbundanceRow, TaxonField};

/// Database name, command line, sample ID and mapped-read total.
const METADATA_LINES: usize = 4;

pub const CLADE_NAME_COLUMN: &str = "#clade_name";
pub const CLADE_TAXID_COLUMN: &str = "clade_taxid";
pub const RELATIVE_ABUNDANCE_COLUMN: &str = "relative_abundance";
pub const COVERAGE_COLUMN: &str = "coverage";
pub const ESTIMATED_READS_COLUMN: &str = "estimated_number_of_reads_from_the_clade";

const COLUMNS: [&str; 5] = [
    CLADE_NAME_COLUMN,
    CLADE_TAXID_COLUMN,
    RELATIVE_ABUNDANCE_COLUMN,
    COVERAGE_COLUMN,
    ESTIMATED_READS_COLUMN,
];

/// Clade name (and taxid) of the unclassified-fraction row.
const UNKNOWN_SENTINEL: &str = "UNKNOWN";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelativeAbundanceOptions {
    /// Keep only clades holding a token at this rank, plus the `UNKNOWN` row.
    ///
    /// Any `|`-separated token counts, the leading one included, so
    /// `Rank::Kingdom` keeps the bare `k__Bacteria` row. Strain-level
    /// (`t__`) clades are not selectable: they have no [`Rank`], and are
    /// kept by a species filter because they carry an `s__` token.
    pub rank: Option<Rank>,
    /// Show the `UNKNOWN` sentinel as `"Unknown"`.
    pub replace_unknown: bool,
}

impl RelativeAbundanceOptions {
    pub fn rank(mut self, rank: Rank) -> Self {
        self.rank = Some(rank);
        self
    }

    pub fn replace_unknown(mut self, yes: bool) -> Self {
        self.replace_unknown = yes;
        self
    }
}

/// True when the clade has a `<rank>__` token, or is the `UNKNOWN` row.
///
/// The first token is checked too; a kingdom clade has no `|` before `k__`.
fn clade_matches_rank(clade_name: &str, rank: Rank) -> bool {
    if clade_name.starts_with(UNKNOWN_SENTINEL) {
        return true;
    }
    let prefix = rank.prefix();
    clade_name
        .split(RANK_SEPARATOR)
        .any(|token| token.starts_with(&prefix))
}

/// Reads a relative-abundance profile with read statistics
/// (MetaPhlAn `-t rel_ab_w_read_stats`).
///
/// ```text
/// #mpa_v30_CHOCOPhlAn_201901
/// #/usr/bin/metaphlan reads.fq ...
/// #SampleID	Metaphlan_Analysis
/// #estimated_reads_mapped_to_known_clades:10000
/// #clade_name	clade_taxid	relative_abundance	coverage	estimated_number_of_reads_from_the_clade
/// k__Bacteria	2	100.0	12.5	10000
/// ```
///
/// MetaPhlAn writes `-` for the read statistics of rows it cannot estimate;
/// those become `None`.
pub fn read_relative_abundance_with_read_stats<P: AsRef<Path>>(
    path: P,
    options: RelativeAbundanceOptions,
) -> Result<Table<RelativeAbundanceRow>, ReadError> {
    let path = path.as_ref();
    let lines = read_numbered_lines(path)?;

    let (header, data) = split_header(&lines, METADATA_LINES).ok_or_else(|| ReadError::Schema {
        path: path.to_path_buf(),
        column: CLADE_NAME_COLUMN.to_string(),
    })?;
    let header_fields: Vec<&str> = header.1.split('\t').collect();
    let pos = locate_columns(path, &header_fields, &COLUMNS)?;

    let mut rows = Vec::with_capacity(data.len());
    let mut filtered = 0usize;
    for (line_no, line) in data {
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_exact(path, *line_no, line, '\t', header_fields.len())?;
        let clade_name = fields[pos[0]];

        if let Some(rank) = options.rank {
            if !clade_matches_rank(clade_name, rank) {
                filtered += 1;
                continue;
            }
        }

        let mut row = RelativeAbundanceRow {
            clade_name: TaxonField::parse(clade_name, UNKNOWN_SENTINEL),
            clade_taxid: TaxonField::parse(fields[pos[1]], UNKNOWN_SENTINEL),
            relative_abundance: parse_field(path, *line_no, fields[pos[2]], "a relative abundance")?,
            coverage: parse_statistic(path, *line_no, fields[pos[3]], "a coverage value or '-'")?,
            estimated_reads: parse_statistic(path, *line_no, fields[pos[4]], "a read count or '-'")?,
        };
        if options.replace_unknown {
            row.clade_name = row.clade_name.replace_missing();
            row.clade_taxid = row.clade_taxid.replace_missing();
        }
        rows.push(row);
    }

    if let Some(rank) = options.rank {
        log::debug!("Kept {} clades at rank {} ({} filtered out)", rows.len(), rank, filtered);
    }
    log::info!("Loaded {} clades from {}", rows.len(), path.display());

    let columns = COLUMNS.iter().map(|c| c.to_string()).collect();
    Ok(Table::new(columns, rows))
}

fn parse_statistic<T: std::str::FromStr>(
    path: &Path,
    line_no: usize,
    value: &str,
    expected: &str,
) -> Result<Option<T>, ReadError> {
    if value == "-" {
        return Ok(None);
    }
    parse_field(path, line_no, value, expected).map(Some)
}
