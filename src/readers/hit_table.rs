// src/readers/hit_table.rs

use std::path::Path;

use super::parse_field;
use crate::error::{FormatError, ReadError};
use crate::io::read_numbered_lines;
use crate::table::Table;
use crate::types::{Decimal, ProfileHit};

/// The fixed leading columns of an HMMER `--tblout` line. The free-text
/// target description that follows them is not kept.
pub const RAW_COLUMNS: [&str; 18] = [
    "target", "tacc", "query", "qacc",
    "evalue_fs", "score_fs", "bias_fs",
    "evalue_b1d", "score_b1d", "bias_b1d",
    "exp", "reg", "clu", "ov", "env", "dom", "rep", "inc",
];

pub const INDEX_COLUMN: &str = "target";

/// Output columns: the raw set minus `target` (the index) and the two accessions.
pub fn columns() -> Vec<String> {
    RAW_COLUMNS
        .iter()
        .filter(|&&c| c != INDEX_COLUMN && c != "tacc" && c != "qacc")
        .map(|c| c.to_string())
        .collect()
}

fn parse_hit(path: &Path, line_no: usize, line: &str) -> Result<ProfileHit, ReadError> {
    let fields: Vec<&str> = line.split_whitespace().take(RAW_COLUMNS.len()).collect();
    if fields.len() < RAW_COLUMNS.len() {
        return Err(ReadError::format(
            path,
            line_no,
            FormatError::new(line, format!("at least {} whitespace-separated fields", RAW_COLUMNS.len())),
        ));
    }

    let float = |i: usize| -> Result<Decimal, ReadError> {
        parse_field(path, line_no, fields[i], &format!("a number in column '{}'", RAW_COLUMNS[i]))
    };
    let count = |i: usize| -> Result<u32, ReadError> {
        parse_field(path, line_no, fields[i], &format!("a count in column '{}'", RAW_COLUMNS[i]))
    };

    Ok(ProfileHit {
        target: fields[0].to_string(),
        query: fields[2].to_string(),
        evalue_fs: float(4)?,
        score_fs: float(5)?,
        bias_fs: float(6)?,
        evalue_b1d: float(7)?,
        score_b1d: float(8)?,
        bias_b1d: float(9)?,
        exp: float(10)?,
        reg: count(11)?,
        clu: count(12)?,
        ov: count(13)?,
        env: count(14)?,
        dom: count(15)?,
        rep: count(16)?,
        inc: count(17)?,
    })
}

/// Reads an HMMER per-sequence hit table (`hmmsearch`/`hmmscan --tblout`).
///
/// ```text
/// #                                                               --- full sequence ---- --- best 1 domain ---- --- domain number estimation ----
/// # target name        accession  query name           accession    E-value  score  bias   E-value  score  bias   exp reg clu  ov env dom rep inc description of target
/// #------------------- ---------- -------------------- ---------- --------- ------ ----- --------- ------ -----   --- --- --- --- --- --- --- --- ---------------------
/// contig_1_3           -          PF00005.27           -            1.2e-30  104.3   0.1   2.1e-30  103.5   0.1   1.4   1   0   0   1   1   1   1 # 2 # 901 # 1 # ID=1_3
/// ```
///
/// Returns `Ok(None)` when the file holds no hits at all (only comments),
/// rather than an empty table. Rows are indexed by target name.
pub fn read_profile_search_hit_table<P: AsRef<Path>>(
    path: P,
) -> Result<Option<Table<ProfileHit>>, ReadError> {
    let path = path.as_ref();
    let lines = read_numbered_lines(path)?;

    let mut hits = Vec::new();
    for (line_no, line) in &lines {
        if line.starts_with('#') || line.trim().is_empty() {
            continue;
        }
        hits.push(parse_hit(path, *line_no, line)?);
    }

    if hits.is_empty() {
        log::info!("No hits in {}", path.display());
        return Ok(None);
    }
    log::info!("Loaded {} hits from {}", hits.len(), path.display());

    Table::indexed(INDEX_COLUMN, columns(), hits)
        .map(Some)
        .map_err(|dup| dup.at(path))
}
