//src/types.rs

use std::fmt;
use std::str::FromStr;

use crate::error::FormatError;
use crate::lineage::UNKNOWN;
use crate::table::{KeyedRow, TableRow};

/// A taxon column value that may hold a tool-specific "missing" sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaxonField {
    Named(String),
    /// The source's sentinel (`-1`, `NA`, `UNKNOWN`), kept verbatim.
    Missing(String),
    /// A sentinel that was replaced; displays as `"Unknown"`.
    Unknown,
}

impl TaxonField {
    /// Tags `raw` as `Missing` when it equals the column's sentinel.
    pub fn parse(raw: &str, sentinel: &str) -> Self {
        if raw == sentinel {
            TaxonField::Missing(raw.to_string())
        } else {
            TaxonField::Named(raw.to_string())
        }
    }

    pub fn replace_missing(self) -> Self {
        match self {
            TaxonField::Missing(_) => TaxonField::Unknown,
            other => other,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TaxonField::Named(s) | TaxonField::Missing(s) => s,
            TaxonField::Unknown => UNKNOWN,
        }
    }

    pub fn is_named(&self) -> bool {
        matches!(self, TaxonField::Named(_))
    }
}

impl fmt::Display for TaxonField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A floating-point field that remembers how the tool wrote it.
///
/// Comparisons and filters use the parsed value; `Display` writes the
/// original token back, so `1.2e-30` and `80.0` survive a TSV round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct Decimal {
    value: f64,
    text: String,
}

impl Decimal {
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl From<f64> for Decimal {
    fn from(value: f64) -> Self {
        Decimal {
            value,
            text: format!("{value:?}"),
        }
    }
}

impl FromStr for Decimal {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let value = text
            .parse()
            .map_err(|_| FormatError::new(s, "a decimal number"))?;
        Ok(Decimal {
            value,
            text: text.to_string(),
        })
    }
}

impl PartialEq<f64> for Decimal {
    fn eq(&self, other: &f64) -> bool {
        self.value == *other
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// One row of a linear taxonomic profile (mOTUs style).
///
/// `counts` holds one value per sample column; single-sample profiles have one.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearTableRow {
    pub motu: TaxonField,
    pub consensus_taxonomy: TaxonField,
    pub ncbi_tax_id: TaxonField,
    pub counts: Vec<Decimal>,
}

impl LinearTableRow {
    /// Count in the first sample column.
    pub fn count(&self) -> &Decimal {
        &self.counts[0]
    }
}

impl TableRow for LinearTableRow {
    fn fields(&self) -> Vec<String> {
        let mut fields = vec![
            self.motu.to_string(),
            self.consensus_taxonomy.to_string(),
            self.ncbi_tax_id.to_string(),
        ];
        fields.extend(self.counts.iter().map(Decimal::to_string));
        fields
    }
}

/// One row of a relative-abundance profile with read statistics (MetaPhlAn style).
#[derive(Debug, Clone, PartialEq)]
pub struct RelativeAbundanceRow {
    pub clade_name: TaxonField,
    pub clade_taxid: TaxonField,
    pub relative_abundance: Decimal,
    /// `None` where the profiler printed `-`.
    pub coverage: Option<Decimal>,
    pub estimated_reads: Option<u64>,
}

fn or_dash<T: ToString>(value: Option<&T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

impl TableRow for RelativeAbundanceRow {
    fn fields(&self) -> Vec<String> {
        vec![
            self.clade_name.to_string(),
            self.clade_taxid.to_string(),
            self.relative_abundance.to_string(),
            or_dash(self.coverage.as_ref()),
            or_dash(self.estimated_reads.as_ref()),
        ]
    }
}

/// One taxon of a classification report, with its `|`-encoded lineage.
#[derive(Debug, Clone, PartialEq)]
pub struct LineageRow {
    /// `taxid_<n>`
    pub taxid: String,
    pub count: Decimal,
    pub lineage: String,
}

impl TableRow for LineageRow {
    fn fields(&self) -> Vec<String> {
        vec![
            self.taxid.clone(),
            self.count.to_string(),
            self.lineage.clone(),
        ]
    }
}

/// Whether a read was classified (`C`) or not (`U`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassFlag {
    Classified,
    Unclassified,
}

impl FromStr for ClassFlag {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "C" => Ok(ClassFlag::Classified),
            "U" => Ok(ClassFlag::Unclassified),
            _ => Err(FormatError::new(s, "class flag 'C' or 'U'")),
        }
    }
}

impl fmt::Display for ClassFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassFlag::Classified => f.write_str("C"),
            ClassFlag::Unclassified => f.write_str("U"),
        }
    }
}

/// Sequence length in bp; paired reads report both mates as `len1|len2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceLength {
    Single(u32),
    Paired(u32, u32),
}

impl FromStr for SequenceLength {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || FormatError::new(s, "a sequence length '<n>' or '<n>|<n>'");
        match s.split_once('|') {
            Some((a, b)) => Ok(SequenceLength::Paired(
                a.parse().map_err(|_| bad())?,
                b.parse().map_err(|_| bad())?,
            )),
            None => Ok(SequenceLength::Single(s.parse().map_err(|_| bad())?)),
        }
    }
}

impl fmt::Display for SequenceLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceLength::Single(n) => write!(f, "{n}"),
            SequenceLength::Paired(a, b) => write!(f, "{a}|{b}"),
        }
    }
}

/// Per-sequence classification label (Kraken 2 standard output).
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationLabel {
    pub seq_id: String,
    pub class_flag: ClassFlag,
    pub seq_length: SequenceLength,
    pub tax_name: String,
    pub tax_id: u64,
}

impl TableRow for ClassificationLabel {
    fn fields(&self) -> Vec<String> {
        vec![
            self.class_flag.to_string(),
            self.seq_length.to_string(),
            self.tax_name.clone(),
            self.tax_id.to_string(),
        ]
    }
}

impl KeyedRow for ClassificationLabel {
    fn key(&self) -> &str {
        &self.seq_id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strand {
    Forward,
    Reverse,
}

impl FromStr for Strand {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(Strand::Forward),
            "-1" => Ok(Strand::Reverse),
            _ => Err(FormatError::new(s, "strand '1' or '-1'")),
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strand::Forward => f.write_str("1"),
            Strand::Reverse => f.write_str("-1"),
        }
    }
}

/// A predicted gene, taken from a Prodigal-style FASTA header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneRecord {
    pub prot_id: String,
    pub contig_id: String,
    pub start: u64,
    pub end: u64,
    pub strand: Strand,
    pub info: String,
}

impl TableRow for GeneRecord {
    fn fields(&self) -> Vec<String> {
        vec![
            self.contig_id.clone(),
            self.start.to_string(),
            self.end.to_string(),
            self.strand.to_string(),
            self.info.clone(),
        ]
    }
}

impl KeyedRow for GeneRecord {
    fn key(&self) -> &str {
        &self.prot_id
    }
}

/// One target/query hit from an HMMER per-sequence table (`--tblout`).
///
/// `_fs` columns describe the full sequence, `_b1d` columns the best single domain.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileHit {
    pub target: String,
    pub query: String,
    pub evalue_fs: Decimal,
    pub score_fs: Decimal,
    pub bias_fs: Decimal,
    pub evalue_b1d: Decimal,
    pub score_b1d: Decimal,
    pub bias_b1d: Decimal,
    pub exp: Decimal,
    pub reg: u32,
    pub clu: u32,
    pub ov: u32,
    pub env: u32,
    pub dom: u32,
    pub rep: u32,
    pub inc: u32,
}

impl TableRow for ProfileHit {
    fn fields(&self) -> Vec<String> {
        vec![
            self.query.clone(),
            self.evalue_fs.to_string(),
            self.score_fs.to_string(),
            self.bias_fs.to_string(),
            self.evalue_b1d.to_string(),
            self.score_b1d.to_string(),
            self.bias_b1d.to_string(),
            self.exp.to_string(),
            self.reg.to_string(),
            self.clu.to_string(),
            self.ov.to_string(),
            self.env.to_string(),
            self.dom.to_string(),
            self.rep.to_string(),
            self.inc.to_string(),
        ]
    }
}

impl KeyedRow for ProfileHit {
    fn key(&self) -> &str {
        &self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taxon_field_sentinels() {
        let field = TaxonField::parse("-1", "-1");
        assert_eq!(field, TaxonField::Missing("-1".to_string()));
        assert_eq!(field.to_string(), "-1");
        assert_eq!(field.replace_missing().to_string(), "Unknown");

        let named = TaxonField::parse("ref_mOTU_v25_00001", "-1");
        assert!(named.is_named());
        assert_eq!(named.clone().replace_missing(), named);
    }

    #[test]
    fn test_decimal_keeps_source_text() {
        let evalue: Decimal = "1.2e-30".parse().unwrap();
        assert_eq!(evalue, 1.2e-30);
        assert_eq!(evalue.to_string(), "1.2e-30");

        let tiny: Decimal = "3.4e-250".parse().unwrap();
        assert_eq!(tiny.to_string(), "3.4e-250");

        let abundance: Decimal = "80.0".parse().unwrap();
        assert_eq!(abundance.value(), 80.0);
        assert_eq!(abundance.as_str(), "80.0");

        assert_eq!(Decimal::from(0.5).to_string(), "0.5");
        assert!("1.2.3".parse::<Decimal>().is_err());
    }

    #[test]
    fn test_sequence_length() {
        assert_eq!("150".parse::<SequenceLength>(), Ok(SequenceLength::Single(150)));
        assert_eq!("150|148".parse::<SequenceLength>(), Ok(SequenceLength::Paired(150, 148)));
        assert_eq!(SequenceLength::Paired(150, 148).to_string(), "150|148");
        assert!("150|".parse::<SequenceLength>().is_err());
        assert!("abc".parse::<SequenceLength>().is_err());
    }

    #[test]
    fn test_flags_and_strands() {
        assert_eq!("C".parse::<ClassFlag>(), Ok(ClassFlag::Classified));
        assert!("X".parse::<ClassFlag>().is_err());
        assert_eq!("-1".parse::<Strand>(), Ok(Strand::Reverse));
        assert_eq!(Strand::Forward.to_string(), "1");
        assert!("+".parse::<Strand>().is_err());
    }
}
