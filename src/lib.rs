// src/lib.rs

//! Readers that turn taxonomic profiler, read classifier, gene predictor and
//! profile-search outputs into typed tables.
//!
//! | Reader | Tool output |
//! |---|---|
//! | [`read_taxonomic_linear_table`] | mOTUs profile |
//! | [`read_relative_abundance_with_read_stats`] | MetaPhlAn `rel_ab_w_read_stats` |
//! | [`read_classification_report_as_lineage_table`] | Kraken 2 report as `taxid/count/lineage` |
//! | [`read_per_sequence_classification_labels`] | Kraken 2 per-read output |
//! | [`read_gene_prediction_headers`] | Prodigal FASTA headers |
//! | [`read_profile_search_hit_table`] | HMMER `--tblout` |

pub mod error;
pub mod io;
pub mod lineage;
pub mod readers;
pub mod table;
pub mod types;

pub use error::{FormatError, ReadError};
pub use lineage::{decode, encode, merge_adjacent_ranks, parse_lineage_entry, Lineage, Rank};
pub use readers::{
    read_classification_report_as_lineage_table, read_gene_prediction_headers,
    read_per_sequence_classification_labels, read_profile_search_hit_table,
    read_relative_abundance_with_read_stats, read_taxonomic_linear_table, LinearTableOptions,
    RelativeAbundanceOptions,
};
pub use table::{KeyedRow, Table, TableRow};
pub use types::Decimal;
