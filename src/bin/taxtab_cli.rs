use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::PathBuf;

use taxtab_rs::{
    read_classification_report_as_lineage_table, read_gene_prediction_headers,
    read_per_sequence_classification_labels, read_profile_search_hit_table,
    read_relative_abundance_with_read_stats, read_taxonomic_linear_table, LinearTableOptions,
    Rank, RelativeAbundanceOptions,
};

/// Convert a tool output into a normalized TSV table.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    format: Format,

    /// Write the table here instead of stdout.
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Format {
    /// mOTUs linear taxonomic profile.
    Motus {
        input: PathBuf,
        /// Drop taxa with a zero count.
        #[arg(long)]
        drop_zeros: bool,
        /// Show -1/NA placeholders as "Unknown".
        #[arg(long)]
        replace_unknown: bool,
    },
    /// MetaPhlAn relative abundance with read statistics.
    Metaphlan {
        input: PathBuf,
        /// Keep only clades at this rank (code or name, e.g. "s" or "species").
        #[arg(long)]
        rank: Option<Rank>,
        /// Show the UNKNOWN placeholder as "Unknown".
        #[arg(long)]
        replace_unknown: bool,
    },
    /// Kraken 2 report converted to taxid/count/lineage.
    KrakenReport { input: PathBuf },
    /// Kraken 2 per-sequence output (run with --use-names).
    KrakenLabels { input: PathBuf },
    /// Prodigal protein or gene FASTA headers.
    Prodigal { input: PathBuf },
    /// HMMER --tblout per-sequence hits.
    Hmmer { input: PathBuf },
}

fn spinner(msg: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&[
                "⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏",
            ])
            .template("{spinner:.green} {msg}")
            .expect("Invalid spinner template"),
    );
    spinner.set_message(msg);
    spinner
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let spinner = spinner("Reading table...".to_string());

    let tsv = match cli.format {
        Format::Motus {
            input,
            drop_zeros,
            replace_unknown,
        } => {
            let options = LinearTableOptions::default()
                .drop_zero_counts(drop_zeros)
                .replace_unknown(replace_unknown);
            read_taxonomic_linear_table(input, options)?.to_tsv()
        }
        Format::Metaphlan {
            input,
            rank,
            replace_unknown,
        } => {
            let options = RelativeAbundanceOptions {
                rank,
                replace_unknown,
            };
            read_relative_abundance_with_read_stats(input, options)?.to_tsv()
        }
        Format::KrakenReport { input } => read_classification_report_as_lineage_table(input)?.to_tsv(),
        Format::KrakenLabels { input } => read_per_sequence_classification_labels(input)?.to_tsv(),
        Format::Prodigal { input } => read_gene_prediction_headers(input)?.to_tsv(),
        Format::Hmmer { input } => match read_profile_search_hit_table(input)? {
            Some(table) => table.to_tsv(),
            None => {
                log::warn!("No hits found; nothing to write");
                String::new()
            }
        },
    };

    spinner.finish_and_clear();

    match cli.output {
        Some(path) => fs::write(&path, tsv)?,
        None => print!("{tsv}"),
    }
    Ok(())
}
