use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add sequences from local FASTA/FASTQ files (gzip/bzip2 transparent)
    Add {
        /// Path to the seqbank directory
        bank: PathBuf,
        /// Sequence files to ingest
        files: Vec<PathBuf>,
        /// File with one accession per line; only listed accessions are kept
        #[arg(long = "filter")]
        filter_file: Option<PathBuf>,
        /// Reject sequences shorter than this
        #[arg(long)]
        min_length: Option<usize>,
        /// Reject sequences longer than this
        #[arg(long)]
        max_length: Option<usize>,
        /// Worker threads
        #[arg(long, default_value = "4")]
        workers: usize,
        /// Stop after this many new records
        #[arg(long)]
        max: Option<usize>,
    },

    /// Download sequence files from URLs and add their records
    Url {
        /// Path to the seqbank directory
        bank: PathBuf,
        /// URLs of sequence files
        urls: Vec<String>,
        /// Worker threads
        #[arg(long, default_value = "4")]
        workers: usize,
        /// Stop after this many new records
        #[arg(long)]
        max: Option<usize>,
        /// Re-ingest URLs that were already processed
        #[arg(long)]
        force: bool,
        /// Directory for download scratch space
        #[arg(long)]
        tmp_dir: Option<PathBuf>,
    },

    /// Ingest the NCBI RefSeq complete release
    Refseq {
        /// Path to the seqbank directory
        bank: PathBuf,
        /// Stop after this many new records
        #[arg(long)]
        max: Option<usize>,
        /// Worker threads
        #[arg(long, default_value = "4")]
        workers: usize,
        /// Directory for download scratch space
        #[arg(long)]
        tmp_dir: Option<PathBuf>,
    },

    /// Ingest repeat-family consensus sequences from Dfam
    Dfam {
        /// Path to the seqbank directory
        bank: PathBuf,
        /// Only curated families
        #[arg(long)]
        curated: bool,
        /// Dfam release identifier
        #[arg(long, default_value = "current")]
        release: String,
        /// Re-ingest even when this catalog was already processed
        #[arg(long)]
        force: bool,
        /// Stop after this many new records
        #[arg(long)]
        max: Option<usize>,
        /// Worker threads
        #[arg(long, default_value = "4")]
        workers: usize,
    },

    /// List all stored accessions
    Ls {
        /// Path to the seqbank directory
        bank: PathBuf,
    },

    /// Print the number of stored records
    Count {
        /// Path to the seqbank directory
        bank: PathBuf,
    },

    /// Remove one record by accession
    Delete {
        /// Path to the seqbank directory
        bank: PathBuf,
        /// Accession to remove
        accession: String,
    },

    /// Export stored records as FASTA
    Export {
        /// Path to the seqbank directory
        bank: PathBuf,
        /// Output FASTA file
        output: PathBuf,
        /// File with one accession per line; only these are exported
        #[arg(long)]
        accessions: Option<PathBuf>,
    },

    /// Copy every record from one bank into another
    Cp {
        /// Source seqbank directory
        src: PathBuf,
        /// Destination seqbank directory
        dst: PathBuf,
    },

    /// Show the distribution of stored sequence lengths
    Histogram {
        /// Path to the seqbank directory
        bank: PathBuf,
        /// Number of length buckets
        #[arg(long, default_value = "30")]
        nbins: usize,
        /// Write the histogram as SVG to this path
        #[arg(long)]
        output: Option<PathBuf>,
        /// Print a text histogram to stdout
        #[arg(long)]
        show: bool,
    },
}
