use clap::Parser;
use seqbank::cli;
use seqbank::commands;

fn main() {
    let args = cli::Args::parse();

    let result = match args.command {
        cli::Commands::Add {
            bank,
            files,
            filter_file,
            min_length,
            max_length,
            workers,
            max,
        } => commands::add::run(bank, files, filter_file, min_length, max_length, workers, max),
        cli::Commands::Url {
            bank,
            urls,
            workers,
            max,
            force,
            tmp_dir,
        } => commands::url::run(bank, urls, workers, max, force, tmp_dir),
        cli::Commands::Refseq {
            bank,
            max,
            workers,
            tmp_dir,
        } => commands::refseq::run(bank, max, workers, tmp_dir),
        cli::Commands::Dfam {
            bank,
            curated,
            release,
            force,
            max,
            workers,
        } => commands::dfam::run(bank, curated, release, force, max, workers),
        cli::Commands::Ls { bank } => commands::ls::run(bank),
        cli::Commands::Count { bank } => commands::count::run(bank),
        cli::Commands::Delete { bank, accession } => commands::delete::run(bank, accession),
        cli::Commands::Export {
            bank,
            output,
            accessions,
        } => commands::export::run(bank, output, accessions),
        cli::Commands::Cp { src, dst } => commands::cp::run(src, dst),
        cli::Commands::Histogram {
            bank,
            nbins,
            output,
            show,
        } => commands::histogram::run(bank, nbins, output, show),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
