//! # chatlens CLI
//!
//! Command-line interface for the chatlens library. Reports go to stdout,
//! diagnostics to stderr (`RUST_LOG=debug` for parser details).

use std::process;

use clap::Parser as ClapParser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use chatlens::ChatlensError;
use chatlens::cli::Args;
use chatlens::core::Stopwords;
use chatlens::parser::TranscriptParser;
use chatlens::report::Report;

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run() -> Result<(), ChatlensError> {
    let args = <Args as ClapParser>::parse();

    let filter = args.filter_config()?;
    let analysis = args.analysis_config();

    let parser = TranscriptParser::with_config(args.parser_config());
    let transcript = parser.load_file(&args.input)?;
    info!(
        input = %args.input.display(),
        records = transcript.len(),
        dropped = transcript.dropped(),
        pattern = %transcript.header_pattern(),
        "transcript loaded"
    );

    if let Some(name) = filter.selection.member() {
        if !transcript.has_member(name) {
            return Err(ChatlensError::unknown_member(name));
        }
    }

    let stopwords = match &analysis.stopwords_path {
        Some(path) => Stopwords::load(path)?,
        None => Stopwords::empty(),
    };

    let report = Report::build(&transcript, &filter, args.report, &analysis, &stopwords);
    let rendered = report.render(args.format)?;

    print!("{rendered}");
    if !rendered.ends_with('\n') {
        println!();
    }

    Ok(())
}
