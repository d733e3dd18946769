//! Suffix frequency CLI
//!
//! Reads domains one per line and prints every suffix that occurs at least
//! `--count` times.

mod logging;
mod streams;

use std::io::Write;
use std::time::Instant;

use clap::{Parser, ValueEnum};

use sfx_core::{Aggregator, OutputFormat, ReportOptions, SortOrder, DEFAULT_THRESHOLD};

#[derive(Parser)]
#[command(name = "sfx")]
#[command(about = "Report domain suffixes that occur at least N times")]
struct Cli {
    /// Input file, one domain per line (default: stdin)
    #[arg(short, long)]
    input: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<String>,

    /// Minimum occurrence count
    #[arg(short = 'c', long = "count", default_value_t = DEFAULT_THRESHOLD)]
    threshold: u64,

    /// Output order
    #[arg(long, value_enum, default_value_t = SortArg::Unordered)]
    sort: SortArg,

    /// Output format
    #[arg(long, value_enum, default_value_t = FormatArg::Plain)]
    format: FormatArg,

    /// Verbose logging to stderr (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    /// Traversal order
    Unordered,
    /// Alphabetical by suffix
    Lexical,
    /// Highest count first
    Count,
}

impl From<SortArg> for SortOrder {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Unordered => SortOrder::Unordered,
            SortArg::Lexical => SortOrder::Lexical,
            SortArg::Count => SortOrder::Count,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    /// One suffix per line
    Plain,
    /// Suffix and count separated by a tab
    Counts,
    /// JSON array
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Plain => OutputFormat::Plain,
            FormatArg::Counts => OutputFormat::Counts,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = cmd_report(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn cmd_report(cli: &Cli) -> Result<(), String> {
    let start = Instant::now();

    let reader = streams::open_input(cli.input.as_deref())?;
    let mut aggregator = Aggregator::new();
    let stats = aggregator
        .ingest_reader(reader)
        .map_err(|e| format!("Failed to read '{}': {}", streams::display_name(cli.input.as_deref(), "stdin"), e))?;
    let ingest_time = start.elapsed();

    let opts = ReportOptions {
        threshold: cli.threshold,
        sort: cli.sort.into(),
        format: cli.format.into(),
    };

    let output_name = streams::display_name(cli.output.as_deref(), "stdout");
    let mut writer = streams::open_output(cli.output.as_deref())?;
    let written = aggregator
        .write_report(&opts, &mut writer)
        .map_err(|e| format!("Failed to write '{}': {}", output_name, e))?;
    writer
        .flush()
        .map_err(|e| format!("Failed to write '{}': {}", output_name, e))?;

    let total_time = start.elapsed();

    log::info!(
        "lines: {} ({} blank), suffixes: {} -> {} at threshold {}",
        stats.lines_read,
        stats.lines_skipped,
        aggregator.trie().node_count(),
        written,
        cli.threshold
    );
    log::info!(
        "time: {:.1}ms (ingest: {:.1}ms, report: {:.1}ms)",
        total_time.as_secs_f64() * 1000.0,
        ingest_time.as_secs_f64() * 1000.0,
        (total_time - ingest_time).as_secs_f64() * 1000.0,
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["sfx"]).unwrap();
        assert!(cli.input.is_none());
        assert!(cli.output.is_none());
        assert_eq!(cli.threshold, 2);
        assert_eq!(SortOrder::from(cli.sort), SortOrder::Unordered);
        assert_eq!(OutputFormat::from(cli.format), OutputFormat::Plain);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from(["sfx", "-i", "in.txt", "-o", "out.txt", "-c", "5", "-vv"]).unwrap();
        assert_eq!(cli.input.as_deref(), Some("in.txt"));
        assert_eq!(cli.output.as_deref(), Some("out.txt"));
        assert_eq!(cli.threshold, 5);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_value_enums() {
        let cli = Cli::try_parse_from(["sfx", "--sort", "count", "--format", "json"]).unwrap();
        assert_eq!(SortOrder::from(cli.sort), SortOrder::Count);
        assert_eq!(OutputFormat::from(cli.format), OutputFormat::Json);
    }

    #[test]
    fn test_rejects_non_numeric_threshold() {
        assert!(Cli::try_parse_from(["sfx", "-c", "many"]).is_err());
    }
}
