//! Command-line host for the courier barcode scanner.
//!
//! # Usage
//!
//! ```bash
//! # Check a single barcode
//! courier_scan classify --carrier sf 123456789012
//!
//! # Scan a list of barcodes and export both CSV schemas
//! courier_scan scan --carrier ups --input barcodes.txt --export both --out-dir ~/Downloads
//!
//! # Interactive session from stdin; `:mode zto` switches carrier, `:clear` drops records
//! RUST_LOG=debug courier_scan scan --carrier yt --export brief
//! ```

use std::{
    fs::File,
    io::{BufRead, BufReader, Read, stdin},
    path::PathBuf,
};

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand, ValueEnum};
use scanner::prelude::*;
use tracing::{debug, info};

/// Classify courier barcodes and export scan sessions to CSV.
#[derive(Parser, Debug)]
#[command(name = "courier_scan")]
#[command(version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate and normalize one barcode, print the normalized code.
    Classify {
        /// Carrier whose rule is applied.
        #[arg(short, long, value_enum, default_value_t = CarrierArg::Ups)]
        carrier: CarrierArg,

        /// Raw barcode text.
        barcode: String,
    },
    /// Run a scan session over input lines, print statistics, optionally export.
    Scan(ScanArgs),
}

#[derive(clap::Args, Debug)]
struct ScanArgs {
    /// Carrier selected at session start.
    #[arg(short, long, value_enum, default_value_t = CarrierArg::Ups)]
    carrier: CarrierArg,

    /// Input file with one barcode per line. If not specified, reads from stdin.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Export the session after the input is consumed.
    #[arg(short, long, value_enum)]
    export: Option<ExportArg>,

    /// Export only records of this carrier.
    #[arg(long, value_enum)]
    only: Option<CarrierArg>,

    /// Primary export destination.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Destination used when the primary one fails. Defaults to the system temp directory.
    #[arg(long)]
    fallback_dir: Option<PathBuf>,
}

/// Supported carriers for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CarrierArg {
    Ups,
    Fedex,
    Usps,
    Amazon,
    Dhl,
    /// 顺丰
    Sf,
    /// 圆通
    Yt,
    /// 中通
    Zto,
    /// 申通
    Sto,
    /// 韵达
    Yd,
    /// 通用, accepts any text.
    Generic,
}

impl From<CarrierArg> for Carrier {
    fn from(arg: CarrierArg) -> Self {
        match arg {
            CarrierArg::Ups => Carrier::Ups,
            CarrierArg::Fedex => Carrier::FedEx,
            CarrierArg::Usps => Carrier::Usps,
            CarrierArg::Amazon => Carrier::Amazon,
            CarrierArg::Dhl => Carrier::Dhl,
            CarrierArg::Sf => Carrier::Sf,
            CarrierArg::Yt => Carrier::Yt,
            CarrierArg::Zto => Carrier::Zto,
            CarrierArg::Sto => Carrier::Sto,
            CarrierArg::Yd => Carrier::Yd,
            CarrierArg::Generic => Carrier::Generic,
        }
    }
}

/// Which CSV schemas to export.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ExportArg {
    /// Time, carrier, processed code.
    Brief,
    /// Time, carrier, raw input, processed code.
    Full,
    /// Both files.
    Both,
}

impl ExportArg {
    fn schemas(self) -> &'static [Schema] {
        match self {
            Self::Brief => &[Schema::Brief],
            Self::Full => &[Schema::Full],
            Self::Both => &[Schema::Brief, Schema::Full],
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    match Args::parse().command {
        Command::Classify { carrier, barcode } => {
            let carrier = Carrier::from(carrier);
            let code = classify(&barcode, carrier)
                .ok_or_else(|| anyhow!(Rejected { carrier, raw_input: barcode }))?;
            println!("{code}");
            Ok(())
        }
        Command::Scan(args) => scan(args),
    }
}

fn scan(args: ScanArgs) -> Result<()> {
    let input: Box<dyn Read> = match &args.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input file: {}", path.display()))?;
            Box::new(file)
        }
        None => Box::new(stdin().lock()),
    };

    let mut session = Session::new(args.carrier.into());
    let report = run_session(&mut session, BufReader::new(input))?;

    // Statistics and the most-recent-first list go to stdout
    println!("{}", session.ledger().counts_by_carrier().summary());
    for line in session.ledger().display_lines() {
        println!("{line}");
    }
    eprintln!("Accepted {} scan(s), rejected {}", report.accepted, report.rejected);

    if let Some(export) = args.export {
        let fallback_dir = args.fallback_dir.clone().unwrap_or_else(std::env::temp_dir);
        let sink =
            FallbackSink::new(DirectorySink::new(&args.out_dir), DirectorySink::new(fallback_dir));

        for &schema in export.schemas() {
            let artifact = match args.only {
                Some(carrier) => {
                    session.export_carrier(carrier.into(), schema, jiff::Zoned::now().date())
                }
                None => session.export(schema),
            }
            .context("Failed to export records")?;

            let location = artifact.persist(&sink).context("Failed to save export")?;
            info!(%location, records = artifact.records, "export finished");
            println!("Saved {} record(s) to {location}", artifact.records);
        }
    }

    Ok(())
}

/// Counters of one processed input stream.
#[derive(Debug, Default, PartialEq, Eq)]
struct SessionReport {
    accepted: usize,
    rejected: usize,
}

/// A line of session input.
#[derive(Debug, PartialEq, Eq)]
enum Directive<'a> {
    /// `:mode <carrier>`
    Mode(Carrier),
    /// `:clear`
    Clear,
    Barcode(&'a str),
}

/// Lines that are not a known directive are barcodes, even when they start with `:`.
fn parse_line(line: &str) -> Option<Directive<'_>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let directive = match trimmed.strip_prefix(':').map(|c| c.split_once(char::is_whitespace)) {
        Some(Some(("mode", carrier))) => carrier.parse().ok().map(Directive::Mode),
        _ if trimmed == ":clear" => Some(Directive::Clear),
        _ => None,
    };
    Some(directive.unwrap_or(Directive::Barcode(line)))
}

/// Feeds every input line into the session.
///
/// Rejected barcodes are reported and skipped; they never stop the session.
fn run_session<R: BufRead>(session: &mut Session, input: R) -> Result<SessionReport> {
    let mut report = SessionReport::default();

    for (idx, line) in input.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line #{}", idx + 1))?;
        match parse_line(&line) {
            None => {}
            Some(Directive::Mode(carrier)) => session.select_carrier(carrier),
            Some(Directive::Clear) => {
                session.clear();
                eprintln!("Records cleared");
            }
            Some(Directive::Barcode(raw)) => match session.scan(raw) {
                Ok(event) => {
                    debug!(line = idx + 1, code = event.normalized_code(), "accepted");
                    report.accepted += 1;
                }
                Err(rejected) => {
                    eprintln!("{rejected}");
                    report.rejected += 1;
                }
            },
        }
    }

    Ok(report)
}
