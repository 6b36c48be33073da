//! `neo-diff` -- runs a directory of test vectors through this repository's
//! execution engine and reports divergence from each vector's expectation.
//!
//! Exits 0 iff every vector ran and matched (`failed == 0 && errors == 0`),
//! nonzero otherwise, so it can gate CI.

use clap::Parser;
use neo_diff::{CoverageManifest, DiffReporter, EngineExecutor, Executor, ResultComparator, VectorLoader};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "neo-diff", about = "Differential test runner for the Neo N3 core")]
struct Args {
    /// Directory of `*.json` test vectors.
    #[arg(long)]
    vectors: PathBuf,

    /// Gas tolerance (absolute datoshi) allowed between expected and observed gas.
    #[arg(long, default_value_t = 0)]
    gas_tolerance: i64,

    /// Emit the report as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Categories the suite is required to cover; missing categories are
    /// reported but do not fail the run on their own.
    #[arg(long, value_delimiter = ',')]
    require_categories: Vec<String>,
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let vectors = VectorLoader::load_dir(&args.vectors)?;
    tracing::info!(count = vectors.len(), "loaded test vectors");

    let executor = EngineExecutor::new();
    let comparator = ResultComparator::new(args.gas_tolerance);
    let mut reporter = DiffReporter::new();
    let mut coverage = CoverageManifest::new(args.require_categories.clone());
    coverage.observe_all(&vectors);

    for vector in &vectors {
        match executor.run(vector) {
            Ok(outcome) => {
                let differences = comparator.compare(vector, &outcome);
                reporter.record_comparison(&vector.name, &vector.category, differences);
            }
            Err(e) => {
                reporter.record_error(&vector.name, &vector.category, e.to_string());
            }
        }
    }

    if !coverage.is_complete() {
        tracing::warn!(missing = ?coverage.missing(), "required categories not covered by this run");
    }

    if args.json {
        println!("{}", reporter.to_json()?);
    } else {
        print!("{}", reporter.to_text());
    }

    Ok(if reporter.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
