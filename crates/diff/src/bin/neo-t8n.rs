//! `neo-t8n` -- state-transition tool.
//!
//! Reads `alloc.json`, `env.json`, and `txs.json`, runs the transactions in
//! order, and writes `alloc-out.json` and `result.json` (the receipt list)
//! next to them, or to an output directory if one is given.

use clap::Parser;
use neo_diff::t8n::{run_t8n, Alloc, Env, TxInput};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "neo-t8n", about = "Neo N3 core state-transition tool")]
struct Args {
    /// Directory containing alloc.json, env.json, txs.json.
    #[arg(long)]
    input: PathBuf,

    /// Directory to write alloc-out.json and result.json into. Defaults to --input.
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let output_dir = args.output.unwrap_or_else(|| args.input.clone());

    let alloc: Alloc = serde_json::from_str(&std::fs::read_to_string(args.input.join("alloc.json"))?)?;
    let env: Env = serde_json::from_str(&std::fs::read_to_string(args.input.join("env.json"))?)?;
    let txs: Vec<TxInput> = serde_json::from_str(&std::fs::read_to_string(args.input.join("txs.json"))?)?;

    tracing::info!(tx_count = txs.len(), "running state transition");
    let output = run_t8n(alloc, &env, &txs)?;

    std::fs::create_dir_all(&output_dir)?;
    std::fs::write(
        output_dir.join("alloc-out.json"),
        serde_json::to_string_pretty(&output.alloc)?,
    )?;
    std::fs::write(
        output_dir.join("result.json"),
        serde_json::to_string_pretty(&output.receipts)?,
    )?;

    Ok(())
}
