//! Command-line argument definitions

use std::path::PathBuf;

use clap::Parser;

/// Replays a JSON banking command batch against an in-memory ledger.
#[derive(Parser, Debug)]
#[command(name = "bank-ledger-engine", version, about)]
pub struct CliArgs {
    /// Path to the JSON input batch
    #[arg(value_name = "INPUT")]
    pub input_file: PathBuf,

    /// Write the output log to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}
