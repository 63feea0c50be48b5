//! Command-line interface.

pub mod args;

pub use args::CliArgs;

use clap::Parser;

/// Parses process arguments into [`CliArgs`].
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
