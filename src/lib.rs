//! # bank-ledger-engine
//!
//! An in-memory banking ledger driven by a JSON command batch. The batch
//! seeds users and exchange rates, then replays commands (account and
//! card lifecycle, payments, transfers, split payments, reports) in
//! order; every state change is recorded as an event in the owning
//! user's transaction log and the run produces a JSON array of output
//! records.
//!
//! Modules:
//! - [`types`]: accounts, cards, events, command records, errors
//! - [`core`]: exchange rate graph, ledger store, command engine, reports
//! - [`io`]: batch deserialization and output serialization
//! - [`cli`]: argument parsing

pub mod cli;
pub mod core;
pub mod io;
pub mod types;

use std::io::Write;
use std::path::Path;

pub use crate::core::LedgerEngine;
pub use crate::types::LedgerError;

/// Runs one batch: loads the input file, replays every command, and
/// writes the output records to `writer`.
///
/// # Errors
///
/// Fails only on I/O or parse problems; domain-rule failures inside the
/// batch are part of the normal output.
pub fn run(input: &Path, writer: &mut dyn Write) -> Result<(), LedgerError> {
    let batch = io::load_input(input)?;

    let mut engine = LedgerEngine::new();
    for user in &batch.users {
        engine.register_user(
            user.first_name.clone(),
            user.last_name.clone(),
            user.email.clone(),
        );
    }
    for rate in &batch.exchange_rates {
        engine.register_rate(&rate.from, &rate.to, rate.rate);
    }
    for command in &batch.commands {
        engine.process(command);
    }

    let records = engine.into_output();
    io::write_output(&records, writer)
}
