//! Core business logic: exchange rates, the user/account store, the
//! per-user transaction log, report projections and the command engine.

pub mod engine;
pub mod exchange;
pub mod idgen;
pub mod ledger;
pub mod report;
pub mod transaction_log;

pub use engine::LedgerEngine;
pub use exchange::ExchangeRateGraph;
pub use idgen::IdGenerator;
pub use ledger::{Ledger, User};
pub use transaction_log::TransactionLog;
