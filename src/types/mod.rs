//! Core data types shared across the crate.

pub mod account;
pub mod command;
pub mod error;
pub mod event;

pub use account::{round_money, Account, AccountType, Card, CardStatus, MONEY_SCALE};
pub use command::CommandInput;
pub use error::LedgerError;
pub use event::{Event, EventKind, Timestamp};
