//! Command record type
//!
//! One entry of the input batch's `commands` array. Only `command` and
//! `timestamp` are always present; every other field is optional and the
//! handlers validate whatever combination their command needs.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::types::event::Timestamp;

/// A single command from the input batch.
///
/// Unknown fields are ignored and missing fields default, so one record
/// type covers the whole command set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CommandInput {
    pub command: String,
    pub timestamp: Timestamp,
    pub email: Option<String>,
    pub account: Option<String>,
    pub receiver: Option<String>,
    pub amount: Option<Decimal>,
    pub currency: Option<String>,
    pub card_number: Option<String>,
    pub interest_rate: Option<Decimal>,
    pub account_type: Option<String>,
    pub start_timestamp: Option<Timestamp>,
    pub end_timestamp: Option<Timestamp>,
    pub accounts: Vec<String>,
    pub description: Option<String>,
    #[serde(rename = "commerciant")]
    pub merchant: Option<String>,
    pub alias: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_command() {
        let cmd: CommandInput =
            serde_json::from_str(r#"{"command": "printUsers", "timestamp": 3}"#).unwrap();
        assert_eq!(cmd.command, "printUsers");
        assert_eq!(cmd.timestamp, 3);
        assert!(cmd.email.is_none());
        assert!(cmd.accounts.is_empty());
    }

    #[test]
    fn test_deserialize_camel_case_fields() {
        let cmd: CommandInput = serde_json::from_str(
            r#"{
                "command": "payOnline",
                "timestamp": 7,
                "cardNumber": "4000000000000001",
                "amount": 12.5,
                "currency": "USD",
                "commerciant": "Steam",
                "email": "ana@mail.com"
            }"#,
        )
        .unwrap();
        assert_eq!(cmd.card_number.as_deref(), Some("4000000000000001"));
        assert_eq!(cmd.amount, Some(Decimal::new(125, 1)));
        assert_eq!(cmd.merchant.as_deref(), Some("Steam"));
    }

    #[test]
    fn test_deserialize_split_payment_accounts() {
        let cmd: CommandInput = serde_json::from_str(
            r#"{
                "command": "splitPayment",
                "timestamp": 9,
                "accounts": ["RO1", "RO2"],
                "amount": 100,
                "currency": "RON"
            }"#,
        )
        .unwrap();
        assert_eq!(cmd.accounts, vec!["RO1".to_string(), "RO2".to_string()]);
    }
}
