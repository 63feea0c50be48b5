//! Report projections
//!
//! Turns transaction log events into the JSON nodes exposed by
//! `printTransactions`, `report` and `spendingsReport`. Each output kind
//! projects a different subset of an event's fields, so the projections
//! live here in one place rather than on the event type itself.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde_json::{json, Value};

use crate::core::ledger::User;
use crate::types::{Account, AccountType, Event, EventKind, Timestamp};

/// Transfer direction as seen by the user reading the log.
fn transfer_type(sender_email: &str, viewer_email: &str) -> &'static str {
    if sender_email == viewer_email {
        "sent"
    } else {
        "received"
    }
}

fn amount_with_currency(amount: Decimal, currency: &str) -> String {
    format!("{} {}", amount, currency)
}

/// Projects one event for `printTransactions`.
///
/// `viewer_email` is the log owner's email; transfers are labeled `sent`
/// or `received` relative to them.
pub fn log_node(event: &Event, viewer_email: &str) -> Value {
    let base = json!({
        "timestamp": event.timestamp,
        "description": event.description,
    });
    match &event.kind {
        EventKind::AccountCreated
        | EventKind::InsufficientFunds { .. }
        | EventKind::PaymentFrozen { .. }
        | EventKind::CardFrozen { .. }
        | EventKind::InterestRateChanged
        | EventKind::SplitFailed => base,

        EventKind::CardCreated {
            card,
            holder,
            account,
        }
        | EventKind::CardDeleted {
            card,
            holder,
            account,
        }
        | EventKind::CardRegenerated {
            card,
            holder,
            account,
        } => with_fields(
            base,
            [
                ("card", json!(card)),
                ("cardHolder", json!(holder)),
                ("account", json!(account)),
            ],
        ),

        EventKind::MoneySent {
            sender_iban,
            receiver_iban,
            amount,
            currency,
            sender_email,
        } => with_fields(
            base,
            [
                ("senderIBAN", json!(sender_iban)),
                ("receiverIBAN", json!(receiver_iban)),
                ("amount", json!(amount_with_currency(*amount, currency))),
                (
                    "transferType",
                    json!(transfer_type(sender_email, viewer_email)),
                ),
            ],
        ),

        EventKind::PaymentCompleted {
            amount, merchant, ..
        } => {
            let mut node = with_fields(base, [("amount", json!(amount))]);
            if let Some(merchant) = merchant {
                insert(&mut node, "commerciant", json!(merchant));
            }
            node
        }

        EventKind::SplitShare {
            amount,
            currency,
            involved,
        } => with_fields(
            base,
            [
                ("currency", json!(currency)),
                ("amount", json!(amount)),
                ("involvedAccounts", json!(involved)),
            ],
        ),
    }
}

/// Projects one event for the `report` command.
///
/// Flatter than the `printTransactions` projection: split shares keep
/// only their amount, and zero amounts are omitted.
fn report_node(event: &Event, viewer_email: &str) -> Value {
    let base = json!({
        "timestamp": event.timestamp,
        "description": event.description,
    });
    match &event.kind {
        EventKind::AccountCreated | EventKind::InterestRateChanged => base,

        EventKind::CardCreated {
            card,
            holder,
            account,
        }
        | EventKind::CardDeleted {
            card,
            holder,
            account,
        }
        | EventKind::CardRegenerated {
            card,
            holder,
            account,
        } => with_fields(
            base,
            [
                ("card", json!(card)),
                ("cardHolder", json!(holder)),
                ("account", json!(account)),
            ],
        ),

        EventKind::CardFrozen { account, card } => with_fields(
            base,
            [("card", json!(card)), ("account", json!(account))],
        ),

        EventKind::MoneySent {
            sender_iban,
            receiver_iban,
            amount,
            currency,
            sender_email,
        } => with_fields(
            base,
            [
                ("senderIBAN", json!(sender_iban)),
                ("receiverIBAN", json!(receiver_iban)),
                ("amount", json!(amount_with_currency(*amount, currency))),
                (
                    "transferType",
                    json!(transfer_type(sender_email, viewer_email)),
                ),
            ],
        ),

        EventKind::PaymentCompleted {
            amount, merchant, ..
        } => {
            let mut node = base;
            if *amount > Decimal::ZERO {
                insert(&mut node, "amount", json!(amount));
            }
            if let Some(merchant) = merchant {
                insert(&mut node, "commerciant", json!(merchant));
            }
            node
        }

        EventKind::SplitShare { amount, .. } => {
            let mut node = base;
            if *amount > Decimal::ZERO {
                insert(&mut node, "amount", json!(amount));
            }
            node
        }

        EventKind::InsufficientFunds { .. }
        | EventKind::PaymentFrozen { .. }
        | EventKind::SplitFailed => base,
    }
}

/// Savings accounts only report interest events; checking accounts
/// report everything.
fn passes_account_filter(event: &Event, account_type: AccountType) -> bool {
    match account_type {
        AccountType::Checking => true,
        AccountType::Savings => matches!(event.kind, EventKind::InterestRateChanged),
    }
}

/// Builds the `report` output node for one account.
pub fn account_report(
    user: &User,
    account: &Account,
    start: Timestamp,
    end: Timestamp,
) -> Value {
    let transactions: Vec<Value> = user
        .log
        .iter()
        .filter(|event| event.in_range(start, end))
        .filter(|event| passes_account_filter(event, account.account_type))
        .map(|event| report_node(event, &user.email))
        .collect();

    json!({
        "IBAN": account.iban,
        "balance": account.balance,
        "currency": account.currency,
        "transactions": transactions,
    })
}

/// Builds the `spendingsReport` output node for one account.
///
/// Only successful card payments with a merchant, charged to the queried
/// account, count as spending. Merchant totals are sorted ascending by
/// merchant name.
pub fn spendings_report(
    user: &User,
    account: &Account,
    start: Timestamp,
    end: Timestamp,
) -> Value {
    let mut transactions = Vec::new();
    let mut totals: BTreeMap<&str, Decimal> = BTreeMap::new();

    for event in user.log.iter().filter(|event| event.in_range(start, end)) {
        if let EventKind::PaymentCompleted {
            account: paying_iban,
            amount,
            merchant: Some(merchant),
        } = &event.kind
        {
            if paying_iban == &account.iban {
                transactions.push(json!({
                    "timestamp": event.timestamp,
                    "description": event.description,
                    "amount": amount,
                    "commerciant": merchant,
                }));
                *totals.entry(merchant.as_str()).or_insert(Decimal::ZERO) += *amount;
            }
        }
    }

    let merchants: Vec<Value> = totals
        .iter()
        .map(|(merchant, total)| json!({"commerciant": merchant, "total": total}))
        .collect();

    json!({
        "IBAN": account.iban,
        "balance": account.balance,
        "currency": account.currency,
        "transactions": transactions,
        "commerciants": merchants,
    })
}

fn with_fields<const N: usize>(mut node: Value, fields: [(&str, Value); N]) -> Value {
    for (key, value) in fields {
        insert(&mut node, key, value);
    }
    node
}

fn insert(node: &mut Value, key: &str, value: Value) {
    if let Value::Object(map) = node {
        map.insert(key.to_string(), value);
    }
}
