//! Ledger event types
//!
//! This module defines the `Event` structure and its `EventKind` tagged union.
//! Every domain outcome (account/card lifecycle, payments, transfers, split
//! settlements, freezes) is recorded as one immutable event in the owning
//! user's transaction log. Each variant carries only the fields that event
//! kind needs, so there are no optional catch-all fields to misread.

use rust_decimal::Decimal;

/// Command timestamp, as supplied by the input batch.
///
/// Events carry the timestamp of the command that produced them; the log
/// itself stays in command order and is never re-sorted by timestamp.
pub type Timestamp = u64;

/// Kind-specific payload of a ledger event.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    /// A new account was opened for the user.
    AccountCreated,

    /// A card (standard or one-time) was attached to an account.
    CardCreated {
        card: String,
        holder: String,
        account: String,
    },

    /// A card was removed from an account.
    CardDeleted {
        card: String,
        holder: String,
        account: String,
    },

    /// A one-time card was consumed by a successful payment and received
    /// a fresh card number. The card slot stays active.
    CardRegenerated {
        card: String,
        holder: String,
        account: String,
    },

    /// A transfer between two accounts.
    ///
    /// The same event is appended to both the sender's and the receiver's
    /// logs; `sender_email` lets projections derive the viewer-facing
    /// direction (`sent` for the sender, `received` for everyone else).
    MoneySent {
        sender_iban: String,
        receiver_iban: String,
        amount: Decimal,
        currency: String,
        sender_email: String,
    },

    /// A successful card payment. `amount` is expressed in the paying
    /// account's currency, after conversion.
    PaymentCompleted {
        account: String,
        amount: Decimal,
        merchant: Option<String>,
    },

    /// A payment or transfer was rejected for lack of funds.
    InsufficientFunds { account: String },

    /// A payment attempt on a frozen card.
    PaymentFrozen { account: String },

    /// A card was frozen because the account reached its minimum balance.
    CardFrozen { account: String, card: String },

    /// The interest rate of a savings account was changed.
    InterestRateChanged,

    /// One participant's share of a settled split payment.
    ///
    /// Records the original share amount and currency (not the amount
    /// after conversion into the participant's currency) plus the full
    /// list of involved IBANs.
    SplitShare {
        amount: Decimal,
        currency: String,
        involved: Vec<String>,
    },

    /// A split payment that was abandoned before any account was debited.
    SplitFailed,
}

/// One immutable entry of a user's transaction log.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub timestamp: Timestamp,
    pub description: String,
    pub kind: EventKind,
}

impl Event {
    pub fn account_created(timestamp: Timestamp) -> Self {
        Event {
            timestamp,
            description: "New account created".to_string(),
            kind: EventKind::AccountCreated,
        }
    }

    pub fn card_created(
        timestamp: Timestamp,
        card: String,
        holder: String,
        account: String,
    ) -> Self {
        Event {
            timestamp,
            description: "New card created".to_string(),
            kind: EventKind::CardCreated {
                card,
                holder,
                account,
            },
        }
    }

    pub fn card_deleted(
        timestamp: Timestamp,
        card: String,
        holder: String,
        account: String,
    ) -> Self {
        Event {
            timestamp,
            description: "The card has been destroyed".to_string(),
            kind: EventKind::CardDeleted {
                card,
                holder,
                account,
            },
        }
    }

    pub fn card_regenerated(
        timestamp: Timestamp,
        card: String,
        holder: String,
        account: String,
    ) -> Self {
        Event {
            timestamp,
            description: "One-time card number regenerated".to_string(),
            kind: EventKind::CardRegenerated {
                card,
                holder,
                account,
            },
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn money_sent(
        timestamp: Timestamp,
        description: String,
        sender_iban: String,
        receiver_iban: String,
        amount: Decimal,
        currency: String,
        sender_email: String,
    ) -> Self {
        Event {
            timestamp,
            description,
            kind: EventKind::MoneySent {
                sender_iban,
                receiver_iban,
                amount,
                currency,
                sender_email,
            },
        }
    }

    pub fn payment_completed(
        timestamp: Timestamp,
        account: String,
        amount: Decimal,
        merchant: Option<String>,
    ) -> Self {
        Event {
            timestamp,
            description: "Card payment".to_string(),
            kind: EventKind::PaymentCompleted {
                account,
                amount,
                merchant,
            },
        }
    }

    pub fn insufficient_funds(timestamp: Timestamp, account: String) -> Self {
        Event {
            timestamp,
            description: "Insufficient funds".to_string(),
            kind: EventKind::InsufficientFunds { account },
        }
    }

    pub fn payment_frozen(timestamp: Timestamp, account: String) -> Self {
        Event {
            timestamp,
            description: "The card is frozen".to_string(),
            kind: EventKind::PaymentFrozen { account },
        }
    }

    pub fn card_frozen(timestamp: Timestamp, account: String, card: String) -> Self {
        Event {
            timestamp,
            description:
                "You have reached the minimum amount of funds, the card will be frozen"
                    .to_string(),
            kind: EventKind::CardFrozen { account, card },
        }
    }

    pub fn interest_rate_changed(timestamp: Timestamp, rate: Decimal) -> Self {
        Event {
            timestamp,
            description: format!("Interest rate changed to {}%", rate),
            kind: EventKind::InterestRateChanged,
        }
    }

    pub fn split_share(
        timestamp: Timestamp,
        total: Decimal,
        share: Decimal,
        currency: String,
        involved: Vec<String>,
    ) -> Self {
        Event {
            timestamp,
            description: format!("Split payment of {:.2} {}", total, currency),
            kind: EventKind::SplitShare {
                amount: share,
                currency,
                involved,
            },
        }
    }

    pub fn split_failed(timestamp: Timestamp) -> Self {
        Event {
            timestamp,
            description: "Split payment failed due to insufficient funds".to_string(),
            kind: EventKind::SplitFailed,
        }
    }

    /// Whether this event falls within `[start, end]` inclusive.
    pub fn in_range(&self, start: Timestamp, end: Timestamp) -> bool {
        self.timestamp >= start && self.timestamp <= end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_range_is_inclusive() {
        let event = Event::account_created(5);
        assert!(event.in_range(5, 5));
        assert!(event.in_range(0, 10));
        assert!(!event.in_range(6, 10));
        assert!(!event.in_range(0, 4));
    }

    #[test]
    fn test_interest_rate_change_description() {
        let event = Event::interest_rate_changed(1, Decimal::new(55, 1));
        assert_eq!(event.description, "Interest rate changed to 5.5%");
    }

    #[test]
    fn test_split_share_description_uses_total_not_share() {
        let event = Event::split_share(
            7,
            Decimal::from(90),
            Decimal::from(30),
            "RON".to_string(),
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
        );
        assert_eq!(event.description, "Split payment of 90.00 RON");
        assert!(matches!(
            event.kind,
            EventKind::SplitShare { amount, .. } if amount == Decimal::from(30)
        ));
    }
}
