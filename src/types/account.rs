//! Account and card data types
//!
//! Defines the `Account` aggregate (balance, minimum-balance threshold,
//! interest rate, attached cards) plus the `AccountType` and `CardStatus`
//! enums. Monetary quantities use `rust_decimal::Decimal` throughout; the
//! shared rounding rule for converted amounts lives here as `round_money`.

use rust_decimal::Decimal;

/// Fractional digits kept on every converted monetary amount.
pub const MONEY_SCALE: u32 = 4;

/// Rounds a monetary amount to the ledger's working precision.
///
/// Applied to every currency-conversion result before it is compared
/// against a balance or applied to one, so repeated conversions cannot
/// accumulate stray precision.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp(MONEY_SCALE)
}

/// The two supported account flavors.
///
/// Savings accounts carry an interest rate and restrict which events their
/// reports show; checking accounts ignore the interest rate entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountType {
    Checking,
    Savings,
}

impl AccountType {
    /// Parses the wire-format type name. Anything that is not `savings`
    /// (case-insensitive) is treated as a checking account.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("savings") {
            AccountType::Savings
        } else {
            AccountType::Checking
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Checking => "classic",
            AccountType::Savings => "savings",
        }
    }
}

/// Lifecycle state of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardStatus {
    Active,
    Frozen,
}

impl CardStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardStatus::Active => "active",
            CardStatus::Frozen => "frozen",
        }
    }
}

/// A payment card attached to an account.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub number: String,
    pub status: CardStatus,
    /// One-time cards receive a fresh number after each successful payment.
    pub one_time: bool,
}

impl Card {
    pub fn new(number: String, one_time: bool) -> Self {
        Card {
            number,
            status: CardStatus::Active,
            one_time,
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.status == CardStatus::Frozen
    }

    pub fn freeze(&mut self) {
        self.status = CardStatus::Frozen;
    }

    /// Replaces the card number after a one-time card is consumed.
    /// The card stays active.
    pub fn regenerate(&mut self, number: String) {
        self.number = number;
        self.status = CardStatus::Active;
    }
}

/// A single bank account owned by one user.
///
/// Balances are only ever changed through [`credit`](Account::credit) and
/// [`debit`](Account::debit); callers are responsible for validating funds
/// (via [`has_funds`](Account::has_funds)) before debiting.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub iban: String,
    pub currency: String,
    pub account_type: AccountType,
    pub balance: Decimal,
    pub min_balance: Decimal,
    pub interest_rate: Decimal,
    pub cards: Vec<Card>,
}

impl Account {
    pub fn new(
        iban: String,
        currency: String,
        account_type: AccountType,
        interest_rate: Decimal,
    ) -> Self {
        Account {
            iban,
            currency,
            account_type,
            balance: Decimal::ZERO,
            min_balance: Decimal::ZERO,
            interest_rate,
            cards: Vec::new(),
        }
    }

    pub fn has_funds(&self, amount: Decimal) -> bool {
        self.balance >= amount
    }

    pub fn credit(&mut self, amount: Decimal) {
        self.balance += amount;
    }

    pub fn debit(&mut self, amount: Decimal) {
        self.balance -= amount;
    }

    /// Whether the balance has fallen to or below the configured minimum.
    pub fn is_below_minimum(&self) -> bool {
        self.balance <= self.min_balance
    }

    pub fn find_card(&self, number: &str) -> Option<&Card> {
        self.cards.iter().find(|card| card.number == number)
    }

    pub fn find_card_mut(&mut self, number: &str) -> Option<&mut Card> {
        self.cards.iter_mut().find(|card| card.number == number)
    }
}
