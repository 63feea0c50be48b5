//! User and account store
//!
//! The [`Ledger`] owns every user (and through them every account and
//! card) for the duration of a batch run. Users keep their registration
//! order so snapshot output is stable. Lookups are linear scans; batch
//! sizes are small and no index structure has been worth keeping in sync
//! with account deletion.

use std::collections::HashMap;

use crate::core::transaction_log::TransactionLog;
use crate::types::{Account, Event};

/// A bank customer with accounts, payment aliases and a transaction log.
#[derive(Debug, Clone)]
pub struct User {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub accounts: Vec<Account>,
    /// Alias name -> IBAN, private to this user.
    pub aliases: HashMap<String, String>,
    pub log: TransactionLog,
}

impl User {
    pub fn new(first_name: String, last_name: String, email: String) -> Self {
        User {
            first_name,
            last_name,
            email,
            accounts: Vec::new(),
            aliases: HashMap::new(),
            log: TransactionLog::new(),
        }
    }

    pub fn find_account(&self, iban: &str) -> Option<&Account> {
        self.accounts.iter().find(|account| account.iban == iban)
    }

    pub fn find_account_mut(&mut self, iban: &str) -> Option<&mut Account> {
        self.accounts
            .iter_mut()
            .find(|account| account.iban == iban)
    }

    /// Appends an event to this user's transaction log.
    pub fn record(&mut self, event: Event) {
        self.log.append(event);
    }

    pub fn set_alias(&mut self, alias: String, iban: String) {
        self.aliases.insert(alias, iban);
    }

    pub fn resolve_alias(&self, alias: &str) -> Option<&str> {
        self.aliases.get(alias).map(String::as_str)
    }

    /// Position of the account and card holding `card_number`, if any.
    pub fn locate_card(&self, card_number: &str) -> Option<(usize, usize)> {
        for (account_idx, account) in self.accounts.iter().enumerate() {
            if let Some(card_idx) = account
                .cards
                .iter()
                .position(|card| card.number == card_number)
            {
                return Some((account_idx, card_idx));
            }
        }
        None
    }
}

/// In-memory store of all users for one batch run.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    users: Vec<User>,
}

impl Ledger {
    pub fn new() -> Self {
        Ledger::default()
    }

    pub fn add_user(&mut self, first_name: String, last_name: String, email: String) {
        self.users.push(User::new(first_name, last_name, email));
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn user(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|user| user.email == email)
    }

    pub fn user_mut(&mut self, email: &str) -> Option<&mut User> {
        self.users.iter_mut().find(|user| user.email == email)
    }

    pub fn user_index(&self, email: &str) -> Option<usize> {
        self.users.iter().position(|user| user.email == email)
    }

    pub fn user_at(&self, index: usize) -> &User {
        &self.users[index]
    }

    pub fn user_at_mut(&mut self, index: usize) -> &mut User {
        &mut self.users[index]
    }

    /// Finds the account with the given IBAN anywhere in the ledger,
    /// returning (user index, account index).
    pub fn locate_account(&self, iban: &str) -> Option<(usize, usize)> {
        for (user_idx, user) in self.users.iter().enumerate() {
            if let Some(account_idx) =
                user.accounts.iter().position(|account| account.iban == iban)
            {
                return Some((user_idx, account_idx));
            }
        }
        None
    }

    pub fn find_account(&self, iban: &str) -> Option<&Account> {
        self.locate_account(iban)
            .map(|(u, a)| &self.users[u].accounts[a])
    }

    pub fn find_account_mut(&mut self, iban: &str) -> Option<&mut Account> {
        let (u, a) = self.locate_account(iban)?;
        Some(&mut self.users[u].accounts[a])
    }

    /// Index of the user owning the card with `card_number`, if any.
    pub fn user_index_with_card(&self, card_number: &str) -> Option<usize> {
        self.users
            .iter()
            .position(|user| user.locate_card(card_number).is_some())
    }
}
