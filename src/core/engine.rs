//! Command processing engine
//!
//! The [`LedgerEngine`] replays an input batch against the in-memory
//! ledger. Each command either mutates state, appends events to user
//! transaction logs, pushes an output record, or some combination of the
//! three. Malformed or unresolvable commands follow a strict split:
//! structural problems the original user can see produce error output
//! records, everything else degrades to a silent no-op so the batch
//! always runs to completion.

use rust_decimal::Decimal;
use serde_json::{json, Value};

use crate::core::exchange::ExchangeRateGraph;
use crate::core::idgen::IdGenerator;
use crate::core::ledger::Ledger;
use crate::core::report;
use crate::types::{round_money, Account, AccountType, Card, CommandInput, Event, Timestamp};

/// Replays commands against the ledger and accumulates output records.
pub struct LedgerEngine {
    ledger: Ledger,
    rates: ExchangeRateGraph,
    ids: IdGenerator,
    output: Vec<Value>,
}

impl LedgerEngine {
    pub fn new() -> Self {
        LedgerEngine {
            ledger: Ledger::new(),
            rates: ExchangeRateGraph::new(),
            ids: IdGenerator::new(),
            output: Vec::new(),
        }
    }

    /// Registers a user before command replay starts.
    pub fn register_user(&mut self, first_name: String, last_name: String, email: String) {
        self.ledger.add_user(first_name, last_name, email);
    }

    /// Registers an exchange rate before command replay starts.
    pub fn register_rate(&mut self, from: &str, to: &str, rate: Decimal) {
        self.rates.add_rate(from, to, rate);
    }

    /// Output records accumulated so far, in command order.
    pub fn output(&self) -> &[Value] {
        &self.output
    }

    pub fn into_output(self) -> Vec<Value> {
        self.output
    }

    #[cfg(test)]
    pub(crate) fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Dispatches one command. Unrecognized command names produce an
    /// `Unknown command` output record rather than an error.
    pub fn process(&mut self, command: &CommandInput) {
        match command.command.as_str() {
            "printUsers" => self.print_users(command.timestamp),
            "addAccount" => self.add_account(command),
            "createCard" => self.create_card(command, false),
            "createOneTimeCard" => self.create_card(command, true),
            "addFunds" => self.add_funds(command),
            "deleteAccount" => self.delete_account(command),
            "deleteCard" => self.delete_card(command),
            "setMinimumBalance" => self.set_minimum_balance(command),
            "payOnline" => self.pay_online(command),
            "sendMoney" => self.send_money(command),
            "setAlias" => self.set_alias(command),
            "checkCardStatus" => self.check_card_status(command),
            "changeInterestRate" => self.change_interest_rate(command),
            "splitPayment" => self.split_payment(command),
            "printTransactions" => self.print_transactions(command),
            "report" => self.account_report(command),
            "spendingsReport" => self.spendings_report(command),
            other => self.output.push(json!({
                "command": other,
                "status": "Unknown command",
                "timestamp": command.timestamp,
            })),
        }
    }

    /// Error output record shared by commands that report user-visible
    /// failures: the inner node carries the timestamp and a description.
    fn error_record(command: &str, timestamp: Timestamp, description: &str) -> Value {
        json!({
            "command": command,
            "output": {
                "timestamp": timestamp,
                "description": description,
            },
            "timestamp": timestamp,
        })
    }

    /// Error output record for the account and card management commands,
    /// which report failures under an `error` key instead of a
    /// description.
    fn error_payload(command: &str, timestamp: Timestamp, message: &str) -> Value {
        json!({
            "command": command,
            "output": {
                "error": message,
                "timestamp": timestamp,
            },
            "timestamp": timestamp,
        })
    }

    fn print_users(&mut self, timestamp: Timestamp) {
        let users: Vec<Value> = self
            .ledger
            .users()
            .iter()
            .map(|user| {
                let accounts: Vec<Value> = user
                    .accounts
                    .iter()
                    .map(|account| {
                        let cards: Vec<Value> = account
                            .cards
                            .iter()
                            .map(|card| {
                                json!({
                                    "cardNumber": card.number,
                                    "status": card.status.as_str(),
                                })
                            })
                            .collect();
                        json!({
                            "IBAN": account.iban,
                            "balance": account.balance,
                            "currency": account.currency,
                            "type": account.account_type.as_str(),
                            "cards": cards,
                        })
                    })
                    .collect();
                json!({
                    "firstName": user.first_name,
                    "lastName": user.last_name,
                    "email": user.email,
                    "accounts": accounts,
                })
            })
            .collect();

        self.output.push(json!({
            "command": "printUsers",
            "output": users,
            "timestamp": timestamp,
        }));
    }

    fn add_account(&mut self, command: &CommandInput) {
        let (Some(email), Some(currency), Some(type_name)) = (
            command.email.as_deref(),
            command.currency.as_deref(),
            command.account_type.as_deref(),
        ) else {
            return;
        };
        let Some(user_idx) = self.ledger.user_index(email) else {
            return;
        };

        let account_type = AccountType::parse(type_name);
        let interest_rate = match account_type {
            AccountType::Savings => command.interest_rate.unwrap_or(Decimal::ZERO),
            AccountType::Checking => Decimal::ZERO,
        };
        let iban = self.ids.next_iban();

        let user = self.ledger.user_at_mut(user_idx);
        user.accounts.push(Account::new(
            iban,
            currency.to_string(),
            account_type,
            interest_rate,
        ));
        user.record(Event::account_created(command.timestamp));
    }

    fn create_card(&mut self, command: &CommandInput, one_time: bool) {
        let (Some(email), Some(iban)) =
            (command.email.as_deref(), command.account.as_deref())
        else {
            return;
        };
        let Some(user_idx) = self.ledger.user_index(email) else {
            return;
        };
        if self.ledger.user_at(user_idx).find_account(iban).is_none() {
            return;
        }

        let number = self.ids.next_card_number();
        let user = self.ledger.user_at_mut(user_idx);
        let holder = user.email.clone();
        if let Some(account) = user.find_account_mut(iban) {
            account.cards.push(Card::new(number.clone(), one_time));
        }
        user.record(Event::card_created(
            command.timestamp,
            number,
            holder,
            iban.to_string(),
        ));
    }

    fn add_funds(&mut self, command: &CommandInput) {
        let (Some(iban), Some(amount)) = (command.account.as_deref(), command.amount) else {
            return;
        };
        if let Some(account) = self.ledger.find_account_mut(iban) {
            account.credit(amount);
        }
    }

    fn delete_account(&mut self, command: &CommandInput) {
        let timestamp = command.timestamp;
        let user = command
            .email
            .as_deref()
            .and_then(|email| self.ledger.user_mut(email));
        let Some(user) = user else {
            self.output
                .push(Self::error_payload("deleteAccount", timestamp, "User not found"));
            return;
        };

        // Only an owned account with a zero balance can be deleted.
        let mut deleted = false;
        if let Some(iban) = command.account.as_deref() {
            if let Some(idx) = user
                .accounts
                .iter()
                .position(|a| a.iban == iban && a.balance == Decimal::ZERO)
            {
                user.accounts.remove(idx);
                deleted = true;
            }
        }

        let output = if deleted {
            json!({"success": "Account deleted", "timestamp": timestamp})
        } else {
            json!({
                "error": "Account couldn't be deleted - see transactions for details",
                "timestamp": timestamp,
            })
        };
        self.output.push(json!({
            "command": "deleteAccount",
            "output": output,
            "timestamp": timestamp,
        }));
    }

    fn delete_card(&mut self, command: &CommandInput) {
        let timestamp = command.timestamp;
        let user_idx = command
            .email
            .as_deref()
            .and_then(|email| self.ledger.user_index(email));
        let Some(user_idx) = user_idx else {
            self.output
                .push(Self::error_payload("deleteCard", timestamp, "User not found"));
            return;
        };
        let number = match command.card_number.as_deref() {
            Some(number) if !number.is_empty() => number,
            _ => {
                self.output.push(Self::error_payload(
                    "deleteCard",
                    timestamp,
                    "Card number is missing",
                ));
                return;
            }
        };

        let user = self.ledger.user_at_mut(user_idx);
        let Some((account_idx, card_idx)) = user.locate_card(number) else {
            self.output
                .push(Self::error_payload("deleteCard", timestamp, "Card not found"));
            return;
        };

        let iban = user.accounts[account_idx].iban.clone();
        let holder = user.email.clone();
        user.accounts[account_idx].cards.remove(card_idx);
        user.record(Event::card_deleted(
            timestamp,
            number.to_string(),
            holder,
            iban,
        ));
    }

    fn set_minimum_balance(&mut self, command: &CommandInput) {
        let (Some(iban), Some(amount)) = (command.account.as_deref(), command.amount) else {
            return;
        };
        if iban.is_empty() || amount <= Decimal::ZERO {
            return;
        }
        if let Some(account) = self.ledger.find_account_mut(iban) {
            account.min_balance = amount;
        }
    }

    fn pay_online(&mut self, command: &CommandInput) {
        let timestamp = command.timestamp;
        let card_not_found =
            || Self::error_record("payOnline", timestamp, "Card not found");

        let number = match command.card_number.as_deref() {
            Some(number) if !number.is_empty() => number,
            _ => {
                self.output.push(card_not_found());
                return;
            }
        };
        let (Some(amount), Some(currency)) = (command.amount, command.currency.as_deref())
        else {
            self.output.push(card_not_found());
            return;
        };
        if amount <= Decimal::ZERO {
            self.output.push(card_not_found());
            return;
        }
        let user_idx = command
            .email
            .as_deref()
            .and_then(|email| self.ledger.user_index(email));
        let Some(user_idx) = user_idx else {
            self.output.push(card_not_found());
            return;
        };
        let Some((account_idx, card_idx)) = self.ledger.user_at(user_idx).locate_card(number)
        else {
            self.output.push(card_not_found());
            return;
        };

        let (iban, account_currency, balance, frozen, one_time) = {
            let account = &self.ledger.user_at(user_idx).accounts[account_idx];
            let card = &account.cards[card_idx];
            (
                account.iban.clone(),
                account.currency.clone(),
                account.balance,
                card.is_frozen(),
                card.one_time,
            )
        };

        if frozen {
            self.ledger
                .user_at_mut(user_idx)
                .record(Event::payment_frozen(timestamp, iban));
            return;
        }

        let Some(charged) = self.rates.convert(amount, currency, &account_currency) else {
            return;
        };
        if balance < charged {
            self.ledger
                .user_at_mut(user_idx)
                .record(Event::insufficient_funds(timestamp, iban));
            return;
        }

        let user = self.ledger.user_at_mut(user_idx);
        user.accounts[account_idx].debit(charged);
        user.record(Event::payment_completed(
            timestamp,
            iban.clone(),
            charged,
            command.merchant.clone(),
        ));

        if one_time {
            let fresh_number = self.ids.next_card_number();
            let user = self.ledger.user_at_mut(user_idx);
            let holder = user.email.clone();
            user.accounts[account_idx].cards[card_idx].regenerate(fresh_number.clone());
            user.record(Event::card_regenerated(timestamp, fresh_number, holder, iban));
        }
    }

    fn send_money(&mut self, command: &CommandInput) {
        let (Some(email), Some(sender_iban), Some(receiver_ref), Some(amount)) = (
            command.email.as_deref(),
            command.account.as_deref(),
            command.receiver.as_deref(),
            command.amount,
        ) else {
            return;
        };
        let Some(sender_idx) = self.ledger.user_index(email) else {
            return;
        };
        let sender = self.ledger.user_at(sender_idx);
        let Some(sender_account_idx) = sender
            .accounts
            .iter()
            .position(|account| account.iban == sender_iban)
        else {
            return;
        };
        let sender_currency = sender.accounts[sender_account_idx].currency.clone();
        let sender_balance = sender.accounts[sender_account_idx].balance;

        // Receiver is an IBAN, or an alias private to the sender.
        let receiver_loc = self.ledger.locate_account(receiver_ref).or_else(|| {
            self.ledger
                .user_at(sender_idx)
                .resolve_alias(receiver_ref)
                .map(str::to_string)
                .and_then(|iban| self.ledger.locate_account(&iban))
        });
        let Some((receiver_idx, receiver_account_idx)) = receiver_loc else {
            return;
        };

        if sender_balance < amount {
            self.ledger.user_at_mut(sender_idx).record(Event::insufficient_funds(
                command.timestamp,
                sender_iban.to_string(),
            ));
            return;
        }

        let receiver_account =
            &self.ledger.user_at(receiver_idx).accounts[receiver_account_idx];
        let receiver_iban = receiver_account.iban.clone();
        let receiver_currency = receiver_account.currency.clone();
        let Some(received) = self
            .rates
            .convert(amount, &sender_currency, &receiver_currency)
        else {
            return;
        };

        self.ledger.user_at_mut(sender_idx).accounts[sender_account_idx].debit(amount);
        self.ledger.user_at_mut(receiver_idx).accounts[receiver_account_idx]
            .credit(received);

        // The same monetary facts land in both logs; direction is derived
        // at projection time from the viewer's email.
        let event = Event::money_sent(
            command.timestamp,
            command.description.clone().unwrap_or_default(),
            sender_iban.to_string(),
            receiver_iban,
            amount,
            sender_currency,
            email.to_string(),
        );
        self.ledger.user_at_mut(sender_idx).record(event.clone());
        self.ledger.user_at_mut(receiver_idx).record(event);
    }

    fn set_alias(&mut self, command: &CommandInput) {
        let (Some(email), Some(alias), Some(iban)) = (
            command.email.as_deref(),
            command.alias.as_deref(),
            command.account.as_deref(),
        ) else {
            return;
        };
        let Some(user) = self.ledger.user_mut(email) else {
            return;
        };
        if user.find_account(iban).is_some() {
            user.set_alias(alias.to_string(), iban.to_string());
        }
    }

    fn check_card_status(&mut self, command: &CommandInput) {
        let timestamp = command.timestamp;
        let number = match command.card_number.as_deref() {
            Some(number) if !number.is_empty() => number,
            _ => {
                self.output.push(Self::error_record(
                    "checkCardStatus",
                    timestamp,
                    "Card not found",
                ));
                return;
            }
        };
        let Some(user_idx) = self.ledger.user_index_with_card(number) else {
            self.output.push(Self::error_record(
                "checkCardStatus",
                timestamp,
                "Card not found",
            ));
            return;
        };

        let user = self.ledger.user_at_mut(user_idx);
        let Some((account_idx, card_idx)) = user.locate_card(number) else {
            return;
        };
        let account = &mut user.accounts[account_idx];
        if account.cards[card_idx].is_frozen() {
            return;
        }
        if account.is_below_minimum() {
            let iban = account.iban.clone();
            account.cards[card_idx].freeze();
            user.record(Event::card_frozen(timestamp, iban, number.to_string()));
        }
    }

    fn change_interest_rate(&mut self, command: &CommandInput) {
        let Some(email) = command.email.as_deref() else {
            return;
        };
        let Some(user_idx) = self.ledger.user_index(email) else {
            return;
        };
        let rate = command.interest_rate.unwrap_or(Decimal::ZERO);

        let is_savings = command
            .account
            .as_deref()
            .and_then(|iban| self.ledger.user_at(user_idx).find_account(iban))
            .map(|account| account.account_type == AccountType::Savings)
            .unwrap_or(false);
        if !is_savings {
            self.output.push(Self::error_record(
                "changeInterestRate",
                command.timestamp,
                "This is not a savings account",
            ));
            return;
        }

        let event = Event::interest_rate_changed(command.timestamp, rate);
        let user = self.ledger.user_at_mut(user_idx);
        if let Some(iban) = command.account.as_deref() {
            if let Some(account) = user.find_account_mut(iban) {
                account.interest_rate = rate;
            }
        }
        user.record(event);
    }

    fn split_payment(&mut self, command: &CommandInput) {
        let (Some(total), Some(currency)) = (command.amount, command.currency.as_deref())
        else {
            return;
        };
        if command.accounts.is_empty() {
            return;
        }
        let count = Decimal::from(command.accounts.len() as u64);
        let share = round_money(total / count);

        // Phase one: resolve every participant and validate every share.
        // Nothing is debited unless all participants can pay.
        let mut participants = Vec::with_capacity(command.accounts.len());
        let mut viable = true;
        for iban in &command.accounts {
            let Some((user_idx, account_idx)) = self.ledger.locate_account(iban) else {
                viable = false;
                break;
            };
            let account = &self.ledger.user_at(user_idx).accounts[account_idx];
            let Some(charged) = self.rates.convert(share, currency, &account.currency)
            else {
                viable = false;
                break;
            };
            if account.balance < charged {
                viable = false;
                break;
            }
            participants.push((user_idx, account_idx, charged));
        }

        if !viable {
            for iban in &command.accounts {
                if let Some((user_idx, _)) = self.ledger.locate_account(iban) {
                    self.ledger
                        .user_at_mut(user_idx)
                        .record(Event::split_failed(command.timestamp));
                }
            }
            return;
        }

        for &(user_idx, account_idx, charged) in &participants {
            self.ledger.user_at_mut(user_idx).accounts[account_idx].debit(charged);
        }
        for &(user_idx, _, _) in &participants {
            self.ledger.user_at_mut(user_idx).record(Event::split_share(
                command.timestamp,
                total,
                share,
                currency.to_string(),
                command.accounts.clone(),
            ));
        }
    }

    fn print_transactions(&mut self, command: &CommandInput) {
        let user = command
            .email
            .as_deref()
            .and_then(|email| self.ledger.user(email));
        let transactions: Vec<Value> = match user {
            Some(user) => user
                .log
                .iter()
                .map(|event| report::log_node(event, &user.email))
                .collect(),
            None => Vec::new(),
        };
        self.output.push(json!({
            "command": "printTransactions",
            "output": transactions,
            "timestamp": command.timestamp,
        }));
    }

    fn account_report(&mut self, command: &CommandInput) {
        self.push_report(command, report::account_report, "report");
    }

    fn spendings_report(&mut self, command: &CommandInput) {
        self.push_report(command, report::spendings_report, "spendingsReport");
    }

    fn push_report(
        &mut self,
        command: &CommandInput,
        builder: fn(&crate::core::ledger::User, &Account, Timestamp, Timestamp) -> Value,
        name: &str,
    ) {
        let Some(iban) = command.account.as_deref() else {
            return;
        };
        let Some((user_idx, account_idx)) = self.ledger.locate_account(iban) else {
            return;
        };
        let start = command.start_timestamp.unwrap_or(0);
        let end = command.end_timestamp.unwrap_or(Timestamp::MAX);
        let user = self.ledger.user_at(user_idx);
        let node = builder(user, &user.accounts[account_idx], start, end);
        self.output.push(json!({
            "command": name,
            "output": node,
            "timestamp": command.timestamp,
        }));
    }
}

impl Default for LedgerEngine {
    fn default() -> Self {
        LedgerEngine::new()
    }
}
