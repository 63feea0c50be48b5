//! Deterministic identifier generation
//!
//! IBANs and card numbers come from one injected generator instead of a
//! global source, so a given input batch always produces the same
//! identifiers and fixtures stay reproducible.

/// Sequential IBAN and card number generator.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    next_iban: u64,
    next_card: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        IdGenerator {
            next_iban: 1,
            next_card: 1,
        }
    }

    /// Returns the next IBAN, `RO69BANK` followed by a 16-digit sequence
    /// number.
    pub fn next_iban(&mut self) -> String {
        let n = self.next_iban;
        self.next_iban += 1;
        format!("RO69BANK{:016}", n)
    }

    /// Returns the next 16-digit card number.
    pub fn next_card_number(&mut self) -> String {
        let n = self.next_card;
        self.next_card += 1;
        format!("4{:015}", n)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        IdGenerator::new()
    }
}
