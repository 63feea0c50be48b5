//! Currency exchange rate graph
//!
//! Stores directed conversion rates between currency codes and resolves
//! multi-hop conversions with a depth-first search. Every added rate also
//! inserts its reciprocal, so the graph is effectively undirected. Currency
//! code comparison is case-insensitive everywhere.

use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::types::round_money;

#[derive(Debug, Clone)]
struct RateEdge {
    from: String,
    to: String,
    rate: Decimal,
}

/// In-memory exchange rate graph.
///
/// Edges are kept in insertion order; when several paths connect the same
/// pair of currencies the first edge found wins, so resolution is
/// deterministic for a given input batch.
#[derive(Debug, Clone, Default)]
pub struct ExchangeRateGraph {
    edges: Vec<RateEdge>,
}

impl ExchangeRateGraph {
    pub fn new() -> Self {
        ExchangeRateGraph::default()
    }

    /// Adds a conversion rate and its reciprocal.
    ///
    /// Non-positive rates are ignored; a zero rate has no usable
    /// reciprocal and a negative one is meaningless.
    pub fn add_rate(&mut self, from: &str, to: &str, rate: Decimal) {
        if rate <= Decimal::ZERO {
            return;
        }
        self.edges.push(RateEdge {
            from: from.to_string(),
            to: to.to_string(),
            rate,
        });
        self.edges.push(RateEdge {
            from: to.to_string(),
            to: from.to_string(),
            rate: Decimal::ONE / rate,
        });
    }

    /// Resolves the multiplicative rate from `from` to `to`.
    ///
    /// Returns `Some(1)` when the codes name the same currency, the direct
    /// edge when one exists, or the product of rates along the first path
    /// found by depth-first search. Returns `None` when the currencies are
    /// not connected.
    pub fn rate(&self, from: &str, to: &str) -> Option<Decimal> {
        let mut visited = HashSet::new();
        self.search(from, to, &mut visited)
    }

    /// Converts `amount` from one currency to another, rounding the result
    /// to the ledger's working precision. Identity conversions return the
    /// amount untouched.
    pub fn convert(&self, amount: Decimal, from: &str, to: &str) -> Option<Decimal> {
        if from.eq_ignore_ascii_case(to) {
            return Some(amount);
        }
        self.rate(from, to).map(|rate| round_money(amount * rate))
    }

    fn search(&self, from: &str, to: &str, visited: &mut HashSet<String>) -> Option<Decimal> {
        if from.eq_ignore_ascii_case(to) {
            return Some(Decimal::ONE);
        }
        visited.insert(from.to_ascii_uppercase());

        // Direct edge wins over any longer path.
        for edge in &self.edges {
            if edge.from.eq_ignore_ascii_case(from) && edge.to.eq_ignore_ascii_case(to) {
                return Some(edge.rate);
            }
        }

        for edge in &self.edges {
            if edge.from.eq_ignore_ascii_case(from)
                && !visited.contains(&edge.to.to_ascii_uppercase())
            {
                if let Some(rest) = self.search(&edge.to, to, visited) {
                    return Some(edge.rate * rest);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn graph() -> ExchangeRateGraph {
        let mut graph = ExchangeRateGraph::new();
        graph.add_rate("EUR", "RON", Decimal::from(5));
        graph.add_rate("USD", "EUR", Decimal::new(8, 1)); // 0.8
        graph
    }

    #[test]
    fn test_identity_rate_without_edges() {
        let graph = ExchangeRateGraph::new();
        assert_eq!(graph.rate("RON", "RON"), Some(Decimal::ONE));
        assert_eq!(graph.rate("ron", "RON"), Some(Decimal::ONE));
    }

    #[test]
    fn test_direct_rate() {
        assert_eq!(graph().rate("EUR", "RON"), Some(Decimal::from(5)));
    }

    #[test]
    fn test_reciprocal_rate() {
        assert_eq!(graph().rate("RON", "EUR"), Some(Decimal::new(2, 1)));
    }

    #[test]
    fn test_transitive_rate() {
        // USD -> EUR -> RON = 0.8 * 5
        assert_eq!(graph().rate("USD", "RON"), Some(Decimal::from(4)));
    }

    #[rstest]
    #[case("usd", "ron")]
    #[case("USD", "ron")]
    #[case("Usd", "Ron")]
    fn test_rate_is_case_insensitive(#[case] from: &str, #[case] to: &str) {
        assert_eq!(graph().rate(from, to), Some(Decimal::from(4)));
    }

    #[test]
    fn test_unknown_currency_resolves_to_none() {
        assert_eq!(graph().rate("EUR", "GBP"), None);
        assert_eq!(graph().rate("GBP", "JPY"), None);
    }

    #[test]
    fn test_convert_rounds_to_four_digits() {
        let mut graph = ExchangeRateGraph::new();
        graph.add_rate("RON", "EUR", Decimal::from(3));
        // reciprocal is 1/3; 10 * (1/3) rounds to 3.3333
        assert_eq!(
            graph.convert(Decimal::from(10), "EUR", "RON"),
            Some(Decimal::new(33333, 4))
        );
    }

    #[test]
    fn test_convert_identity_skips_rounding() {
        let graph = ExchangeRateGraph::new();
        let amount = Decimal::new(123456789, 6);
        assert_eq!(graph.convert(amount, "RON", "RON"), Some(amount));
    }

    #[test]
    fn test_non_positive_rates_are_ignored() {
        let mut graph = ExchangeRateGraph::new();
        graph.add_rate("EUR", "RON", Decimal::ZERO);
        graph.add_rate("EUR", "USD", Decimal::from(-2));
        assert_eq!(graph.rate("EUR", "RON"), None);
        assert_eq!(graph.rate("EUR", "USD"), None);
    }

    #[test]
    fn test_cycle_does_not_loop() {
        let mut graph = ExchangeRateGraph::new();
        graph.add_rate("A", "B", Decimal::from(2));
        graph.add_rate("B", "C", Decimal::from(2));
        graph.add_rate("C", "A", Decimal::from(2));
        assert_eq!(graph.rate("A", "C"), Some(Decimal::from(4)));
        assert_eq!(graph.rate("A", "D"), None);
    }
}
