//! Weighted categorical sampling over small, fixed label sets.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LendSightError;
use crate::rng::GenerationContext;
use crate::LendSightResult;

/// Immutable mapping from label to non-negative weight.
///
/// A table without weights is uniform. Weights are relative: they are normalized by
/// their total at draw time, so they need not sum to one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionTable<T> {
    entries: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    weights: Option<Vec<Decimal>>,
}

impl<T> DistributionTable<T> {
    pub fn uniform(entries: Vec<T>) -> Self {
        Self {
            entries,
            weights: None,
        }
    }

    pub fn weighted(pairs: Vec<(T, Decimal)>) -> Self {
        let (entries, weights) = pairs.into_iter().unzip();
        Self {
            entries,
            weights: Some(weights),
        }
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_uniform(&self) -> bool {
        self.weights.is_none()
    }

    /// Sum of the raw weights; the entry count for uniform tables.
    pub fn total_weight(&self) -> Decimal {
        match &self.weights {
            Some(weights) => weights.iter().sum(),
            None => Decimal::from(self.entries.len() as u64),
        }
    }

    /// Each entry with its share of the total weight.
    pub fn shares(&self) -> Vec<(&T, Decimal)> {
        let total = self.total_weight();
        if total.is_zero() {
            return Vec::new();
        }
        match &self.weights {
            Some(weights) => self
                .entries
                .iter()
                .zip(weights)
                .map(|(entry, w)| (entry, *w / total))
                .collect(),
            None => self
                .entries
                .iter()
                .map(|entry| (entry, Decimal::ONE / total))
                .collect(),
        }
    }

    /// Check the table can be drawn from. `name` identifies the table in errors.
    pub fn validate(&self, name: &str) -> LendSightResult<()> {
        if self.entries.is_empty() {
            return Err(LendSightError::InvalidInput {
                field: name.into(),
                reason: "Distribution table has no entries".into(),
            });
        }
        if let Some(weights) = &self.weights {
            if weights.len() != self.entries.len() {
                return Err(LendSightError::InvalidInput {
                    field: name.into(),
                    reason: format!(
                        "{} weights for {} entries",
                        weights.len(),
                        self.entries.len()
                    ),
                });
            }
            if weights.iter().any(|w| *w < Decimal::ZERO) {
                return Err(LendSightError::InvalidInput {
                    field: name.into(),
                    reason: "Weights must be non-negative".into(),
                });
            }
            if self.total_weight() <= Decimal::ZERO {
                return Err(LendSightError::InvalidInput {
                    field: name.into(),
                    reason: "Weights must have a positive total".into(),
                });
            }
        }
        Ok(())
    }

    /// Draw one entry. The table must have passed [`validate`](Self::validate).
    ///
    /// Weighted tables consume exactly one uniform draw in `[0, total)` and walk the
    /// cumulative weights; zero-weight entries are never returned.
    pub fn sample<'a>(&'a self, ctx: &mut GenerationContext) -> &'a T {
        let weights = match &self.weights {
            Some(weights) => weights,
            None => return ctx.choose(&self.entries),
        };

        let u = ctx.uniform(Decimal::ZERO, self.total_weight());
        let mut cumulative = Decimal::ZERO;
        let mut chosen = &self.entries[self.entries.len() - 1];
        for (entry, w) in self.entries.iter().zip(weights) {
            cumulative += *w;
            if u < cumulative {
                chosen = entry;
                break;
            }
        }
        chosen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    const SEED: u64 = 7;

    #[test]
    fn test_single_entry_always_returned() {
        let mut ctx = GenerationContext::new(SEED);
        let uniform = DistributionTable::uniform(vec!["only"]);
        let weighted = DistributionTable::weighted(vec![("only", dec!(0.3))]);
        for _ in 0..100 {
            assert_eq!(*uniform.sample(&mut ctx), "only");
            assert_eq!(*weighted.sample(&mut ctx), "only");
        }
    }

    #[test]
    fn test_weighted_frequencies_follow_weights() {
        let table = DistributionTable::weighted(vec![
            ("a", dec!(0.76)),
            ("b", dec!(0.10)),
            ("c", dec!(0.14)),
        ]);
        let mut ctx = GenerationContext::new(SEED);
        let n = 50_000;
        let mut counts: HashMap<&str, u32> = HashMap::new();
        for _ in 0..n {
            *counts.entry(*table.sample(&mut ctx)).or_default() += 1;
        }
        let freq = |k: &str| counts.get(k).copied().unwrap_or(0) as f64 / n as f64;
        assert!((freq("a") - 0.76).abs() < 0.01, "a={}", freq("a"));
        assert!((freq("b") - 0.10).abs() < 0.01, "b={}", freq("b"));
        assert!((freq("c") - 0.14).abs() < 0.01, "c={}", freq("c"));
    }

    #[test]
    fn test_relative_weights_are_normalized() {
        let table = DistributionTable::weighted(vec![("x", dec!(3)), ("y", dec!(1))]);
        let shares = table.shares();
        assert_eq!(shares[0].1, dec!(0.75));
        assert_eq!(shares[1].1, dec!(0.25));

        let mut ctx = GenerationContext::new(SEED);
        let n = 20_000;
        let xs = (0..n).filter(|_| *table.sample(&mut ctx) == "x").count();
        assert!((xs as f64 / n as f64 - 0.75).abs() < 0.02);
    }

    #[test]
    fn test_zero_weight_never_drawn() {
        let table = DistributionTable::weighted(vec![("never", dec!(0)), ("always", dec!(1))]);
        let mut ctx = GenerationContext::new(SEED);
        for _ in 0..1_000 {
            assert_eq!(*table.sample(&mut ctx), "always");
        }
    }

    #[test]
    fn test_uniform_covers_all_entries() {
        let table = DistributionTable::uniform(vec![1usize, 2, 3, 4, 5]);
        let mut ctx = GenerationContext::new(SEED);
        let mut seen = [false; 5];
        for _ in 0..500 {
            seen[*table.sample(&mut ctx) - 1] = true;
        }
        assert!(seen.iter().all(|s| *s));
        assert_eq!(table.total_weight(), dec!(5));
    }

    #[test]
    fn test_validate_rejects_bad_tables() {
        assert!(DistributionTable::<u8>::uniform(vec![]).validate("t").is_err());
        assert!(DistributionTable::weighted(vec![("a", dec!(-0.1)), ("b", dec!(1))])
            .validate("t")
            .is_err());
        assert!(DistributionTable::weighted(vec![("a", dec!(0)), ("b", dec!(0))])
            .validate("t")
            .is_err());
        let mismatched: DistributionTable<&str> =
            serde_json::from_str(r#"{"entries":["a","b"],"weights":["1"]}"#).unwrap();
        assert!(mismatched.validate("t").is_err());
        assert!(DistributionTable::uniform(vec!["a"]).validate("t").is_ok());
    }
}
