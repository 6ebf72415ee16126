//! Seeded generation context.
//!
//! Every random draw of a run goes through one [`GenerationContext`], passed
//! explicitly by `&mut`. Two contexts built from the same seed and asked for the
//! same sequence of draws return the same values.

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use rust_decimal::Decimal;

use crate::sampling::DistributionTable;

const FRACTION_SCALE: u32 = 9;
const FRACTION_DENOMINATOR: i64 = 1_000_000_000;

pub struct GenerationContext {
    seed: u64,
    rng: StdRng,
}

impl GenerationContext {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform decimal in `[low, high)`, resolved to 1e-9 of the span.
    pub fn uniform(&mut self, low: Decimal, high: Decimal) -> Decimal {
        let ticks = self.rng.gen_range(0..FRACTION_DENOMINATOR);
        let fraction = Decimal::new(ticks, FRACTION_SCALE);
        low + (high - low) * fraction
    }

    /// Uniform integer in `[low, high]`.
    pub fn uniform_int(&mut self, low: i64, high: i64) -> i64 {
        self.rng.gen_range(low..=high)
    }

    /// Bernoulli trial: true with probability `p`.
    pub fn chance(&mut self, p: Decimal) -> bool {
        self.uniform(Decimal::ZERO, Decimal::ONE) < p
    }

    /// Uniform index in `[0, len)`. `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    /// Uniform pick from a non-empty slice.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.index(items.len())]
    }

    /// Weighted pick from a validated table.
    pub fn weighted<'a, T>(&mut self, table: &'a DistributionTable<T>) -> &'a T {
        table.sample(self)
    }
}

impl std::fmt::Debug for GenerationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationContext")
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}
