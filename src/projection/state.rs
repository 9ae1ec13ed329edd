//! Running per-asset balances during a projection

use serde::{Deserialize, Serialize};

use super::growth::{annuity_due_fv, lump_sum_fv, round_cents};
use crate::assumptions::{Asset, AssetRates, MonthlySplit};

/// Accumulated balance in each asset class
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Corpus {
    pub equity: f64,
    pub debt: f64,
    pub gold: f64,
}

impl Corpus {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn get(&self, asset: Asset) -> f64 {
        match asset {
            Asset::Equity => self.equity,
            Asset::Debt => self.debt,
            Asset::Gold => self.gold,
        }
    }

    fn slot_mut(&mut self, asset: Asset) -> &mut f64 {
        match asset {
            Asset::Equity => &mut self.equity,
            Asset::Debt => &mut self.debt,
            Asset::Gold => &mut self.gold,
        }
    }

    pub fn total(&self) -> f64 {
        self.equity + self.debt + self.gold
    }

    /// Compound every existing balance for `months` at its asset's rate.
    ///
    /// Money already in the corpus keeps the asset it was invested in; a
    /// new risk score does not move it.
    pub fn grow_lump_sum(&mut self, rates: &AssetRates, months: i32) {
        for asset in Asset::ALL {
            let balance = self.slot_mut(asset);
            *balance = lump_sum_fv(*balance, rates.monthly_rate(asset), months);
        }
    }

    /// Add the annuity-due value of `months` level contributions per asset.
    ///
    /// Must run after `grow_lump_sum` for the same window, otherwise the new
    /// contributions pick up one extra round of lump-sum growth.
    pub fn add_contributions(&mut self, contribution: &MonthlySplit, rates: &AssetRates, months: i32) {
        for asset in Asset::ALL {
            let added = annuity_due_fv(contribution.amount(asset), rates.monthly_rate(asset), months);
            *self.slot_mut(asset) += added;
        }
    }

    /// Copy with each balance rounded to cents
    pub fn rounded_to_cents(&self) -> Self {
        Self {
            equity: round_cents(self.equity),
            debt: round_cents(self.debt),
            gold: round_cents(self.gold),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::allocation_for;
    use approx::assert_relative_eq;

    #[test]
    fn test_grow_then_add() {
        let rates = AssetRates::default_market();
        let mut corpus = Corpus {
            equity: 1000.0,
            debt: 1000.0,
            gold: 1000.0,
        };

        corpus.grow_lump_sum(&rates, 12);
        assert_relative_eq!(corpus.equity, 1000.0 * 1.01f64.powf(12.0), max_relative = 1e-12);
        assert!(corpus.debt < corpus.equity);
        assert!(corpus.gold < corpus.debt);

        let before = corpus;
        let split = allocation_for(9).monthly_split(1000.0);
        corpus.add_contributions(&split, &rates, 12);
        assert_relative_eq!(
            corpus.equity - before.equity,
            annuity_due_fv(700.0, 0.01, 12),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_zero_months_leaves_corpus_unchanged() {
        let rates = AssetRates::default_market();
        let mut corpus = Corpus {
            equity: 123.45,
            debt: 67.0,
            gold: 8.9,
        };
        let before = corpus;

        corpus.grow_lump_sum(&rates, 0);
        corpus.add_contributions(&allocation_for(5).monthly_split(5000.0), &rates, 0);
        assert_eq!(corpus, before);
    }

    #[test]
    fn test_rounded_to_cents() {
        let corpus = Corpus {
            equity: 10.005,
            debt: 1.234,
            gold: 0.0,
        };
        let rounded = corpus.rounded_to_cents();
        assert_eq!(rounded.debt, 1.23);
        assert_eq!(rounded.gold, 0.0);
    }
}
