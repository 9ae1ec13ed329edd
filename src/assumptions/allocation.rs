//! Risk score to asset allocation policy

use serde::{Deserialize, Serialize};

use super::rates::Asset;

/// Risk band a score falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskBand {
    /// Score 3 and below
    Conservative,
    /// Scores 4 through 7
    Balanced,
    /// Score 8 and above
    Aggressive,
}

impl RiskBand {
    /// Determine band from a risk score.
    ///
    /// Total over all integers: scores below 1 land in `Conservative`,
    /// scores above 10 in `Aggressive`.
    pub fn from_score(score: i32) -> Self {
        if score <= 3 {
            RiskBand::Conservative
        } else if score <= 7 {
            RiskBand::Balanced
        } else {
            RiskBand::Aggressive
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskBand::Conservative => "Conservative",
            RiskBand::Balanced => "Balanced",
            RiskBand::Aggressive => "Aggressive",
        }
    }

    /// Fixed split for this band
    pub fn split(&self) -> AllocationSplit {
        match self {
            RiskBand::Conservative => AllocationSplit { equity: 0.30, debt: 0.60, gold: 0.10 },
            RiskBand::Balanced => AllocationSplit { equity: 0.50, debt: 0.40, gold: 0.10 },
            RiskBand::Aggressive => AllocationSplit { equity: 0.70, debt: 0.25, gold: 0.05 },
        }
    }
}

/// Fractions of each monthly contribution routed to each asset class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AllocationSplit {
    pub equity: f64,
    pub debt: f64,
    pub gold: f64,
}

impl AllocationSplit {
    pub fn fraction(&self, asset: Asset) -> f64 {
        match asset {
            Asset::Equity => self.equity,
            Asset::Debt => self.debt,
            Asset::Gold => self.gold,
        }
    }

    pub fn total(&self) -> f64 {
        self.equity + self.debt + self.gold
    }

    /// Split a monthly amount into per-asset contributions
    pub fn monthly_split(&self, monthly_investment: f64) -> MonthlySplit {
        MonthlySplit {
            monthly_investment,
            equity: monthly_investment * self.equity,
            debt: monthly_investment * self.debt,
            gold: monthly_investment * self.gold,
        }
    }
}

/// Monthly contribution broken down by asset class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySplit {
    pub monthly_investment: f64,
    pub equity: f64,
    pub debt: f64,
    pub gold: f64,
}

impl MonthlySplit {
    pub fn amount(&self, asset: Asset) -> f64 {
        match asset {
            Asset::Equity => self.equity,
            Asset::Debt => self.debt,
            Asset::Gold => self.gold,
        }
    }
}

/// Allocation for a risk score. Never fails.
pub fn allocation_for(risk_score: i32) -> AllocationSplit {
    RiskBand::from_score(risk_score).split()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(RiskBand::from_score(3), RiskBand::Conservative);
        assert_eq!(RiskBand::from_score(4), RiskBand::Balanced);
        assert_eq!(RiskBand::from_score(7), RiskBand::Balanced);
        assert_eq!(RiskBand::from_score(8), RiskBand::Aggressive);
    }

    #[test]
    fn test_out_of_range_scores_resolve() {
        assert_eq!(allocation_for(0), allocation_for(1));
        assert_eq!(allocation_for(-40), RiskBand::Conservative.split());
        assert_eq!(allocation_for(11), allocation_for(10));
        assert_eq!(allocation_for(i32::MAX), RiskBand::Aggressive.split());
    }

    #[test]
    fn test_allocation_totals_to_one() {
        for score in -5..=15 {
            assert_abs_diff_eq!(allocation_for(score).total(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_monotonic_aggressiveness() {
        assert!(allocation_for(2).equity < allocation_for(5).equity);
        assert!(allocation_for(5).equity < allocation_for(9).equity);
    }

    #[test]
    fn test_monthly_split() {
        let split = allocation_for(5).monthly_split(5000.0);
        assert_abs_diff_eq!(split.equity, 2500.0, epsilon = 1e-9);
        assert_abs_diff_eq!(split.debt, 2000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(split.gold, 500.0, epsilon = 1e-9);
        assert_abs_diff_eq!(split.amount(Asset::Gold), 500.0, epsilon = 1e-9);
    }
}
