//! Annual growth rates per asset class

use serde::{Deserialize, Serialize};

/// Asset classes a plan invests in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Asset {
    Equity,
    Debt,
    Gold,
}

impl Asset {
    /// All assets in reporting order
    pub const ALL: [Asset; 3] = [Asset::Equity, Asset::Debt, Asset::Gold];

    pub fn as_str(&self) -> &'static str {
        match self {
            Asset::Equity => "Equity",
            Asset::Debt => "Debt",
            Asset::Gold => "Gold",
        }
    }

    /// Parse the asset names used in assumption files (case-insensitive)
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "equity" => Some(Asset::Equity),
            "debt" => Some(Asset::Debt),
            "gold" => Some(Asset::Gold),
            _ => None,
        }
    }
}

/// Nominal annual rates in percent (12.0 = 12% per year)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssetRates {
    pub equity: f64,
    pub debt: f64,
    pub gold: f64,
}

impl AssetRates {
    /// Long-run average returns: equity 12%, debt 7%, gold 5%
    pub fn default_market() -> Self {
        Self {
            equity: 12.0,
            debt: 7.0,
            gold: 5.0,
        }
    }

    /// Same rate for every asset (useful for isolating the chaining math)
    pub fn flat(annual_rate: f64) -> Self {
        Self {
            equity: annual_rate,
            debt: annual_rate,
            gold: annual_rate,
        }
    }

    pub fn annual_rate(&self, asset: Asset) -> f64 {
        match asset {
            Asset::Equity => self.equity,
            Asset::Debt => self.debt,
            Asset::Gold => self.gold,
        }
    }

    /// Monthly rate as a decimal: annual / 12 / 100, no compounding conversion
    pub fn monthly_rate(&self, asset: Asset) -> f64 {
        self.annual_rate(asset) / 12.0 / 100.0
    }

    pub fn set_annual_rate(&mut self, asset: Asset, annual_rate: f64) {
        match asset {
            Asset::Equity => self.equity = annual_rate,
            Asset::Debt => self.debt = annual_rate,
            Asset::Gold => self.gold = annual_rate,
        }
    }
}

impl Default for AssetRates {
    fn default() -> Self {
        Self::default_market()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_monthly_rate_is_simple_division() {
        let rates = AssetRates::default_market();
        assert_abs_diff_eq!(rates.monthly_rate(Asset::Equity), 0.01, epsilon = 1e-15);
        assert_abs_diff_eq!(rates.monthly_rate(Asset::Debt), 7.0 / 1200.0, epsilon = 1e-15);
        assert_abs_diff_eq!(rates.monthly_rate(Asset::Gold), 5.0 / 1200.0, epsilon = 1e-15);
    }

    #[test]
    fn test_parse_asset_names() {
        assert_eq!(Asset::parse("Equity"), Some(Asset::Equity));
        assert_eq!(Asset::parse(" GOLD "), Some(Asset::Gold));
        assert_eq!(Asset::parse("bonds"), None);
    }
}
