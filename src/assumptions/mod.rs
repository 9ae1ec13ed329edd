//! Market assumptions: asset growth rates and the risk allocation policy

mod allocation;
mod rates;
pub mod loader;

pub use allocation::{allocation_for, AllocationSplit, MonthlySplit, RiskBand};
pub use rates::{Asset, AssetRates};

use std::path::Path;

use crate::error::LoadError;

/// Container for all projection assumptions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assumptions {
    pub rates: AssetRates,
}

impl Assumptions {
    /// Built-in long-run market averages
    pub fn default_market() -> Self {
        Self {
            rates: AssetRates::default_market(),
        }
    }

    pub fn with_rates(rates: AssetRates) -> Self {
        Self { rates }
    }

    /// Load assumptions from CSV files in the default location (data/assumptions/)
    pub fn from_csv() -> Result<Self, LoadError> {
        Self::from_csv_path(Path::new(loader::DEFAULT_ASSUMPTIONS_PATH))
    }

    /// Load assumptions from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self, LoadError> {
        Ok(Self {
            rates: loader::load_asset_rates(path)?,
        })
    }
}

impl Default for Assumptions {
    fn default() -> Self {
        Self::default_market()
    }
}
