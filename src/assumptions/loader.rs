//! CSV-based assumption loader
//!
//! Loads market assumptions from CSV files in data/assumptions/

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::info;

use super::rates::{Asset, AssetRates};
use crate::error::LoadError;

/// Default path to assumptions directory
pub const DEFAULT_ASSUMPTIONS_PATH: &str = "data/assumptions";

/// File holding `Asset,AnnualRate` rows
pub const ASSET_RATES_FILE: &str = "asset_rates.csv";

/// Load annual asset rates from `asset_rates.csv` in the given directory
pub fn load_asset_rates(path: &Path) -> Result<AssetRates, LoadError> {
    let file_path = path.join(ASSET_RATES_FILE);
    let file = File::open(&file_path).map_err(|source| LoadError::Io {
        path: file_path.clone(),
        source,
    })?;
    let rates = load_asset_rates_from_reader(file)?;
    info!("loaded asset rates from {}", file_path.display());
    Ok(rates)
}

/// Load annual asset rates from any reader.
///
/// Every asset must appear at least once; a later row for the same asset
/// overrides an earlier one.
pub fn load_asset_rates_from_reader<R: Read>(reader: R) -> Result<AssetRates, LoadError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut seen = [None::<f64>; 3];

    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        let row = idx + 1;
        let name = record.get(0).unwrap_or_default();
        let asset = Asset::parse(name).ok_or_else(|| LoadError::UnknownAsset {
            row,
            name: name.to_string(),
        })?;
        let raw = record.get(1).unwrap_or_default();
        let rate: f64 = raw.parse().map_err(|_| LoadError::InvalidField {
            row,
            field: "AnnualRate",
            value: raw.to_string(),
        })?;
        seen[slot(asset)] = Some(rate);
    }

    let mut rates = AssetRates::default_market();
    for asset in Asset::ALL {
        let rate = seen[slot(asset)].ok_or(LoadError::MissingAsset(asset.as_str()))?;
        rates.set_annual_rate(asset, rate);
    }
    Ok(rates)
}

fn slot(asset: Asset) -> usize {
    match asset {
        Asset::Equity => 0,
        Asset::Debt => 1,
        Asset::Gold => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_asset_rates() {
        let result = load_asset_rates(Path::new(DEFAULT_ASSUMPTIONS_PATH));
        assert!(result.is_ok(), "Failed to load assumptions: {:?}", result.err());
        assert_eq!(result.unwrap(), AssetRates::default_market());
    }

    #[test]
    fn test_load_from_reader() {
        let data = "Asset,AnnualRate\nGold,4.5\nequity,10\nDebt,6.5\n";
        let rates = load_asset_rates_from_reader(data.as_bytes()).unwrap();
        assert_eq!(rates.equity, 10.0);
        assert_eq!(rates.debt, 6.5);
        assert_eq!(rates.gold, 4.5);
    }

    #[test]
    fn test_missing_asset_is_error() {
        let data = "Asset,AnnualRate\nEquity,12\nDebt,7\n";
        let err = load_asset_rates_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingAsset("Gold")));
    }

    #[test]
    fn test_bad_rate_reports_row() {
        let data = "Asset,AnnualRate\nEquity,twelve\n";
        let err = load_asset_rates_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidField { row: 1, .. }));
    }

    #[test]
    fn test_unknown_asset_is_error() {
        let data = "Asset,AnnualRate\nCrypto,40\n";
        let err = load_asset_rates_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::UnknownAsset { row: 1, .. }));
    }
}
