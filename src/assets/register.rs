use crate::assets::error::AssetError;
use crate::assets::method::DepreciationMethod;
use crate::assets::tangible::DepreciableAsset;
use crate::core::account::Account;
use crate::core::asset_id::AssetId;
use crate::core::money::CurrencyValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A fixed-asset register: an ordered collection of depreciable assets.
///
/// Totals are plain sums and assume the register holds a single currency;
/// they carry the symbol of the first asset.
///
/// # Examples
///
/// ```
/// use asset_depreciation::assets::method::DepreciationMethod;
/// use asset_depreciation::assets::register::AssetRegister;
/// use asset_depreciation::assets::tangible::DepreciableAsset;
/// use asset_depreciation::core::money::CurrencyValue;
/// use rust_decimal_macros::dec;
///
/// let mut register = AssetRegister::new();
/// register.add(DepreciableAsset::new("Truck", 60, CurrencyValue::new(dec!(60_000))));
/// register.add(DepreciableAsset::new("Forklift", 120, CurrencyValue::new(dec!(24_000))));
///
/// let charged = register.depreciate_all(&DepreciationMethod::StraightLine, 12).unwrap();
/// assert_eq!(charged, dec!(14_400));
/// assert_eq!(register.total_net_value(), dec!(69_600));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetRegister {
    assets: Vec<DepreciableAsset>,
}

impl AssetRegister {
    pub fn new() -> Self {
        Self { assets: Vec::new() }
    }

    pub fn add(&mut self, asset: DepreciableAsset) {
        self.assets.push(asset);
    }

    pub fn assets(&self) -> &[DepreciableAsset] {
        &self.assets
    }

    pub fn get(&self, id: &AssetId) -> Option<&DepreciableAsset> {
        self.assets.iter().find(|a| a.id() == *id)
    }

    pub fn get_mut(&mut self, id: &AssetId) -> Option<&mut DepreciableAsset> {
        self.assets.iter_mut().find(|a| a.id() == *id)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn total_cost(&self) -> CurrencyValue {
        self.assets.iter().map(|a| a.acquisition_cost()).sum()
    }

    pub fn total_accumulated_depreciation(&self) -> CurrencyValue {
        self.assets.iter().map(|a| a.accumulated_depreciation()).sum()
    }

    pub fn total_net_value(&self) -> CurrencyValue {
        self.assets.iter().map(|a| a.net_value()).sum()
    }

    /// Assets with nothing left to depreciate.
    pub fn fully_depreciated(&self) -> impl Iterator<Item = &DepreciableAsset> {
        self.assets.iter().filter(|a| a.is_fully_depreciated())
    }

    /// Depreciate every asset with the same method and return the total charged.
    ///
    /// Stops at the first failing asset; assets before it keep their charge.
    pub fn depreciate_all(
        &mut self,
        method: &DepreciationMethod,
        periods: u32,
    ) -> Result<CurrencyValue, AssetError> {
        let mut charges = Vec::with_capacity(self.assets.len());
        for asset in &mut self.assets {
            charges.push(asset.depreciate(method, periods)?);
        }
        Ok(charges.into_iter().sum())
    }

    pub fn reset_all(&mut self) {
        for asset in &mut self.assets {
            asset.reset();
        }
    }

    /// Cost and accumulated-depreciation accounts for every asset, in register order.
    pub fn ledger_accounts(&self) -> Vec<Account> {
        self.assets
            .iter()
            .flat_map(|a| a.ledger_accounts())
            .collect()
    }
}

impl FromIterator<DepreciableAsset> for AssetRegister {
    fn from_iter<T: IntoIterator<Item = DepreciableAsset>>(iter: T) -> Self {
        Self {
            assets: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for AssetRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Asset Register ===")?;
        writeln!(f, "Assets:                   {}", self.len())?;
        writeln!(f, "Total Cost:               {}", self.total_cost())?;
        writeln!(f, "Accumulated Depreciation: {}", self.total_accumulated_depreciation())?;
        writeln!(f, "Net Book Value:           {}", self.total_net_value())?;
        for asset in &self.assets {
            writeln!(
                f,
                "  {:<24} {:>16} of {:>16}",
                asset.name(),
                asset.net_value().to_string(),
                asset.acquisition_cost().to_string()
            )?;
        }
        Ok(())
    }
}
