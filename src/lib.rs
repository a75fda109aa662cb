//! # asset-depreciation
//!
//! Fixed-asset accounting: depreciation of tangible assets, amortization of
//! intangibles, and the currency arithmetic underneath both.
//!
//! Charges are computed with one of four methods (straight-line, declining
//! balance, sum-of-years'-digits, units-of-production) and always clamped so
//! an asset is never written down past its salvage value.
//!
//! ## Architecture
//!
//! - **core**: Foundational types: currency values, ledger accounts, asset ids
//! - **assets**: Depreciable and amortizable assets, methods, the asset register
//! - **projection**: Multi-period depreciation schedules
//! - **simulation**: Random fleet generation for load testing

pub mod assets;
pub mod core;
pub mod projection;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::assets::error::AssetError;
    pub use crate::assets::intangible::AmortizableAsset;
    pub use crate::assets::method::{AmortizationMethod, DepreciationMethod, DEFAULT_PERIODS};
    pub use crate::assets::register::AssetRegister;
    pub use crate::assets::tangible::DepreciableAsset;
    pub use crate::assets::LongLivedAsset;
    pub use crate::core::account::{Account, AccountCategory, NormalBalance, Term};
    pub use crate::core::asset_id::AssetId;
    pub use crate::core::money::{CurrencyValue, MoneyError};
    pub use crate::projection::schedule::{project_schedule, DepreciationSchedule};
}
