use crate::assets::error::AssetError;
use crate::assets::method::AmortizationMethod;
use crate::assets::{bounded_charge, checked, per_month, LongLivedAsset};
use crate::core::account::{Account, AccountCategory, Term};
use crate::core::asset_id::AssetId;
use crate::core::money::CurrencyValue;
use chrono::NaiveDate;
use log::{debug, info};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An intangible asset (patent, licence, goodwill) written down through amortization.
///
/// Intangibles carry no salvage value and no production capacity, so the
/// full acquisition cost is amortizable and only straight-line and
/// declining-balance apply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizableAsset {
    id: AssetId,
    name: String,
    /// Useful life in months.
    life: u32,
    acquisition_cost: CurrencyValue,
    placed_in_service: Option<NaiveDate>,
    remaining_life: u32,
    total_amortized: CurrencyValue,
}

impl AmortizableAsset {
    pub fn new(name: impl Into<String>, life: u32, acquisition_cost: CurrencyValue) -> Self {
        Self {
            id: AssetId::new(),
            name: name.into(),
            life,
            total_amortized: acquisition_cost.with_value(Decimal::ZERO),
            acquisition_cost,
            placed_in_service: None,
            remaining_life: life,
        }
    }

    pub fn with_id(mut self, id: AssetId) -> Self {
        self.id = id;
        self
    }

    pub fn placed_in_service(mut self, date: NaiveDate) -> Self {
        self.placed_in_service = Some(date);
        self
    }

    // --- Accessors ---

    pub fn id(&self) -> AssetId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn life(&self) -> u32 {
        self.life
    }

    pub fn remaining_life(&self) -> u32 {
        self.remaining_life
    }

    pub fn acquisition_cost(&self) -> &CurrencyValue {
        &self.acquisition_cost
    }

    pub fn placed_in_service_date(&self) -> Option<NaiveDate> {
        self.placed_in_service
    }

    /// Accumulated amortization.
    pub fn total_amortized(&self) -> &CurrencyValue {
        &self.total_amortized
    }

    pub fn net_value(&self) -> CurrencyValue {
        self.acquisition_cost.with_value(
            self.acquisition_cost
                .value()
                .saturating_sub(self.total_amortized.value()),
        )
    }

    pub fn is_fully_amortized(&self) -> bool {
        self.net_value() <= Decimal::ZERO
    }

    /// Charge `periods` months of amortization and return the amount applied.
    ///
    /// The formula amount is clamped to `[0, net_value]`; a fully amortized
    /// asset is left untouched and the call returns zero.
    pub fn amortize(
        &mut self,
        method: &AmortizationMethod,
        periods: u32,
    ) -> Result<CurrencyValue, AssetError> {
        if self.is_fully_amortized() {
            info!("asset \"{}\" is fully amortized", self.name);
            return Ok(self.acquisition_cost.with_value(Decimal::ZERO));
        }

        let net = checked(
            self.acquisition_cost
                .value()
                .checked_sub(self.total_amortized.value()),
            "subtraction",
        )?;
        let periods_dec = Decimal::from(periods);
        let raw = match *method {
            AmortizationMethod::StraightLine => {
                let monthly = per_month(self.acquisition_cost.value(), self.life)?;
                checked(monthly.checked_mul(periods_dec), "multiplication")?
            }
            AmortizationMethod::DecliningBalance { factor } => {
                let monthly = per_month(net, self.life)?;
                checked(
                    monthly
                        .checked_mul(factor)
                        .and_then(|v| v.checked_mul(periods_dec)),
                    "multiplication",
                )?
            }
        };

        let charge = bounded_charge(raw, net);
        self.total_amortized += charge;
        self.remaining_life = self.remaining_life.saturating_sub(periods);
        debug!(
            "asset \"{}\": {} over {} periods amortized {} (raw {})",
            self.name, method, periods, charge, raw
        );

        Ok(self.acquisition_cost.with_value(charge))
    }

    pub fn reset(&mut self) {
        self.total_amortized = self.acquisition_cost.with_value(Decimal::ZERO);
        self.remaining_life = self.life;
    }

    /// The asset's cost account and its contra accumulated-amortization account.
    pub fn ledger_accounts(&self) -> [Account; 2] {
        [
            Account::new(
                self.name.clone(),
                AccountCategory::Asset,
                self.acquisition_cost.clone(),
            )
            .with_term(Term::NonCurrent),
            Account::new(
                format!("Accumulated Amortization - {}", self.name),
                AccountCategory::Asset,
                self.total_amortized.clone(),
            )
            .contra()
            .with_term(Term::NonCurrent),
        ]
    }
}

impl LongLivedAsset for AmortizableAsset {
    type Method = AmortizationMethod;

    fn id(&self) -> AssetId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn life(&self) -> u32 {
        self.life
    }

    fn remaining_life(&self) -> u32 {
        self.remaining_life
    }

    fn acquisition_cost(&self) -> &CurrencyValue {
        &self.acquisition_cost
    }

    fn total_charged(&self) -> &CurrencyValue {
        &self.total_amortized
    }

    fn net_value(&self) -> CurrencyValue {
        AmortizableAsset::net_value(self)
    }

    fn is_exhausted(&self) -> bool {
        self.is_fully_amortized()
    }

    fn placed_in_service_date(&self) -> Option<NaiveDate> {
        self.placed_in_service
    }

    fn apply(&mut self, method: &AmortizationMethod, periods: u32) -> Result<CurrencyValue, AssetError> {
        self.amortize(method, periods)
    }

    fn reset(&mut self) {
        AmortizableAsset::reset(self)
    }
}

impl fmt::Display for AmortizableAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} has a life of {} months and a cost of {}.",
            self.name, self.life, self.acquisition_cost
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn patent() -> AmortizableAsset {
        AmortizableAsset::new("Test Asset", 10 * 12, CurrencyValue::new(dec!(100_000)))
    }

    #[test]
    fn test_straight_line() {
        let mut asset = patent();
        let sl = AmortizationMethod::StraightLine;
        assert_eq!(asset.net_value(), dec!(100_000));

        assert_eq!(asset.amortize(&sl, 12).unwrap(), dec!(10_000));
        assert_eq!(asset.net_value(), dec!(90_000));

        assert_eq!(asset.amortize(&sl, 12).unwrap(), dec!(10_000));
        assert_eq!(asset.net_value(), dec!(80_000));
        assert_eq!(asset.remaining_life(), 96);
    }

    #[test]
    fn test_declining_balance() {
        let mut asset = patent();
        let db = AmortizationMethod::DecliningBalance { factor: dec!(2) };
        assert_eq!(asset.amortize(&db, 12).unwrap(), dec!(20_000));
        assert_eq!(asset.amortize(&db, 12).unwrap(), dec!(16_000));
        assert_eq!(asset.total_amortized(), &CurrencyValue::new(dec!(36_000)));
    }

    #[test]
    fn test_amortization_clamps_to_net_value() {
        let mut asset = AmortizableAsset::new("Licence", 12, CurrencyValue::new(dec!(1_200)));
        let sl = AmortizationMethod::StraightLine;
        assert_eq!(asset.amortize(&sl, 18).unwrap(), dec!(1_200));
        assert!(asset.is_fully_amortized());
        assert!(asset.amortize(&sl, 12).unwrap().is_zero());
        assert_eq!(asset.net_value(), Decimal::ZERO);
    }

    #[test]
    fn test_zero_life_fails() {
        let mut asset = AmortizableAsset::new("Goodwill", 0, CurrencyValue::new(dec!(500)));
        assert_eq!(
            asset.amortize(&AmortizationMethod::StraightLine, 1),
            Err(AssetError::DivisionByZero {
                denominator: "useful life"
            })
        );
    }

    #[test]
    fn test_extreme_cost_does_not_panic() {
        let mut asset = AmortizableAsset::new("Spectrum Licence", 120, CurrencyValue::new(Decimal::MAX));
        assert_eq!(asset.net_value().value(), Decimal::MAX);
        let charge = asset
            .amortize(&AmortizationMethod::DecliningBalance { factor: dec!(2) }, 12)
            .unwrap();
        assert!(charge.value() > Decimal::ZERO);
        assert!(asset.net_value().value() < Decimal::MAX);
    }

    #[test]
    fn test_reset() {
        let mut asset = patent();
        asset.amortize(&AmortizationMethod::StraightLine, 60).unwrap();
        asset.reset();
        assert!(asset.total_amortized().is_zero());
        assert_eq!(asset.remaining_life(), 120);
    }

    #[test]
    fn test_ledger_accounts() {
        let mut asset = patent();
        asset.amortize(&AmortizationMethod::StraightLine, 30).unwrap();
        let [cost, accumulated] = asset.ledger_accounts();
        assert_eq!(accumulated.name(), "Accumulated Amortization - Test Asset");
        assert_eq!(cost.true_balance() + accumulated.true_balance(), dec!(75_000));
    }
}
