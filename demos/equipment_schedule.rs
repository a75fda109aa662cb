//! Equipment depreciation example.
//!
//! Compares the four depreciation methods on one machine, then runs a
//! small register through a year and prints its ledger accounts.

use asset_depreciation::assets::intangible::AmortizableAsset;
use asset_depreciation::assets::method::{AmortizationMethod, DepreciationMethod};
use asset_depreciation::assets::register::AssetRegister;
use asset_depreciation::assets::tangible::DepreciableAsset;
use asset_depreciation::core::money::{set_show_decimals, CurrencyValue};
use asset_depreciation::projection::schedule::{project_schedule, DEFAULT_MAX_STEPS};
use chrono::NaiveDate;
use rust_decimal_macros::dec;

fn main() {
    set_show_decimals(true);

    println!("╔════════════════════════════════════════════════╗");
    println!("║  asset-depreciation: Equipment Schedule Demo   ║");
    println!("╚════════════════════════════════════════════════╝\n");

    // --- Scenario 1: One machine, four methods ---
    println!("━━━ Scenario 1: Comparing Methods ━━━\n");

    let press = DepreciableAsset::new("Hydraulic Press", 10 * 12, CurrencyValue::new(dec!(100_000)))
        .with_salvage_value(dec!(10_000))
        .with_production_capacity(50_000)
        .placed_in_service(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default());

    let methods = [
        DepreciationMethod::StraightLine,
        DepreciationMethod::double_declining(),
        DepreciationMethod::SumOfYearsDigits,
        DepreciationMethod::UnitsOfProduction { units: 6_000 },
    ];

    for method in &methods {
        match project_schedule(&press, method, 12, DEFAULT_MAX_STEPS) {
            Ok(schedule) => println!("{}\n", schedule),
            Err(e) => println!("{}: {}\n", method, e),
        }
    }

    // --- Scenario 2: A small register over one year ---
    println!("━━━ Scenario 2: Asset Register ━━━\n");

    let mut register: AssetRegister = vec![
        press.clone(),
        DepreciableAsset::new("Delivery Van", 60, CurrencyValue::new(dec!(42_000)))
            .with_salvage_value(dec!(6_000)),
        DepreciableAsset::computer("Design Workstation", CurrencyValue::new(dec!(3_200))),
    ]
    .into_iter()
    .collect();

    match register.depreciate_all(&DepreciationMethod::StraightLine, 12) {
        Ok(charged) => println!("Charged this year: {}\n", charged),
        Err(e) => println!("Depreciation failed: {}\n", e),
    }
    println!("{}", register);

    println!("Ledger:");
    for account in register.ledger_accounts() {
        println!("  {}", account);
    }
    println!();

    // --- Scenario 3: Amortizing a patent ---
    println!("━━━ Scenario 3: Patent Amortization ━━━\n");

    let patent = AmortizableAsset::new("Patent #7,221", 15 * 12, CurrencyValue::new(dec!(45_000)));
    match project_schedule(&patent, &AmortizationMethod::StraightLine, 36, DEFAULT_MAX_STEPS) {
        Ok(schedule) => println!("{}", schedule),
        Err(e) => println!("Amortization failed: {}", e),
    }
}
