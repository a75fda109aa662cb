//! asset-depreciation CLI
//!
//! Project depreciation schedules from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Print a schedule for every asset in a JSON file
//! asset-depreciation schedule --input assets.json
//!
//! # Output as JSON, with cents
//! asset-depreciation schedule --input assets.json --format json --decimals
//!
//! # Generate a random fleet for testing
//! asset-depreciation generate --assets 50 --output fleet.json
//! ```

use asset_depreciation::assets::method::{
    DepreciationMethod, DEFAULT_DECLINE_FACTOR, DEFAULT_PERIODS,
};
use asset_depreciation::assets::tangible::DepreciableAsset;
use asset_depreciation::core::money::{set_show_decimals, CurrencyValue, DEFAULT_SYMBOL};
use asset_depreciation::projection::schedule::{
    project_schedule, DepreciationSchedule, DEFAULT_MAX_STEPS,
};
use asset_depreciation::simulation::fleet::{generate_random_fleet, FleetConfig};
use chrono::NaiveDate;
use log::info;
use rust_decimal::Decimal;
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"asset-depreciation — fixed-asset depreciation schedules

USAGE:
    asset-depreciation <COMMAND> [OPTIONS]

COMMANDS:
    schedule    Project a depreciation schedule for each asset in a file
    generate    Generate a random fleet of assets (for testing)
    help        Show this message

OPTIONS (schedule):
    --input <FILE>      Path to JSON assets file
    --format <FORMAT>   Output format: text (default) or json
    --decimals          Show cents in text output

OPTIONS (generate):
    --assets <N>        Number of assets (default: 25)
    --output <FILE>     Write to file instead of stdout

METHODS:
    0 straight-line, 1 declining-balance, 2 sum-of-years-digits, 3 units-of-production
    Declining balance uses "decline_factor" from the file (default 1.0, i.e. 100%).

EXAMPLES:
    asset-depreciation schedule --input assets.json
    asset-depreciation schedule --input assets.json --format json
    asset-depreciation generate --assets 10 --output fleet.json"#
    );
}

/// JSON schema for one asset, shared by `schedule` input and `generate` output.
#[derive(serde::Deserialize, serde::Serialize)]
struct AssetInput {
    name: String,
    /// Useful life in months.
    life: u32,
    cost: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    salvage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    production_capacity: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    placed_in_service: Option<NaiveDate>,
    #[serde(default)]
    method: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    periods: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    decline_factor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    units_produced: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_steps: Option<u32>,
}

#[derive(serde::Deserialize, serde::Serialize)]
struct AssetsFile {
    assets: Vec<AssetInput>,
}

fn parse_decimal(field: &str, raw: &str) -> Decimal {
    raw.parse().unwrap_or_else(|e| {
        eprintln!("Invalid {} '{}': {}", field, raw, e);
        process::exit(1);
    })
}

fn load_assets(path: &str) -> Vec<AssetInput> {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", path, e);
        process::exit(1);
    });

    let file: AssetsFile = serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!(r#"{{
  "assets": [
    {{ "name": "Press", "life": 120, "cost": "100000", "salvage": "10000", "method": 0 }}
  ]
}}"#);
        process::exit(1);
    });
    file.assets
}

fn build_schedule(input: &AssetInput) -> DepreciationSchedule {
    let cost = parse_decimal("cost", &input.cost);
    let symbol = input.symbol.as_deref().unwrap_or(DEFAULT_SYMBOL);

    let mut asset = DepreciableAsset::new(
        input.name.clone(),
        input.life,
        CurrencyValue::with_symbol(cost, symbol),
    );
    if let Some(salvage) = &input.salvage {
        asset = asset.with_salvage_value(parse_decimal("salvage", salvage));
    }
    if let Some(capacity) = input.production_capacity {
        asset = asset.with_production_capacity(capacity);
    }
    if let Some(date) = input.placed_in_service {
        asset = asset.placed_in_service(date);
    }

    let factor = input
        .decline_factor
        .as_deref()
        .map(|f| parse_decimal("decline_factor", f))
        .unwrap_or(DEFAULT_DECLINE_FACTOR);
    let method = DepreciationMethod::from_selector(
        input.method,
        factor,
        input.units_produced.unwrap_or(0),
    )
    .unwrap_or_else(|e| {
        eprintln!("Asset '{}': {}", input.name, e);
        process::exit(1);
    });

    project_schedule(
        &asset,
        &method,
        input.periods.unwrap_or(DEFAULT_PERIODS),
        input.max_steps.unwrap_or(DEFAULT_MAX_STEPS),
    )
    .unwrap_or_else(|e| {
        eprintln!("Asset '{}': {}", input.name, e);
        process::exit(1);
    })
}

fn cmd_schedule(args: &[String]) {
    let mut input_path = None;
    let mut format = "text".to_string();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--input requires a file path");
                    process::exit(1);
                }));
            }
            "--format" => {
                i += 1;
                format = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--format requires 'text' or 'json'");
                    process::exit(1);
                });
            }
            "--decimals" => set_show_decimals(true),
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let path = input_path.unwrap_or_else(|| {
        eprintln!("Error: --input <FILE> is required");
        process::exit(1);
    });

    let inputs = load_assets(&path);
    info!("loaded {} assets from {}", inputs.len(), path);
    let schedules: Vec<DepreciationSchedule> = inputs.iter().map(build_schedule).collect();

    if format == "json" {
        let json = serde_json::to_string_pretty(&schedules).unwrap_or_else(|e| {
            eprintln!("Error serializing schedules: {}", e);
            process::exit(1);
        });
        println!("{}", json);
    } else {
        for schedule in &schedules {
            println!("{}\n", schedule);
        }
    }
}

fn cmd_generate(args: &[String]) {
    let mut config = FleetConfig::default();
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--assets" => {
                i += 1;
                config.asset_count = args
                    .get(i)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(|| {
                        eprintln!("--assets requires a number");
                        process::exit(1);
                    });
            }
            "--output" => {
                i += 1;
                output_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--output requires a file path");
                    process::exit(1);
                }));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let register = generate_random_fleet(&config);

    let output = AssetsFile {
        assets: register
            .assets()
            .iter()
            .map(|a| AssetInput {
                name: a.name().to_string(),
                life: a.life(),
                cost: a.acquisition_cost().value().to_string(),
                salvage: Some(a.salvage_value().value().to_string()),
                production_capacity: Some(a.production_capacity()),
                symbol: None,
                placed_in_service: a.placed_in_service_date(),
                method: DepreciationMethod::StraightLine.selector(),
                periods: None,
                decline_factor: None,
                units_produced: None,
                max_steps: None,
            })
            .collect(),
    };

    let json = serde_json::to_string_pretty(&output).unwrap_or_else(|e| {
        eprintln!("Error serializing fleet: {}", e);
        process::exit(1);
    });

    if let Some(path) = output_path {
        fs::write(&path, &json).unwrap_or_else(|e| {
            eprintln!("Error writing to '{}': {}", path, e);
            process::exit(1);
        });
        eprintln!(
            "Generated {} assets worth {} → {}",
            register.len(),
            register.total_cost(),
            path
        );
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "schedule" => cmd_schedule(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn input(json: &str) -> AssetInput {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_declining_balance_defaults_to_single_factor() {
        let schedule = build_schedule(&input(
            r#"{ "name": "Press", "life": 120, "cost": "100000", "method": 1, "max_steps": 1 }"#,
        ));
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule.method, "declining-balance (100%)");
        assert_eq!(schedule.entries()[0].charge, dec!(10_000));
        assert_eq!(schedule.entries()[0].net_value, dec!(90_000));
    }

    #[test]
    fn test_explicit_decline_factor_is_used() {
        let schedule = build_schedule(&input(
            r#"{ "name": "Press", "life": 120, "cost": "100000", "method": 1,
                 "decline_factor": "2.0", "max_steps": 1 }"#,
        ));
        assert_eq!(schedule.entries()[0].charge, dec!(20_000));
    }
}
