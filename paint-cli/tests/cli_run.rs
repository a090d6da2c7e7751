//! End-to-end runs of the estimator commands against in-memory output.

use std::path::{Path, PathBuf};

use clap::Parser;
use paint_cli::app;
use paint_cli::cli::Cli;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn data_fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../paint-data/test-data")
        .join(name)
}

fn run(args: &[&str]) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(std::iter::once("paint-estimator").chain(args.iter().copied()))?;
    let mut out = Vec::new();
    app::run(&cli, &mut out)?;
    Ok(String::from_utf8(out)?)
}

const WORKED_EXAMPLE: [&str; 14] = [
    "--repair",
    "T2",
    "--size",
    "S1",
    "--orientation",
    "O1",
    "--access",
    "A1",
    "--finish",
    "F1",
    "--scope",
    "P0",
    "--protection",
    "C1",
];

fn with_worked_example<'a>(
    command: &'a str,
    quantity: &'a str,
    extra: &[&'a str],
) -> Vec<&'a str> {
    let mut args = vec![command];
    args.extend(WORKED_EXAMPLE);
    args.extend(["--quantity", quantity]);
    args.extend(extra);
    args
}

// =============================================================================
// sku / estimate
// =============================================================================

#[test]
fn sku_prints_only_the_sku() {
    let output = run(&["sku", "--repair", "T2", "-m", "W3", "-m", "W1"]).unwrap();

    assert_eq!(output, "T2 S? O? A? F? P? (W1,W3) C?\n");
}

#[test]
fn estimate_worked_example() {
    let output = run(&with_worked_example("estimate", "3", &[])).unwrap();

    assert!(output.contains("SKU: T2 S1 O1 A1 F1 P0 C1"), "{output}");
    assert!(output.contains("$1,650"), "{output}");
    assert!(output.contains("$136"), "{output}");
    assert!(output.contains("$1,786"), "{output}");
    assert!(!output.contains("preview"), "{output}");
}

#[test]
fn estimate_uses_configured_tax_rate() {
    let config = fixture("config.toml");
    let config = config.to_str().unwrap();

    let output = run(&with_worked_example("estimate", "1", &["--config", config]))
        .unwrap();

    assert!(output.contains("10% of"), "{output}");
    assert!(output.contains("$605"), "{output}");
}

#[test]
fn estimate_from_csv_catalog_matches_built_in() {
    let catalog = data_fixture("catalog.csv");
    let bundles = data_fixture("bundles.csv");

    let from_csv = run(&with_worked_example(
        "estimate",
        "3",
        &[
            "--catalog",
            catalog.to_str().unwrap(),
            "--bundles",
            bundles.to_str().unwrap(),
        ],
    ))
    .unwrap();
    let built_in = run(&with_worked_example("estimate", "3", &[])).unwrap();

    assert_eq!(from_csv, built_in);
}

#[test]
fn unknown_fallback_bundle_in_config_is_an_error() {
    let config = fixture("bad_fallback.toml");

    let err = run(&["estimate", "--config", config.to_str().unwrap()]).expect_err("bad fallback");

    assert!(format!("{err:#}").contains("'B9'"), "{err:#}");
}

#[test]
fn missing_catalog_file_is_an_error() {
    let err = run(&["catalog", "--catalog", "/definitely/not/here.csv"]).expect_err("missing");

    assert!(format!("{err:#}").contains("Failed to open"), "{err:#}");
}

// =============================================================================
// costs
// =============================================================================

#[test]
fn costs_from_csv_with_amount_discount() {
    let items = data_fixture("work_items.csv");

    let output = run(&[
        "costs",
        "--items",
        items.to_str().unwrap(),
        "--discount-type",
        "amount",
        "--discount",
        "245",
    ])
    .unwrap();

    assert!(output.contains("Living room walls"), "{output}");
    assert!(output.contains("$2,245.00"), "{output}");
    assert!(output.contains("-$245.00"), "{output}");
    assert!(output.contains("$2,000.00"), "{output}");
}

#[test]
fn costs_with_config_margin() {
    let config = fixture("config.toml");

    let output = run(&[
        "costs",
        "--item",
        "Walls=1000",
        "--config",
        config.to_str().unwrap(),
    ])
    .unwrap();

    // 1000 + 25% profit = 1250, + 8.25% tax = 103.13, no fees
    assert!(output.contains("$1,250.00"), "{output}");
    assert!(output.contains("$103.13"), "{output}");
    assert!(output.contains("$1,353.13"), "{output}");
}

#[test]
fn costs_include_complete_estimate() {
    let output = run(&with_worked_example("costs", "3", &[])).unwrap();

    assert!(output.contains("T2 S1 O1 A1 F1 P0 C1"), "{output}");
    assert!(output.contains("$1,786.00"), "{output}");
}

#[test]
fn costs_skip_incomplete_estimate() {
    let output = run(&["costs", "--item", "Walls=100", "--size", "S1"]).unwrap();

    assert!(!output.contains("S1"), "{output}");
    assert!(output.contains("Walls"), "{output}");
}

#[test]
fn costs_with_maximal_amounts_saturate() {
    let output = run(&[
        "costs",
        "--item",
        "Stadium=79228162514264337593543950335",
        "--item",
        "Arena=1",
    ])
    .unwrap();

    assert!(
        output.contains("$79,228,162,514,264,337,593,543,950,335.00"),
        "{output}"
    );
}

#[test]
fn invalid_cost_config_is_an_error() {
    let config = fixture("bad_costs.toml");

    let err = run(&["costs", "--config", config.to_str().unwrap()]).expect_err("bad config");

    assert!(format!("{err:#}").contains("profit_margin_percent"), "{err:#}");
}

// =============================================================================
// expectations
// =============================================================================

#[test]
fn expectations_neutral_sliders_keep_base() {
    let output = run(&[
        "expectations",
        "--base",
        "1,000",
        "--budget-min",
        "1200",
        "--budget-max",
        "1500",
    ])
    .unwrap();

    assert!(output.contains("Adjusted cost"), "{output}");
    assert!(output.contains("$1,000.00"), "{output}");
    assert!(output.contains("below budget"), "{output}");
}

#[test]
fn expectations_default_to_estimate_total() {
    let output = run(&with_worked_example("expectations", "3", &[])).unwrap();

    assert!(output.contains("Base cost"), "{output}");
    assert!(output.contains("$1,786.00"), "{output}");
}

// =============================================================================
// paint / catalog
// =============================================================================

#[test]
fn paint_interior_walls() {
    let output = run(&["paint", "--surface", "Walls=700:2"]).unwrap();

    // 1400 sq ft: 4 gal x 45.00, 9.33 h x 55.00
    assert!(output.contains("Paint: 4 gal, $180.00"), "{output}");
    assert!(output.contains("Labor: 9.33 h, $513.15"), "{output}");
    assert!(output.contains("Painting total: $693.15"), "{output}");
    // 693.15 + 20% profit, 8.25% tax, 3% payment fee
    assert!(output.contains("$925.35"), "{output}");
}

#[test]
fn paint_uses_configured_rates() {
    let config = fixture("config.toml");

    let output = run(&[
        "paint",
        "--surface",
        "Walls=800:2",
        "--config",
        config.to_str().unwrap(),
    ])
    .unwrap();

    // 1600 sq ft at 400 per gallon
    assert!(output.contains("Paint: 4 gal, $200.00"), "{output}");
}

#[test]
fn paint_rejects_zero_production_rate() {
    let err = run(&["paint", "--surface", "Walls=100", "--production-rate", "0"])
        .expect_err("zero rate");

    assert!(format!("{err:#}").contains("production rate"), "{err:#}");
}

#[test]
fn catalog_lists_reference_entries() {
    let output = run(&["catalog"]).unwrap();

    assert!(output.contains("S5"), "{output}");
    assert!(output.contains("W5"), "{output}");
    assert!(output.contains("x1.25"), "{output}");
}
