//! Integration tests for loading catalog and work item fixtures from disk.

use std::path::{Path, PathBuf};

use paint_core::calculations::{EstimateCalculator, calculate_costs};
use paint_core::{Dimension, DiscountConfig, EstimateSelection, reference_catalog};
use paint_data::{CatalogLoader, WorkItemLoader};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

const TEST_CATALOG: &str = include_str!("../test-data/catalog.csv");
const TEST_BUNDLES: &str = include_str!("../test-data/bundles.csv");

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("test-data")
        .join(name)
}

fn load_fixture_catalog() -> paint_core::PricingCatalog {
    let records = CatalogLoader::parse(TEST_CATALOG.as_bytes()).expect("Failed to parse catalog");
    let rows = CatalogLoader::parse_bundles(TEST_BUNDLES.as_bytes()).expect("Failed to parse bundles");
    let bundles = CatalogLoader::group_bundles(&rows);

    CatalogLoader::build(&records, bundles, dec!(0.0825), "B0").expect("Failed to build catalog")
}

#[test]
fn test_fixture_catalog_matches_reference_catalog() {
    let catalog = load_fixture_catalog();

    assert_eq!(&catalog, reference_catalog());
}

#[test]
fn test_fixture_catalog_table_sizes() {
    let catalog = load_fixture_catalog();

    assert_eq!(catalog.table(Dimension::RepairType).len(), 5);
    assert_eq!(catalog.table(Dimension::Size).len(), 5);
    assert_eq!(catalog.table(Dimension::Orientation).len(), 3);
    assert_eq!(catalog.table(Dimension::Access).len(), 4);
    assert_eq!(catalog.table(Dimension::Finish).len(), 5);
    assert_eq!(catalog.table(Dimension::PaintScope).len(), 4);
    assert_eq!(catalog.table(Dimension::Protection).len(), 3);
    assert_eq!(catalog.table(Dimension::Modifier).len(), 5);
    assert_eq!(catalog.bundles().len(), 4);
}

#[test]
fn test_fixture_bundle_with_comma_in_label() {
    let catalog = load_fixture_catalog();

    let bundle = catalog.bundle("B2").expect("B2 should exist");

    assert_eq!(bundle.label, "Patch, prime and spot paint");
    assert_eq!(bundle.steps.len(), 7);
}

#[test]
fn test_loaded_catalog_prices_worked_example() {
    let catalog = load_fixture_catalog();
    let selection = EstimateSelection::default()
        .with(Dimension::RepairType, "T2")
        .with(Dimension::Size, "S1")
        .with(Dimension::Orientation, "O1")
        .with(Dimension::Access, "A1")
        .with(Dimension::Finish, "F1")
        .with(Dimension::PaintScope, "P0")
        .with(Dimension::Protection, "C1")
        .with_quantity(3);

    let result = EstimateCalculator::new(&catalog).calculate(&selection);

    assert_eq!(result.total, dec!(1786));
}

#[test]
fn test_load_work_items_fixture() {
    let items = WorkItemLoader::load_from_file(&fixture("work_items.csv"))
        .expect("fixture should load without error");

    assert_eq!(items.len(), 3);
    assert_eq!(items[0].title, "Living room walls");
    assert_eq!(items[2].cost, dec!(595));

    let costs = calculate_costs(&items, &DiscountConfig::amount(dec!(245)));
    assert_eq!(costs.subtotal, dec!(2245.00));
    assert_eq!(costs.total_after_discount, dec!(2000.00));
}
