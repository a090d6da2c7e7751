use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use paint_core::catalog::{FALLBACK_BUNDLE_ID, REFERENCE_TAX_RATE};
use paint_core::Dimension;
use paint_data::CatalogLoader;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

/// Validate a catalog CSV file and print a summary of its tables.
///
/// The catalog file should have the following columns:
/// - dimension: repair_type, size, orientation, access, finish, paint_scope,
///   protection or modifier
/// - id: short code, unique within the dimension
/// - label: display name
/// - multiplier: cost factor (empty for 1.0)
/// - amount: base cost, repair adder or modifier amount (empty for 0)
/// - bundle: step bundle id for paint scopes (empty for none)
#[derive(Parser, Debug)]
#[command(name = "paint-catalog-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the catalog CSV file
    #[arg(short, long)]
    catalog: PathBuf,

    /// Path to the step bundle CSV file (bundle_id,label,step)
    #[arg(short, long)]
    bundles: Option<PathBuf>,

    /// Estimate tax rate as a fraction (e.g. 0.0825)
    #[arg(short, long, default_value_t = REFERENCE_TAX_RATE)]
    tax_rate: Decimal,

    /// Bundle used when no paint scope is selected
    #[arg(short, long, default_value = FALLBACK_BUNDLE_ID)]
    fallback_bundle: String,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .init();

    let args = Args::parse();

    let file = File::open(&args.catalog)
        .with_context(|| format!("Failed to open: {}", args.catalog.display()))?;
    let records = CatalogLoader::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", args.catalog.display()))?;
    println!("Parsed {} catalog records", records.len());

    let bundles = match &args.bundles {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
            let rows = CatalogLoader::parse_bundles(file)
                .with_context(|| format!("Failed to parse CSV: {}", path.display()))?;
            CatalogLoader::group_bundles(&rows)
        }
        None => Vec::new(),
    };
    println!("Parsed {} step bundles", bundles.len());

    let catalog = CatalogLoader::build(&records, bundles, args.tax_rate, &args.fallback_bundle)
        .context("Catalog is invalid")?;

    for dimension in Dimension::ALL {
        let table = catalog.table(dimension);
        println!("{:<12} {:>3} entries", dimension.as_str(), table.len());
    }
    if catalog.table(Dimension::Size).is_empty() {
        println!("warning: no size bands; every estimate will have a zero base cost");
    }

    println!("Catalog OK.");

    Ok(())
}
