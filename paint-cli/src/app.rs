//! Command dispatch for the estimator CLI.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use paint_core::calculations::{CostCalculator, PaintingCalculator, PaintingJob};
use paint_core::{PricingCatalog, reference_catalog};
use paint_data::{CatalogLoader, WorkItemLoader};
use tracing::{debug, info, warn};

use crate::cli::{Cli, Command};
use crate::config::{AppConfig, EstimateSettings};
use crate::report;
use crate::state::EstimateSession;

/// Builds the pricing catalog: the CSV at `catalog` when given, otherwise
/// the built-in catalog, with the configured estimate settings applied.
pub fn load_catalog(
    catalog: Option<&Path>,
    bundles: Option<&Path>,
    settings: &EstimateSettings,
) -> Result<PricingCatalog> {
    let Some(path) = catalog else {
        debug!("using built-in catalog");
        return Ok(settings.apply(reference_catalog().clone())?);
    };

    let file = File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
    let records = CatalogLoader::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", path.display()))?;

    let bundles = match bundles {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
            let rows = CatalogLoader::parse_bundles(file)
                .with_context(|| format!("Failed to parse CSV: {}", path.display()))?;
            CatalogLoader::group_bundles(&rows)
        }
        None => Vec::new(),
    };

    let catalog = CatalogLoader::build(
        &records,
        bundles,
        settings.tax_rate,
        &settings.fallback_bundle,
    )
    .with_context(|| format!("Invalid catalog: {}", path.display()))?;
    info!(path = %path.display(), records = records.len(), "catalog loaded");
    Ok(catalog)
}

/// Runs one command, writing its report to `out`.
pub fn run(
    cli: &Cli,
    out: &mut impl Write,
) -> Result<()> {
    let config = AppConfig::load_or_default(cli.config.as_deref()).context("Failed to load config")?;
    let catalog = load_catalog(
        cli.catalog.as_deref(),
        cli.bundles.as_deref(),
        &config.estimate,
    )?;
    let costs = CostCalculator::new(config.costs.clone()).context("Invalid cost configuration")?;
    let mut session = EstimateSession::new(&catalog, costs);

    match &cli.command {
        Command::Sku(args) => {
            session.selection = args.to_selection();
            report::write_sku(out, &session.estimate())?;
        }
        Command::Estimate(args) => {
            session.selection = args.to_selection();
            let estimate = session.estimate();
            if estimate.required_missing {
                warn!(sku = %estimate.sku, "estimate is incomplete");
            }
            report::write_estimate(out, &estimate, session.catalog())?;
        }
        Command::Costs(args) => {
            if let Some(path) = &args.items {
                let items = WorkItemLoader::load_from_file(path)
                    .with_context(|| format!("Failed to load work items: {}", path.display()))?;
                session.work_items.extend(items);
            }
            session.work_items.extend(args.extra_items.iter().cloned());

            session.selection = args.selection.to_selection();
            if session.selection != Default::default() && !session.add_estimate_to_work_items() {
                warn!("selection is incomplete; estimate not added to work items");
            }

            session.discount = args.discount.to_discount();
            report::write_costs(out, &session.work_items, &session.costs())?;
        }
        Command::Expectations(args) => {
            session.selection = args.selection.to_selection();
            session.expectations = args.to_expectations();
            if args.base.is_none() && session.estimate().required_missing {
                warn!("no --base given and the selection is incomplete");
            }
            let (base, adjusted, status) = session.adjusted(args.base);
            report::write_expectations(out, &session.expectations, base, adjusted, status)?;
        }
        Command::Paint(args) => {
            let job = PaintingJob {
                placement: args.placement,
                surfaces: args.surfaces.clone(),
                production_rate: args.production_rate,
            };
            let result = PaintingCalculator::new(config.painting.clone())
                .calculate(&job)
                .context("Painting estimate failed")?;
            report::write_painting(out, &result)?;
            writeln!(out)?;

            session.work_items = result.work_items();
            session.discount = args.discount.to_discount();
            report::write_costs(out, &session.work_items, &session.costs())?;
        }
        Command::Catalog => {
            report::write_catalog(out, session.catalog())?;
        }
    }

    Ok(())
}
