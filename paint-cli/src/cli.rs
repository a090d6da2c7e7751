use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use paint_core::calculations::{BudgetRange, Expectations, Placement, Surface};
use paint_core::{DiscountConfig, DiscountType, EstimateSelection, WorkItem};
use rust_decimal::Decimal;

use crate::utils::{parse_amount, parse_surface, parse_work_item};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Drywall repair and painting estimator.
///
/// Prices repairs from a catalog (built in, or loaded from CSV), applies
/// customer expectations, and runs work items through the discount,
/// profit, tax and fee pipeline.
#[derive(Debug, Parser)]
#[command(name = "paint-estimator", version)]
pub struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Catalog CSV replacing the built-in catalog.
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Step bundle CSV (bundle_id,label,step). Used with --catalog.
    #[arg(long, global = true, requires = "catalog")]
    pub bundles: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `paint_core=trace`. Overrides RUST_LOG.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Also append log output to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Suppress log output on the console.
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the SKU for a selection.
    Sku(SelectionArgs),

    /// Price a drywall repair.
    Estimate(SelectionArgs),

    /// Run work items through the discount, profit, tax and fee pipeline.
    Costs(CostsArgs),

    /// Apply customer expectations to a base cost.
    Expectations(ExpectationsArgs),

    /// Estimate paint and labor for surfaces, then run the cost pipeline.
    Paint(PaintArgs),

    /// List catalog entries per dimension.
    Catalog,
}

#[derive(Debug, Clone, Args)]
pub struct SelectionArgs {
    #[arg(long)]
    pub repair: Option<String>,
    #[arg(long)]
    pub size: Option<String>,
    #[arg(long)]
    pub orientation: Option<String>,
    #[arg(long)]
    pub access: Option<String>,
    #[arg(long)]
    pub finish: Option<String>,
    #[arg(long)]
    pub scope: Option<String>,
    #[arg(long)]
    pub protection: Option<String>,

    /// Modifier id; repeat for several.
    #[arg(long = "modifier", short = 'm')]
    pub modifiers: Vec<String>,

    /// Values below 1 count as 1.
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub quantity: i64,

    #[arg(long, default_value = "")]
    pub notes: String,
}

impl SelectionArgs {
    pub fn to_selection(&self) -> EstimateSelection {
        EstimateSelection {
            repair_type: self.repair.clone(),
            size: self.size.clone(),
            orientation: self.orientation.clone(),
            access: self.access.clone(),
            finish: self.finish.clone(),
            paint_scope: self.scope.clone(),
            protection: self.protection.clone(),
            modifiers: self.modifiers.iter().cloned().collect(),
            quantity: self.quantity,
            notes: self.notes.clone(),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct DiscountArgs {
    /// `percentage` or `amount`.
    #[arg(long, default_value = "percentage", value_parser = parse_discount_type)]
    pub discount_type: DiscountType,

    #[arg(
        long,
        default_value = "0",
        value_parser = parse_amount,
        allow_negative_numbers = true
    )]
    pub discount: Decimal,
}

impl DiscountArgs {
    pub fn to_discount(&self) -> DiscountConfig {
        DiscountConfig {
            discount_type: self.discount_type,
            value: self.discount,
            is_editing: false,
        }
    }
}

fn parse_discount_type(s: &str) -> Result<DiscountType, String> {
    DiscountType::parse(s).ok_or_else(|| format!("expected 'percentage' or 'amount', got '{s}'"))
}

#[derive(Debug, Clone, Args)]
pub struct CostsArgs {
    /// Work item CSV (title,cost).
    #[arg(long)]
    pub items: Option<PathBuf>,

    /// Work item as `title=cost`; repeat for several.
    #[arg(long = "item", value_parser = parse_work_item)]
    pub extra_items: Vec<WorkItem>,

    /// Also add the estimate for these selections as a work item.
    #[command(flatten)]
    pub selection: SelectionArgs,

    #[command(flatten)]
    pub discount: DiscountArgs,
}

#[derive(Debug, Clone, Args)]
pub struct ExpectationsArgs {
    /// Base cost. Defaults to the estimate total for the selection flags.
    #[arg(long, value_parser = parse_amount)]
    pub base: Option<Decimal>,

    /// Slider positions, counted from 0. Out of range picks the last option.
    #[arg(long, default_value_t = 1)]
    pub material: usize,
    #[arg(long, default_value_t = 1)]
    pub velocity: usize,
    #[arg(long, default_value_t = 1)]
    pub details: usize,
    #[arg(long, default_value_t = 0)]
    pub warranty: usize,

    #[arg(long, value_parser = parse_amount, requires = "budget_max")]
    pub budget_min: Option<Decimal>,
    #[arg(long, value_parser = parse_amount, requires = "budget_min")]
    pub budget_max: Option<Decimal>,

    #[command(flatten)]
    pub selection: SelectionArgs,
}

impl ExpectationsArgs {
    pub fn to_expectations(&self) -> Expectations {
        let budget = match (self.budget_min, self.budget_max) {
            (Some(min), Some(max)) => Some(BudgetRange { min, max }),
            _ => None,
        };
        Expectations {
            material_quality: self.material,
            velocity: self.velocity,
            project_details: self.details,
            workmanship_months: self.warranty,
            budget,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct PaintArgs {
    /// `interior` or `exterior`.
    #[arg(long, default_value = "interior", value_parser = parse_placement)]
    pub placement: Placement,

    /// Surface as `label=area[:coats]`; repeat for several.
    #[arg(long = "surface", value_parser = parse_surface, required = true)]
    pub surfaces: Vec<Surface>,

    /// Square feet per hour, overriding the placement default.
    #[arg(long, value_parser = parse_amount)]
    pub production_rate: Option<Decimal>,

    #[command(flatten)]
    pub discount: DiscountArgs,
}

fn parse_placement(s: &str) -> Result<Placement, String> {
    Placement::parse(s).ok_or_else(|| format!("expected 'interior' or 'exterior', got '{s}'"))
}
