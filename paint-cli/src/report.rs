//! Plain-text reports printed by the CLI.

use std::io::{self, Write};

use paint_core::calculations::common::format_usd;
use paint_core::calculations::{BudgetStatus, Expectations, PaintingResult, Slider};
use paint_core::{CostCalculation, Dimension, EstimateResult, PricingCatalog, WorkItem};
use rust_decimal::Decimal;

const LABEL_WIDTH: usize = 28;

fn money(amount: Decimal) -> String {
    format_usd(amount, 2)
}

pub fn write_sku(
    out: &mut impl Write,
    estimate: &EstimateResult,
) -> io::Result<()> {
    writeln!(out, "{}", estimate.sku)
}

/// Estimate breakdown. Estimate amounts are whole dollars.
pub fn write_estimate(
    out: &mut impl Write,
    estimate: &EstimateResult,
    catalog: &PricingCatalog,
) -> io::Result<()> {
    writeln!(out, "SKU: {}", estimate.sku)?;
    if estimate.required_missing {
        writeln!(out, "(preview: required selections missing)")?;
    }
    writeln!(out)?;

    for item in &estimate.items {
        writeln!(
            out,
            "{:<LABEL_WIDTH$} {:>12}",
            item.title,
            format_usd(item.amount, 0)
        )?;
        if !item.description.is_empty() {
            writeln!(out, "    {}", item.description)?;
        }
    }
    writeln!(out)?;
    writeln!(out, "{:<LABEL_WIDTH$} {:>12}", "Subtotal", format_usd(estimate.subtotal, 0))?;
    writeln!(out, "{:<LABEL_WIDTH$} {:>12}", "Tax", format_usd(estimate.tax, 0))?;
    writeln!(out, "{:<LABEL_WIDTH$} {:>12}", "Total", format_usd(estimate.total, 0))?;

    if let Some(bundle) = catalog.bundle(&estimate.bundle_id) {
        writeln!(out)?;
        writeln!(out, "Steps ({}: {}):", bundle.id, bundle.label)?;
        for (n, step) in bundle.steps.iter().enumerate() {
            writeln!(out, "  {}. {step}", n + 1)?;
        }
    }
    Ok(())
}

pub fn write_costs(
    out: &mut impl Write,
    items: &[WorkItem],
    costs: &CostCalculation,
) -> io::Result<()> {
    for item in items {
        writeln!(out, "{:<LABEL_WIDTH$} {:>14}", item.title, money(item.cost))?;
    }
    if !items.is_empty() {
        writeln!(out)?;
    }

    let rows = [
        ("Subtotal", costs.subtotal),
        ("Discount", -costs.discount_amount),
        ("Total after discount", costs.total_after_discount),
        ("Profit", costs.profit_amount),
        ("Total with profit", costs.total_with_profit),
        ("Taxes", costs.taxes_to_pay),
        ("Payment system fee", costs.payment_system_fee),
        ("Company fees", costs.company_fees_total),
        ("Total", costs.total_with_taxes),
    ];
    for (label, amount) in rows {
        writeln!(out, "{label:<LABEL_WIDTH$} {:>14}", money(amount))?;
    }
    Ok(())
}

pub fn write_expectations(
    out: &mut impl Write,
    expectations: &Expectations,
    base: Decimal,
    adjusted: Decimal,
    status: BudgetStatus,
) -> io::Result<()> {
    writeln!(out, "{:<LABEL_WIDTH$} {:>14}", "Base cost", money(base))?;
    for slider in Slider::ALL {
        let option = expectations.selected(slider);
        writeln!(
            out,
            "{:<LABEL_WIDTH$} {:>14}",
            format!("{}: {}", slider.label(), option.label),
            format!("x{}", option.multiplier)
        )?;
    }
    writeln!(out, "{:<LABEL_WIDTH$} {:>14}", "Adjusted cost", money(adjusted))?;

    match (status, expectations.budget) {
        (BudgetStatus::NotSet, _) | (_, None) => {}
        (status, Some(budget)) => {
            let verdict = match status {
                BudgetStatus::Below => "below budget",
                BudgetStatus::Above => "above budget",
                _ => "within budget",
            };
            writeln!(
                out,
                "Budget {} to {}: {verdict}",
                money(budget.min),
                money(budget.max)
            )?;
        }
    }
    Ok(())
}

pub fn write_painting(
    out: &mut impl Write,
    result: &PaintingResult,
) -> io::Result<()> {
    writeln!(out, "Placement: {}", result.placement.as_str())?;
    writeln!(out, "Painted area: {} sq ft", result.painted_area)?;
    writeln!(out, "Paint: {} gal, {}", result.gallons, money(result.material_cost))?;
    writeln!(out, "Labor: {} h, {}", result.labor_hours, money(result.labor_cost))?;
    writeln!(out, "Painting total: {}", money(result.total))
}

/// Lists every table in SKU order, modifiers last.
pub fn write_catalog(
    out: &mut impl Write,
    catalog: &PricingCatalog,
) -> io::Result<()> {
    for dimension in Dimension::ALL {
        let table = catalog.table(dimension);
        writeln!(out, "{} ({})", dimension.label(), table.len())?;
        for entry in table.entries() {
            let mut detail = Vec::new();
            if entry.multiplier != Decimal::ONE {
                detail.push(format!("x{}", entry.multiplier));
            }
            if !entry.amount.is_zero() {
                detail.push(format_usd(entry.amount, 0));
            }
            if let Some(bundle) = &entry.bundle {
                detail.push(bundle.clone());
            }
            writeln!(out, "  {:<4} {:<28} {}", entry.id, entry.label, detail.join(" "))?;
        }
    }
    writeln!(
        out,
        "Tax rate {}, fallback bundle {}",
        catalog.tax_rate(),
        catalog.fallback_bundle()
    )
}
