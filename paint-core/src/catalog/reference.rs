//! Built-in drywall repair catalog.

use std::sync::OnceLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{CatalogError, CatalogTable, PricingCatalog};
use crate::models::{CatalogEntry, Dimension, StepBundle};

/// Flat estimate tax rate. A placeholder, not a jurisdictional rate.
pub const REFERENCE_TAX_RATE: Decimal = dec!(0.0825);

/// Bundle used when no paint scope is selected.
pub const FALLBACK_BUNDLE_ID: &str = "B0";

static REFERENCE: OnceLock<PricingCatalog> = OnceLock::new();

/// The built-in catalog, built on first use and shared read-only afterwards.
pub fn reference_catalog() -> &'static PricingCatalog {
    REFERENCE.get_or_init(|| build().expect("built-in catalog tables are valid"))
}

fn entry(
    id: &str,
    label: &str,
) -> CatalogEntry {
    CatalogEntry::new(id, label)
}

fn build() -> Result<PricingCatalog, CatalogError> {
    let repair_types = CatalogTable::new(
        Dimension::RepairType,
        vec![
            entry("T1", "Nail pop / ding").with_amount(dec!(0)),
            entry("T2", "Hole patch").with_amount(dec!(50)),
            entry("T3", "Crack repair").with_amount(dec!(35)),
            entry("T4", "Corner bead repair").with_amount(dec!(75)),
            entry("T5", "Water-damaged section").with_amount(dec!(120)),
        ],
    )?;

    let sizes = CatalogTable::new(
        Dimension::Size,
        vec![
            entry("S1", "Small (up to 6 in)").with_amount(dec!(500)),
            entry("S2", "Medium (6-12 in)").with_amount(dec!(650)),
            entry("S3", "Large (1-2 ft)").with_amount(dec!(850)),
            entry("S4", "Extra large (2-4 ft)").with_amount(dec!(1200)),
            entry("S5", "Full sheet").with_amount(dec!(1600)),
        ],
    )?;

    let orientations = CatalogTable::new(
        Dimension::Orientation,
        vec![
            entry("O1", "Wall"),
            entry("O2", "Ceiling").with_multiplier(dec!(1.25)),
            entry("O3", "Stairwell wall").with_multiplier(dec!(1.15)),
        ],
    )?;

    let access = CatalogTable::new(
        Dimension::Access,
        vec![
            entry("A1", "Open access"),
            entry("A2", "Furnished room").with_multiplier(dec!(1.10)),
            entry("A3", "Ladder required").with_multiplier(dec!(1.15)),
            entry("A4", "Scaffold required").with_multiplier(dec!(1.35)),
        ],
    )?;

    let finishes = CatalogTable::new(
        Dimension::Finish,
        vec![
            entry("F1", "Smooth (level 4)"),
            entry("F2", "Level 5 skim coat").with_multiplier(dec!(1.20)),
            entry("F3", "Orange peel").with_multiplier(dec!(1.05)),
            entry("F4", "Knockdown").with_multiplier(dec!(1.10)),
            entry("F5", "Popcorn").with_multiplier(dec!(1.25)),
        ],
    )?;

    let paint_scopes = CatalogTable::new(
        Dimension::PaintScope,
        vec![
            entry("P0", "No paint").with_bundle("B0"),
            entry("P1", "Prime only")
                .with_multiplier(dec!(1.05))
                .with_bundle("B1"),
            entry("P2", "Prime + spot paint")
                .with_multiplier(dec!(1.15))
                .with_bundle("B2"),
            entry("P3", "Prime + full wall")
                .with_multiplier(dec!(1.40))
                .with_bundle("B3"),
        ],
    )?;

    let protection = CatalogTable::new(
        Dimension::Protection,
        vec![
            entry("C1", "Standard drop cloths"),
            entry("C2", "Floor and furniture cover").with_multiplier(dec!(1.05)),
            entry("C3", "Dust containment").with_multiplier(dec!(1.15)),
        ],
    )?;

    let modifiers = CatalogTable::new(
        Dimension::Modifier,
        vec![
            entry("W1", "Water damage remediation").with_amount(dec!(150)),
            entry("W2", "High ceiling (over 10 ft)").with_amount(dec!(85)),
            entry("W3", "Mold-resistant board").with_amount(dec!(60)),
            entry("W4", "Texture match sample").with_amount(dec!(40)),
            entry("W5", "After-hours work").with_amount(dec!(120)),
        ],
    )?;

    PricingCatalog::new(
        vec![
            repair_types,
            sizes,
            orientations,
            access,
            finishes,
            paint_scopes,
            protection,
            modifiers,
        ],
        step_bundles(),
        REFERENCE_TAX_RATE,
        FALLBACK_BUNDLE_ID,
    )
}

fn step_bundles() -> Vec<StepBundle> {
    let patch = [
        "Protect work area",
        "Cut out and patch damage",
        "Tape and apply joint compound",
        "Sand smooth",
    ];
    let bundle = |id: &str, label: &str, extra: &[&str]| StepBundle {
        id: id.to_string(),
        label: label.to_string(),
        steps: patch
            .iter()
            .chain(extra)
            .chain(["Clean up"].iter())
            .map(|s| s.to_string())
            .collect(),
    };

    vec![
        bundle("B0", "Patch only", &[]),
        bundle("B1", "Patch and prime", &["Prime patched area"]),
        bundle(
            "B2",
            "Patch, prime and spot paint",
            &["Prime patched area", "Spot paint to match"],
        ),
        bundle(
            "B3",
            "Patch, prime and repaint wall",
            &["Prime patched area", "Repaint full wall corner to corner"],
        ),
    ]
}
