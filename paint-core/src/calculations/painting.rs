//! Area-based interior and exterior painting estimates.
//!
//! Painted area is the sum of each surface's area times its coats. Paint is
//! bought in whole gallons; labor hours follow from a production rate in
//! square feet per hour.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use paint_core::calculations::{
//!     PaintingCalculator, PaintingJob, PaintingRates, Placement, Surface,
//! };
//!
//! let job = PaintingJob::new(Placement::Interior)
//!     .with_surface(Surface::new("Living room walls", dec!(420), 2))
//!     .with_surface(Surface::new("Ceiling", dec!(180), 1));
//!
//! let result = PaintingCalculator::new(PaintingRates::default())
//!     .calculate(&job)
//!     .unwrap();
//!
//! assert_eq!(result.painted_area, dec!(1020));
//! assert_eq!(result.gallons, 3);
//! assert_eq!(result.labor_hours, dec!(6.80));
//! ```

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::{round_half_up, saturating_sum};
use crate::models::WorkItem;

/// Errors that can occur during painting calculations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaintingError {
    #[error("coverage must be positive, got {0} sq ft per gallon")]
    InvalidCoverage(Decimal),

    #[error("production rate must be positive, got {0} sq ft per hour")]
    InvalidProductionRate(Decimal),

    #[error("surface '{label}' has negative area {area}")]
    NegativeArea { label: String, area: Decimal },

    #[error("gallon count {0} is too large")]
    GallonOverflow(Decimal),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    #[default]
    Interior,
    Exterior,
}

impl Placement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Interior => "interior",
            Self::Exterior => "exterior",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "interior" => Some(Self::Interior),
            "exterior" => Some(Self::Exterior),
            _ => None,
        }
    }

    /// Typical crew production rate in square feet per hour.
    pub fn default_production_rate(&self) -> Decimal {
        match self {
            Self::Interior => dec!(150),
            Self::Exterior => dec!(110),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Surface {
    pub label: String,
    pub area_sq_ft: Decimal,
    pub coats: u32,
}

impl Surface {
    pub fn new(
        label: impl Into<String>,
        area_sq_ft: Decimal,
        coats: u32,
    ) -> Self {
        Self {
            label: label.into(),
            area_sq_ft,
            coats,
        }
    }

    pub fn painted_area(&self) -> Decimal {
        self.area_sq_ft.saturating_mul(Decimal::from(self.coats))
    }
}

/// Material and labor rates for painting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaintingRates {
    pub coverage_sq_ft_per_gallon: Decimal,
    pub gallon_price: Decimal,
    pub hourly_rate: Decimal,
}

impl Default for PaintingRates {
    fn default() -> Self {
        Self {
            coverage_sq_ft_per_gallon: dec!(350),
            gallon_price: dec!(45.00),
            hourly_rate: dec!(55.00),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PaintingJob {
    pub placement: Placement,
    pub surfaces: Vec<Surface>,
    /// Overrides the placement's default production rate.
    pub production_rate: Option<Decimal>,
}

impl PaintingJob {
    pub fn new(placement: Placement) -> Self {
        Self {
            placement,
            surfaces: Vec::new(),
            production_rate: None,
        }
    }

    pub fn with_surface(
        mut self,
        surface: Surface,
    ) -> Self {
        self.surfaces.push(surface);
        self
    }

    pub fn with_production_rate(
        mut self,
        rate: Decimal,
    ) -> Self {
        self.production_rate = Some(rate);
        self
    }

    pub fn production_rate(&self) -> Decimal {
        self.production_rate
            .unwrap_or_else(|| self.placement.default_production_rate())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaintingResult {
    pub placement: Placement,
    pub painted_area: Decimal,
    pub gallons: u32,
    pub material_cost: Decimal,
    pub labor_hours: Decimal,
    pub labor_cost: Decimal,
    pub total: Decimal,
}

impl PaintingResult {
    /// Materials and labor as work items for the cost pipeline.
    pub fn work_items(&self) -> Vec<WorkItem> {
        let placement = self.placement.as_str();
        vec![
            WorkItem::new(
                format!("Paint, {placement} ({} gal)", self.gallons),
                self.material_cost,
            ),
            WorkItem::new(
                format!("Labor, {placement} ({} h)", self.labor_hours),
                self.labor_cost,
            ),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct PaintingCalculator {
    rates: PaintingRates,
}

impl PaintingCalculator {
    pub fn new(rates: PaintingRates) -> Self {
        Self { rates }
    }

    /// Calculates materials, labor and total for a job.
    ///
    /// # Errors
    ///
    /// Returns [`PaintingError`] if coverage or the production rate is not
    /// positive, a surface has a negative area, or the job needs more gallons
    /// than fit in a `u32`.
    pub fn calculate(
        &self,
        job: &PaintingJob,
    ) -> Result<PaintingResult, PaintingError> {
        let coverage = self.rates.coverage_sq_ft_per_gallon;
        if coverage <= Decimal::ZERO {
            return Err(PaintingError::InvalidCoverage(coverage));
        }
        let production_rate = job.production_rate();
        if production_rate <= Decimal::ZERO {
            return Err(PaintingError::InvalidProductionRate(production_rate));
        }
        if let Some(surface) = job.surfaces.iter().find(|s| s.area_sq_ft < Decimal::ZERO) {
            return Err(PaintingError::NegativeArea {
                label: surface.label.clone(),
                area: surface.area_sq_ft,
            });
        }

        let painted_area = saturating_sum(job.surfaces.iter().map(Surface::painted_area));

        let gallons_exact = painted_area
            .checked_div(coverage)
            .map_or(Decimal::MAX, |gallons| gallons.ceil());
        let gallons = gallons_exact
            .to_u32()
            .ok_or(PaintingError::GallonOverflow(gallons_exact))?;
        let material_cost =
            round_half_up(Decimal::from(gallons).saturating_mul(self.rates.gallon_price));

        let labor_hours = round_half_up(
            painted_area
                .checked_div(production_rate)
                .unwrap_or(Decimal::MAX),
        );
        let labor_cost = round_half_up(labor_hours.saturating_mul(self.rates.hourly_rate));

        Ok(PaintingResult {
            placement: job.placement,
            painted_area,
            gallons,
            material_cost,
            labor_hours,
            labor_cost,
            total: material_cost.saturating_add(labor_cost),
        })
    }
}

/// Observed production on past jobs, used to calibrate production rates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionLog {
    entries: Vec<ProductionEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionEntry {
    pub area_sq_ft: Decimal,
    pub hours: Decimal,
}

impl ProductionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a completed stretch of work. Negative values are ignored.
    pub fn record(
        &mut self,
        area_sq_ft: Decimal,
        hours: Decimal,
    ) {
        if area_sq_ft < Decimal::ZERO || hours < Decimal::ZERO {
            tracing::warn!(%area_sq_ft, %hours, "ignoring negative production entry");
            return;
        }
        self.entries.push(ProductionEntry { area_sq_ft, hours });
    }

    pub fn entries(&self) -> &[ProductionEntry] {
        &self.entries
    }

    pub fn total_area(&self) -> Decimal {
        saturating_sum(self.entries.iter().map(|e| e.area_sq_ft))
    }

    pub fn total_hours(&self) -> Decimal {
        saturating_sum(self.entries.iter().map(|e| e.hours))
    }

    /// Square feet per hour across every entry, or `None` with no hours logged
    /// or a rate too large to represent.
    pub fn observed_rate(&self) -> Option<Decimal> {
        let hours = self.total_hours();
        if hours.is_zero() {
            None
        } else {
            self.total_area().checked_div(hours).map(round_half_up)
        }
    }
}
