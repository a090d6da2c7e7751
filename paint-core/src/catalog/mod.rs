//! Immutable catalog tables keyed by id.
//!
//! A [`PricingCatalog`] is built once (from the built-in reference data or a
//! loaded CSV) and never mutated afterwards. Every calculator borrows it.

mod reference;

use std::collections::HashMap;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{CatalogEntry, Dimension, StepBundle};

pub use reference::{FALLBACK_BUNDLE_ID, REFERENCE_TAX_RATE, reference_catalog};

/// Errors raised while assembling catalog tables.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("empty id in {0} table")]
    EmptyId(Dimension),

    #[error("duplicate id '{id}' in {dimension} table")]
    DuplicateId { dimension: Dimension, id: String },

    #[error("negative multiplier {multiplier} for '{id}' in {dimension} table")]
    NegativeMultiplier {
        dimension: Dimension,
        id: String,
        multiplier: Decimal,
    },

    #[error("negative amount {amount} for '{id}' in {dimension} table")]
    NegativeAmount {
        dimension: Dimension,
        id: String,
        amount: Decimal,
    },

    #[error("{0} table supplied more than once")]
    DuplicateTable(Dimension),

    #[error("duplicate step bundle '{0}'")]
    DuplicateBundle(String),

    #[error("paint scope '{scope}' references unknown step bundle '{bundle}'")]
    UnknownBundle { scope: String, bundle: String },

    #[error("fallback step bundle '{0}' is not in the bundle table")]
    UnknownFallbackBundle(String),

    #[error("tax rate must be between 0 and 1, got {0}")]
    InvalidTaxRate(Decimal),
}

/// All entries of one dimension, in catalog order, with an id index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogTable {
    dimension: Dimension,
    entries: Vec<CatalogEntry>,
    index: HashMap<String, usize>,
}

impl CatalogTable {
    /// Builds a table, rejecting empty or duplicate ids and negative
    /// multipliers or amounts. Ids are stored trimmed.
    pub fn new(
        dimension: Dimension,
        mut entries: Vec<CatalogEntry>,
    ) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(entries.len());

        for (position, entry) in entries.iter_mut().enumerate() {
            if entry.id.trim().len() != entry.id.len() {
                entry.id = entry.id.trim().to_string();
            }
            if entry.id.is_empty() {
                return Err(CatalogError::EmptyId(dimension));
            }
            if entry.multiplier < Decimal::ZERO {
                return Err(CatalogError::NegativeMultiplier {
                    dimension,
                    id: entry.id.clone(),
                    multiplier: entry.multiplier,
                });
            }
            if entry.amount < Decimal::ZERO {
                return Err(CatalogError::NegativeAmount {
                    dimension,
                    id: entry.id.clone(),
                    amount: entry.amount,
                });
            }
            if index.insert(entry.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateId {
                    dimension,
                    id: entry.id.clone(),
                });
            }
        }

        Ok(Self {
            dimension,
            entries,
            index,
        })
    }

    pub fn empty(dimension: Dimension) -> Self {
        Self {
            dimension,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(
        &self,
        id: &str,
    ) -> Option<&CatalogEntry> {
        self.index.get(id).map(|&position| &self.entries[position])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The full set of catalog tables plus estimate-wide settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingCatalog {
    tables: HashMap<Dimension, CatalogTable>,
    bundles: HashMap<String, StepBundle>,
    tax_rate: Decimal,
    fallback_bundle: String,
}

impl PricingCatalog {
    /// Assembles a catalog. Dimensions without a table get an empty one.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if a dimension is supplied twice, a bundle id
    /// repeats, a paint scope or the fallback references a bundle that is not
    /// supplied, or the tax rate is outside `[0, 1]`.
    pub fn new(
        tables: Vec<CatalogTable>,
        bundles: Vec<StepBundle>,
        tax_rate: Decimal,
        fallback_bundle: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        let mut by_dimension = HashMap::with_capacity(Dimension::ALL.len());
        for table in tables {
            let dimension = table.dimension();
            if by_dimension.insert(dimension, table).is_some() {
                return Err(CatalogError::DuplicateTable(dimension));
            }
        }
        for dimension in Dimension::ALL {
            by_dimension
                .entry(dimension)
                .or_insert_with(|| CatalogTable::empty(dimension));
        }

        let mut by_id = HashMap::with_capacity(bundles.len());
        for bundle in bundles {
            let id = bundle.id.clone();
            if by_id.insert(id.clone(), bundle).is_some() {
                return Err(CatalogError::DuplicateBundle(id));
            }
        }

        // Only checked when bundles are supplied at all; a catalog without a
        // bundle table still resolves bundle ids for display.
        if !by_id.is_empty() {
            for scope in by_dimension[&Dimension::PaintScope].entries() {
                if let Some(bundle) = &scope.bundle {
                    if !by_id.contains_key(bundle) {
                        return Err(CatalogError::UnknownBundle {
                            scope: scope.id.clone(),
                            bundle: bundle.clone(),
                        });
                    }
                }
            }
        }

        let catalog = Self {
            tables: by_dimension,
            bundles: by_id,
            tax_rate: Decimal::ZERO,
            fallback_bundle: String::new(),
        };
        catalog
            .with_fallback_bundle(fallback_bundle)?
            .with_tax_rate(tax_rate)
    }

    /// Returns a copy of this catalog using a different estimate tax rate.
    pub fn with_tax_rate(
        mut self,
        tax_rate: Decimal,
    ) -> Result<Self, CatalogError> {
        if tax_rate < Decimal::ZERO || tax_rate > Decimal::ONE {
            return Err(CatalogError::InvalidTaxRate(tax_rate));
        }
        self.tax_rate = tax_rate;
        Ok(self)
    }

    /// Returns a copy of this catalog using a different fallback bundle.
    /// The id must name a supplied bundle unless the catalog has none.
    pub fn with_fallback_bundle(
        mut self,
        fallback_bundle: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        let fallback_bundle = fallback_bundle.into();
        if !self.bundles.is_empty() && !self.bundles.contains_key(&fallback_bundle) {
            return Err(CatalogError::UnknownFallbackBundle(fallback_bundle));
        }
        self.fallback_bundle = fallback_bundle;
        Ok(self)
    }

    pub fn table(
        &self,
        dimension: Dimension,
    ) -> &CatalogTable {
        // Every dimension is populated in `new`.
        &self.tables[&dimension]
    }

    /// Looks up a selected id. `None` ids and unknown ids both yield `None`.
    pub fn lookup(
        &self,
        dimension: Dimension,
        id: Option<&str>,
    ) -> Option<&CatalogEntry> {
        id.and_then(|id| self.table(dimension).get(id))
    }

    pub fn bundle(
        &self,
        id: &str,
    ) -> Option<&StepBundle> {
        self.bundles.get(id)
    }

    /// Step bundles sorted by id.
    pub fn bundles(&self) -> Vec<&StepBundle> {
        let mut bundles: Vec<_> = self.bundles.values().collect();
        bundles.sort_unstable_by(|a, b| a.id.cmp(&b.id));
        bundles
    }

    pub fn tax_rate(&self) -> Decimal {
        self.tax_rate
    }

    pub fn fallback_bundle(&self) -> &str {
        &self.fallback_bundle
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn sizes() -> Vec<CatalogEntry> {
        vec![
            CatalogEntry::new("S1", "Small").with_amount(dec!(500)),
            CatalogEntry::new("S2", "Medium").with_amount(dec!(750)),
        ]
    }

    // =========================================================================
    // CatalogTable tests
    // =========================================================================

    #[test]
    fn table_looks_up_by_id() {
        let table = CatalogTable::new(Dimension::Size, sizes()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("S2").map(|e| e.amount), Some(dec!(750)));
        assert_eq!(table.get("S9"), None);
    }

    #[test]
    fn table_preserves_catalog_order() {
        let table = CatalogTable::new(Dimension::Size, sizes()).unwrap();

        let ids: Vec<&str> = table.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["S1", "S2"]);
    }

    #[test]
    fn table_rejects_duplicate_ids() {
        let mut entries = sizes();
        entries.push(CatalogEntry::new("S1", "Again"));

        let result = CatalogTable::new(Dimension::Size, entries);

        assert_eq!(
            result,
            Err(CatalogError::DuplicateId {
                dimension: Dimension::Size,
                id: "S1".to_string(),
            })
        );
    }

    #[test]
    fn table_rejects_negative_multiplier() {
        let entries = vec![CatalogEntry::new("O2", "Ceiling").with_multiplier(dec!(-1.25))];

        let result = CatalogTable::new(Dimension::Orientation, entries);

        assert_eq!(
            result,
            Err(CatalogError::NegativeMultiplier {
                dimension: Dimension::Orientation,
                id: "O2".to_string(),
                multiplier: dec!(-1.25),
            })
        );
    }

    #[test]
    fn table_accepts_zero_multiplier() {
        let entries = vec![CatalogEntry::new("A0", "Waived").with_multiplier(dec!(0))];

        assert!(CatalogTable::new(Dimension::Access, entries).is_ok());
    }

    #[test]
    fn table_trims_ids_before_indexing() {
        let entries = vec![CatalogEntry::new(" S1 ", "Small").with_amount(dec!(500))];

        let table = CatalogTable::new(Dimension::Size, entries).unwrap();

        assert_eq!(table.get("S1").map(|e| e.id.as_str()), Some("S1"));
        assert_eq!(table.get(" S1 "), None);
    }

    #[test]
    fn table_rejects_ids_equal_after_trimming() {
        let entries = vec![CatalogEntry::new("S1", "Small"), CatalogEntry::new(" S1", "Again")];

        let result = CatalogTable::new(Dimension::Size, entries);

        assert_eq!(
            result,
            Err(CatalogError::DuplicateId {
                dimension: Dimension::Size,
                id: "S1".to_string(),
            })
        );
    }

    #[test]
    fn table_rejects_empty_id() {
        let entries = vec![CatalogEntry::new(" ", "Blank")];

        let result = CatalogTable::new(Dimension::Finish, entries);

        assert_eq!(result, Err(CatalogError::EmptyId(Dimension::Finish)));
    }

    // =========================================================================
    // PricingCatalog tests
    // =========================================================================

    #[test]
    fn catalog_fills_missing_tables_with_empty_ones() {
        let table = CatalogTable::new(Dimension::Size, sizes()).unwrap();

        let catalog = PricingCatalog::new(vec![table], vec![], dec!(0.0825), "B0").unwrap();

        assert_eq!(catalog.table(Dimension::Size).len(), 2);
        assert!(catalog.table(Dimension::Modifier).is_empty());
    }

    #[test]
    fn catalog_rejects_duplicate_tables() {
        let a = CatalogTable::new(Dimension::Size, sizes()).unwrap();
        let b = CatalogTable::new(Dimension::Size, sizes()).unwrap();

        let result = PricingCatalog::new(vec![a, b], vec![], dec!(0.0825), "B0");

        assert_eq!(result, Err(CatalogError::DuplicateTable(Dimension::Size)));
    }

    #[test]
    fn catalog_rejects_unknown_bundle_reference() {
        let scopes = CatalogTable::new(
            Dimension::PaintScope,
            vec![CatalogEntry::new("P1", "Prime only").with_bundle("B9")],
        )
        .unwrap();
        let bundles = vec![StepBundle {
            id: "B0".to_string(),
            label: "Patch only".to_string(),
            steps: vec![],
        }];

        let result = PricingCatalog::new(vec![scopes], bundles, dec!(0.0825), "B0");

        assert_eq!(
            result,
            Err(CatalogError::UnknownBundle {
                scope: "P1".to_string(),
                bundle: "B9".to_string(),
            })
        );
    }

    #[test]
    fn catalog_rejects_unknown_fallback_bundle() {
        let bundles = vec![StepBundle {
            id: "B0".to_string(),
            label: "Patch only".to_string(),
            steps: vec![],
        }];

        let result = PricingCatalog::new(vec![], bundles, dec!(0.0825), "B9");

        assert_eq!(
            result,
            Err(CatalogError::UnknownFallbackBundle("B9".to_string()))
        );
    }

    #[test]
    fn fallback_bundle_is_unchecked_without_bundles() {
        let catalog = PricingCatalog::new(vec![], vec![], dec!(0.0825), "B9").unwrap();

        assert_eq!(catalog.fallback_bundle(), "B9");
    }

    #[test]
    fn replacing_fallback_bundle_is_checked() {
        let catalog = reference_catalog().clone();

        assert_eq!(
            catalog.clone().with_fallback_bundle("B2").map(|c| c.fallback_bundle().to_string()),
            Ok("B2".to_string())
        );
        assert_eq!(
            catalog.with_fallback_bundle("B9"),
            Err(CatalogError::UnknownFallbackBundle("B9".to_string()))
        );
    }

    #[test]
    fn catalog_rejects_tax_rate_above_one() {
        let result = PricingCatalog::new(vec![], vec![], dec!(8.25), "B0");

        assert_eq!(result, Err(CatalogError::InvalidTaxRate(dec!(8.25))));
    }

    #[test]
    fn lookup_treats_none_and_unknown_alike() {
        let table = CatalogTable::new(Dimension::Size, sizes()).unwrap();
        let catalog = PricingCatalog::new(vec![table], vec![], dec!(0.0825), "B0").unwrap();

        assert_eq!(catalog.lookup(Dimension::Size, None), None);
        assert_eq!(catalog.lookup(Dimension::Size, Some("S7")), None);
        assert!(catalog.lookup(Dimension::Size, Some("S1")).is_some());
    }
}
