use std::collections::HashMap;
use std::io::Read;

use paint_core::{
    CatalogEntry, CatalogError, CatalogTable, Dimension, PricingCatalog, StepBundle,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading catalog data.
#[derive(Debug, Error)]
pub enum CatalogLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("unknown dimension '{value}' on row {row}")]
    UnknownDimension { value: String, row: usize },

    #[error("invalid catalog: {0}")]
    Catalog(#[from] CatalogError),
}

impl From<csv::Error> for CatalogLoaderError {
    fn from(err: csv::Error) -> Self {
        CatalogLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from the catalog CSV file.
///
/// - `dimension`: one of `repair_type`, `size`, `orientation`, `access`,
///   `finish`, `paint_scope`, `protection`, `modifier`
/// - `id`: short code, unique within the dimension (e.g. `S1`)
/// - `label`: display name
/// - `multiplier`: cost factor (empty for 1.0)
/// - `amount`: base cost, repair adder or flat modifier amount (empty for 0)
/// - `bundle`: step bundle id, paint scopes only (empty for none)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CatalogRecord {
    pub dimension: String,
    pub id: String,
    pub label: String,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub multiplier: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub amount: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub bundle: Option<String>,
}

/// A single step row from the bundle CSV file. Rows sharing a `bundle_id`
/// form one bundle, with steps in file order.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BundleStepRecord {
    pub bundle_id: String,
    pub label: String,
    pub step: String,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
}

/// Loader for catalog tables and step bundles from CSV files.
///
/// Parsing and building are separate so callers can inspect records before
/// committing to a catalog.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Parse catalog records from a CSV reader.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<CatalogRecord>, CatalogLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: CatalogRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Parse step bundle rows from a CSV reader.
    pub fn parse_bundles<R: Read>(
        reader: R
    ) -> Result<Vec<BundleStepRecord>, CatalogLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BundleStepRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Group bundle rows into bundles, keeping first-appearance order.
    /// The label of the first row of each bundle wins.
    pub fn group_bundles(records: &[BundleStepRecord]) -> Vec<StepBundle> {
        let mut bundles: Vec<StepBundle> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for record in records {
            let position = *positions.entry(record.bundle_id.as_str()).or_insert_with(|| {
                bundles.push(StepBundle {
                    id: record.bundle_id.clone(),
                    label: record.label.clone(),
                    steps: Vec::new(),
                });
                bundles.len() - 1
            });
            bundles[position].steps.push(record.step.clone());
        }

        bundles
    }

    /// Build a validated catalog from parsed records.
    ///
    /// Entries keep their file order within each dimension. Row numbers in
    /// errors are 1-based (header = row 0).
    pub fn build(
        records: &[CatalogRecord],
        bundles: Vec<StepBundle>,
        tax_rate: Decimal,
        fallback_bundle: &str,
    ) -> Result<PricingCatalog, CatalogLoaderError> {
        let mut grouped: HashMap<Dimension, Vec<CatalogEntry>> = HashMap::new();

        for (idx, record) in records.iter().enumerate() {
            let dimension = Dimension::parse(&record.dimension).ok_or_else(|| {
                CatalogLoaderError::UnknownDimension {
                    value: record.dimension.clone(),
                    row: idx + 1,
                }
            })?;

            let mut entry = CatalogEntry::new(record.id.clone(), record.label.clone());
            if let Some(multiplier) = record.multiplier {
                entry = entry.with_multiplier(multiplier);
            }
            if let Some(amount) = record.amount {
                entry = entry.with_amount(amount);
            }
            if let Some(bundle) = &record.bundle {
                entry = entry.with_bundle(bundle.clone());
            }
            grouped.entry(dimension).or_default().push(entry);
        }

        let mut tables = Vec::with_capacity(grouped.len());
        for dimension in Dimension::ALL {
            if let Some(entries) = grouped.remove(&dimension) {
                debug!(%dimension, count = entries.len(), "catalog table loaded");
                tables.push(CatalogTable::new(dimension, entries)?);
            }
        }

        Ok(PricingCatalog::new(
            tables,
            bundles,
            tax_rate,
            fallback_bundle,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const TEST_CSV: &str = r#"dimension,id,label,multiplier,amount,bundle
repair_type,T1,Nail pop,,0,
repair_type,T2,Hole patch,,50,
size,S1,Small,,500,
size,S2,Medium,,650,
orientation,O1,Wall,,,
orientation,O2,Ceiling,1.25,,
paint_scope,P0,No paint,,,B0
paint_scope,P1,Prime only,1.05,,B1
modifier,W1,Water damage,,150,
"#;

    const TEST_BUNDLES: &str = r#"bundle_id,label,step
B0,Patch only,Patch
B0,Patch only,Sand
B1,Patch and prime,Patch
B1,Patch and prime,Prime
"#;

    fn bundles() -> Vec<StepBundle> {
        let records = CatalogLoader::parse_bundles(TEST_BUNDLES.as_bytes()).unwrap();
        CatalogLoader::group_bundles(&records)
    }

    #[test]
    fn test_parse_csv_single_record() {
        let csv = "dimension,id,label,multiplier,amount,bundle\norientation,O2,Ceiling,1.25,,";

        let records = CatalogLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0],
            CatalogRecord {
                dimension: "orientation".to_string(),
                id: "O2".to_string(),
                label: "Ceiling".to_string(),
                multiplier: Some(dec!(1.25)),
                amount: None,
                bundle: None,
            }
        );
    }

    #[test]
    fn test_parse_csv_all_records() {
        let records = CatalogLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records.len(), 9);
        assert_eq!(records[6].bundle.as_deref(), Some("B0"));
    }

    #[test]
    fn test_parse_invalid_decimal() {
        let csv = "dimension,id,label,multiplier,amount,bundle\nsize,S1,Small,,abc,";

        let err = CatalogLoader::parse(csv.as_bytes()).expect_err("Should fail for bad decimal");

        let CatalogLoaderError::CsvParse(msg) = err else {
            panic!("Expected CsvParse error, got: {:?}", err);
        };
        assert!(msg.contains("S1") || msg.contains("invalid") || msg.contains("Invalid"), "{msg}");
    }

    #[test]
    fn test_parse_missing_column() {
        let csv = "dimension,id\nsize,S1";

        let err = CatalogLoader::parse(csv.as_bytes()).expect_err("Should fail for missing column");

        let CatalogLoaderError::CsvParse(msg) = err else {
            panic!("Expected CsvParse error, got: {:?}", err);
        };
        assert!(msg.contains("missing field"), "{msg}");
    }

    #[test]
    fn test_group_bundles_preserves_step_order() {
        let bundles = bundles();

        assert_eq!(bundles.len(), 2);
        assert_eq!(bundles[0].id, "B0");
        assert_eq!(bundles[0].steps, vec!["Patch", "Sand"]);
        assert_eq!(bundles[1].label, "Patch and prime");
    }

    #[test]
    fn test_build_catalog() {
        let records = CatalogLoader::parse(TEST_CSV.as_bytes()).unwrap();

        let catalog = CatalogLoader::build(&records, bundles(), dec!(0.0825), "B0")
            .expect("Should build catalog");

        assert_eq!(catalog.table(Dimension::Size).len(), 2);
        assert_eq!(
            catalog
                .lookup(Dimension::Orientation, Some("O1"))
                .map(|e| e.multiplier),
            Some(dec!(1))
        );
        assert_eq!(
            catalog
                .lookup(Dimension::PaintScope, Some("P1"))
                .and_then(|e| e.bundle.as_deref()),
            Some("B1")
        );
        assert!(catalog.table(Dimension::Access).is_empty());
    }

    #[test]
    fn test_build_rejects_unknown_dimension() {
        let csv = "dimension,id,label,multiplier,amount,bundle\nsize,S1,Small,,500,\ncolour,K1,Red,,,";
        let records = CatalogLoader::parse(csv.as_bytes()).unwrap();

        let result = CatalogLoader::build(&records, vec![], dec!(0.0825), "B0");

        match result {
            Err(CatalogLoaderError::UnknownDimension { value, row }) => {
                assert_eq!(value, "colour");
                assert_eq!(row, 2);
            }
            other => panic!("expected UnknownDimension, got {other:?}"),
        }
    }

    #[test]
    fn test_build_rejects_duplicate_id() {
        let csv = "dimension,id,label,multiplier,amount,bundle\nsize,S1,Small,,500,\nsize,S1,Again,,600,";
        let records = CatalogLoader::parse(csv.as_bytes()).unwrap();

        let result = CatalogLoader::build(&records, vec![], dec!(0.0825), "B0");

        match result {
            Err(CatalogLoaderError::Catalog(CatalogError::DuplicateId { dimension, id })) => {
                assert_eq!(dimension, Dimension::Size);
                assert_eq!(id, "S1");
            }
            other => panic!("expected DuplicateId, got {other:?}"),
        }
    }

    #[test]
    fn test_build_rejects_missing_bundle() {
        let records = CatalogLoader::parse(TEST_CSV.as_bytes()).unwrap();
        let only_b0 = vec![StepBundle {
            id: "B0".to_string(),
            label: "Patch only".to_string(),
            steps: vec![],
        }];

        let result = CatalogLoader::build(&records, only_b0, dec!(0.0825), "B0");

        assert!(matches!(
            result,
            Err(CatalogLoaderError::Catalog(CatalogError::UnknownBundle { .. }))
        ));
    }

    #[test]
    fn test_build_rejects_unknown_fallback_bundle() {
        let records = CatalogLoader::parse(TEST_CSV.as_bytes()).unwrap();

        let result = CatalogLoader::build(&records, bundles(), dec!(0.0825), "B9");

        match result {
            Err(CatalogLoaderError::Catalog(CatalogError::UnknownFallbackBundle(id))) => {
                assert_eq!(id, "B9");
            }
            other => panic!("expected UnknownFallbackBundle, got {other:?}"),
        }
    }
}
