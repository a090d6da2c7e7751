//! CSV loader for work item lists.
//!
//! ## CSV Format
//!
//! | Column  | Required | Type    | Notes                    |
//! |---------|----------|---------|--------------------------|
//! | `title` | yes      | string  | e.g. `Living room walls` |
//! | `cost`  | yes      | decimal | must not be negative     |
//!
//! ```csv
//! title,cost
//! Living room walls,1200.00
//! Trim and doors,450.00
//! ```

use std::path::Path;

use paint_core::WorkItem;
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct CsvRow {
    title: String,
    cost: Decimal,
}

/// Errors that can occur while loading work items.
#[derive(Debug, thiserror::Error)]
pub enum WorkItemLoaderError {
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("could not read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// `row` is 1-based (header = row 0).
    #[error("negative cost {cost} on row {row}")]
    NegativeCost { cost: Decimal, row: usize },
}

pub struct WorkItemLoader;

impl WorkItemLoader {
    /// Parse CSV text and return the work items in file order.
    pub fn load_from_str(input: &str) -> Result<Vec<WorkItem>, WorkItemLoaderError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(false)
            .from_reader(input.as_bytes());

        reader
            .deserialize::<CsvRow>()
            .enumerate()
            .map(|(idx, result)| {
                let row = result?;
                if row.cost < Decimal::ZERO {
                    return Err(WorkItemLoaderError::NegativeCost {
                        cost: row.cost,
                        row: idx + 1,
                    });
                }
                Ok(WorkItem::new(row.title, row.cost))
            })
            .collect()
    }

    /// Read a file from disk and delegate to [`WorkItemLoader::load_from_str`].
    pub fn load_from_file(path: &Path) -> Result<Vec<WorkItem>, WorkItemLoaderError> {
        let contents =
            std::fs::read_to_string(path).map_err(|source| WorkItemLoaderError::Io {
                path: path.display().to_string(),
                source,
            })?;
        Self::load_from_str(&contents)
    }
}
