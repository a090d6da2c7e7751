//! Value parsers for command line arguments.

use paint_core::WorkItem;
use paint_core::calculations::Surface;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseArgError {
    #[error("expected an amount, got nothing")]
    EmptyAmount,

    #[error("invalid amount '{input}': {source}")]
    Amount {
        input: String,
        #[source]
        source: rust_decimal::Error,
    },

    #[error("expected {expected}, got '{input}'")]
    Shape {
        input: String,
        expected: &'static str,
    },

    #[error("invalid coat count '{0}'")]
    Coats(String),
}

/// Parses a money or area amount as typed by a user.
///
/// Accepts a leading `$` and commas as thousands separators, so `"$1,234.56"`
/// and `"1234.56"` are the same value.
pub fn parse_amount(s: &str) -> Result<Decimal, ParseArgError> {
    let trimmed = s.trim();
    let digits: String = trimmed
        .strip_prefix('$')
        .unwrap_or(trimmed)
        .chars()
        .filter(|&c| c != ',')
        .collect();
    if digits.is_empty() {
        return Err(ParseArgError::EmptyAmount);
    }
    digits.parse().map_err(|source| {
        tracing::debug!(input = %s, "rejected amount");
        ParseArgError::Amount {
            input: s.to_string(),
            source,
        }
    })
}

/// Parses `title=cost` into a [`WorkItem`]. The title may itself contain `=`;
/// the last one separates the cost.
pub fn parse_work_item(s: &str) -> Result<WorkItem, ParseArgError> {
    let (title, cost) = s
        .rsplit_once('=')
        .filter(|(title, _)| !title.trim().is_empty())
        .ok_or_else(|| ParseArgError::Shape {
            input: s.to_string(),
            expected: "title=cost",
        })?;
    Ok(WorkItem::new(title.trim(), parse_amount(cost)?))
}

/// Parses `label=area[:coats]` into a [`Surface`]. Coats default to 1.
pub fn parse_surface(s: &str) -> Result<Surface, ParseArgError> {
    let (label, rest) = s
        .split_once('=')
        .filter(|(label, _)| !label.trim().is_empty())
        .ok_or_else(|| ParseArgError::Shape {
            input: s.to_string(),
            expected: "label=area[:coats]",
        })?;

    let (area, coats) = match rest.split_once(':') {
        Some((area, coats)) => {
            let coats = coats
                .trim()
                .parse::<u32>()
                .map_err(|_| ParseArgError::Coats(coats.trim().to_string()))?;
            (area, coats)
        }
        None => (rest, 1),
    };

    Ok(Surface::new(label.trim(), parse_amount(area)?, coats))
}
