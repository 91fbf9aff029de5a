//! Decoding a JSON batch into a stock panel.

use std::collections::BTreeSet;

use serde_json::{Map, Value};
use tasador_traits::field::{DATE_COLUMN, STOCK_ID_COLUMN};
use tasador_traits::{Field, StockPanel, StockPeriodRecord};
use tracing::{debug, warn};

use crate::Result;
use crate::error::SourceError;

/// Columns a non-empty batch must carry.
fn required_columns() -> impl Iterator<Item = &'static str> {
    [STOCK_ID_COLUMN, DATE_COLUMN]
        .into_iter()
        .chain(Field::BASE.into_iter().map(Field::wire_name))
}

/// Decode a JSON array of stock records.
///
/// Blank or malformed input is logged and yields an empty panel. The column
/// set of the batch is the union of keys across records; the identifier,
/// the date, and every base field must be among them. Fields used only by
/// the price stage are validated later, where they are consumed.
///
/// # Errors
///
/// Returns [`SourceError::MissingColumn`] if a required column is absent,
/// or [`SourceError::InvalidRecord`] if a record has a value of the wrong
/// type or an unparseable date.
pub fn parse_records(text: &str) -> Result<StockPanel> {
    let text = text.trim();
    if text.is_empty() {
        warn!("input is empty, continuing with an empty batch");
        return Ok(StockPanel::default());
    }

    let objects: Vec<Map<String, Value>> = match serde_json::from_str(text) {
        Ok(objects) => objects,
        Err(e) => {
            warn!(error = %e, "input is not a JSON array of records, continuing with an empty batch");
            return Ok(StockPanel::default());
        }
    };

    if objects.is_empty() {
        return Ok(StockPanel::default());
    }

    let columns: BTreeSet<String> = objects.iter().flat_map(|o| o.keys().cloned()).collect();
    let missing: Vec<&str> = required_columns()
        .filter(|name| !columns.contains(*name))
        .collect();
    if !missing.is_empty() {
        return Err(SourceError::MissingColumn(missing.join(", ")));
    }

    let records = objects
        .into_iter()
        .enumerate()
        .map(|(index, object)| {
            serde_json::from_value::<StockPeriodRecord>(Value::Object(object))
                .map_err(|source| SourceError::InvalidRecord { index, source })
        })
        .collect::<Result<Vec<_>>>()?;

    let panel = StockPanel::new(records, columns);
    debug!(records = panel.len(), stocks = panel.n_stocks(), "decoded stock panel");
    Ok(panel)
}
