//! Data loading utilities for the Tasador CLI.

use tasador_source::Source;
use tasador_traits::{StockId, StockPanel, TasadorError};
use tracing::info;

/// Load the stock panel from the chosen source.
///
/// Unavailable input yields an empty panel; a batch that is readable but
/// unusable is an error.
pub(crate) async fn load_panel(source: Source) -> Result<StockPanel, TasadorError> {
    let panel = source.load().await?;
    info!(
        source = %source,
        records = panel.len(),
        stocks = panel.n_stocks(),
        "loaded input"
    );
    Ok(panel)
}

/// Parse a comma-separated list of stock ids.
pub(crate) fn parse_stock_ids(raw: &str) -> Result<Vec<StockId>, TasadorError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<StockId>()
                .map_err(|e| TasadorError::InvalidData(format!("Invalid stock id {s:?}: {e}")))
        })
        .collect()
}
