//! Polars view of a stock panel.
//!
//! The pipeline itself works on typed records. This view exists for
//! inspection: it lays the panel out as a DataFrame with one column per
//! field the batch carried, so column statistics come straight from Polars.

use polars::prelude::*;

use crate::field::{DATE_COLUMN, Field, STOCK_ID_COLUMN};
use crate::{Result, StockPanel};

impl StockPanel {
    /// Converts the panel to a DataFrame.
    ///
    /// Rows follow the panel order (stock id, then date). Field columns
    /// appear in wire order and only when the batch carried them; missing
    /// values become nulls.
    ///
    /// # Errors
    ///
    /// Returns an error if Polars rejects the columns.
    pub fn to_frame(&self) -> Result<DataFrame> {
        let stock_ids: Vec<i64> = self.records().map(|r| r.stock_id).collect();
        let dates: Vec<chrono::NaiveDate> = self.records().map(|r| r.date).collect();

        let mut columns = vec![
            Column::new(STOCK_ID_COLUMN.into(), stock_ids),
            Column::new(DATE_COLUMN.into(), dates),
        ];

        for field in Field::ALL {
            if !self.has_column(field.wire_name()) {
                continue;
            }
            let values: Vec<Option<f64>> = self.records().map(|r| r.value(field)).collect();
            columns.push(Column::new(field.wire_name().into(), values));
        }

        Ok(DataFrame::new(columns)?)
    }
}
