//! Result document written on a successful run.

use serde::{Deserialize, Serialize};
use tasador_traits::{Date, Result, StockId};

use crate::composer::CompositeTable;

/// Predicted next-period close price for a stock's latest period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalPrediction {
    /// Stock identifier
    #[serde(rename = "stockid")]
    pub stock_id: StockId,
    /// Date of the latest period
    pub date: Date,
    /// Predicted close price
    pub label: f64,
}

/// Factor forecasts for one stock-period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorPrediction {
    /// Stock identifier
    #[serde(rename = "stockid")]
    pub stock_id: StockId,
    /// Period date
    pub date: Date,
    /// Next-period TTM
    pub y0: f64,
    /// Next-period PE
    pub y1: f64,
    /// Next-period PB
    pub y2: f64,
    /// Next-period PCF
    pub y3: f64,
}

/// Both prediction sets, ordered by stock id then date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineOutput {
    /// One price forecast per served stock
    pub final_predictions: Vec<FinalPrediction>,
    /// Every factor forecast made while composing
    pub factor_predictions: Vec<FactorPrediction>,
}

impl PipelineOutput {
    /// Serialize to JSON, indented when `pretty` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if a value cannot be serialized.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

/// Collect the factor forecasts carried by a composite table.
pub fn factor_predictions(table: &CompositeTable) -> Vec<FactorPrediction> {
    table
        .rows()
        .filter_map(|row| {
            let [y0, y1, y2, y3] = row.factors?;
            Some(FactorPrediction {
                stock_id: row.stock_id(),
                date: row.date(),
                y0,
                y1,
                y2,
                y3,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_keys_and_date_format() {
        let output = PipelineOutput {
            final_predictions: vec![FinalPrediction {
                stock_id: 1,
                date: Date::from_ymd_opt(2024, 3, 31).unwrap(),
                label: 12.5,
            }],
            factor_predictions: vec![FactorPrediction {
                stock_id: 1,
                date: Date::from_ymd_opt(2023, 12, 31).unwrap(),
                y0: 0.1,
                y1: 9.75,
                y2: 1.5,
                y3: 4.0,
            }],
        };

        let json = output.to_json(false).unwrap();
        assert_eq!(
            json,
            r#"{"final_predictions":[{"stockid":1,"date":"2024-03-31","label":12.5}],"factor_predictions":[{"stockid":1,"date":"2023-12-31","y0":0.1,"y1":9.75,"y2":1.5,"y3":4.0}]}"#
        );

        let pretty = output.to_json(true).unwrap();
        assert!(pretty.contains('\n'));
        let back: PipelineOutput = serde_json::from_str(&pretty).unwrap();
        assert_eq!(back, output);
    }

    #[test]
    fn test_empty_output() {
        let json = PipelineOutput::default().to_json(false).unwrap();
        assert_eq!(json, r#"{"final_predictions":[],"factor_predictions":[]}"#);
    }
}
