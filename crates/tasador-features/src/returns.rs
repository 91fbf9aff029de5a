//! Period-over-period return features.
//!
//! For each base field `F` a companion `F_r = F / F_prev - 1` is computed
//! against the immediately preceding record of the same stock. The first
//! record of every stock has no predecessor, so its returns are missing.

use tasador_traits::{Date, Field, StockId, StockPanel, StockPeriodRecord};

/// Number of return features per row.
pub const N_RETURNS: usize = Field::BASE.len();

/// Relative change `current / previous - 1`.
///
/// Missing when either operand is missing or the ratio is not finite (a zero
/// previous value).
#[must_use]
pub fn relative_change(current: Option<f64>, previous: Option<f64>) -> Option<f64> {
    let change = current? / previous? - 1.0;
    change.is_finite().then_some(change)
}

/// A record together with its return features.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineeredRow {
    /// The underlying observation.
    pub record: StockPeriodRecord,

    /// Return features aligned with [`Field::BASE`].
    pub returns: [Option<f64>; N_RETURNS],
}

impl EngineeredRow {
    /// Stock identifier.
    pub const fn stock_id(&self) -> StockId {
        self.record.stock_id
    }

    /// Period date.
    pub const fn date(&self) -> Date {
        self.record.date
    }

    /// Return feature of a base field, `None` for non-base fields.
    pub fn return_of(&self, field: Field) -> Option<f64> {
        Field::BASE
            .iter()
            .position(|f| *f == field)
            .and_then(|i| self.returns[i])
    }

    /// Factor-stage feature vector: base levels then base returns.
    ///
    /// `None` unless every component is present.
    pub fn factor_features(&self) -> Option<Vec<f64>> {
        Field::BASE
            .iter()
            .map(|f| self.record.value(*f))
            .chain(self.returns.iter().copied())
            .collect()
    }
}

/// Names of [`EngineeredRow::factor_features`] in column order.
#[must_use]
pub fn factor_feature_names() -> Vec<String> {
    Field::BASE
        .iter()
        .map(|f| f.wire_name().to_string())
        .chain(Field::BASE.iter().map(|f| f.return_name()))
        .collect()
}

/// One stock's engineered rows in date order.
#[derive(Debug, Clone)]
pub struct EngineeredGroup {
    /// Stock identifier.
    pub stock_id: StockId,

    /// Rows in date order.
    pub rows: Vec<EngineeredRow>,
}

/// Derives return features for one stock's records, already in date order.
#[must_use]
pub fn derive_group(records: &[StockPeriodRecord]) -> Vec<EngineeredRow> {
    let mut rows = Vec::with_capacity(records.len());
    let mut previous: Option<&StockPeriodRecord> = None;

    for record in records {
        let mut returns = [None; N_RETURNS];
        if let Some(prev) = previous {
            for (slot, field) in returns.iter_mut().zip(Field::BASE) {
                *slot = relative_change(record.value(field), prev.value(field));
            }
        }
        rows.push(EngineeredRow {
            record: record.clone(),
            returns,
        });
        previous = Some(record);
    }

    rows
}

/// Derives return features for every stock of the panel.
///
/// Groups come back in ascending stock id; each stock is processed on its
/// own, so no value ever crosses a stock boundary.
#[must_use]
pub fn derive_returns(panel: &StockPanel) -> Vec<EngineeredGroup> {
    panel
        .groups()
        .map(|(stock_id, records)| EngineeredGroup {
            stock_id,
            rows: derive_group(records),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(month: u32) -> Date {
        Date::from_ymd_opt(2023, month, 1).unwrap()
    }

    fn record(stock: StockId, month: u32, pe: f64) -> StockPeriodRecord {
        StockPeriodRecord::new(stock, date(month)).with(Field::Pe, pe)
    }

    #[test]
    fn test_relative_change() {
        assert_relative_eq!(relative_change(Some(12.0), Some(10.0)).unwrap(), 0.2);
        assert_eq!(relative_change(None, Some(10.0)), None);
        assert_eq!(relative_change(Some(1.0), None), None);
        assert_eq!(relative_change(Some(1.0), Some(0.0)), None);
        assert_eq!(relative_change(Some(0.0), Some(0.0)), None);
    }

    #[test]
    fn test_pe_returns_scenario() {
        let panel = StockPanel::from_records(vec![
            record(100, 1, 10.0),
            record(100, 2, 12.0),
            record(100, 3, 11.0),
        ]);

        let groups = derive_returns(&panel);
        assert_eq!(groups.len(), 1);
        let rows = &groups[0].rows;

        assert_eq!(rows[0].return_of(Field::Pe), None);
        assert_relative_eq!(rows[1].return_of(Field::Pe).unwrap(), 0.2, epsilon = 1e-12);
        assert_relative_eq!(rows[2].return_of(Field::Pe).unwrap(), -1.0 / 12.0, epsilon = 1e-12);
    }

    #[test]
    fn test_first_row_of_each_group_is_missing() {
        let panel = StockPanel::from_records(vec![
            record(1, 1, 10.0),
            record(1, 2, 20.0),
            record(2, 3, 30.0),
            record(2, 4, 60.0),
        ]);

        let groups = derive_returns(&panel);
        for group in &groups {
            assert!(group.rows[0].returns.iter().all(Option::is_none));
        }
        // stock 2's first row must not see stock 1's last value
        assert_eq!(groups[1].rows[0].return_of(Field::Pe), None);
        assert_relative_eq!(groups[1].rows[1].return_of(Field::Pe).unwrap(), 1.0);
    }

    #[test]
    fn test_out_of_order_input_is_sorted() {
        let panel = StockPanel::from_records(vec![record(5, 3, 11.0), record(5, 1, 10.0), record(5, 2, 12.0)]);
        let rows = &derive_returns(&panel)[0].rows;
        let dates: Vec<Date> = rows.iter().map(EngineeredRow::date).collect();
        assert_eq!(dates, vec![date(1), date(2), date(3)]);
        assert_relative_eq!(rows[1].return_of(Field::Pe).unwrap(), 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_factor_features_require_completeness() {
        let mut full = StockPeriodRecord::new(1, date(1));
        for (i, field) in Field::BASE.into_iter().enumerate() {
            full.set(field, Some(1.0 + i as f64));
        }
        let mut next = full.clone();
        next.date = date(2);
        for field in Field::BASE {
            next.set(field, next.value(field).map(|v| v * 2.0));
        }

        let rows = derive_group(&[full, next]);
        assert!(rows[0].factor_features().is_none());

        let features = rows[1].factor_features().unwrap();
        assert_eq!(features.len(), 2 * N_RETURNS);
        assert_eq!(features.len(), factor_feature_names().len());
        assert_relative_eq!(features[0], 2.0);
        assert!(features[N_RETURNS..].iter().all(|r| (r - 1.0).abs() < 1e-12));
    }

    #[test]
    fn test_factor_feature_names_order() {
        let names = factor_feature_names();
        assert_eq!(names[0], "TTM");
        assert_eq!(names[9], "marketaslary");
        assert_eq!(names[10], "TTM_r");
        assert_eq!(names[19], "marketaslary_r");
    }
}
