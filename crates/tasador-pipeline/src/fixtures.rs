//! Synthetic panels shared by the unit tests.

use tasador_traits::{Date, Field, StockId, StockPanel, StockPeriodRecord};

/// Quarter-end date of the `period`-th quarter from 2019.
pub(crate) fn quarter_end(period: usize) -> Date {
    let year = 2019 + i32::try_from(period / 4).unwrap();
    let (month, day) = [(3, 31), (6, 30), (9, 30), (12, 31)][period % 4];
    Date::from_ymd_opt(year, month, day).unwrap()
}

/// A fully populated record whose values drift with stock and period.
pub(crate) fn record(stock: StockId, period: usize) -> StockPeriodRecord {
    let s = (stock % 17) as f64;
    let p = period as f64;
    let wobble = ((stock as usize + period) % 3) as f64 * 0.15;

    let mut record = StockPeriodRecord::new(stock, quarter_end(period));
    for (i, field) in Field::BASE.into_iter().enumerate() {
        let i = i as f64;
        record.set(field, Some(1.0 + i + 0.3 * s + 0.2 * p * (1.0 + 0.1 * i) + wobble));
    }
    record
        .with(Field::TotalAsset, 100.0 + 5.0 * s + 2.0 * p)
        .with(Field::QuarterlyAssetGrowth, 0.01 * (1.0 + p))
        .with(Field::CashFlowPerShare, 0.5 + 0.1 * p)
        .with(Field::RiskFreeRate, 0.005)
        .with(Field::SmoothAssetGrowth, 0.02 + 0.001 * s)
        .with(Field::ClosePrice, 10.0 + s + 0.7 * p + wobble)
}

/// `periods` consecutive quarters for each stock.
pub(crate) fn panel(stocks: &[StockId], periods: usize) -> StockPanel {
    let records = stocks
        .iter()
        .flat_map(|&stock| (0..periods).map(move |p| record(stock, p)))
        .collect();
    StockPanel::from_records(records)
}
