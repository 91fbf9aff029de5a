//! Discounted cash flow estimate.
//!
//! The estimate compounds per-share cash flow at the smoothed asset growth
//! rate and discounts it at the annualized risk-free rate, summed over a
//! fixed number of future periods:
//!
//! ```text
//! dcf = Σ_{i=0}^{19} cash_flow · ((1 + growth) / (1 + 4 · rfr))^i
//! ```

use tasador_traits::{Field, StockPeriodRecord};

/// Number of discrete future periods in the sum.
pub const DCF_PERIODS: i32 = 20;

/// Factor turning the quarterly risk-free rate into an annual one.
pub const RATE_PERIODS_PER_YEAR: f64 = 4.0;

/// Discounted cash flow for one `(cash flow, growth, rate)` triple.
///
/// Non-finite when `1 + 4 · rfr` is zero.
#[must_use]
pub fn discounted_cash_flow(cash_flow: f64, growth: f64, risk_free_rate: f64) -> f64 {
    let ratio = (1.0 + growth) / (1.0 + risk_free_rate * RATE_PERIODS_PER_YEAR);
    (0..DCF_PERIODS).map(|i| cash_flow * ratio.powi(i)).sum()
}

/// Discounted cash flow of a record.
///
/// Missing when any input field is missing or the result is not finite.
#[must_use]
pub fn record_dcf(record: &StockPeriodRecord) -> Option<f64> {
    let dcf = discounted_cash_flow(
        record.value(Field::CashFlowPerShare)?,
        record.value(Field::SmoothAssetGrowth)?,
        record.value(Field::RiskFreeRate)?,
    );
    dcf.is_finite().then_some(dcf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tasador_traits::Date;

    #[test]
    fn test_unit_cash_flow_no_growth_no_rate() {
        assert_relative_eq!(discounted_cash_flow(1.0, 0.0, 0.0), 20.0);
    }

    #[test]
    fn test_matches_geometric_closed_form() {
        let (cash_flow, growth, rate) = (2.5, 0.03, 0.01);
        let ratio: f64 = (1.0 + growth) / (1.0 + 4.0 * rate);
        let closed = cash_flow * (1.0 - ratio.powi(20)) / (1.0 - ratio);
        assert_relative_eq!(discounted_cash_flow(cash_flow, growth, rate), closed, epsilon = 1e-10);
    }

    #[test]
    fn test_deterministic() {
        let a = discounted_cash_flow(0.37, 0.021, 0.0061);
        let b = discounted_cash_flow(0.37, 0.021, 0.0061);
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_record_dcf_missing_inputs() {
        let date = Date::from_ymd_opt(2024, 3, 31).unwrap();
        let record = StockPeriodRecord::new(1, date)
            .with(Field::CashFlowPerShare, 1.0)
            .with(Field::SmoothAssetGrowth, 0.0);
        assert_eq!(record_dcf(&record), None);

        let record = record.with(Field::RiskFreeRate, 0.0);
        assert_relative_eq!(record_dcf(&record).unwrap(), 20.0);
    }

    #[test]
    fn test_record_dcf_degenerate_rate() {
        let date = Date::from_ymd_opt(2024, 3, 31).unwrap();
        let record = StockPeriodRecord::new(1, date)
            .with(Field::CashFlowPerShare, 1.0)
            .with(Field::SmoothAssetGrowth, 0.1)
            .with(Field::RiskFreeRate, -0.25);
        assert_eq!(record_dcf(&record), None);
    }
}
