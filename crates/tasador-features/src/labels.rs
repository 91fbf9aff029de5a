//! Next-period labels.

/// Shifts a per-row value one period into the future within a group.
///
/// Row `i` receives row `i + 1`'s value; the last row of the group has no
/// successor and gets `None`. Call once per stock group so a label never
/// comes from another stock.
pub fn next_period<T, F>(rows: &[T], value: F) -> Vec<Option<f64>>
where
    F: Fn(&T) -> Option<f64>,
{
    let mut labels: Vec<Option<f64>> = rows.iter().skip(1).map(&value).collect();
    if !rows.is_empty() {
        labels.push(None);
    }
    labels
}
