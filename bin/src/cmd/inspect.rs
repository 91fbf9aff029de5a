//! Input inspection command implementation.

use anyhow::Result;
use chrono::NaiveDate;
use polars::prelude::*;
use tasador_source::Source;
use tasador_traits::StockPanel;
use tasador_traits::field::{DATE_COLUMN, STOCK_ID_COLUMN};

use crate::data::load_panel;

/// Summary statistics of a loaded panel.
#[derive(Debug, PartialEq)]
pub(crate) struct PanelSummary {
    pub(crate) rows: usize,
    pub(crate) stocks: usize,
    pub(crate) first_date: Option<NaiveDate>,
    pub(crate) last_date: Option<NaiveDate>,
    pub(crate) missing: Vec<(String, usize)>,
    pub(crate) degenerate_stocks: usize,
}

impl PanelSummary {
    /// Summarize a panel through its DataFrame view.
    pub(crate) fn from_panel(panel: &StockPanel) -> Result<Self> {
        if panel.is_empty() {
            return Ok(Self {
                rows: 0,
                stocks: 0,
                first_date: None,
                last_date: None,
                missing: Vec::new(),
                degenerate_stocks: 0,
            });
        }

        let df = panel.to_frame()?;

        let stats = df
            .clone()
            .lazy()
            .select([
                col(STOCK_ID_COLUMN).n_unique().cast(DataType::UInt64).alias("stocks"),
                col(DATE_COLUMN).min().alias("first_date"),
                col(DATE_COLUMN).max().alias("last_date"),
            ])
            .collect()?;

        let stocks = stats
            .column("stocks")?
            .as_materialized_series()
            .u64()?
            .get(0)
            .unwrap_or(0);
        let first_date = first_value(&stats, "first_date")?;
        let last_date = first_value(&stats, "last_date")?;

        let degenerate = df
            .clone()
            .lazy()
            .group_by([col(STOCK_ID_COLUMN)])
            .agg([col(DATE_COLUMN).count().alias("periods")])
            .filter(col("periods").lt(lit(2)))
            .collect()?;

        let missing = df
            .get_columns()
            .iter()
            .map(|c| (c.name().to_string(), c.as_materialized_series().null_count()))
            .collect();

        Ok(Self {
            rows: df.height(),
            stocks: usize::try_from(stocks)?,
            first_date,
            last_date,
            missing,
            degenerate_stocks: degenerate.height(),
        })
    }
}

/// First value of a date column.
fn first_value(df: &DataFrame, name: &str) -> Result<Option<NaiveDate>> {
    let dates = df.column(name)?.as_materialized_series().date()?;
    Ok(dates.as_date_iter().next().flatten())
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| "-".to_string(), |d| d.to_string())
}

/// Load the input and print summary statistics without training.
pub(crate) async fn inspect_input(source: Source) -> Result<()> {
    let panel = load_panel(source).await?;
    let summary = PanelSummary::from_panel(&panel)?;

    println!("\nInput summary ({source})\n");
    println!("  Rows:              {}", summary.rows);
    println!("  Stocks:            {}", summary.stocks);
    println!(
        "  Date range:        {} to {}",
        format_date(summary.first_date),
        format_date(summary.last_date)
    );
    println!("  Single-period stocks: {}", summary.degenerate_stocks);

    if !summary.missing.is_empty() {
        println!("\nMissing values by column:");
        println!("{}", "-".repeat(40));
        for (name, count) in &summary.missing {
            println!("  {name:30} {count:>8}");
        }
    }
    println!();

    Ok(())
}
