//! Prediction command implementation.

use std::io::Write;

use anyhow::Result;
use tasador_pipeline::{Pipeline, PipelineConfig};
use tasador_source::Source;
use tracing::info;

use crate::data::{load_panel, parse_stock_ids};

/// Options for a prediction run.
#[derive(Debug)]
pub(crate) struct PredictOptions {
    pub(crate) source: Source,
    pub(crate) exclude: Option<String>,
    pub(crate) seed: Option<u64>,
    pub(crate) pretty: bool,
}

/// Train both stages and write the prediction document to stdout.
///
/// Nothing is written to stdout unless the whole run succeeds.
pub(crate) async fn run_predict(options: PredictOptions) -> Result<()> {
    let mut config = PipelineConfig::default();
    if let Some(seed) = options.seed {
        config = config.with_seed(seed);
    }
    if let Some(raw) = options.exclude.as_deref() {
        config = config.with_excluded_stocks(parse_stock_ids(raw)?);
    }

    let panel = load_panel(options.source).await?;
    let output = Pipeline::new(config).run(&panel)?;
    let json = output.to_json(options.pretty)?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}")?;
    stdout.flush()?;

    info!(bytes = json.len(), "wrote predictions");
    Ok(())
}
