//! term-logic demo
//!
//! Builds a handful of bounding box features and evaluates them for each
//! configured input vector.
//!
//! Usage: `term-logic-demo [config.toml]`. Without an argument the file
//! named by `TERM_LOGIC_CONFIG` is used, or the built-in sample boxes.

mod config;
mod error;
mod features;

use std::path::PathBuf;

use term_logic::batch;
use tracing_subscriber::EnvFilter;

use config::DemoConfig;
use error::Result;
use features::{FeatureSet, FEATURE_NAMES};

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args_os().nth(1).map(PathBuf::from);
    run(DemoConfig::load(path.as_deref())?)?;

    Ok(())
}

fn run(config: DemoConfig) -> Result<()> {
    config.validate()?;
    tracing::info!(
        inputs = config.inputs.len(),
        threshold = config.threshold,
        "evaluating features"
    );

    let features = FeatureSet::new(config.threshold);
    let values = batch::substitute(&config.inputs, &features.terms())?;
    let selection = batch::evaluate(&config.inputs, &[features.selected.clone()])?;
    let leading = features.leading_min.evaluate_batch(&config.inputs)?;

    for (row, input) in config.inputs.iter().enumerate() {
        println!("Input {}: {:?}", row + 1, input);
        println!("  selected: {}", selection[row][0]);
        for (name, value) in FEATURE_NAMES.iter().zip(&values[row]) {
            println!("  {name}: {value}");
        }
        println!("  leading min: {}", leading[row]);
    }

    Ok(())
}
