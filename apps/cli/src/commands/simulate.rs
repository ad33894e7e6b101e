//! `synthgrow simulate`

use super::load_schedule;
use anyhow::Result;
use std::path::Path;
use synthgrow_schedule::{drive, ProgressEvent, ProgressSink, StdoutProgressSink};

/// Writes every event as one JSON line.
struct JsonLinesSink;

impl ProgressSink for JsonLinesSink {
    fn on_event(&self, event: ProgressEvent) {
        match serde_json::to_string(&event) {
            Ok(line) => println!("{line}"),
            Err(e) => tracing::error!("failed to encode progress event: {e}"),
        }
    }
}

pub fn execute(config: &Path, dataset_len: usize, batch_size: usize, json_output: bool) -> Result<()> {
    let schedule = load_schedule(config)?;

    let summary = if json_output {
        drive(&schedule, &JsonLinesSink, dataset_len, batch_size)?
    } else {
        drive(&schedule, &StdoutProgressSink, dataset_len, batch_size)?
    };
    tracing::info!(epochs = summary.epochs, batches = summary.batches, "simulation complete");
    Ok(())
}
