//! `synthgrow locate`

use super::{load_schedule, print_stage};
use anyhow::Result;
use colored::Colorize;
use serde_json::json;
use std::path::Path;
use synthgrow_schedule::StageCursor;

pub fn execute(config: &Path, epoch: u64, json_output: bool) -> Result<()> {
    let schedule = load_schedule(config)?;
    let cursor = StageCursor::resume(schedule.clone(), epoch)?;
    let stage = cursor.current_stage();

    if json_output {
        let out = json!({
            "global_epoch": epoch,
            "epoch_in_stage": cursor.epoch_in_stage(),
            "stage": stage,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!(
        "{}",
        format!(
            "Epoch {} runs in stage {} (epoch {} of {})",
            epoch,
            stage.index,
            cursor.epoch_in_stage() + 1,
            stage.epoch_count
        )
        .bold()
        .cyan()
    );
    print_stage(stage, &schedule);
    println!();
    Ok(())
}
