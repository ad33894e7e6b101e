//! `synthgrow check`

use super::load_schedule;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

pub fn execute(config: &Path, max_epochs: Option<u64>) -> Result<()> {
    let schedule = load_schedule(config)?;

    if let Some(max_epochs) = max_epochs {
        schedule.ensure_total_epochs(max_epochs).context("Epoch budget does not match the schedule")?;
    }

    let final_resolution = schedule.final_stage().map_or(0, |s| s.resolution);
    println!(
        "{} {} stage(s), {} epoch(s), final resolution {}x{}",
        "Configuration OK:".green().bold(),
        schedule.len(),
        schedule.total_epochs(),
        final_resolution,
        final_resolution
    );
    Ok(())
}
