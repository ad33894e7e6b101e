//! Command implementations for the synthgrow CLI.

pub mod check;
pub mod locate;
pub mod resolve;
pub mod simulate;
pub mod stage;

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use synthgrow_schedule::{ProgressiveConfig, Schedule, Stage};

/// Load a configuration document and resolve its schedule.
pub fn load_schedule(path: &Path) -> Result<Schedule> {
    let config = ProgressiveConfig::from_path(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    config
        .resolve()
        .with_context(|| format!("Failed to resolve schedule from {}", path.display()))
}

/// Print one stage as an indented block.
pub fn print_stage(stage: &Stage, schedule: &Schedule) {
    let [h, w, d] = stage.spatial_shape(schedule.dimensionality());
    println!("  Stage:        {}", stage.index.to_string().cyan());
    println!("  Resolution:   {}x{}", stage.resolution, stage.resolution);
    println!("  Spatial size: [{h}, {w}, {d}]");
    println!("  Layer scale:  {}", stage.layer_scale);
    println!("  Epochs:       {}", stage.epoch_count);
    println!("  Starts at:    epoch {}", schedule.epochs_before(stage.index));
    if stage.is_final {
        println!("  {}", "final stage".dimmed());
    }
}
