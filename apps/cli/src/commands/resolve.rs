//! `synthgrow resolve`

use super::load_schedule;
use anyhow::Result;
use colored::Colorize;
use std::path::Path;

pub fn execute(config: &Path, json_output: bool) -> Result<()> {
    let schedule = load_schedule(config)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&schedule)?);
        return Ok(());
    }

    println!();
    println!(
        "{}",
        format!(
            "Progressive schedule ({} stage(s), {} epoch(s))",
            schedule.len(),
            schedule.total_epochs()
        )
        .bold()
        .cyan()
    );
    println!();
    println!("{:<7} {:<12} {:<12} {:<8} {}", "Stage", "Resolution", "Layer scale", "Epochs", "Notes");
    println!("{}", "─".repeat(56));
    for stage in &schedule {
        let mut notes = Vec::new();
        if stage.index == schedule.default_forward_step() {
            notes.push("default");
        }
        if stage.is_final {
            notes.push("final");
        }
        println!(
            "{:<7} {:<12} {:<12} {:<8} {}",
            stage.index,
            format!("{}x{}", stage.resolution, stage.resolution),
            stage.layer_scale,
            stage.epoch_count,
            notes.join(", ").dimmed()
        );
    }
    println!();
    Ok(())
}
