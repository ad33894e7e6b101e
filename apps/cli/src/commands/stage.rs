//! `synthgrow stage`

use super::{load_schedule, print_stage};
use anyhow::Result;
use colored::Colorize;
use std::path::Path;

pub fn execute(config: &Path, step: Option<usize>, json_output: bool) -> Result<()> {
    let schedule = load_schedule(config)?;
    let stage = schedule.forward_stage(step)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(stage)?);
        return Ok(());
    }

    println!();
    let title = if step.is_some() { "Requested stage" } else { "Default forward stage" };
    println!("{}", title.bold().cyan());
    print_stage(stage, &schedule);
    println!();
    Ok(())
}
