use crate::cursor::{StageCursor, StageTransition};
use crate::error::{ScheduleError, ScheduleResult};
use crate::fade::FadeIn;
use crate::schedule::Schedule;
use crate::stage::Stage;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgressEvent {
    StageStarted { stage: usize, resolution: u64, layer_scale: f64, epochs: u64 },
    EpochCompleted { stage: usize, global_epoch: u64, alpha: f64 },
    StageFinished { stage: usize },
    ScheduleFinished { total_epochs: u64 },
}

impl ProgressEvent {
    fn stage_started(stage: &Stage) -> Self {
        Self::StageStarted {
            stage: stage.index,
            resolution: stage.resolution,
            layer_scale: stage.layer_scale,
            epochs: stage.epoch_count,
        }
    }
}

pub trait ProgressSink: Send + Sync {
    fn on_event(&self, event: ProgressEvent);
}

#[derive(Debug, Default)]
pub struct StdoutProgressSink;

impl ProgressSink for StdoutProgressSink {
    fn on_event(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::StageStarted { stage, resolution, layer_scale, epochs } => {
                println!(
                    "[stage {stage}] started at {resolution}x{resolution} (layer scale {layer_scale}, {epochs} epoch(s))"
                );
            }
            ProgressEvent::EpochCompleted { stage, global_epoch, alpha } => {
                println!("[stage {stage}] epoch {global_epoch} done, alpha {alpha:.4}");
            }
            ProgressEvent::StageFinished { stage } => println!("[stage {stage}] finished"),
            ProgressEvent::ScheduleFinished { total_epochs } => {
                println!("schedule finished after {total_epochs} epoch(s)");
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct TracingProgressSink;

impl ProgressSink for TracingProgressSink {
    fn on_event(&self, event: ProgressEvent) {
        tracing::info!(?event, "progress");
    }
}

/// Totals of a [`drive`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriveSummary {
    pub epochs: u64,
    pub batches: u64,
}

/// Walk the whole schedule epoch by epoch, as a training driver would,
/// reporting every stage change and the fade-in factor to `sink`.
pub fn drive(
    schedule: &Schedule,
    sink: &dyn ProgressSink,
    dataset_len: usize,
    batch_size: usize,
) -> ScheduleResult<DriveSummary> {
    if batch_size == 0 {
        return Err(ScheduleError::invalid("batch size must be positive"));
    }
    if dataset_len == 0 {
        return Err(ScheduleError::invalid("dataset must contain at least one sample"));
    }

    let mut cursor = StageCursor::new(schedule.clone());
    let mut fade = FadeIn::for_schedule(schedule);
    let mut summary = DriveSummary { epochs: 0, batches: 0 };

    sink.on_event(ProgressEvent::stage_started(cursor.current_stage()));
    loop {
        let stage = cursor.current_stage().clone();
        let mut seen = 0;
        while seen < dataset_len {
            let batch = batch_size.min(dataset_len - seen);
            fade.record_batch(&stage, batch, dataset_len)?;
            seen += batch;
            summary.batches += 1;
        }

        let transition = cursor.complete_epoch()?;
        summary.epochs += 1;
        sink.on_event(ProgressEvent::EpochCompleted {
            stage: stage.index,
            global_epoch: summary.epochs - 1,
            alpha: fade.alpha(),
        });

        match transition {
            StageTransition::Continue => {}
            StageTransition::Advanced { from, .. } => {
                sink.on_event(ProgressEvent::StageFinished { stage: from });
                fade.on_stage_advanced();
                sink.on_event(ProgressEvent::stage_started(cursor.current_stage()));
            }
            StageTransition::Finished => {
                sink.on_event(ProgressEvent::StageFinished { stage: stage.index });
                sink.on_event(ProgressEvent::ScheduleFinished { total_epochs: summary.epochs });
                return Ok(summary);
            }
        }
    }
}
