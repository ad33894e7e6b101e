use crate::error::{ScheduleError, ScheduleResult};
use crate::schedule::Schedule;
use crate::stage::Stage;

/// Outcome of finishing one training epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageTransition {
    /// The current stage still has epochs left.
    Continue,
    /// The stage's budget ran out and the next stage is now current.
    Advanced { from: usize, to: usize },
    /// The final stage's budget ran out.
    Finished,
}

/// Tracks which stage a training run is in, epoch by epoch.
#[derive(Debug, Clone)]
pub struct StageCursor {
    schedule: Schedule,
    stage_index: usize,
    epoch_in_stage: u64,
    finished: bool,
}

impl StageCursor {
    pub fn new(schedule: Schedule) -> Self {
        Self { schedule, stage_index: 0, epoch_in_stage: 0, finished: false }
    }

    /// Position a cursor from a persisted cumulative epoch counter.
    pub fn resume(schedule: Schedule, global_epoch: u64) -> ScheduleResult<Self> {
        let (stage_index, epoch_in_stage) = schedule.locate(global_epoch)?;
        tracing::debug!(global_epoch, stage_index, epoch_in_stage, "resuming progressive schedule");
        Ok(Self { schedule, stage_index, epoch_in_stage, finished: false })
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn current_stage(&self) -> &Stage {
        &self.schedule.stages()[self.stage_index]
    }

    pub fn epoch_in_stage(&self) -> u64 {
        self.epoch_in_stage
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Cumulative epochs completed so far; the inverse of [`StageCursor::resume`].
    pub fn global_epoch(&self) -> u64 {
        if self.finished {
            return self.schedule.total_epochs();
        }
        self.schedule.epochs_before(self.stage_index) + self.epoch_in_stage
    }

    pub fn complete_epoch(&mut self) -> ScheduleResult<StageTransition> {
        if self.finished {
            return Err(ScheduleError::ScheduleComplete);
        }

        self.epoch_in_stage += 1;
        let stage = &self.schedule.stages()[self.stage_index];
        if self.epoch_in_stage < stage.epoch_count {
            return Ok(StageTransition::Continue);
        }

        if stage.is_final {
            self.finished = true;
            tracing::info!(stage = stage.index, resolution = stage.resolution, "progressive schedule finished");
            return Ok(StageTransition::Finished);
        }

        let from = self.stage_index;
        self.stage_index += 1;
        self.epoch_in_stage = 0;
        let next = self.current_stage();
        tracing::info!(from, to = next.index, resolution = next.resolution, "advancing to next stage");
        Ok(StageTransition::Advanced { from, to: self.stage_index })
    }
}
