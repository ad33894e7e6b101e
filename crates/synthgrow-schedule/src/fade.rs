use crate::error::{ScheduleError, ScheduleResult};
use crate::schedule::Schedule;
use crate::stage::Stage;

/// Blend factor between the previous resolution block and the newly grown one.
///
/// Within a stage the factor climbs linearly with the number of samples seen
/// and reaches 1.0 once the stage's whole epoch budget has been consumed.
/// By default the factor carries over into the next stage; with
/// `reset_per_stage` it restarts from the initial value at every stage.
#[derive(Debug, Clone, PartialEq)]
pub struct FadeIn {
    initial: f64,
    alpha: f64,
    reset_per_stage: bool,
}

impl FadeIn {
    /// Inference and fixed-latent evaluation always run fully blended.
    pub const INFERENCE_ALPHA: f64 = 1.0;

    pub fn new(initial: f64) -> ScheduleResult<Self> {
        if !(0.0..=1.0).contains(&initial) {
            return Err(ScheduleError::invalid(format!("alpha must lie in [0, 1], got {initial}")));
        }
        Ok(Self { initial, alpha: initial, reset_per_stage: false })
    }

    pub fn for_schedule(schedule: &Schedule) -> Self {
        Self {
            initial: schedule.initial_alpha(),
            alpha: schedule.initial_alpha(),
            reset_per_stage: schedule.reset_alpha_per_stage(),
        }
    }

    #[must_use]
    pub fn with_reset_per_stage(mut self, reset_per_stage: bool) -> Self {
        self.reset_per_stage = reset_per_stage;
        self
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Per-batch growth of the factor at `stage`.
    pub fn increment(stage: &Stage, batch_size: usize, dataset_len: usize) -> ScheduleResult<f64> {
        if batch_size == 0 {
            return Err(ScheduleError::invalid("batch size must be positive"));
        }
        if dataset_len == 0 {
            return Err(ScheduleError::invalid("dataset must contain at least one sample"));
        }
        Ok(batch_size as f64 / (stage.epoch_count as f64 * dataset_len as f64))
    }

    /// Account for one training batch and return the new factor.
    ///
    /// A single-sample batch is not trained on, so it leaves the factor
    /// unchanged.
    pub fn record_batch(
        &mut self,
        stage: &Stage,
        batch_size: usize,
        dataset_len: usize,
    ) -> ScheduleResult<f64> {
        let step = Self::increment(stage, batch_size, dataset_len)?;
        if batch_size == 1 {
            tracing::warn!(
                stage = stage.index,
                "batch has only one sample; skipping it as it would produce NaN outputs"
            );
            return Ok(self.alpha);
        }
        self.alpha = (self.alpha + step).min(1.0);
        Ok(self.alpha)
    }

    /// Called when the schedule moves to the next stage.
    pub fn on_stage_advanced(&mut self) {
        if self.reset_per_stage {
            self.reset();
        }
    }

    /// Restart the fade from the initial factor.
    pub fn reset(&mut self) {
        self.alpha = self.initial;
    }
}
