use crate::config::Dimensionality;
use crate::error::{ScheduleError, ScheduleResult};
use crate::stage::Stage;
use serde::Serialize;
use std::sync::Arc;

/// A resolved, read-only progressive schedule.
///
/// Stages live behind an `Arc`, so cloning a schedule shares the stage list
/// instead of copying it. Only [`crate::resolve`] constructs one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schedule {
    stages: Arc<[Stage]>,
    default_forward_step: usize,
    dimensionality: Dimensionality,
    initial_alpha: f64,
    reset_alpha_per_stage: bool,
}

impl Schedule {
    pub(crate) fn new(
        stages: Vec<Stage>,
        default_forward_step: usize,
        dimensionality: Dimensionality,
        initial_alpha: f64,
        reset_alpha_per_stage: bool,
    ) -> Self {
        Self {
            stages: stages.into(),
            default_forward_step,
            dimensionality,
            initial_alpha,
            reset_alpha_per_stage,
        }
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Stage> {
        self.stages.iter()
    }

    pub fn first(&self) -> Option<&Stage> {
        self.stages.first()
    }

    pub fn final_stage(&self) -> Option<&Stage> {
        self.stages.last()
    }

    pub fn default_forward_step(&self) -> usize {
        self.default_forward_step
    }

    pub fn dimensionality(&self) -> Dimensionality {
        self.dimensionality
    }

    /// Blend factor the fade-in starts from.
    pub fn initial_alpha(&self) -> f64 {
        self.initial_alpha
    }

    /// Whether the fade-in restarts at every stage rather than carrying over.
    pub fn reset_alpha_per_stage(&self) -> bool {
        self.reset_alpha_per_stage
    }

    /// Sum of every stage's epoch budget.
    pub fn total_epochs(&self) -> u64 {
        self.stages.iter().map(|s| s.epoch_count).sum()
    }

    /// Epochs spent in the stages before `index`.
    pub fn epochs_before(&self, index: usize) -> u64 {
        self.stages.iter().take(index).map(|s| s.epoch_count).sum()
    }

    pub fn stage_at(&self, step_index: usize) -> ScheduleResult<&Stage> {
        self.stages
            .get(step_index)
            .ok_or(ScheduleError::IndexOutOfRange { index: step_index, len: self.stages.len() })
    }

    /// Stage active at a 0-indexed cumulative epoch counter.
    pub fn stage_for_global_epoch(&self, global_epoch: u64) -> ScheduleResult<&Stage> {
        let (index, _) = self.locate(global_epoch)?;
        Ok(&self.stages[index])
    }

    /// Stage index and epoch offset within that stage for a cumulative epoch.
    pub(crate) fn locate(&self, global_epoch: u64) -> ScheduleResult<(usize, u64)> {
        let mut remaining = global_epoch;
        for stage in &*self.stages {
            if remaining < stage.epoch_count {
                return Ok((stage.index, remaining));
            }
            remaining -= stage.epoch_count;
        }
        Err(ScheduleError::EpochOutOfRange { epoch: global_epoch, total: self.total_epochs() })
    }

    pub fn default_stage(&self) -> ScheduleResult<&Stage> {
        self.stage_at(self.default_forward_step)
    }

    /// Stage to run inference with: the requested step, or the default one.
    pub fn forward_stage(&self, step: Option<usize>) -> ScheduleResult<&Stage> {
        self.stage_at(step.unwrap_or(self.default_forward_step))
    }

    /// Check that a driver's epoch budget covers the schedule exactly.
    pub fn ensure_total_epochs(&self, max_epochs: u64) -> ScheduleResult<()> {
        let total = self.total_epochs();
        if max_epochs != total {
            return Err(ScheduleError::invalid(format!(
                "trainer runs {max_epochs} epoch(s) but the progressive schedule spans {total}"
            )));
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a Stage;
    type IntoIter = std::slice::Iter<'a, Stage>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule() -> Schedule {
        Schedule::new(
            vec![
                Stage { index: 0, resolution: 4, layer_scale: 1.0, epoch_count: 2, is_final: false },
                Stage { index: 1, resolution: 8, layer_scale: 0.5, epoch_count: 3, is_final: false },
                Stage { index: 2, resolution: 16, layer_scale: 0.25, epoch_count: 1, is_final: true },
            ],
            1,
            Dimensionality::Two,
            0.0,
            false,
        )
    }

    #[test]
    fn test_total_epochs() {
        assert_eq!(schedule().total_epochs(), 6);
        assert_eq!(schedule().epochs_before(2), 5);
    }

    #[test]
    fn test_stage_at_bounds() {
        let s = schedule();
        assert_eq!(s.stage_at(2).unwrap().resolution, 16);
        assert!(matches!(s.stage_at(3), Err(ScheduleError::IndexOutOfRange { index: 3, len: 3 })));
    }

    #[test]
    fn test_global_epoch_walks_stage_spans() {
        let s = schedule();
        let resolutions: Vec<u64> =
            (0..6).map(|e| s.stage_for_global_epoch(e).unwrap().resolution).collect();
        assert_eq!(resolutions, vec![4, 4, 8, 8, 8, 16]);
        assert_eq!(s.locate(3).unwrap(), (1, 1));
        assert!(matches!(
            s.stage_for_global_epoch(6),
            Err(ScheduleError::EpochOutOfRange { epoch: 6, total: 6 })
        ));
    }

    #[test]
    fn test_forward_stage_falls_back_to_default() {
        let s = schedule();
        assert_eq!(s.forward_stage(None).unwrap().index, 1);
        assert_eq!(s.forward_stage(Some(2)).unwrap().index, 2);
        assert!(s.forward_stage(Some(9)).is_err());
    }

    #[test]
    fn test_ensure_total_epochs() {
        let s = schedule();
        assert!(s.ensure_total_epochs(6).is_ok());
        let err = s.ensure_total_epochs(5).unwrap_err();
        assert!(err.to_string().contains("spans 6"));
    }

    #[test]
    fn test_clone_shares_stages() {
        let s = schedule();
        let c = s.clone();
        assert!(Arc::ptr_eq(&s.stages, &c.stages));
    }
}
