use crate::config::{Dimensionality, ProgressiveConfig};
use crate::error::{ScheduleError, ScheduleResult};
use crate::schedule::Schedule;
use crate::stage::Stage;

/// Expand a progressive configuration into its explicit stage sequence.
///
/// The configuration is fully validated before any stage is built, so an
/// invalid configuration never yields a partial schedule. Resolution is
/// computed with checked integer arithmetic.
pub fn resolve(config: &ProgressiveConfig) -> ScheduleResult<Schedule> {
    config.validate()?;

    let count = config.epochs.len();
    let mut stages = Vec::with_capacity(count);
    let mut resolution = config.starting_size;
    for (index, (&layer_scale, &epoch_count)) in
        config.layer_scaling_factors.iter().zip(&config.epochs).enumerate()
    {
        if index > 0 {
            resolution = resolution.checked_mul(config.growth_factor).ok_or_else(|| {
                ScheduleError::invalid(format!(
                    "resolution of stage {index} overflows: {} * {}^{index}",
                    config.starting_size, config.growth_factor
                ))
            })?;
        }
        stages.push(Stage { index, resolution, layer_scale, epoch_count, is_final: index + 1 == count });
    }

    if config.dimensionality == Dimensionality::Three {
        tracing::warn!(
            "progressive training resizes volumes at every stage; objects in 3-D medical data may be distorted"
        );
    }
    tracing::debug!(
        stages = count,
        final_resolution = resolution,
        default_forward_step = config.default_forward_step,
        "resolved progressive schedule"
    );

    Ok(Schedule::new(
        stages,
        config.default_forward_step,
        config.dimensionality,
        config.alpha,
        config.reset_alpha_per_stage,
    ))
}

impl ProgressiveConfig {
    /// Shorthand for [`resolve`].
    pub fn resolve(&self) -> ScheduleResult<Schedule> {
        resolve(self)
    }
}
