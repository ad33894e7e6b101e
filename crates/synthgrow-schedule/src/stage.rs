use crate::config::Dimensionality;
use serde::{Deserialize, Serialize};

/// One resolution-fixed phase of a progressive schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    /// 0-based position in the schedule.
    pub index: usize,
    /// Side length in pixels of the square output at this stage.
    pub resolution: u64,
    pub layer_scale: f64,
    pub epoch_count: u64,
    pub is_final: bool,
}

impl Stage {
    /// Resize target for the data loader while this stage is active.
    ///
    /// 2-D images keep a singleton depth axis.
    pub fn spatial_shape(&self, dimensionality: Dimensionality) -> [u64; 3] {
        let r = self.resolution;
        match dimensionality {
            Dimensionality::Two => [r, r, 1],
            Dimensionality::Three => [r, r, r],
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "stage {} ({}x{}, layer scale {}, {} epoch(s))",
            self.index, self.resolution, self.resolution, self.layer_scale, self.epoch_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spatial_shape_by_dimensionality() {
        let stage =
            Stage { index: 1, resolution: 8, layer_scale: 0.25, epoch_count: 1, is_final: true };
        assert_eq!(stage.spatial_shape(Dimensionality::Two), [8, 8, 1]);
        assert_eq!(stage.spatial_shape(Dimensionality::Three), [8, 8, 8]);
    }

    #[test]
    fn test_display() {
        let stage =
            Stage { index: 0, resolution: 4, layer_scale: 1.0, epoch_count: 2, is_final: false };
        assert_eq!(stage.to_string(), "stage 0 (4x4, layer scale 1, 2 epoch(s))");
    }
}
