use crate::error::{ScheduleError, ScheduleResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Spatial dimensionality of the training images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Dimensionality {
    #[default]
    Two,
    Three,
}

impl TryFrom<u8> for Dimensionality {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            other => Err(format!("n_dimensions must be 2 or 3, got {other}")),
        }
    }
}

impl From<Dimensionality> for u8 {
    fn from(value: Dimensionality) -> Self {
        match value {
            Dimensionality::Two => 2,
            Dimensionality::Three => 3,
        }
    }
}

/// Progressive-growing parameters of a StyleGAN-style model.
///
/// Field names accept both the short form and the keys used in the
/// `model_config.architecture` block of a training configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressiveConfig {
    /// Side length in pixels of the first stage's square output.
    #[serde(alias = "progressive_size_starting_value")]
    pub starting_size: u64,
    /// Factor applied to the resolution at every subsequent stage.
    #[serde(alias = "progressive_size_growth_factor")]
    pub growth_factor: u64,
    /// Per-stage layer width multiplier.
    #[serde(alias = "progressive_layers_scaling_factors")]
    pub layer_scaling_factors: Vec<f64>,
    /// Per-stage epoch budget.
    #[serde(alias = "progressive_epochs")]
    pub epochs: Vec<u64>,
    /// Stage used for inference when no explicit step is requested.
    pub default_forward_step: usize,
    #[serde(default, alias = "n_dimensions")]
    pub dimensionality: Dimensionality,
    /// Fade-in blend factor training starts from.
    #[serde(default)]
    pub alpha: f64,
    /// Restart the fade-in from `alpha` at every stage instead of carrying
    /// the factor over.
    #[serde(default)]
    pub reset_alpha_per_stage: bool,
}

impl ProgressiveConfig {
    /// Number of stages the configuration declares, if both sequences agree.
    pub fn stage_count(&self) -> Option<usize> {
        (self.epochs.len() == self.layer_scaling_factors.len()).then_some(self.epochs.len())
    }

    /// Check every invariant a resolvable configuration must hold.
    ///
    /// Checks run in a fixed order so the first reported reason is stable.
    pub fn validate(&self) -> ScheduleResult<()> {
        if self.starting_size == 0 {
            return Err(ScheduleError::invalid("starting size must be positive"));
        }
        if self.growth_factor <= 1 {
            return Err(ScheduleError::invalid(format!(
                "growth factor must exceed 1; a factor of {} produces a degenerate schedule with no resolution growth",
                self.growth_factor
            )));
        }
        let stages = match self.stage_count() {
            Some(n) if n > 0 => n,
            _ => {
                return Err(ScheduleError::invalid(format!(
                    "stage-defining sequences must be non-empty and equal length (layer_scaling_factors: {}, epochs: {})",
                    self.layer_scaling_factors.len(),
                    self.epochs.len()
                )));
            }
        };
        if let Some(stage) = self.epochs.iter().position(|&e| e == 0) {
            return Err(ScheduleError::invalid(format!(
                "epoch count of stage {stage} must be a positive integer"
            )));
        }
        if self.epochs.iter().try_fold(0u64, |total, &e| total.checked_add(e)).is_none() {
            return Err(ScheduleError::invalid(format!(
                "total epoch count overflows: sum of {} stage budget(s) exceeds {}",
                self.epochs.len(),
                u64::MAX
            )));
        }
        if self.default_forward_step >= stages {
            return Err(ScheduleError::invalid(format!(
                "default forward step out of range: {} not in [0, {}]",
                self.default_forward_step,
                stages - 1
            )));
        }
        if let Some(stage) =
            self.layer_scaling_factors.iter().position(|s| !s.is_finite() || *s <= 0.0)
        {
            return Err(ScheduleError::invalid(format!(
                "layer scaling factor of stage {stage} must be a positive finite number, got {}",
                self.layer_scaling_factors[stage]
            )));
        }
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(ScheduleError::invalid(format!(
                "alpha must lie in [0, 1], got {}",
                self.alpha
            )));
        }
        Ok(())
    }

    /// Load the progressive block from a configuration document on disk.
    ///
    /// The format is chosen from the file extension.
    pub fn from_path(path: impl AsRef<Path>) -> ScheduleResult<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|source| ScheduleError::Io { path: path.to_path_buf(), source })?;
        Self::from_document_str(&content, format)
    }

    /// Parse the progressive block out of a full configuration document.
    ///
    /// Keys outside `model_config.architecture` and the two model-level
    /// settings are ignored.
    pub fn from_document_str(content: &str, format: ConfigFormat) -> ScheduleResult<Self> {
        let document: ConfigDocument = match format {
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Json => serde_json::from_str(content)?,
            ConfigFormat::Toml => toml::from_str(content)?,
        };
        Ok(document.into())
    }
}

/// Serialization format of a configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> ScheduleResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            _ => Err(ScheduleError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConfigDocument {
    model_config: ModelConfigSection,
}

#[derive(Debug, Deserialize)]
struct ModelConfigSection {
    default_forward_step: usize,
    #[serde(default)]
    n_dimensions: Dimensionality,
    architecture: ArchitectureSection,
}

#[derive(Debug, Deserialize)]
struct ArchitectureSection {
    progressive_size_starting_value: u64,
    progressive_size_growth_factor: u64,
    progressive_layers_scaling_factors: Vec<f64>,
    progressive_epochs: Vec<u64>,
    #[serde(default)]
    alpha: f64,
    #[serde(default)]
    reset_alpha_per_stage: bool,
}

impl From<ConfigDocument> for ProgressiveConfig {
    fn from(document: ConfigDocument) -> Self {
        let model = document.model_config;
        let arch = model.architecture;
        Self {
            starting_size: arch.progressive_size_starting_value,
            growth_factor: arch.progressive_size_growth_factor,
            layer_scaling_factors: arch.progressive_layers_scaling_factors,
            epochs: arch.progressive_epochs,
            default_forward_step: model.default_forward_step,
            dimensionality: model.n_dimensions,
            alpha: arch.alpha,
            reset_alpha_per_stage: arch.reset_alpha_per_stage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ProgressiveConfig {
        ProgressiveConfig {
            starting_size: 4,
            growth_factor: 2,
            layer_scaling_factors: vec![1.0, 0.25],
            epochs: vec![1, 1],
            default_forward_step: 1,
            dimensionality: Dimensionality::Two,
            alpha: 0.0,
            reset_alpha_per_stage: false,
        }
    }

    fn reason(config: &ProgressiveConfig) -> String {
        match config.validate() {
            Err(ScheduleError::InvalidConfiguration(reason)) => reason,
            other => panic!("expected InvalidConfiguration, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_zero_starting_size_rejected() {
        let config = ProgressiveConfig { starting_size: 0, ..valid() };
        assert!(reason(&config).contains("starting size must be positive"));
    }

    #[test]
    fn test_growth_factor_of_one_rejected() {
        let config = ProgressiveConfig { growth_factor: 1, ..valid() };
        assert!(reason(&config).contains("growth factor must exceed 1"));
    }

    #[test]
    fn test_mismatched_lengths_rejected() {
        let config = ProgressiveConfig { epochs: vec![1, 1, 1], ..valid() };
        assert!(reason(&config).contains("non-empty and equal length"));
    }

    #[test]
    fn test_empty_sequences_rejected() {
        let config = ProgressiveConfig {
            layer_scaling_factors: vec![],
            epochs: vec![],
            default_forward_step: 0,
            ..valid()
        };
        assert!(reason(&config).contains("non-empty and equal length"));
    }

    #[test]
    fn test_zero_epoch_stage_rejected() {
        let config = ProgressiveConfig { epochs: vec![1, 0], ..valid() };
        assert!(reason(&config).contains("stage 1"));
    }

    #[test]
    fn test_overflowing_epoch_total_rejected() {
        let config = ProgressiveConfig { epochs: vec![u64::MAX, 1], ..valid() };
        assert!(reason(&config).contains("total epoch count overflows"));

        let config = ProgressiveConfig { epochs: vec![u64::MAX - 1, 1], ..valid() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_forward_step_out_of_range() {
        let config = ProgressiveConfig { default_forward_step: 2, ..valid() };
        assert!(reason(&config).contains("default forward step out of range"));
    }

    #[test]
    fn test_non_positive_layer_scale_rejected() {
        let config = ProgressiveConfig { layer_scaling_factors: vec![1.0, 0.0], ..valid() };
        assert!(reason(&config).contains("layer scaling factor of stage 1"));

        let config = ProgressiveConfig { layer_scaling_factors: vec![f64::NAN, 1.0], ..valid() };
        assert!(reason(&config).contains("stage 0"));
    }

    #[test]
    fn test_alpha_outside_unit_interval_rejected() {
        let config = ProgressiveConfig { alpha: 1.5, ..valid() };
        assert!(reason(&config).contains("alpha"));
    }

    #[test]
    fn test_flat_mapping_accepts_document_keys() {
        let json = r#"{
            "progressive_size_starting_value": 4,
            "progressive_size_growth_factor": 2,
            "progressive_layers_scaling_factors": [1, 0.25],
            "progressive_epochs": [1, 1],
            "default_forward_step": 1
        }"#;
        let config: ProgressiveConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config, valid());
    }

    #[test]
    fn test_yaml_document_ignores_unrelated_keys() {
        let yaml = r"
model_config:
  model_name: stylegan
  n_dimensions: 2
  default_forward_step: 1
  architecture:
    latent_vector_size: 512
    progressive_size_starting_value: 4
    progressive_size_growth_factor: 2
    progressive_layers_scaling_factors: [1, 0.25]
    progressive_epochs: [1, 1]
  losses:
    disc_loss: wasserstein
";
        let config = ProgressiveConfig::from_document_str(yaml, ConfigFormat::Yaml).unwrap();
        assert_eq!(config, valid());
    }

    #[test]
    fn test_toml_document() {
        let toml = r"
[model_config]
n_dimensions = 3
default_forward_step = 0

[model_config.architecture]
progressive_size_starting_value = 8
progressive_size_growth_factor = 2
progressive_layers_scaling_factors = [1.0, 0.5]
progressive_epochs = [3, 2]
alpha = 0.1
reset_alpha_per_stage = true
";
        let config = ProgressiveConfig::from_document_str(toml, ConfigFormat::Toml).unwrap();
        assert_eq!(config.starting_size, 8);
        assert_eq!(config.dimensionality, Dimensionality::Three);
        assert_eq!(config.epochs, vec![3, 2]);
        assert!((config.alpha - 0.1).abs() < f64::EPSILON);
        assert!(config.reset_alpha_per_stage);
    }

    #[test]
    fn test_negative_epoch_is_parse_error() {
        let yaml = r"
model_config:
  default_forward_step: 0
  architecture:
    progressive_size_starting_value: 4
    progressive_size_growth_factor: 2
    progressive_layers_scaling_factors: [1]
    progressive_epochs: [-1]
";
        let err = ProgressiveConfig::from_document_str(yaml, ConfigFormat::Yaml).unwrap_err();
        assert!(matches!(err, ScheduleError::Yaml(_)));
    }

    #[test]
    fn test_invalid_dimensionality_is_parse_error() {
        let json = r#"{"model_config": {"default_forward_step": 0, "n_dimensions": 4,
            "architecture": {"progressive_size_starting_value": 4,
            "progressive_size_growth_factor": 2,
            "progressive_layers_scaling_factors": [1], "progressive_epochs": [1]}}}"#;
        let err = ProgressiveConfig::from_document_str(json, ConfigFormat::Json).unwrap_err();
        assert!(err.to_string().contains("n_dimensions must be 2 or 3"));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ConfigFormat::from_path(Path::new("a/config.YML")).unwrap(), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("config.json")).unwrap(), ConfigFormat::Json);
        assert_eq!(ConfigFormat::from_path(Path::new("config.toml")).unwrap(), ConfigFormat::Toml);
        assert!(matches!(
            ConfigFormat::from_path(Path::new("config.ini")),
            Err(ScheduleError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_from_path_reports_missing_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let err = ProgressiveConfig::from_path(temp.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, ScheduleError::Io { .. }));
    }
}
