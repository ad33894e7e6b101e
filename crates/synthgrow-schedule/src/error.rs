use std::path::PathBuf;
use thiserror::Error;

pub type ScheduleResult<T> = std::result::Result<T, ScheduleError>;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("invalid progressive configuration: {0}")]
    InvalidConfiguration(String),

    #[error("stage index {index} is out of range for a schedule of {len} stage(s)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("global epoch {epoch} is out of range for a schedule of {total} epoch(s)")]
    EpochOutOfRange { epoch: u64, total: u64 },

    #[error("schedule already finished; no stage remains to train")]
    ScheduleComplete,

    #[error("failed to read configuration file at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl ScheduleError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration(reason.into())
    }
}
