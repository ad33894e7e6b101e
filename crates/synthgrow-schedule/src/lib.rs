//! synthgrow schedule
//!
//! Progressive-growing schedule primitives for StyleGAN-style synthesis:
//! - Loading the progressive block of a training configuration (`ProgressiveConfig`)
//! - Resolving it into an explicit, validated stage list (`resolve`, `Schedule`)
//! - Tracking the active stage across epochs and resumes (`StageCursor`)
//! - Fading newly grown blocks in (`FadeIn`)
//! - Reporting schedule progress (`ProgressSink`)

pub mod config;
pub mod cursor;
pub mod error;
pub mod fade;
pub mod progress;
pub mod resolver;
pub mod schedule;
pub mod stage;

pub use config::{ConfigFormat, Dimensionality, ProgressiveConfig};
pub use cursor::{StageCursor, StageTransition};
pub use error::{ScheduleError, ScheduleResult};
pub use fade::FadeIn;
pub use progress::{drive, DriveSummary, ProgressEvent, ProgressSink, StdoutProgressSink, TracingProgressSink};
pub use resolver::resolve;
pub use schedule::Schedule;
pub use stage::Stage;
