//! The ikshana frame pipeline.
//!
//! One blocking unit reads the camera into a [`BoundedFrameBuffer`]; another
//! pops frames, runs the [`DetectionWorker`](detect::DetectionWorker), feeds
//! an [`AnnouncementThrottle`] and hands approved announcements to the
//! [`SpeechDispatcher`](speak::SpeechDispatcher). The [`PipelineController`]
//! owns all of it and drives the `Created -> Running -> Stopping -> Stopped`
//! lifecycle.

pub mod buffer;
pub mod config;
pub mod controller;
pub mod error;
pub mod state;
pub mod throttle;

pub use buffer::BoundedFrameBuffer;
pub use config::PipelineConfig;
pub use controller::PipelineController;
pub use error::{ConfigError, PipelineError};
pub use state::{PipelineState, RunState};
pub use throttle::{Announcement, AnnouncementThrottle, ThrottleState};
