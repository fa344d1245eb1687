//! Camera acquisition for the ikshana pipeline.
//!
//! A [`FrameSource`] opens one device at a time and hands out RGB [`Frame`]s.
//! [`discover`] walks a list of [`DeviceSelector`] candidates and keeps the
//! first one that both opens and delivers a frame.

pub mod config;
pub mod convert;
pub mod device;
pub mod error;
pub mod frame;
pub mod source;

#[cfg(feature = "v4l2")]
pub mod v4l2;

pub use config::{CameraConfig, CaptureFormat};
pub use device::{DeviceSelector, list_candidate_devices, list_candidate_devices_in};
pub use error::CameraError;
pub use frame::Frame;
pub use source::{FrameSource, discover};

pub use crates_image::ImageError;

#[cfg(feature = "v4l2")]
pub use v4l2::V4l2Source;
