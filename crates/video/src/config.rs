use serde::{Deserialize, Serialize};

/// Pixel format to ask the camera for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureFormat {
    /// YUYV if offered, else MJPEG.
    #[default]
    Auto,
    Yuyv,
    Mjpeg,
}

/// Capture parameters requested from a camera. Devices may round them to the
/// nearest mode they support.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    width: u32,
    height: u32,
    fps: u32,
    buffer_count: u32,
    format: CaptureFormat,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            fps: 30,
            buffer_count: 4,
            format: CaptureFormat::Auto,
        }
    }
}

impl CameraConfig {
    /// Request a `width` x `height` image.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    /// Number of driver-side mmap buffers.
    pub fn with_buffer_count(mut self, buffer_count: u32) -> Self {
        self.buffer_count = buffer_count;
        self
    }

    pub fn with_format(mut self, format: CaptureFormat) -> Self {
        self.format = format;
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn buffer_count(&self) -> u32 {
        self.buffer_count
    }

    pub fn format(&self) -> CaptureFormat {
        self.format
    }
}
