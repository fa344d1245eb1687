use {
    crate::DetectionError,
    serde::{Deserialize, Serialize},
    video::Frame,
};

/// Axis-aligned box in pixel coordinates, `(x0, y0)` top-left to `(x1, y1)`
/// bottom-right. Serialized as `[x0, y0, x1, y1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct BoundingBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl BoundingBox {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }
}

impl From<[f32; 4]> for BoundingBox {
    fn from([x0, y0, x1, y1]: [f32; 4]) -> Self {
        Self { x0, y0, x1, y1 }
    }
}

impl From<BoundingBox> for [f32; 4] {
    fn from(b: BoundingBox) -> Self {
        [b.x0, b.y0, b.x1, b.y1]
    }
}

/// One labeled, scored object found in a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub label: String,
    pub confidence: f32,
    pub bbox: BoundingBox,
}

impl Detection {
    pub fn new(label: impl Into<String>, confidence: f32, bbox: BoundingBox) -> Self {
        Self {
            label: label.into(),
            confidence,
            bbox,
        }
    }
}

/// Object detection capability.
///
/// `threshold` is a hint; callers filter the result again, so implementations
/// may return lower-scored detections.
pub trait Detector: Send {
    fn detect(&mut self, frame: &Frame, threshold: f32) -> Result<Vec<Detection>, DetectionError>;
}

impl<D: Detector + ?Sized> Detector for Box<D> {
    fn detect(&mut self, frame: &Frame, threshold: f32) -> Result<Vec<Detection>, DetectionError> {
        (**self).detect(frame, threshold)
    }
}
