//! Per-frame detection for the ikshana pipeline.
//!
//! The model, the OCR engine and the record log are capabilities behind the
//! [`Detector`], [`TextReader`] and [`DetectionSink`] traits. The
//! [`DetectionWorker`] drives them once per frame and folds the detections
//! into a [`DetectionSummary`].

pub mod detection;
pub mod error;
pub mod ocr;
pub mod process;
pub mod sink;
pub mod summary;
pub mod worker;

pub use detection::{BoundingBox, Detection, Detector};
pub use error::{DetectionError, OcrError, SinkError};
pub use ocr::{TesseractReader, TextReader};
pub use process::{ProcessDetector, ProcessDetectorConfig};
pub use sink::{CsvDetectionLog, DetectionRecord, DetectionSink};
pub use summary::DetectionSummary;
pub use worker::DetectionWorker;
