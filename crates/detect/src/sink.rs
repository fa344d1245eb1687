use {
    crate::{BoundingBox, Detection, SinkError},
    chrono::{DateTime, Local},
    std::{fs::File, path::Path, time::SystemTime},
};

/// One retained detection, as written to the detection log.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionRecord {
    pub timestamp: DateTime<Local>,
    pub label: String,
    pub confidence: f32,
    pub bbox: BoundingBox,
}

impl DetectionRecord {
    pub fn new(timestamp: SystemTime, detection: &Detection) -> Self {
        Self {
            timestamp: DateTime::<Local>::from(timestamp),
            label: detection.label.clone(),
            confidence: detection.confidence,
            bbox: detection.bbox,
        }
    }
}

/// Append-only consumer of detection records.
pub trait DetectionSink: Send {
    fn record(&mut self, record: &DetectionRecord) -> Result<(), SinkError>;
}

/// CSV detection log with `Timestamp,Object,Confidence,Bounding Box` columns.
///
/// Every record is flushed as it is written.
pub struct CsvDetectionLog {
    writer: csv::Writer<File>,
}

impl CsvDetectionLog {
    /// Create (or truncate) the log at `path` and write the header row.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(["Timestamp", "Object", "Confidence", "Bounding Box"])?;
        writer.flush()?;
        Ok(Self { writer })
    }
}

impl DetectionSink for CsvDetectionLog {
    fn record(&mut self, record: &DetectionRecord) -> Result<(), SinkError> {
        let bbox = &record.bbox;
        self.writer.write_record([
            record.timestamp.format("%Y-%m-%d %H:%M:%S%.6f").to_string(),
            record.label.clone(),
            format!("{:.2}", record.confidence),
            format!(
                "({}, {}, {}, {})",
                bbox.x0.round() as i64,
                bbox.y0.round() as i64,
                bbox.x1.round() as i64,
                bbox.y1.round() as i64
            ),
        ])?;
        self.writer.flush()?;
        Ok(())
    }
}
