use {
    crate::{DetectionRecord, DetectionSink, DetectionSummary, Detector, TextReader},
    video::Frame,
};

/// Runs the detection capability on frames and aggregates the results.
///
/// Capability failures never escape: a failed detection is an empty summary,
/// a failed OCR call is empty text, a failed sink write is dropped. All of
/// them are logged.
pub struct DetectionWorker {
    detector: Box<dyn Detector>,
    threshold: f32,
    reader: Option<Box<dyn TextReader>>,
    sink: Option<Box<dyn DetectionSink>>,
}

impl DetectionWorker {
    pub fn new(detector: Box<dyn Detector>, threshold: f32) -> Self {
        Self {
            detector,
            threshold,
            reader: None,
            sink: None,
        }
    }

    /// Also read text from frames with `reader`.
    pub fn with_reader(mut self, reader: Box<dyn TextReader>) -> Self {
        self.reader = Some(reader);
        self
    }

    /// Forward every retained detection to `sink`.
    pub fn with_sink(mut self, sink: Box<dyn DetectionSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn reads_text(&self) -> bool {
        self.reader.is_some()
    }

    /// Detect objects in `frame` and count them by label.
    ///
    /// Detections scoring below the threshold are discarded; a score equal to
    /// the threshold is kept.
    pub fn process(&mut self, frame: &Frame) -> DetectionSummary {
        let detections = match self.detector.detect(frame, self.threshold) {
            Ok(detections) => detections,
            Err(error) => {
                log::error!("detection failed on frame {}: {}", frame.sequence(), error);
                return DetectionSummary::new();
            }
        };

        let mut summary = DetectionSummary::new();
        for detection in detections.iter().filter(|d| d.confidence >= self.threshold) {
            summary.add(&detection.label);
            if let Some(sink) = self.sink.as_mut() {
                let record = DetectionRecord::new(frame.timestamp(), detection);
                if let Err(error) = sink.record(&record) {
                    log::warn!("failed to log detection of {}: {}", detection.label, error);
                }
            }
        }

        log::debug!(
            "frame {}: {} of {} detections kept ({})",
            frame.sequence(),
            summary.total(),
            detections.len(),
            summary
        );
        summary
    }

    /// Read text in `frame`, trimmed. Empty when there is no reader, nothing
    /// was found, or the reader failed.
    pub fn read_text(&mut self, frame: &Frame) -> String {
        let Some(reader) = self.reader.as_mut() else {
            return String::new();
        };
        match reader.extract_text(frame) {
            Ok(text) => text.trim().to_string(),
            Err(error) => {
                log::error!("text recognition failed on frame {}: {}", frame.sequence(), error);
                String::new()
            }
        }
    }
}
