use {
    crate::ConfigError,
    serde::{Deserialize, Serialize},
    speak::{SpeechBackend, backend_by_name},
    std::{
        path::{Path, PathBuf},
        time::Duration,
    },
    video::{CameraConfig, DeviceSelector},
};

/// Pipeline settings, loadable from JSON. Missing keys take their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    device_candidates: Vec<DeviceSelector>,
    buffer_capacity: usize,
    confidence_threshold: f32,
    announcement_interval_seconds: f64,
    speech_backend_order: Vec<String>,
    pop_timeout_ms: u64,
    read_text: bool,
    start_message: Option<String>,
    camera: CameraConfig,
    detection_log: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            device_candidates: Vec::new(),
            buffer_capacity: 5,
            confidence_threshold: 0.5,
            announcement_interval_seconds: 5.0,
            speech_backend_order: vec!["espeak".to_string(), "file".to_string()],
            pop_timeout_ms: 100,
            read_text: false,
            start_message: Some("Starting object detection.".to_string()),
            camera: CameraConfig::default(),
            detection_log: None,
        }
    }
}

impl PipelineConfig {
    /// Read and validate a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parse and validate a JSON config.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.buffer_capacity == 0 {
            return Err(ConfigError::Invalid("buffer_capacity must be at least 1".to_string()));
        }
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(ConfigError::Invalid(format!(
                "confidence_threshold {} is outside [0, 1]",
                self.confidence_threshold
            )));
        }
        let interval = Duration::try_from_secs_f64(self.announcement_interval_seconds);
        if !matches!(interval, Ok(interval) if !interval.is_zero()) {
            return Err(ConfigError::Invalid(format!(
                "announcement_interval_seconds {} must be a positive duration",
                self.announcement_interval_seconds
            )));
        }
        if self.pop_timeout_ms == 0 {
            return Err(ConfigError::Invalid("pop_timeout_ms must be positive".to_string()));
        }
        if let Some(name) = self
            .speech_backend_order
            .iter()
            .find(|name| backend_by_name(name).is_none())
        {
            return Err(ConfigError::Invalid(format!("unknown speech backend {:?}", name)));
        }
        Ok(())
    }

    /// Set the devices to probe, in order. Empty means every `/dev/video*`.
    pub fn with_device_candidates(mut self, candidates: Vec<DeviceSelector>) -> Self {
        self.device_candidates = candidates;
        self
    }

    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    pub fn with_confidence_threshold(mut self, threshold: f32) -> Self {
        self.confidence_threshold = threshold;
        self
    }

    pub fn with_announcement_interval(mut self, interval: Duration) -> Self {
        self.announcement_interval_seconds = interval.as_secs_f64();
        self
    }

    pub fn with_speech_backend_order(mut self, order: Vec<String>) -> Self {
        self.speech_backend_order = order;
        self
    }

    pub fn with_pop_timeout(mut self, timeout: Duration) -> Self {
        self.pop_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn with_read_text(mut self, read_text: bool) -> Self {
        self.read_text = read_text;
        self
    }

    /// Set what is said once the camera works. `None` says nothing.
    pub fn with_start_message(mut self, message: Option<String>) -> Self {
        self.start_message = message;
        self
    }

    pub fn with_camera(mut self, camera: CameraConfig) -> Self {
        self.camera = camera;
        self
    }

    pub fn with_detection_log(mut self, path: Option<PathBuf>) -> Self {
        self.detection_log = path;
        self
    }

    pub fn device_candidates(&self) -> &[DeviceSelector] {
        &self.device_candidates
    }

    pub fn buffer_capacity(&self) -> usize {
        self.buffer_capacity
    }

    pub fn confidence_threshold(&self) -> f32 {
        self.confidence_threshold
    }

    /// Out-of-range values saturate; [`validate`](Self::validate) rejects them.
    pub fn announcement_interval(&self) -> Duration {
        Duration::try_from_secs_f64(self.announcement_interval_seconds).unwrap_or(Duration::MAX)
    }

    pub fn speech_backend_order(&self) -> &[String] {
        &self.speech_backend_order
    }

    pub fn pop_timeout(&self) -> Duration {
        Duration::from_millis(self.pop_timeout_ms)
    }

    pub fn read_text(&self) -> bool {
        self.read_text
    }

    pub fn start_message(&self) -> Option<&str> {
        self.start_message.as_deref()
    }

    pub fn camera(&self) -> &CameraConfig {
        &self.camera
    }

    pub fn detection_log(&self) -> Option<&Path> {
        self.detection_log.as_deref()
    }

    /// Instantiate the configured speech backends, in order.
    pub fn speech_backends(&self) -> Result<Vec<Box<dyn SpeechBackend>>, ConfigError> {
        self.speech_backend_order
            .iter()
            .map(|name| {
                backend_by_name(name)
                    .ok_or_else(|| ConfigError::Invalid(format!("unknown speech backend {:?}", name)))
            })
            .collect()
    }
}
