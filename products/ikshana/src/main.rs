use {
    anyhow::{Context, Result},
    detect::{CsvDetectionLog, DetectionWorker, ProcessDetector, ProcessDetectorConfig, TesseractReader},
    pipeline::{PipelineConfig, PipelineController, PipelineError},
    serde::Deserialize,
    std::{env, path::Path, path::PathBuf},
    tokio::signal::{self, unix::SignalKind},
    video::V4l2Source,
};

/// Everything in `ikshana.json`: the pipeline settings plus the external
/// tools behind detection and text reading.
#[derive(Debug, Deserialize)]
struct AppConfig {
    #[serde(flatten)]
    pipeline: PipelineConfig,
    detector: ProcessDetectorConfig,
    #[serde(default)]
    ocr_language: Option<String>,
}

impl AppConfig {
    fn parse(text: &str) -> Result<Self> {
        let config: AppConfig = serde_json::from_str(text)?;
        config.pipeline.validate()?;
        Ok(config)
    }

    fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("bad config {}", path.display()))
    }
}

async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    let mut terminate = signal::unix::signal(SignalKind::terminate())?;
    tokio::select! {
        result = signal::ctrl_c() => result,
        _ = terminate.recv() => Ok(()),
    }
}

fn build_worker(config: &AppConfig) -> Result<DetectionWorker> {
    let detector = ProcessDetector::spawn(config.detector.clone())
        .context("cannot start the detector")?;
    let mut worker =
        DetectionWorker::new(Box::new(detector), config.pipeline.confidence_threshold());

    if config.pipeline.read_text() {
        let mut reader = TesseractReader::new();
        if let Some(language) = &config.ocr_language {
            reader = reader.with_language(language);
        }
        worker = worker.with_reader(Box::new(reader));
    }

    if let Some(path) = config.pipeline.detection_log() {
        let log = CsvDetectionLog::create(path)
            .with_context(|| format!("cannot create {}", path.display()))?;
        worker = worker.with_sink(Box::new(log));
    }
    Ok(worker)
}

#[tokio::main]
async fn main() -> Result<()> {
    match env::var("IKSHANA_LOG_DIR") {
        Ok(dir) => base::init_file_logger(&dir)
            .with_context(|| format!("cannot log to {}", dir))?,
        Err(_) => base::init_stdout_logger(),
    }

    let config_path: PathBuf = env::var("IKSHANA_CONFIG")
        .unwrap_or_else(|_| "ikshana.json".to_string())
        .into();
    log::info!("loading {}", config_path.display());
    let config = AppConfig::load(&config_path)?;

    let worker = build_worker(&config)?;
    let backends = config.pipeline.speech_backends()?;
    let source = V4l2Source::new(config.pipeline.camera().clone());
    let mut controller =
        PipelineController::new(config.pipeline, Box::new(source), worker, backends)?;

    match controller.start().await {
        Ok(device) => log::info!("watching through {}", device),
        Err(PipelineError::NoCamera) => {
            base::log_fatal!("no camera could be opened, check device_candidates")
        }
        Err(error) => return Err(error.into()),
    }

    tokio::select! {
        result = wait_for_shutdown_signal() => match result {
            Ok(()) => log::info!("shutdown requested"),
            Err(error) => log::error!("cannot listen for signals: {}", error),
        },
        _ = controller.stopping() => {
            log::warn!(
                "pipeline stopped: {}",
                controller.stop_cause().unwrap_or_else(|| "unknown cause".to_string())
            );
        }
    }

    controller.stop().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_config_parses() {
        let config = AppConfig::parse(include_str!("../ikshana.json")).unwrap();
        assert_eq!(config.detector.program, PathBuf::from("python3"));
        assert_eq!(config.ocr_language.as_deref(), Some("eng"));
        assert_eq!(config.pipeline.speech_backend_order(), ["espeak", "file", "log"]);
        assert_eq!(config.pipeline.detection_log(), Some(Path::new("detections.csv")));
    }

    #[test]
    fn test_detector_is_required() {
        assert!(AppConfig::parse(r#"{"buffer_capacity": 3}"#).is_err());
    }

    #[test]
    fn test_invalid_pipeline_settings_rejected() {
        let text = r#"{"confidence_threshold": 2.0, "detector": {"program": "detect"}}"#;
        assert!(AppConfig::parse(text).is_err());
    }
}
