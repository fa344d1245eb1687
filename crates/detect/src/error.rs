use thiserror::Error;

#[derive(Debug, Error)]
pub enum DetectionError {
    #[error("model not loaded: {0}")]
    NotLoaded(String),
    #[error("inference error: {0}")]
    Inference(String),
    #[error("protocol error: {0}")]
    Protocol(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("ocr engine error: {0}")]
    Engine(String),
    #[error("encode error: {0}")]
    Encode(#[from] video::ImageError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
