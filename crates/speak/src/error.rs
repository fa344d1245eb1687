use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("backend error: {0}")]
    Backend(String),
    #[error("all {0} speech backends failed")]
    Exhausted(usize),
    #[error("speech canceled")]
    Canceled,
    #[error("speech dispatcher closed")]
    Closed,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
