use thiserror::Error;

#[derive(Debug, Error)]
pub enum CameraError {
    #[error("device error: {0}")]
    Device(String),
    #[error("stream error: {0}")]
    Stream(String),
    #[error("decode error: {0}")]
    Decode(#[from] crates_image::ImageError),
    #[error("end of stream")]
    EndOfStream,
    #[error("device not open")]
    NotOpen,
}

impl From<std::io::Error> for CameraError {
    fn from(err: std::io::Error) -> Self {
        CameraError::Device(err.to_string())
    }
}
