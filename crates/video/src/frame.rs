use {
    crate::CameraError,
    crates_image::{ExtendedColorType, ImageEncoder, codecs::png::PngEncoder},
    std::time::SystemTime,
};

/// One captured image, interleaved 8-bit samples in row-major HWC order.
///
/// Fields are private so a frame cannot change once it has been handed to
/// the pipeline.
#[derive(Clone, Debug)]
pub struct Frame {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<u8>,
    timestamp: SystemTime,
    sequence: u64,
}

impl Frame {
    /// Wrap a pixel buffer, stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns `CameraError::Stream` if `data` does not hold exactly
    /// `width * height * channels` bytes.
    pub fn new(
        width: usize,
        height: usize,
        channels: usize,
        data: Vec<u8>,
    ) -> Result<Self, CameraError> {
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(channels))
            .ok_or_else(|| CameraError::Stream("frame dimensions overflow".to_string()))?;
        if data.len() != expected {
            return Err(CameraError::Stream(format!(
                "frame size mismatch: expected {} bytes for {}x{}x{}, got {}",
                expected,
                width,
                height,
                channels,
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
            timestamp: SystemTime::now(),
            sequence: 0,
        })
    }

    pub fn with_sequence(mut self, sequence: u64) -> Self {
        self.sequence = sequence;
        self
    }

    pub fn with_timestamp(mut self, timestamp: SystemTime) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn timestamp(&self) -> SystemTime {
        self.timestamp
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Encode the frame as PNG, for handing it to external tools.
    pub fn to_png(&self) -> Result<Vec<u8>, crates_image::ImageError> {
        let color = match self.channels {
            1 => ExtendedColorType::L8,
            2 => ExtendedColorType::La8,
            3 => ExtendedColorType::Rgb8,
            4 => ExtendedColorType::Rgba8,
            n => {
                return Err(crates_image::ImageError::Unsupported(
                    crates_image::error::UnsupportedError::from_format_and_kind(
                        crates_image::error::ImageFormatHint::Unknown,
                        crates_image::error::UnsupportedErrorKind::GenericFeature(format!(
                            "{} channel frames",
                            n
                        )),
                    ),
                ));
            }
        };
        let (Ok(width), Ok(height)) = (u32::try_from(self.width), u32::try_from(self.height))
        else {
            return Err(crates_image::ImageError::Parameter(
                crates_image::error::ParameterError::from_kind(
                    crates_image::error::ParameterErrorKind::Generic(format!(
                        "{}x{} frame is too large to encode",
                        self.width, self.height
                    )),
                ),
            ));
        };
        let mut png = Vec::new();
        PngEncoder::new(&mut png).write_image(&self.data, width, height, color)?;
        Ok(png)
    }
}
