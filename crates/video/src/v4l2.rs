use {
    crate::{
        CameraConfig, CameraError, CaptureFormat, DeviceSelector, Frame, FrameSource,
        convert::{jpeg_to_rgb, yuyv_to_rgb},
    },
    v4l::{
        Device, Format, FourCC, buffer::Type, io::mmap::Stream as MmapStream,
        io::traits::CaptureStream, video::Capture,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    Yuyv,
    Mjpeg,
}

/// V4L2 camera delivering RGB frames.
///
/// With [`CaptureFormat::Auto`] YUYV is preferred and MJPEG used when the
/// device does not offer it.
pub struct V4l2Source {
    config: CameraConfig,
    stream: Option<MmapStream<'static>>,
    device: Option<DeviceSelector>,
    size: (usize, usize),
    layout: Layout,
    sequence: u64,
}

impl std::fmt::Debug for V4l2Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("V4l2Source")
            .field("config", &self.config)
            .field("device", &self.device)
            .field("open", &self.stream.is_some())
            .field("size", &self.size)
            .field("layout", &self.layout)
            .finish()
    }
}

impl V4l2Source {
    pub fn new(config: CameraConfig) -> Self {
        Self {
            config,
            stream: None,
            device: None,
            size: (0, 0),
            layout: Layout::Yuyv,
            sequence: 0,
        }
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    fn negotiate(&self, device: &Device) -> Result<(Format, Layout), CameraError> {
        let wanted: &[(&[u8; 4], Layout)] = match self.config.format() {
            CaptureFormat::Auto => &[(b"YUYV", Layout::Yuyv), (b"MJPG", Layout::Mjpeg)],
            CaptureFormat::Yuyv => &[(b"YUYV", Layout::Yuyv)],
            CaptureFormat::Mjpeg => &[(b"MJPG", Layout::Mjpeg)],
        };
        for &(fourcc, layout) in wanted {
            let requested = Format::new(self.config.width(), self.config.height(), FourCC::new(fourcc));
            let actual = Capture::set_format(device, &requested)?;
            if &actual.fourcc.repr == fourcc {
                return Ok((actual, layout));
            }
        }
        Err(CameraError::Device(format!(
            "device does not offer {:?} capture",
            self.config.format()
        )))
    }
}

impl FrameSource for V4l2Source {
    fn open(&mut self, selector: &DeviceSelector) -> Result<(), CameraError> {
        self.close();

        let device = match selector {
            DeviceSelector::Index(index) => Device::new(*index)?,
            DeviceSelector::Path(path) => Device::with_path(path)?,
        };

        let (format, layout) = self.negotiate(&device)?;

        let params = v4l::video::capture::Parameters::with_fps(self.config.fps());
        let actual_params = Capture::set_params(&device, &params)?;

        let stream = MmapStream::with_buffers(&device, Type::VideoCapture, self.config.buffer_count())
            .map_err(|error| CameraError::Stream(error.to_string()))?;

        log::info!(
            "opened {} as {}x{} {:?} at {}/{} s",
            selector,
            format.width,
            format.height,
            layout,
            actual_params.interval.numerator,
            actual_params.interval.denominator
        );

        self.size = (format.width as usize, format.height as usize);
        self.layout = layout;
        self.stream = Some(stream);
        self.device = Some(selector.clone());
        Ok(())
    }

    fn next_frame(&mut self) -> Result<Frame, CameraError> {
        let (width, height) = self.size;
        let layout = self.layout;
        let stream = self.stream.as_mut().ok_or(CameraError::NotOpen)?;

        let (data, _metadata) =
            CaptureStream::next(stream).map_err(|error| CameraError::Stream(error.to_string()))?;

        let frame = match layout {
            Layout::Yuyv => {
                let rgb = yuyv_to_rgb(data, width, height).ok_or_else(|| {
                    CameraError::Stream(format!("short YUYV buffer: {} bytes", data.len()))
                })?;
                Frame::new(width, height, 3, rgb)?
            }
            Layout::Mjpeg => {
                let (width, height, rgb) = jpeg_to_rgb(data)?;
                Frame::new(width, height, 3, rgb)?
            }
        };

        self.sequence += 1;
        Ok(frame.with_sequence(self.sequence))
    }

    fn close(&mut self) {
        if self.stream.take().is_some() {
            if let Some(device) = self.device.take() {
                log::info!("closed camera device {}", device);
            }
        }
    }
}

impl Drop for V4l2Source {
    fn drop(&mut self) {
        self.close();
    }
}
