use crate::{CameraError, DeviceSelector, Frame};

/// A camera that can be opened on one device at a time.
///
/// All calls block; run them off the async runtime.
pub trait FrameSource: Send {
    /// Acquire `device`. Any previously opened device is released first.
    fn open(&mut self, device: &DeviceSelector) -> Result<(), CameraError>;

    /// Read the next frame. `CameraError::EndOfStream` means no more frames
    /// will come; any other error is a capture failure.
    fn next_frame(&mut self) -> Result<Frame, CameraError>;

    /// Release the device. Must be safe to call repeatedly, and after an
    /// `open` that failed partway.
    fn close(&mut self);
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn open(&mut self, device: &DeviceSelector) -> Result<(), CameraError> {
        (**self).open(device)
    }

    fn next_frame(&mut self) -> Result<Frame, CameraError> {
        (**self).next_frame()
    }

    fn close(&mut self) {
        (**self).close()
    }
}

/// Probe `candidates` in order and keep the first device that opens and
/// delivers a frame.
///
/// On success the source is left open on the returned device and no later
/// candidate is touched. Returns `None` when every candidate fails, with the
/// source closed.
pub fn discover<S: FrameSource + ?Sized>(
    source: &mut S,
    candidates: &[DeviceSelector],
) -> Option<DeviceSelector> {
    for candidate in candidates {
        log::info!("trying camera device {}", candidate);

        if let Err(error) = source.open(candidate) {
            log::warn!("could not open camera device {}: {}", candidate, error);
            source.close();
            continue;
        }

        match source.next_frame() {
            Ok(frame) => {
                log::info!(
                    "camera device {} works: {}x{}",
                    candidate,
                    frame.width(),
                    frame.height()
                );
                return Some(candidate.clone());
            }
            Err(error) => {
                log::warn!("could not read frame from device {}: {}", candidate, error);
                source.close();
            }
        }
    }
    None
}
