use crate::CameraError;

// BT.601 YUV-to-RGB conversion for a single pixel (fixed-point, shift 8)
fn yuv_to_rgb(y: u8, u: u8, v: u8) -> [u8; 3] {
    let y = y as i32;
    let u = u as i32 - 128;
    let v = v as i32 - 128;
    let r = (y + ((359 * v) >> 8)).clamp(0, 255) as u8;
    let g = (y - ((88 * u + 183 * v) >> 8)).clamp(0, 255) as u8;
    let b = (y + ((454 * u) >> 8)).clamp(0, 255) as u8;
    [r, g, b]
}

/// Converts packed YUYV (4:2:2) to interleaved RGB.
///
/// Each `[Y0, U, Y1, V]` group yields two pixels sharing U and V.
/// Returns `None` if `data` is shorter than `width * height * 2` bytes.
pub fn yuyv_to_rgb(data: &[u8], width: usize, height: usize) -> Option<Vec<u8>> {
    let pixel_count = width * height;
    let expected_len = pixel_count * 2;
    if data.len() < expected_len {
        return None;
    }

    let mut rgb = Vec::with_capacity(pixel_count * 3);
    for chunk in data[..expected_len].chunks_exact(4) {
        rgb.extend_from_slice(&yuv_to_rgb(chunk[0], chunk[1], chunk[3]));
        rgb.extend_from_slice(&yuv_to_rgb(chunk[2], chunk[1], chunk[3]));
    }
    Some(rgb)
}

/// Decode a JPEG (MJPEG frame) into `(width, height, rgb)`.
pub fn jpeg_to_rgb(data: &[u8]) -> Result<(usize, usize, Vec<u8>), CameraError> {
    let decoded =
        crates_image::load_from_memory_with_format(data, crates_image::ImageFormat::Jpeg)?;
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();
    Ok((width as usize, height as usize, rgb.into_raw()))
}
