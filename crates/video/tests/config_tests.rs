use video::{CameraConfig, CaptureFormat};

#[test]
fn test_camera_defaults() {
    let config = CameraConfig::default();
    assert_eq!((config.width(), config.height()), (640, 480));
    assert_eq!(config.fps(), 30);
    assert_eq!(config.buffer_count(), 4);
    assert_eq!(config.format(), CaptureFormat::Auto);
}

#[test]
fn test_camera_builders() {
    let config = CameraConfig::default()
        .with_size(1280, 720)
        .with_fps(15)
        .with_buffer_count(2)
        .with_format(CaptureFormat::Mjpeg);
    assert_eq!((config.width(), config.height()), (1280, 720));
    assert_eq!(config.fps(), 15);
    assert_eq!(config.buffer_count(), 2);
    assert_eq!(config.format(), CaptureFormat::Mjpeg);
}

#[test]
fn test_camera_json_fills_defaults() {
    let config: CameraConfig = serde_json::from_str(r#"{"fps": 10, "format": "yuyv"}"#).unwrap();
    assert_eq!(config.fps(), 10);
    assert_eq!(config.format(), CaptureFormat::Yuyv);
    assert_eq!(config, CameraConfig::default().with_fps(10).with_format(CaptureFormat::Yuyv));
}

#[test]
fn test_unknown_format_rejected() {
    assert!(serde_json::from_str::<CameraConfig>(r#"{"format": "h264"}"#).is_err());
}
