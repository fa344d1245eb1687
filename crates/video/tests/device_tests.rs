use std::{fs, path::PathBuf};
use video::{DeviceSelector, list_candidate_devices_in};

#[test]
fn test_list_candidate_devices_orders_numerically() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["video10", "video2", "video0", "videoX", "audio1", "video"] {
        fs::write(dir.path().join(name), b"").unwrap();
    }

    let devices = list_candidate_devices_in(dir.path());

    assert_eq!(
        devices,
        vec![
            DeviceSelector::Path(dir.path().join("video0")),
            DeviceSelector::Path(dir.path().join("video2")),
            DeviceSelector::Path(dir.path().join("video10")),
        ]
    );
}

#[test]
fn test_list_candidate_devices_missing_dir_is_empty() {
    assert!(list_candidate_devices_in(&PathBuf::from("/nonexistent/devices")).is_empty());
}

#[test]
fn test_device_selector_display() {
    assert_eq!(DeviceSelector::Index(3).to_string(), "/dev/video3");
    assert_eq!(
        DeviceSelector::Path(PathBuf::from("/dev/v4l/by-id/usb-cam")).to_string(),
        "/dev/v4l/by-id/usb-cam"
    );
}

#[test]
fn test_device_selector_from_json() {
    let selectors: Vec<DeviceSelector> =
        serde_json::from_str(r#"[5, "/dev/video2", 0]"#).unwrap();
    assert_eq!(
        selectors,
        vec![
            DeviceSelector::Index(5),
            DeviceSelector::Path(PathBuf::from("/dev/video2")),
            DeviceSelector::Index(0),
        ]
    );
}
