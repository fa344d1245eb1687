use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};
use video::{CameraError, DeviceSelector, Frame, FrameSource, discover};

#[derive(Clone, Copy)]
enum Behavior {
    FailOpen,
    FailRead,
    Works,
}

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Open(DeviceSelector),
    Read,
    Close,
}

struct MockSource {
    behaviors: HashMap<DeviceSelector, Behavior>,
    current: Option<Behavior>,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl MockSource {
    fn new(behaviors: &[(usize, Behavior)]) -> (Self, Arc<Mutex<Vec<Call>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let source = Self {
            behaviors: behaviors
                .iter()
                .map(|(index, behavior)| (DeviceSelector::Index(*index), *behavior))
                .collect(),
            current: None,
            calls: Arc::clone(&calls),
        };
        (source, calls)
    }
}

impl FrameSource for MockSource {
    fn open(&mut self, device: &DeviceSelector) -> Result<(), CameraError> {
        self.calls.lock().unwrap().push(Call::Open(device.clone()));
        match self.behaviors.get(device) {
            Some(Behavior::FailOpen) | None => Err(CameraError::Device("no such device".to_string())),
            Some(behavior) => {
                self.current = Some(*behavior);
                Ok(())
            }
        }
    }

    fn next_frame(&mut self) -> Result<Frame, CameraError> {
        self.calls.lock().unwrap().push(Call::Read);
        match self.current {
            Some(Behavior::Works) => Frame::new(2, 2, 3, vec![0u8; 12]),
            Some(_) => Err(CameraError::Stream("read failed".to_string())),
            None => Err(CameraError::NotOpen),
        }
    }

    fn close(&mut self) {
        self.calls.lock().unwrap().push(Call::Close);
        self.current = None;
    }
}

fn candidates(indices: &[usize]) -> Vec<DeviceSelector> {
    indices.iter().copied().map(DeviceSelector::from).collect()
}

#[test]
fn test_discover_skips_unopenable_and_unreadable_devices() {
    let (mut source, calls) = MockSource::new(&[
        (5, Behavior::FailOpen),
        (0, Behavior::FailRead),
        (2, Behavior::Works),
        (7, Behavior::Works),
    ]);

    let found = discover(&mut source, &candidates(&[5, 0, 2, 7]));

    assert_eq!(found, Some(DeviceSelector::Index(2)));
    let calls = calls.lock().unwrap().clone();
    assert_eq!(
        calls,
        vec![
            Call::Open(DeviceSelector::Index(5)),
            Call::Close,
            Call::Open(DeviceSelector::Index(0)),
            Call::Read,
            Call::Close,
            Call::Open(DeviceSelector::Index(2)),
            Call::Read,
        ]
    );
    assert!(!calls.contains(&Call::Open(DeviceSelector::Index(7))));
}

#[test]
fn test_discover_leaves_winning_device_open() {
    let (mut source, _calls) = MockSource::new(&[(1, Behavior::Works)]);

    assert_eq!(discover(&mut source, &candidates(&[1])), Some(DeviceSelector::Index(1)));
    assert!(source.next_frame().is_ok());
}

#[test]
fn test_discover_returns_none_when_all_fail() {
    let (mut source, calls) = MockSource::new(&[(0, Behavior::FailRead), (1, Behavior::FailOpen)]);

    assert_eq!(discover(&mut source, &candidates(&[0, 1, 3])), None);
    assert_eq!(calls.lock().unwrap().last(), Some(&Call::Close));
    assert!(matches!(source.next_frame(), Err(CameraError::NotOpen)));
}

#[test]
fn test_discover_with_no_candidates() {
    let (mut source, calls) = MockSource::new(&[(0, Behavior::Works)]);

    assert_eq!(discover(&mut source, &[]), None);
    assert!(calls.lock().unwrap().is_empty());
}

#[test]
fn test_discover_through_boxed_source() {
    let (source, _calls) = MockSource::new(&[(3, Behavior::Works)]);
    let mut boxed: Box<dyn FrameSource> = Box::new(source);

    assert_eq!(discover(&mut boxed, &candidates(&[3])), Some(DeviceSelector::Index(3)));
}
