use {
    std::{
        collections::VecDeque,
        sync::{
            Condvar, Mutex,
            atomic::{AtomicU64, Ordering},
        },
        time::Duration,
    },
    video::Frame,
};

struct Slots {
    frames: VecDeque<Frame>,
    closed: bool,
}

/// Fixed-capacity frame queue between the camera and the detector.
///
/// The producer never waits: a push into a full buffer evicts the oldest
/// frame. The consumer waits up to a timeout so it can keep checking whether
/// the pipeline is still running.
pub struct BoundedFrameBuffer {
    slots: Mutex<Slots>,
    available: Condvar,
    capacity: usize,
    evicted: AtomicU64,
    rejected: AtomicU64,
}

impl BoundedFrameBuffer {
    /// A capacity of 0 is treated as 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            slots: Mutex::new(Slots {
                frames: VecDeque::with_capacity(capacity),
                closed: false,
            }),
            available: Condvar::new(),
            capacity,
            evicted: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
        }
    }

    /// Insert `frame`, evicting the oldest frame when full.
    ///
    /// Returns `false` if the buffer is closed; the frame is dropped and
    /// counted as rejected.
    pub fn push(&self, frame: Frame) -> bool {
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        if slots.closed {
            self.rejected.fetch_add(1, Ordering::Relaxed);
            return false;
        }
        if slots.frames.len() >= self.capacity {
            slots.frames.pop_front();
            self.evicted.fetch_add(1, Ordering::Relaxed);
        }
        slots.frames.push_back(frame);
        drop(slots);
        self.available.notify_one();
        true
    }

    /// Take the oldest frame, waiting up to `timeout` for one to arrive.
    ///
    /// `None` when the wait timed out or the buffer is closed and empty.
    pub fn pop(&self, timeout: Duration) -> Option<Frame> {
        let slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        let (mut slots, _) = self
            .available
            .wait_timeout_while(slots, timeout, |slots| {
                slots.frames.is_empty() && !slots.closed
            })
            .unwrap_or_else(|e| e.into_inner());
        slots.frames.pop_front()
    }

    /// Reject further pushes and wake a waiting consumer.
    pub fn close(&self) {
        self.slots.lock().unwrap_or_else(|e| e.into_inner()).closed = true;
        self.available.notify_all();
    }

    /// Drop all retained frames, returning how many there were.
    pub fn drain(&self) -> usize {
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        let count = slots.frames.len();
        slots.frames.clear();
        count
    }

    pub fn is_closed(&self) -> bool {
        self.slots.lock().unwrap_or_else(|e| e.into_inner()).closed
    }

    pub fn len(&self) -> usize {
        self.slots.lock().unwrap_or_else(|e| e.into_inner()).frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Frames pushed out by newer ones.
    pub fn evicted(&self) -> u64 {
        self.evicted.load(Ordering::Relaxed)
    }

    /// Frames refused after close.
    pub fn rejected(&self) -> u64 {
        self.rejected.load(Ordering::Relaxed)
    }
}
