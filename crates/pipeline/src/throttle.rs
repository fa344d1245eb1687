use {
    detect::DetectionSummary,
    std::time::{Duration, Instant},
};

/// A message approved for speech.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub text: String,
    pub timestamp: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleState {
    Idle,
    Cooling,
}

/// Lets through at most one announcement per interval.
///
/// Anything offered while cooling is discarded, so the next announcement
/// reflects whatever is offered first once the interval has passed. Empty
/// offers never emit and never restart the interval.
#[derive(Debug, Clone)]
pub struct AnnouncementThrottle {
    interval: Duration,
    last: Option<Instant>,
}

impl AnnouncementThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn state(&self, now: Instant) -> ThrottleState {
        match self.last {
            Some(last) if now.saturating_duration_since(last) < self.interval => {
                ThrottleState::Cooling
            }
            _ => ThrottleState::Idle,
        }
    }

    /// Offer a frame's detections. Emits `I see {label}: {count}, ...` in the
    /// summary's first-seen label order.
    pub fn offer(&mut self, summary: &DetectionSummary, now: Instant) -> Option<Announcement> {
        if summary.is_empty() {
            return None;
        }
        self.emit(now, || format!("I see {}", summary))
    }

    /// Offer recognized text. Emits `Found text: {text}`.
    pub fn offer_text(&mut self, text: &str, now: Instant) -> Option<Announcement> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.emit(now, || format!("Found text: {}", text))
    }

    fn emit(&mut self, now: Instant, text: impl FnOnce() -> String) -> Option<Announcement> {
        if self.state(now) == ThrottleState::Cooling {
            return None;
        }
        self.last = Some(now);
        Some(Announcement {
            text: text(),
            timestamp: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(count: usize) -> DetectionSummary {
        DetectionSummary::from_labels(std::iter::repeat_n("person", count))
    }

    #[test]
    fn test_three_frame_sequence() {
        let start = Instant::now();
        let mut throttle = AnnouncementThrottle::new(Duration::from_secs(5));

        let first = throttle.offer(&person(1), start).unwrap();
        assert_eq!(first.text, "I see person: 1");
        assert_eq!(first.timestamp, start);

        let frame2 = start + Duration::from_millis(800);
        assert_eq!(throttle.offer(&person(1), frame2), None);

        let frame3 = frame2 + Duration::from_millis(5500);
        let second = throttle.offer(&person(2), frame3).unwrap();
        assert_eq!(second.text, "I see person: 2");
    }

    #[test]
    fn test_interval_boundary_is_idle() {
        let start = Instant::now();
        let mut throttle = AnnouncementThrottle::new(Duration::from_secs(5));
        throttle.offer(&person(1), start).unwrap();

        let almost = start + Duration::from_millis(4999);
        assert_eq!(throttle.state(almost), ThrottleState::Cooling);
        assert_eq!(throttle.offer(&person(1), almost), None);

        let exact = start + Duration::from_secs(5);
        assert_eq!(throttle.state(exact), ThrottleState::Idle);
        assert!(throttle.offer(&person(1), exact).is_some());
    }

    #[test]
    fn test_empty_summary_keeps_timer() {
        let start = Instant::now();
        let mut throttle = AnnouncementThrottle::new(Duration::from_secs(5));
        assert_eq!(throttle.offer(&DetectionSummary::new(), start), None);
        assert_eq!(throttle.state(start), ThrottleState::Idle);

        throttle.offer(&person(1), start).unwrap();
        let later = start + Duration::from_secs(6);
        assert_eq!(throttle.offer(&DetectionSummary::new(), later), None);
        // the empty offer did not restart cooling
        assert!(throttle.offer(&person(3), later).is_some());
    }
}
