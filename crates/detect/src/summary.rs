use std::fmt;

/// Per-frame object counts by label.
///
/// Labels keep the order in which they were first added, which is the order
/// they are spoken in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectionSummary {
    counts: Vec<(String, usize)>,
}

impl DetectionSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a summary from labels, one entry per detection.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut summary = Self::new();
        for label in labels {
            summary.add(label.as_ref());
        }
        summary
    }

    pub fn add(&mut self, label: &str) {
        match self.counts.iter_mut().find(|(known, _)| known == label) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((label.to_string(), 1)),
        }
    }

    pub fn count(&self, label: &str) -> usize {
        self.counts
            .iter()
            .find(|(known, _)| known == label)
            .map_or(0, |(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(label, count)| (label.as_str(), *count))
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of detections across all labels.
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, count)| count).sum()
    }
}

/// Formats as `person: 2, cup: 1`.
impl fmt::Display for DetectionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (label, count)) in self.counts.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", label, count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_seen_order() {
        let summary = DetectionSummary::from_labels(["dog", "cat", "dog", "apple"]);
        assert_eq!(summary.to_string(), "dog: 2, cat: 1, apple: 1");
        assert_eq!(summary.len(), 3);
        assert_eq!(summary.total(), 4);
        assert_eq!(summary.count("dog"), 2);
        assert_eq!(summary.count("bird"), 0);
    }

    #[test]
    fn test_empty() {
        let summary = DetectionSummary::new();
        assert!(summary.is_empty());
        assert_eq!(summary.to_string(), "");
    }
}
