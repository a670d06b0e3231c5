//! Transfer statistics

use std::time::Duration;

/// Floor applied to elapsed time before dividing
pub const MIN_ELAPSED: Duration = Duration::from_millis(1);

/// Bytes moved and time spent for one download
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferStats {
    pub bytes: u64,
    pub elapsed: Duration,
}

impl TransferStats {
    pub fn new(bytes: u64, elapsed: Duration) -> Self {
        Self { bytes, elapsed }
    }

    /// Average throughput in bytes per second
    ///
    /// Elapsed time is floored to [`MIN_ELAPSED`] so near-instant transfers
    /// never divide by zero.
    pub fn average_speed(&self) -> f64 {
        let secs = self.elapsed.max(MIN_ELAPSED).as_secs_f64();
        self.bytes as f64 / secs
    }
}

/// Live progress of a running download
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    pub downloaded: u64,
    /// Declared length, when the server sent one
    pub total: Option<u64>,
}

impl Progress {
    /// Completed percentage, when the total is known
    pub fn percent(&self) -> Option<f64> {
        match self.total {
            Some(total) if total > 0 => {
                Some((self.downloaded as f64 / total as f64 * 100.0).min(100.0))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_speed() {
        let stats = TransferStats::new(1_048_576, Duration::from_secs(2));
        assert_eq!(stats.average_speed(), 524_288.0);

        let stats = TransferStats::new(1000, Duration::from_millis(500));
        assert_eq!(stats.average_speed(), 2000.0);
    }

    #[test]
    fn test_average_speed_zero_elapsed() {
        let stats = TransferStats::new(4096, Duration::ZERO);
        let speed = stats.average_speed();
        assert!(speed.is_finite());
        assert_eq!(speed, 4096.0 / MIN_ELAPSED.as_secs_f64());

        let empty = TransferStats::new(0, Duration::ZERO);
        assert_eq!(empty.average_speed(), 0.0);
    }

    #[test]
    fn test_progress_percent() {
        let p = Progress { downloaded: 50, total: Some(200) };
        assert_eq!(p.percent(), Some(25.0));
        assert_eq!(Progress { downloaded: 10, total: None }.percent(), None);
        assert_eq!(Progress { downloaded: 10, total: Some(0) }.percent(), None);
        assert_eq!(Progress { downloaded: 300, total: Some(200) }.percent(), Some(100.0));
    }
}
