use std::collections::VecDeque;
use std::time::Duration;
use tokio::time::Instant;

/// Outcome of an admission check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Admitted,
    /// Cap reached; the oldest recorded action leaves the window after `retry_after`
    Rejected { retry_after: Duration },
}

impl Admission {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Admission::Admitted)
    }
}

/// Sliding-window limiter over the timestamps of recorded actions.
///
/// Timestamps live in a ring buffer bounded by `max_requests`, so the window never holds
/// more entries than the cap no matter how often `record` is called.
#[derive(Debug, Clone)]
pub struct SlidingWindowLimiter {
    window: Duration,
    max_requests: usize,
    timestamps: VecDeque<Instant>,
}

impl SlidingWindowLimiter {
    pub fn new(window: Duration, max_requests: usize) -> Self {
        let max_requests = max_requests.max(1);
        Self {
            window,
            max_requests,
            timestamps: VecDeque::with_capacity(max_requests),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn max_requests(&self) -> usize {
        self.max_requests
    }

    /// Drop timestamps that fell out of the trailing window.
    fn prune(&mut self, now: Instant) {
        while let Some(oldest) = self.timestamps.front() {
            if now.saturating_duration_since(*oldest) >= self.window {
                self.timestamps.pop_front();
            } else {
                break;
            }
        }
    }

    /// Check whether one more action fits in the window. Does not record it.
    pub fn try_admit(&mut self) -> Admission {
        self.try_admit_at(Instant::now())
    }

    pub fn try_admit_at(&mut self, now: Instant) -> Admission {
        self.prune(now);

        if self.timestamps.len() >= self.max_requests {
            // Non-empty: max_requests is at least 1
            let oldest = self.timestamps[0];
            let retry_after = self
                .window
                .saturating_sub(now.saturating_duration_since(oldest));
            tracing::debug!(
                in_window = self.timestamps.len(),
                max_requests = self.max_requests,
                retry_after_ms = retry_after.as_millis() as u64,
                "Rate limit reached"
            );
            return Admission::Rejected { retry_after };
        }

        Admission::Admitted
    }

    /// Record an admitted action.
    pub fn record(&mut self) {
        self.record_at(Instant::now());
    }

    pub fn record_at(&mut self, now: Instant) {
        self.prune(now);
        if self.timestamps.len() == self.max_requests {
            self.timestamps.pop_front();
        }
        self.timestamps.push_back(now);
    }

    /// Forget every recorded action.
    pub fn reset(&mut self) {
        self.timestamps.clear();
    }

    /// Number of recorded actions, including ones not yet pruned.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(60_000);

    fn admit_and_record(limiter: &mut SlidingWindowLimiter, at: Instant) -> Admission {
        let admission = limiter.try_admit_at(at);
        if admission.is_admitted() {
            limiter.record_at(at);
        }
        admission
    }

    #[test]
    fn test_fourth_call_in_window_is_rejected() {
        let mut limiter = SlidingWindowLimiter::new(WINDOW, 3);
        let t0 = Instant::now();

        for i in 0..3 {
            let at = t0 + Duration::from_secs(i * 10);
            assert_eq!(admit_and_record(&mut limiter, at), Admission::Admitted);
        }

        let at = t0 + Duration::from_secs(30);
        assert_eq!(
            limiter.try_admit_at(at),
            Admission::Rejected {
                retry_after: Duration::from_secs(30)
            }
        );
    }

    #[test]
    fn test_admitted_once_oldest_leaves_window() {
        let mut limiter = SlidingWindowLimiter::new(WINDOW, 3);
        let t0 = Instant::now();

        admit_and_record(&mut limiter, t0);
        admit_and_record(&mut limiter, t0 + Duration::from_secs(5));
        admit_and_record(&mut limiter, t0 + Duration::from_secs(6));

        assert!(!limiter
            .try_admit_at(t0 + Duration::from_millis(59_999))
            .is_admitted());
        assert!(limiter.try_admit_at(t0 + WINDOW).is_admitted());
        assert_eq!(limiter.len(), 2);
    }

    #[test]
    fn test_try_admit_does_not_record() {
        let mut limiter = SlidingWindowLimiter::new(WINDOW, 3);
        let t0 = Instant::now();
        for _ in 0..10 {
            assert!(limiter.try_admit_at(t0).is_admitted());
        }
        assert!(limiter.is_empty());
    }

    #[test]
    fn test_never_holds_more_than_cap() {
        let mut limiter = SlidingWindowLimiter::new(WINDOW, 3);
        let t0 = Instant::now();
        for i in 0..20 {
            limiter.record_at(t0 + Duration::from_millis(i));
        }
        assert_eq!(limiter.len(), 3);
    }

    #[test]
    fn test_reset_clears_window() {
        let mut limiter = SlidingWindowLimiter::new(WINDOW, 1);
        let t0 = Instant::now();
        admit_and_record(&mut limiter, t0);
        assert!(!limiter.try_admit_at(t0).is_admitted());

        limiter.reset();
        assert!(limiter.try_admit_at(t0).is_admitted());
    }

    #[test]
    fn test_zero_cap_is_treated_as_one() {
        let limiter = SlidingWindowLimiter::new(WINDOW, 0);
        assert_eq!(limiter.max_requests(), 1);
    }
}
