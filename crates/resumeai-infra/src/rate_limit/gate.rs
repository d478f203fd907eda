use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use super::limiter::{Admission, SlidingWindowLimiter};

#[derive(Debug)]
struct GateState {
    limiter: SlidingWindowLimiter,
    limited: bool,
    retry_after: Duration,
    /// Bumped on every rejection and reset; a scheduled clear only applies to its own generation
    generation: u64,
}

/// Limiter plus the "rate limited" flag a front end binds its controls to.
///
/// A rejection raises the flag and schedules a task that lowers it once the computed wait
/// has elapsed, so a disabled control re-enables without another user action. The gate is
/// a standalone object: its lifetime is whoever holds it, not any view.
#[derive(Clone)]
pub struct RateLimitGate {
    state: Arc<Mutex<GateState>>,
}

impl RateLimitGate {
    pub fn new(window: Duration, max_requests: usize) -> Self {
        Self {
            state: Arc::new(Mutex::new(GateState {
                limiter: SlidingWindowLimiter::new(window, max_requests),
                limited: false,
                retry_after: Duration::ZERO,
                generation: 0,
            })),
        }
    }

    /// Check admission. On rejection the flag is raised and its reset scheduled.
    #[tracing::instrument(skip(self))]
    pub async fn try_admit(&self) -> Admission {
        let (admission, generation) = {
            let mut state = self.state.lock().await;
            let admission = state.limiter.try_admit();
            match admission {
                Admission::Admitted => return admission,
                Admission::Rejected { retry_after } => {
                    state.limited = true;
                    state.retry_after = retry_after;
                    state.generation += 1;
                    (admission, state.generation)
                }
            }
        };

        if let Admission::Rejected { retry_after } = admission {
            self.schedule_clear(generation, retry_after);
        }

        admission
    }

    fn schedule_clear(&self, generation: u64, after: Duration) {
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            tokio::time::sleep(after).await;
            let mut state = state.lock().await;
            if state.generation == generation {
                state.limited = false;
                state.retry_after = Duration::ZERO;
                tracing::debug!("Rate limit cleared");
            }
        });
    }

    /// Record an admitted action.
    pub async fn record(&self) {
        self.state.lock().await.limiter.record();
    }

    pub async fn is_limited(&self) -> bool {
        self.state.lock().await.limited
    }

    /// Wait reported by the last rejection, zero when not limited.
    pub async fn retry_after(&self) -> Duration {
        self.state.lock().await.retry_after
    }

    /// Clear recorded actions and the flag; pending scheduled clears become no-ops.
    pub async fn reset(&self) {
        let mut state = self.state.lock().await;
        state.limiter.reset();
        state.limited = false;
        state.retry_after = Duration::ZERO;
        state.generation += 1;
    }
}
