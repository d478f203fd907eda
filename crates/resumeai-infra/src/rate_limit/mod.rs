//! Rate limiting service
//!
//! Client-side sliding-window limiting of user-triggered actions. Advisory only: it
//! avoids redundant requests, the backend enforces its own limits.

pub use gate::RateLimitGate;
pub use limiter::{Admission, SlidingWindowLimiter};

mod gate;
mod limiter;
