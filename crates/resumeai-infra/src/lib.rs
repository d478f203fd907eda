//! ResumeAI Infrastructure Library
//!
//! Shared plumbing for ResumeAI front ends:
//! - Client-side rate limiting of user-triggered actions
//! - Tracing initialization

#[cfg(feature = "observability-basic")]
pub mod telemetry;

#[cfg(feature = "rate-limit")]
pub mod rate_limit;

// Re-export commonly used types
#[cfg(feature = "observability-basic")]
pub use telemetry::init_telemetry;

#[cfg(feature = "rate-limit")]
pub use rate_limit::{Admission, RateLimitGate, SlidingWindowLimiter};
