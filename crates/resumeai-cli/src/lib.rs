//! ResumeAI CLI library
//!
//! Session handling and the analyze flow behind the `resumeai` binary. Front ends embed
//! these directly: an [`AuthContext`] owns the signed-in user, an [`AnalyzeFlow`] gates
//! uploads behind the rate limiter and parks them across a login.

pub mod analyze;
pub mod session;
pub mod session_store;

pub use analyze::{AnalyzeFlow, AnalyzeOutcome};
pub use session::AuthContext;
pub use session_store::SessionStore;

/// Truncate a string to max_len characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
