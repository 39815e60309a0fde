//! Optional narrative text about the current model
//!
//! Best-effort only: geometry never waits on it and failures degrade to a
//! fixed fallback message.

mod debounce;
mod prompt;

pub use debounce::{InsightRequests, DEFAULT_QUIET_MS};
pub use prompt::{build_prompt, resolve, InsightError, FALLBACK_EMPTY, FALLBACK_ERROR};
