use super::prompt::{resolve, InsightError};

/// Quiet period after the last parameter change before asking for text
pub const DEFAULT_QUIET_MS: f64 = 1500.0;

/// Tracks debounced, cancellable insight requests.
///
/// Every parameter change issues a new token and cancels all older ones.
/// The host performs the network call for a token returned by [`Self::due`]
/// and hands the outcome back through [`Self::complete`]; outcomes for
/// superseded tokens are dropped.
#[derive(Debug, Clone)]
pub struct InsightRequests {
    quiet_ms: f64,
    latest: u32,
    last_change_ms: Option<f64>,
    pending: bool,
}

impl Default for InsightRequests {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_MS)
    }
}

impl InsightRequests {
    pub fn new(quiet_ms: f64) -> Self {
        Self {
            quiet_ms,
            latest: 0,
            last_change_ms: None,
            pending: false,
        }
    }

    /// Record a parameter change at `now_ms`; returns the new token
    pub fn changed(&mut self, now_ms: f64) -> u32 {
        self.latest = self.latest.wrapping_add(1);
        self.last_change_ms = Some(now_ms);
        self.pending = true;
        self.latest
    }

    /// Token to dispatch once the quiet period has elapsed. Each token is
    /// handed out at most once.
    pub fn due(&mut self, now_ms: f64) -> Option<u32> {
        let last = self.last_change_ms?;
        if self.pending && now_ms - last >= self.quiet_ms {
            self.pending = false;
            Some(self.latest)
        } else {
            None
        }
    }

    pub fn is_current(&self, token: u32) -> bool {
        token == self.latest
    }

    /// Drop every outstanding request
    pub fn cancel(&mut self) {
        self.latest = self.latest.wrapping_add(1);
        self.pending = false;
    }

    /// Text to display for a finished request, or `None` when it was superseded
    pub fn complete(&self, token: u32, outcome: Result<String, InsightError>) -> Option<String> {
        if !self.is_current(token) {
            log::debug!("dropping stale insight response {} (latest {})", token, self.latest);
            return None;
        }
        Some(resolve(outcome))
    }
}
