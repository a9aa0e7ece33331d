//! Latest-wins coordination for user-driven fetches.
//!
//! When the user searches a new city before the previous fetch finishes,
//! the stale request must not win the race and overwrite newer state.
//! `begin()` cancels whatever was in flight and hands out a fresh token;
//! the superseded fetch resolves to `WeatherError::Cancelled` and its
//! result is discarded by the caller.

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Default)]
pub struct LatestOnly {
    current: Mutex<Option<CancellationToken>>,
}

impl LatestOnly {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the in-flight request (if any) and start a new one.
    pub fn begin(&self) -> CancellationToken {
        let mut current = self.current.lock();
        if let Some(previous) = current.take() {
            previous.cancel();
        }
        let token = CancellationToken::new();
        *current = Some(token.clone());
        token
    }

    /// Cancel the in-flight request without starting a new one.
    pub fn cancel(&self) {
        if let Some(token) = self.current.lock().take() {
            token.cancel();
        }
    }
}
