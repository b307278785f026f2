// Copyright 2025 the Landmark Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Debounce state helper: coalesce bursts of notifications into one firing.
//!
//! ## Usage
//!
//! 1) Call [`Debouncer::notify`] whenever the watched signal changes.
//! 2) Call [`Debouncer::poll`] from the host's timer or frame callback.
//! 3) Run the debounced work when `poll` returns a token.
//! 4) Call [`Debouncer::cancel`] on teardown.
//!
//! ## Minimal example
//!
//! ```
//! use core::time::Duration;
//! use landmark_timing::Debouncer;
//!
//! let mut debounce = Debouncer::new(Duration::from_millis(100));
//!
//! // A burst of three notifications.
//! debounce.notify(0);
//! debounce.notify(30);
//! debounce.notify(60);
//!
//! // Nothing fires until 100ms after the last one.
//! assert!(debounce.poll(150).is_none());
//! assert!(debounce.poll(160).is_some());
//! assert!(debounce.poll(500).is_none());
//! ```

use core::time::Duration;

/// Debounce window used when none is given.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(100);

/// Identifies one armed deadline of a [`Debouncer`].
///
/// Every [`Debouncer::notify`] hands out a fresh token. Hosts that complete
/// debounced work asynchronously can keep the token and check
/// [`Debouncer::is_current`] before writing results back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DebounceToken(u64);

impl DebounceToken {
    /// Monotonic counter value of this token.
    #[must_use]
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// Trailing-edge debouncer over caller-supplied millisecond timestamps.
///
/// The debouncer never reads a clock. Timestamps only need to be monotonic
/// within one debouncer.
#[derive(Clone, Copy, Debug)]
pub struct Debouncer {
    window: Duration,
    deadline: Option<u64>,
    generation: u64,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Debouncer {
    /// Creates a debouncer that fires `window` after the last notification.
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
            generation: 0,
        }
    }

    /// The debounce window.
    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Records a notification at `now_ms` and pushes the deadline back.
    ///
    /// Any earlier, not yet fired deadline is superseded.
    pub fn notify(&mut self, now_ms: u64) -> DebounceToken {
        let window_ms = u64::try_from(self.window.as_millis()).unwrap_or(u64::MAX);
        self.deadline = Some(now_ms.saturating_add(window_ms));
        self.generation += 1;
        DebounceToken(self.generation)
    }

    /// Fires the pending deadline if it has elapsed at `now_ms`.
    ///
    /// Returns the token of the notification that armed it. Each armed
    /// deadline fires at most once.
    pub fn poll(&mut self, now_ms: u64) -> Option<DebounceToken> {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                Some(DebounceToken(self.generation))
            }
            _ => None,
        }
    }

    /// Disarms the pending deadline, if any.
    ///
    /// Returns `true` if something was pending. Tokens handed out before the
    /// cancel are no longer current.
    pub fn cancel(&mut self) -> bool {
        let was_pending = self.deadline.take().is_some();
        self.generation += 1;
        was_pending
    }

    /// Returns `true` while a deadline is armed.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Timestamp at which the pending deadline fires.
    #[must_use]
    pub fn deadline(&self) -> Option<u64> {
        self.deadline
    }

    /// Returns `true` if `token` belongs to the latest notification and no
    /// cancel happened since.
    #[must_use]
    pub fn is_current(&self, token: DebounceToken) -> bool {
        token.0 == self.generation
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use super::{DEFAULT_DEBOUNCE, Debouncer};

    #[test]
    fn fresh_debouncer_is_idle() {
        let mut d = Debouncer::default();
        assert_eq!(d.window(), DEFAULT_DEBOUNCE);
        assert!(!d.is_pending());
        assert_eq!(d.poll(u64::MAX), None);
    }

    #[test]
    fn fires_once_after_window() {
        let mut d = Debouncer::new(Duration::from_millis(100));
        let token = d.notify(1_000);
        assert_eq!(d.deadline(), Some(1_100));
        assert_eq!(d.poll(1_099), None);
        assert_eq!(d.poll(1_100), Some(token));
        assert_eq!(d.poll(1_200), None);
        assert!(d.is_current(token));
    }

    #[test]
    fn burst_coalesces_to_last_notification() {
        let mut d = Debouncer::new(Duration::from_millis(100));
        let mut last = d.notify(0);
        for t in [20, 40, 60, 80] {
            last = d.notify(t);
        }
        assert_eq!(d.poll(179), None);
        let fired = d.poll(180);
        assert_eq!(fired, Some(last));
        assert_eq!(fired.map(|t| t.generation()), Some(5));
    }

    #[test]
    fn cancel_prevents_firing_and_staleness_is_visible() {
        let mut d = Debouncer::new(Duration::from_millis(100));
        let token = d.notify(0);
        assert!(d.cancel());
        assert!(!d.is_pending());
        assert_eq!(d.poll(10_000), None);
        assert!(!d.is_current(token));
        assert!(!d.cancel());
    }

    #[test]
    fn huge_timestamps_saturate() {
        let mut d = Debouncer::new(Duration::from_millis(100));
        d.notify(u64::MAX - 10);
        assert_eq!(d.deadline(), Some(u64::MAX));
        assert!(d.poll(u64::MAX).is_some());
    }
}
