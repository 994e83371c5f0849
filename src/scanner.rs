//! A mocked fingerprint scanner.
//!
//! There is no sensor behind this: a scan waits out a fixed delay and then draws a pseudo-random
//! outcome. Dropping the future returned by [`FingerprintScanner::scan`] abandons the scan and its
//! outcome is never observed.

use crate::config::ScannerSettings;
use crate::notify::Notifier;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    #[default]
    Idle,
    Scanning,
    Success,
    Failure,
}

impl ScanState {
    /// The line shown under the scanner for this state.
    pub fn prompt(&self) -> &'static str {
        match self {
            ScanState::Idle => "Tap to scan fingerprint",
            ScanState::Scanning => "Scanning...",
            ScanState::Success => "Scan successful!",
            ScanState::Failure => "Scan failed. Try again.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    Success,
    Failure,
}

pub struct FingerprintScanner<R = StdRng> {
    state: ScanState,
    delay: Duration,
    success_rate: f64,
    rng: R,
}

impl FingerprintScanner<StdRng> {
    /// Creates a scanner seeded from the operating system.
    pub fn from_settings(settings: &ScannerSettings) -> Self {
        Self::with_rng(
            settings.scan_delay(),
            settings.success_rate,
            StdRng::from_os_rng(),
        )
    }
}

impl<R: Rng> FingerprintScanner<R> {
    /// `success_rate` is clamped into `[0, 1]`. A NaN or infinite rate never succeeds.
    pub fn with_rng(delay: Duration, success_rate: f64, rng: R) -> Self {
        let success_rate = if success_rate.is_finite() {
            success_rate.clamp(0.0, 1.0)
        } else {
            0.0
        };

        Self {
            state: ScanState::Idle,
            delay,
            success_rate,
            rng,
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Runs one simulated scan.
    pub async fn scan(&mut self) -> ScanOutcome {
        self.state = ScanState::Scanning;
        debug!(delay_ms = self.delay.as_millis() as u64, "scan started");

        sleep(self.delay).await;

        let outcome = if self.rng.random_bool(self.success_rate) {
            self.state = ScanState::Success;
            ScanOutcome::Success
        } else {
            self.state = ScanState::Failure;
            ScanOutcome::Failure
        };

        debug!(?outcome, "scan finished");
        outcome
    }

    /// Runs one scan and hands control to whichever callback matches the outcome.
    pub async fn scan_then<T>(
        &mut self,
        on_success: impl FnOnce() -> T,
        on_failure: impl FnOnce() -> T,
    ) -> T {
        match self.scan().await {
            ScanOutcome::Success => on_success(),
            ScanOutcome::Failure => on_failure(),
        }
    }

    /// Enrolls a fingerprint for registration. Reports the result through `notifier` and
    /// returns whether enrollment succeeded.
    pub async fn enroll(&mut self, notifier: &Notifier) -> bool {
        self.scan_then(
            || {
                notifier.success("Fingerprint registered successfully");
                true
            },
            || {
                notifier.error("Failed to register fingerprint. Please try again.");
                false
            },
        )
        .await
    }
}
