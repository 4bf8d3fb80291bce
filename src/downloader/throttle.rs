use log::trace;
use std::time::Duration;

/// Default pause after each request, keeps well under the PVGIS limit of
/// 30 calls per second.
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_millis(50);

/// Fixed pause between consecutive requests.
///
/// Blocks the calling thread. Only the downloader loop owns one, so a single
/// sequential caller is assumed.
#[derive(Debug, Clone)]
pub struct FixedDelay {
    delay: Duration,
    pauses: usize,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay, pauses: 0 }
    }

    /// Sleeps for the configured delay.
    pub fn pause(&mut self) {
        self.pauses += 1;
        if !self.delay.is_zero() {
            trace!("Throttling for {:?}", self.delay);
            std::thread::sleep(self.delay);
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Number of pauses taken so far.
    pub fn pauses(&self) -> usize {
        self.pauses
    }
}

impl Default for FixedDelay {
    fn default() -> Self {
        Self::new(DEFAULT_REQUEST_DELAY)
    }
}
