use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Shared position/duration snapshot bridging the engine's load task (which
/// learns the real duration from the decoder) and its monitor task (which
/// samples the sink position). Plain atomics; both sides hold an `Arc`.
#[derive(Default, Debug)]
pub struct TrackProgress {
    current_position_millis: AtomicU64,
    total_duration_millis: AtomicU64,
    generation: AtomicU64,
}

impl TrackProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_current_position(&self, position: Duration) {
        self.current_position_millis
            .store(position.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn set_total_duration(&self, duration: Duration) {
        self.total_duration_millis
            .store(duration.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn position(&self) -> Duration {
        Duration::from_millis(self.current_position_millis.load(Ordering::Relaxed))
    }

    /// `None` until the decoder has reported a finite duration.
    pub fn total(&self) -> Option<Duration> {
        match self.total_duration_millis.load(Ordering::Relaxed) {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.set_current_position(Duration::ZERO);
        self.set_total_duration(Duration::ZERO);
    }
}
