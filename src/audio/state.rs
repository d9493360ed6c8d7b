/// Which mechanism currently drives `elapsed` for the loaded track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeSource {
    #[default]
    None,
    Clock,
    Engine,
}

/// The single source of truth the rendering layer observes. One writer (the
/// session event loop); progress is derived on read, never stored.
#[derive(Debug, Clone)]
pub struct PlaybackState {
    pub current_index: Option<usize>,
    pub is_playing: bool,
    pub elapsed: f64,
    pub duration: f64,
    pub source: TimeSource,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            current_index: None,
            is_playing: false,
            elapsed: 0.0,
            duration: Self::FALLBACK_DURATION,
            source: TimeSource::None,
        }
    }
}

impl PlaybackState {
    /// Placeholder duration (3:58) used until a real media duration is
    /// known, and for tracks with no playable audio at all.
    pub const FALLBACK_DURATION: f64 = 238.0;

    pub fn progress(&self) -> f64 {
        if self.duration > 0.0 {
            self.elapsed / self.duration
        } else {
            0.0
        }
    }
}
