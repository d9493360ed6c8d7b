use std::time::Duration;

use crate::catalog::Track;

/// Everything that flows through the app's single flume channel: engine and
/// clock notifications alongside commands issued by the rendering layer.
///
/// Time-source events carry the generation they were stamped with at
/// activation; the session discards events from superseded sources.
#[derive(Debug, Clone)]
pub enum Event {
    // Events
    CatalogFetched(Vec<Track>),
    FetchFailed(String),
    ClockTick {
        generation: u64,
    },
    PlaybackProgress {
        generation: u64,
        position: Duration,
        total: Option<Duration>,
    },
    TrackEnded {
        generation: u64,
    },
    TrackUnplayable {
        generation: u64,
    },

    // Commands
    SetCurrentIndex(usize),
    TogglePlayPause,
    ToggleLike(String),
    Quit,
}
