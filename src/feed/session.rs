use std::time::Duration;

use flume::Sender;
use tracing::{debug, error, info, warn};

use crate::{
    audio::{
        clock::PlaybackClock,
        engine::MediaBackend,
        state::{PlaybackState, TimeSource},
    },
    catalog::{Catalog, Track},
    event::events::Event,
};

/// Reference cadence of the fallback clock.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// The playback state machine: sole owner of `PlaybackState`, fed by clock
/// ticks, engine callbacks and navigation commands, all serialized onto the
/// app's single event loop.
///
/// Every activation of a time source bumps `generation` and stamps it into
/// the source; events carrying a stale stamp belong to a superseded source
/// and are discarded, so at most one source ever drives `elapsed`.
pub struct FeedSession<B: MediaBackend> {
    catalog: Catalog,
    state: PlaybackState,
    clock: PlaybackClock,
    backend: B,
    generation: u64,
}

impl<B: MediaBackend> FeedSession<B> {
    pub fn new(backend: B, event_tx: Sender<Event>) -> Self {
        Self {
            catalog: Catalog::default(),
            state: PlaybackState::default(),
            clock: PlaybackClock::new(event_tx),
            backend,
            generation: 0,
        }
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::CatalogFetched(tracks) => self.on_catalog(tracks),
            Event::FetchFailed(reason) => {
                error!(reason = reason.as_str(), "catalog_fetch_failed");
            }
            Event::ClockTick { generation } => self.on_clock_tick(generation),
            Event::PlaybackProgress {
                generation,
                position,
                total,
            } => self.on_playback_progress(generation, position, total),
            Event::TrackEnded { generation } => self.on_track_ended(generation),
            Event::TrackUnplayable { generation } => self.on_unplayable(generation),
            Event::SetCurrentIndex(index) => self.set_current_index(index),
            Event::TogglePlayPause => self.toggle_play_pause(),
            Event::ToggleLike(id) => self.toggle_like(&id),
            Event::Quit => {}
        }
    }

    /// The single startup transition: adopt the fetched catalog, select
    /// track 0 and start playing it.
    pub fn on_catalog(&mut self, tracks: Vec<Track>) {
        self.catalog = Catalog::new(tracks);
        if self.catalog.is_empty() {
            warn!("catalog_empty");
            return;
        }

        info!(len = self.catalog.len(), "catalog_loaded");
        self.state.current_index = Some(0);
        self.state.is_playing = true;
        self.load_current();
    }

    /// (Re)load the track at `current_index`, re-selecting the time source
    /// for it. The outgoing source is torn down before anything else.
    fn load_current(&mut self) {
        self.clock.stop();
        self.backend.teardown();
        self.generation += 1;

        self.state.elapsed = 0.0;
        self.state.duration = PlaybackState::FALLBACK_DURATION;

        let Some(index) = self.state.current_index else {
            self.state.source = TimeSource::None;
            return;
        };
        let Some(track) = self.catalog.get(index) else {
            self.state.source = TimeSource::None;
            return;
        };

        if self.backend.load(track, self.generation) {
            self.state.source = TimeSource::Engine;
            if self.state.is_playing {
                self.backend.play();
            } else {
                self.backend.pause();
            }
        } else {
            self.state.source = TimeSource::Clock;
            if self.state.is_playing {
                self.clock.start(TICK_INTERVAL, self.generation);
            }
        }

        info!(
            index,
            id = track.id.as_str(),
            source = ?self.state.source,
            is_playing = self.state.is_playing,
            "track_loaded"
        );
    }

    fn on_clock_tick(&mut self, generation: u64) {
        if generation != self.generation || self.state.source != TimeSource::Clock {
            return;
        }
        if !self.state.is_playing {
            return;
        }

        self.state.elapsed += TICK_INTERVAL.as_secs_f64();

        // The clock path detects exhaustion itself; the engine path relies
        // on its own end event instead.
        if self.state.elapsed >= self.state.duration {
            self.advance_or_finish();
        }
    }

    fn on_playback_progress(
        &mut self,
        generation: u64,
        position: Duration,
        total: Option<Duration>,
    ) {
        if generation != self.generation || self.state.source != TimeSource::Engine {
            return;
        }

        self.state.elapsed = position.as_secs_f64();
        if let Some(total) = total {
            let secs = total.as_secs_f64();
            if secs.is_finite() && secs > 0.0 {
                self.state.duration = secs;
            }
        }
    }

    fn on_track_ended(&mut self, generation: u64) {
        if generation != self.generation || self.state.source != TimeSource::Engine {
            return;
        }
        self.advance_or_finish();
    }

    fn advance_or_finish(&mut self) {
        let Some(index) = self.state.current_index else {
            return;
        };

        if index + 1 < self.catalog.len() {
            self.state.current_index = Some(index + 1);
            self.load_current();
        } else {
            self.state.is_playing = false;
            self.clock.stop();
            self.backend.teardown();
            self.generation += 1;
            self.state.source = TimeSource::None;
            self.state.elapsed = self.state.elapsed.min(self.state.duration);
            info!(index, "feed_finished");
        }
    }

    /// Engine gave up on the current load; keep the track but fall back to
    /// clock-driven progress, preserving whatever had already elapsed.
    fn on_unplayable(&mut self, generation: u64) {
        if generation != self.generation || self.state.source != TimeSource::Engine {
            return;
        }

        warn!(index = self.state.current_index, "track_unplayable_fallback");
        self.backend.teardown();
        self.generation += 1;
        self.state.source = TimeSource::Clock;
        self.state.duration = PlaybackState::FALLBACK_DURATION;
        if self.state.is_playing {
            self.clock.start(TICK_INTERVAL, self.generation);
        }
    }

    /// Navigation command from the rendering layer. Same-index and
    /// out-of-range requests are no-ops; a real change reloads, keeping the
    /// current play intent.
    pub fn set_current_index(&mut self, index: usize) {
        if index >= self.catalog.len() {
            debug!(index, len = self.catalog.len(), "navigation_out_of_range");
            return;
        }
        if self.state.current_index == Some(index) {
            return;
        }

        self.state.current_index = Some(index);
        self.load_current();
    }

    pub fn toggle_play_pause(&mut self) {
        self.state.is_playing = !self.state.is_playing;
        debug!(is_playing = self.state.is_playing, "toggle_play_pause");

        if self.state.is_playing {
            match self.state.source {
                TimeSource::Engine => self.backend.play(),
                // A fresh stamp so a tick queued while paused can never
                // land after resume.
                TimeSource::Clock => {
                    self.generation += 1;
                    self.clock.start(TICK_INTERVAL, self.generation);
                }
                TimeSource::None => {}
            }
        } else {
            match self.state.source {
                TimeSource::Engine => self.backend.pause(),
                TimeSource::Clock => self.clock.stop(),
                TimeSource::None => {}
            }
        }
    }

    pub fn toggle_like(&mut self, id: &str) {
        self.catalog.toggle_like(id);
    }

    /// Release every timer and subscription. Safe to call more than once;
    /// also the session's disposal path.
    pub fn teardown(&mut self) {
        self.clock.stop();
        self.backend.teardown();
        self.state.source = TimeSource::None;
    }

    // Read-only surface for the rendering layer.

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn current_index(&self) -> Option<usize> {
        self.state.current_index
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    pub fn elapsed(&self) -> f64 {
        self.state.elapsed
    }

    pub fn duration(&self) -> f64 {
        self.state.duration
    }

    pub fn progress(&self) -> f64 {
        self.state.progress()
    }

    #[cfg(test)]
    pub(crate) fn clock_is_running(&self) -> bool {
        self.clock.is_running()
    }

    #[cfg(test)]
    pub(crate) fn backend(&self) -> &B {
        &self.backend
    }

    #[cfg(test)]
    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }
}

impl<B: MediaBackend> Drop for FeedSession<B> {
    fn drop(&mut self) {
        self.teardown();
    }
}
