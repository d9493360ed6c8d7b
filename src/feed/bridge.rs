use flume::Sender;

use crate::event::events::Event;

/// Typed command handle the rendering layer holds. Swipes and taps become
/// events on the app channel; the session reacts on its own loop, so the
/// bridge never touches playback state directly.
#[derive(Clone)]
pub struct NavigationBridge {
    event_tx: Sender<Event>,
}

impl NavigationBridge {
    pub fn new(event_tx: Sender<Event>) -> Self {
        Self { event_tx }
    }

    pub fn request_index(&self, index: usize) {
        let _ = self.event_tx.send(Event::SetCurrentIndex(index));
    }

    pub fn toggle_play_pause(&self) {
        let _ = self.event_tx.send(Event::TogglePlayPause);
    }

    pub fn toggle_like(&self, id: impl Into<String>) {
        let _ = self.event_tx.send(Event::ToggleLike(id.into()));
    }

    pub fn quit(&self) {
        let _ = self.event_tx.send(Event::Quit);
    }
}
