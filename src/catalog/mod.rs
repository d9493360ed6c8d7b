use serde::{Deserialize, Serialize};
use tracing::debug;

#[cfg(test)]
mod tests;

/// A single feed entry as delivered by the catalog endpoint.
///
/// `audio_url` may be empty, in which case the track has no playable audio
/// and the player falls back to clock-driven progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub handle: String,
    pub display_name: String,
    pub image_url: String,
    #[serde(default)]
    pub audio_url: String,
    #[serde(default)]
    pub is_liked: bool,
    #[serde(default)]
    pub upvote_count: u32,
}

impl Track {
    pub fn has_audio(&self) -> bool {
        !self.audio_url.is_empty()
    }
}

/// Ordered, index-addressable track list, fetched once at startup.
///
/// Immutable after load except for like bookkeeping, which swaps whole
/// records rather than mutating fields in place.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tracks: Vec<Track>,
}

impl Catalog {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Flip the like state of the track with `id` and adjust its upvote
    /// count by one, saturating at zero on unlike. Unknown ids are ignored.
    pub fn toggle_like(&mut self, id: &str) {
        let Some(index) = self.tracks.iter().position(|t| t.id == id) else {
            debug!(id, "toggle_like_unknown_id");
            return;
        };

        let mut updated = self.tracks[index].clone();
        updated.is_liked = !updated.is_liked;
        updated.upvote_count = if updated.is_liked {
            updated.upvote_count + 1
        } else {
            updated.upvote_count.saturating_sub(1)
        };

        debug!(
            id,
            is_liked = updated.is_liked,
            upvote_count = updated.upvote_count,
            "toggle_like"
        );

        self.tracks[index] = updated;
    }
}
