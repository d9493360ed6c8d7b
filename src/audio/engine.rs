use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use flume::Sender;
use reqwest::Url;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::audio::{error::AudioError, progress::TrackProgress};
use crate::catalog::Track;
use crate::event::events::Event;

const PROGRESS_INTERVAL: Duration = Duration::from_millis(500);

/// Transport seam the session drives. The real implementation wraps a rodio
/// sink; tests substitute a recording fake.
pub trait MediaBackend {
    /// Prepare playback for `track`, superseding any previously loaded
    /// item. Returns whether the engine engaged; a track without a usable
    /// audio url is not an error, just `false`.
    fn load(&mut self, track: &Track, generation: u64) -> bool;
    fn play(&self);
    fn pause(&self);
    /// Release the tasks and subscriptions registered by `load`. Must run
    /// before a subsequent `load` so a superseded item can never deliver.
    fn teardown(&mut self);
}

pub struct MediaEngine {
    _stream: OutputStream,
    sink: Arc<Sink>,
    http: reqwest::Client,
    event_tx: Sender<Event>,
    progress: Arc<TrackProgress>,
    playback_task: Option<JoinHandle<()>>,
}

impl MediaEngine {
    pub fn new(event_tx: Sender<Event>) -> color_eyre::Result<Self> {
        let stream = OutputStreamBuilder::open_default_stream()?;
        let sink = Sink::connect_new(stream.mixer());

        Ok(Self {
            _stream: stream,
            sink: Arc::new(sink),
            http: reqwest::Client::new(),
            event_tx,
            progress: Arc::new(TrackProgress::new()),
            playback_task: None,
        })
    }

    pub fn progress(&self) -> &Arc<TrackProgress> {
        &self.progress
    }

    async fn fetch_audio(
        http: &reqwest::Client,
        url: Url,
    ) -> Result<Vec<u8>, AudioError> {
        let response = http
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AudioError::NetworkError(e.to_string()))?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| AudioError::NetworkError(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

impl MediaBackend for MediaEngine {
    fn load(&mut self, track: &Track, generation: u64) -> bool {
        self.teardown();

        if !track.has_audio() {
            debug!(id = track.id.as_str(), "engine_skip_no_audio");
            return false;
        }
        let url = match Url::parse(&track.audio_url) {
            Ok(url) => url,
            Err(e) => {
                warn!(
                    id = track.id.as_str(),
                    error = %AudioError::InvalidUrl(e.to_string()),
                    "engine_skip_bad_url"
                );
                return false;
            }
        };

        let http = self.http.clone();
        let sink = self.sink.clone();
        let progress = self.progress.clone();
        let event_tx = self.event_tx.clone();
        let track_id = track.id.clone();

        // One task per load: fetch and decode, then monitor the sink until
        // it drains. Teardown aborts it wholesale, so a superseded load can
        // never emit for a newer generation.
        self.playback_task = Some(tokio::spawn(async move {
            let bytes = match Self::fetch_audio(&http, url).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!(id = track_id.as_str(), error = %e, "engine_fetch_failed");
                    let _ = event_tx.send(Event::TrackUnplayable { generation });
                    return;
                }
            };

            let decoded = tokio::task::spawn_blocking(move || {
                Decoder::new(Cursor::new(bytes))
                    .map_err(|e| AudioError::DecodingError(e.to_string()))
            })
            .await;
            let source = match decoded {
                Ok(Ok(source)) => source,
                Ok(Err(e)) => {
                    warn!(id = track_id.as_str(), error = %e, "engine_decode_failed");
                    let _ = event_tx.send(Event::TrackUnplayable { generation });
                    return;
                }
                Err(_) => return,
            };

            if let Some(total) = source.total_duration() {
                progress.set_total_duration(total);
            }
            sink.append(source);
            info!(id = track_id.as_str(), generation, "engine_playing");

            loop {
                tokio::time::sleep(PROGRESS_INTERVAL).await;

                let position = sink.get_pos();
                progress.set_current_position(position);
                let _ = event_tx.send(Event::PlaybackProgress {
                    generation,
                    position,
                    total: progress.total(),
                });

                if sink.empty() {
                    let _ = event_tx.send(Event::TrackEnded { generation });
                    break;
                }
            }
        }));

        true
    }

    fn play(&self) {
        self.sink.play();
    }

    fn pause(&self) {
        self.sink.pause();
    }

    fn teardown(&mut self) {
        if let Some(task) = self.playback_task.take() {
            task.abort();
        }
        self.sink.stop();
        self.progress.reset();
    }
}

impl Drop for MediaEngine {
    fn drop(&mut self) {
        self.teardown();
    }
}
