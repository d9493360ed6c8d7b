use std::sync::Arc;

use flume::{Receiver, Sender};
use tracing::info;

use crate::{
    audio::engine::MediaEngine,
    event::events::Event,
    feed::{bridge::NavigationBridge, session::FeedSession},
    http::{CatalogClient, CatalogProvider},
};

/// Owns the event channel, the catalog provider and the session, and runs
/// the single loop on which every playback-state mutation happens.
pub struct App {
    pub event_rx: Receiver<Event>,
    pub event_tx: Sender<Event>,
    provider: Arc<dyn CatalogProvider>,
    session: FeedSession<MediaEngine>,
    should_quit: bool,
}

impl App {
    pub fn new() -> color_eyre::Result<Self> {
        let (event_tx, event_rx) = flume::unbounded();
        let provider: Arc<dyn CatalogProvider> = Arc::new(CatalogClient::from_env()?);
        let engine = MediaEngine::new(event_tx.clone())?;
        let session = FeedSession::new(engine, event_tx.clone());

        Ok(Self {
            event_rx,
            event_tx,
            provider,
            session,
            should_quit: false,
        })
    }

    /// Handle for the rendering layer to issue commands through.
    pub fn bridge(&self) -> NavigationBridge {
        NavigationBridge::new(self.event_tx.clone())
    }

    pub fn session(&self) -> &FeedSession<MediaEngine> {
        &self.session
    }

    pub async fn run(&mut self) -> color_eyre::Result<()> {
        self.spawn_catalog_fetch();

        while !self.should_quit {
            let event = self.event_rx.recv_async().await?;
            if matches!(event, Event::Quit) {
                self.should_quit = true;
                continue;
            }
            self.session.handle_event(event);
        }

        self.session.teardown();
        info!("session_closed");
        Ok(())
    }

    /// The one suspending operation in the core: a single fetch, awaited
    /// off-loop, reported back as an event.
    fn spawn_catalog_fetch(&self) {
        let provider = self.provider.clone();
        let event_tx = self.event_tx.clone();

        tokio::spawn(async move {
            match provider.fetch_catalog().await {
                Ok(tracks) => {
                    let _ = event_tx.send(Event::CatalogFetched(tracks));
                }
                Err(e) => {
                    let _ = event_tx.send(Event::FetchFailed(e.to_string()));
                }
            }
        });
    }
}
