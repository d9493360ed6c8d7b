use std::time::Duration;

use flume::Sender;
use tokio::{task::JoinHandle, time::MissedTickBehavior};
use tracing::debug;

use crate::event::events::Event;

/// Fallback time source: a repeating tokio task that sends one
/// `Event::ClockTick` per interval, stamped with the generation it was
/// started under. Missed ticks are skipped, not replayed.
pub struct PlaybackClock {
    event_tx: Sender<Event>,
    task: Option<JoinHandle<()>>,
}

impl PlaybackClock {
    pub fn new(event_tx: Sender<Event>) -> Self {
        Self {
            event_tx,
            task: None,
        }
    }

    /// Begin ticking. Any prior run is stopped first; two clocks never
    /// overlap for the same owner.
    pub fn start(&mut self, interval: Duration, generation: u64) {
        self.stop();
        debug!(?interval, generation, "clock_start");

        let tx = self.event_tx.clone();
        self.task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick of `interval` completes immediately; swallow it
            // so ticks land one full interval apart from start.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if tx.send(Event::ClockTick { generation }).is_err() {
                    break;
                }
            }
        }));
    }

    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for PlaybackClock {
    fn drop(&mut self) {
        self.stop();
    }
}
