use crate::domain::events::Event;
use crate::domain::{CheckStatus, LogEntry};
use std::sync::Arc;
use tokio::sync::mpsc::Receiver;
use tokio::sync::watch::{Receiver as WatchReceiver, Sender as WatchSender};
use tokio::sync::{RwLock, watch};
use tracing::{debug, info, instrument};

pub type ActivityLog = Arc<RwLock<Vec<LogEntry>>>;

/// Holds the shared activity log. Entries only ever get appended; observers
/// subscribe through [`Store::notifier`] and are woken for every new entry.
#[derive(Debug)]
pub struct Store {
    entries: ActivityLog,
    rx: Receiver<Event>,
    notifier_tx: WatchSender<ActivityLog>,
    notifier_rx: WatchReceiver<ActivityLog>,
}

impl Store {
    pub fn new(rx: Receiver<Event>) -> Self {
        let entries = Arc::new(RwLock::new(Vec::new()));
        let (notifier_tx, notifier_rx) = watch::channel::<ActivityLog>(entries.clone());

        Store {
            entries,
            rx,
            notifier_tx,
            notifier_rx,
        }
    }

    pub fn notifier(&self) -> WatchReceiver<ActivityLog> {
        self.notifier_rx.clone()
    }

    #[instrument(skip(self))]
    pub async fn listen(&mut self) {
        while let Some(event) = self.rx.recv().await {
            debug!("🔵 Received event: {:?}", event);
            match event {
                Event::CheckRecorded(entry) => {
                    let marker = match entry.status {
                        CheckStatus::Success => "🟢",
                        CheckStatus::Failure => "🔴",
                    };
                    info!(
                        school = entry.school_name,
                        "{} Recorded {} for '{}': {}", marker, entry.action, entry.full_name, entry.reason
                    );

                    let mut write_guard = self.entries.write().await;
                    write_guard.push(entry);
                    drop(write_guard);

                    self.notifier_tx.send(self.entries.clone()).unwrap_or_default();
                }
            }
        }
    }
}
