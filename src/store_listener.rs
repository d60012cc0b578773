use crate::domain::{CheckStatus, LogEntry};
use crate::store::ActivityLog;
use tokio::sync::watch::Receiver;
use tracing::{info, instrument};

/// Renders the activity log: waits for the store to record a check and prints
/// every entry appended since the last notification.
#[instrument(skip_all)]
pub async fn store_listener(mut rx: Receiver<ActivityLog>) {
    let mut rendered = 0;
    while rx.changed().await.is_ok() {
        let entries: ActivityLog = rx.borrow().clone();
        let read_guard = entries.read().await;
        for entry in read_guard.iter().skip(rendered) {
            render(entry);
        }
        rendered = read_guard.len();
    }
}

fn render(entry: &LogEntry) {
    let status = match entry.status {
        CheckStatus::Success => "success",
        CheckStatus::Failure => "failure",
    };
    info!(
        "📋 {} | {} | {} | {} | {} | {}",
        entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
        entry.full_name,
        entry.school_name,
        entry.action,
        status,
        entry.reason
    );
}
