use crate::domain::LogEntry;

#[derive(Debug)]
pub enum Event {
    CheckRecorded(LogEntry),
}
