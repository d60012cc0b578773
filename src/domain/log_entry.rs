use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckAction {
    CheckIn,
    CheckOut,
}

impl Display for CheckAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckAction::CheckIn => write!(f, "check-in"),
            CheckAction::CheckOut => write!(f, "check-out"),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Success,
    Failure,
}

/// A single recorded check-in or check-out attempt, successful or not.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub full_name: String,
    pub school_name: String,
    pub action: CheckAction,
    pub status: CheckStatus,
    pub reason: String,
}

impl LogEntry {
    pub fn new(full_name: String, school_name: String, action: CheckAction, status: CheckStatus, reason: String) -> Self {
        LogEntry {
            timestamp: Utc::now(),
            full_name,
            school_name,
            action,
            status,
            reason,
        }
    }
}
