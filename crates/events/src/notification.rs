//! Short-lived user-facing messages.
//!
//! Each store operation that the user should hear about publishes exactly one
//! notification: a success, or the error that rejected it. Failures on unknown
//! ids publish nothing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl Notification {
    pub fn success(message: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
            at,
        }
    }

    pub fn error(message: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            at,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
