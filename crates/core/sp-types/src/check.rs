//! Connection check results.

use serde::{Deserialize, Serialize};

/// Outcome of a connection check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Success,
    Failure,
}

/// Result of a connection check, with human-readable messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub status: CheckStatus,
    pub messages: Vec<String>,
}

impl CheckResult {
    /// A successful check with one message.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Success,
            messages: vec![message.into()],
        }
    }

    /// A failed check with one message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Failure,
            messages: vec![message.into()],
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == CheckStatus::Success
    }
}
