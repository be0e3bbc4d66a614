use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Status of a verification job as reported by the service.
///
/// `PENDING` is the only non-terminal state; anything the service adds in
/// the future deserializes as `Unknown` and is treated the same way.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Pending,
    Failed,
    Success,
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Failed | Self::Success)
    }
}

impl Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Failed => write!(f, "Failed"),
            Self::Success => write!(f, "Success"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}
