use reqwest::StatusCode;
use std::fmt::{self, Formatter};
use thiserror::Error;
use url::Url;

/// An HTTP request that came back with an unexpected status. Carries
/// enough context to diagnose the failure without re-running the request.
#[derive(Debug, Error)]
pub struct RequestFailure {
    pub url: Url,
    pub status: StatusCode,
    pub msg: String,
}

impl RequestFailure {
    pub fn new(url: Url, status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            url,
            status,
            msg: msg.into(),
        }
    }
}

impl fmt::Display for RequestFailure {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(
            formatter,
            "{:?}\n returned {}, with:\n{}",
            self.url, self.status, self.msg
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_failure_display() {
        let failure = RequestFailure::new(
            Url::parse("https://api.starkscan.co/api/jobs").unwrap(),
            StatusCode::INTERNAL_SERVER_ERROR,
            "boom",
        );
        let message = format!("{failure}");
        assert!(message.contains("500"));
        assert!(message.contains("boom"));
    }
}
