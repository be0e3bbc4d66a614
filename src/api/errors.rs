use thiserror::Error;
use url::Url;

use crate::errors::RequestFailure;

#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("[E005] Verification failed: {0}\n\nSuggestions:\n  • Ensure the submitted sources match the declared class exactly\n  • Check that the compiler version matches the one used to declare\n  • Verify every imported file was reachable from the search paths")]
    VerificationFailure(String),
}

impl VerificationError {
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::VerificationFailure(_) => "E005",
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiClientError {
    #[error("[E006] Invalid base URL: {0}\n\nSuggestions:\n  • Provide a valid HTTP or HTTPS URL\n  • Example: https://api.starkscan.co/api\n  • Ensure the URL includes the protocol (http:// or https://)")]
    CannotBeBase(Url),

    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    #[error("[E007] Verification job is still in progress\n\nSuggestions:\n  • Wait a moment before checking again\n  • Re-run the status command to poll the job once more")]
    InProgress,

    #[error(transparent)]
    Failure(#[from] RequestFailure),

    #[error("[E008] Job '{0}' not found\n\nSuggestions:\n  • Check that the job ID is correct\n  • Verify the job was submitted successfully\n  • The job may have expired from the server")]
    JobNotFound(String),

    #[error(transparent)]
    Verify(#[from] VerificationError),

    #[error("[E009] Invalid URL format: {0}\n\nSuggestions:\n  • Check the URL format is correct\n  • Use absolute URLs with protocol (http:// or https://)")]
    UrlCannotBeBase(#[from] url::ParseError),
}

impl ApiClientError {
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::CannotBeBase(_) => "E006",
            // Network errors get a generic code
            Self::Reqwest(_) | Self::Failure(_) => "E999",
            Self::InProgress => "E007",
            Self::JobNotFound(_) => "E008",
            Self::Verify(v) => v.error_code(),
            Self::UrlCannotBeBase(_) => "E009",
        }
    }
}
