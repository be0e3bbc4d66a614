// Re-export the API module components
pub use self::{
    client::{poll_verification_status, ApiClient},
    errors::{ApiClientError, VerificationError},
    models::{VerificationJob, VerificationJobDispatch, VerificationRequest},
    types::JobStatus,
};

// Module declarations
mod client;
mod errors;
mod models;
mod types;
