use super::types::JobStatus;
use semver::Version;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
pub struct Error {
    pub error: String,
}

#[derive(Debug, Deserialize)]
pub struct VerificationJobDispatch {
    pub job_id: String,
}

/// Submission payload for a verification job.
///
/// `files` maps bundle keys to raw source text; `main_file_path` is the
/// entry file's bare filename and must match the entry's bundle key.
#[derive(Clone, Debug, Serialize)]
pub struct VerificationRequest {
    pub main_file_path: String,
    pub class_hash: String,
    pub name: String,
    pub compiler_version: Version,
    pub is_account_contract: bool,
    pub files: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct VerificationJob {
    pub job_id: String,
    pub status: JobStatus,
    pub error_message: Option<String>,
    pub class_hash: Option<String>,
    pub name: Option<String>,
    pub compiler_version: Option<String>,
    pub created_timestamp: Option<f64>,
    pub updated_timestamp: Option<f64>,
}

impl VerificationJob {
    pub const fn status(&self) -> &JobStatus {
        &self.status
    }

    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn class_hash(&self) -> &str {
        self.class_hash.as_deref().unwrap_or("unknown")
    }

    pub fn is_completed(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn has_failed(&self) -> bool {
        matches!(self.status, JobStatus::Failed)
    }
}
