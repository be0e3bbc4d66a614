use std::time::Duration;

use backon::{BlockingRetryable, ExponentialBuilder};
use log::debug;
use reqwest::{
    blocking::{self, Client},
    StatusCode,
};
use url::Url;

use crate::{class_hash::ClassHash, errors::RequestFailure};

use super::errors::{ApiClientError, VerificationError};
use super::models::{Error, VerificationJob, VerificationJobDispatch, VerificationRequest};
use super::types::JobStatus;

/// `None` means the job hasn't reached a terminal state yet.
type PollResult = Option<VerificationJob>;

/// Blocking client for the Starkscan verification service.
///
/// `api` is the service endpoint used for job submission and polling;
/// `explorer` is the public site used only to build report links.
#[derive(Clone)]
pub struct ApiClient {
    api: Url,
    explorer: Url,
    client: Client,
}

impl ApiClient {
    /// # Errors
    ///
    /// Fails if either `Url` cannot be a base. We rely on that invariant
    /// in every other method.
    pub fn new(api: Url, explorer: Url) -> Result<Self, ApiClientError> {
        // Test here so that we are sure path_segments_mut succeeds
        if api.cannot_be_a_base() {
            Err(ApiClientError::CannotBeBase(api))
        } else if explorer.cannot_be_a_base() {
            Err(ApiClientError::CannotBeBase(explorer))
        } else {
            Ok(Self {
                api,
                explorer,
                client: blocking::Client::new(),
            })
        }
    }

    /// # Errors
    ///
    /// Will return `Err` if the URL cannot be a base.
    pub fn get_class_url(&self, class_hash: &ClassHash) -> Result<Url, ApiClientError> {
        let mut url = self.api.clone();
        let url_clone = url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiClientError::CannotBeBase(url_clone))?
            .extend(&["classes", class_hash.as_ref()]);
        Ok(url)
    }

    /// Whether the class hash is declared on this network and open for
    /// verification.
    ///
    /// # Errors
    ///
    /// Returns `Err` on network failure or an unexpected status code.
    pub fn is_hash_verifiable(&self, class_hash: &ClassHash) -> Result<bool, ApiClientError> {
        let url = self.get_class_url(class_hash)?;
        let result = self
            .client
            .get(url.clone())
            .send()
            .map_err(ApiClientError::from)?;

        match result.status() {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            _ => Err(ApiClientError::from(RequestFailure::new(
                url,
                result.status(),
                result.text()?,
            ))),
        }
    }

    /// # Errors
    ///
    /// Will return `Err` if the URL cannot be a base.
    pub fn create_job_url(&self) -> Result<Url, ApiClientError> {
        let mut url = self.api.clone();
        let url_clone = url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiClientError::CannotBeBase(url_clone))?
            .extend(&["jobs"]);
        Ok(url)
    }

    /// Submit a source bundle for verification, returning the dispatched
    /// job id.
    ///
    /// # Errors
    ///
    /// Will return `Err` on network failure or if the service rejects the
    /// payload.
    pub fn create_job(&self, request: &VerificationRequest) -> Result<String, ApiClientError> {
        let url = self.create_job_url()?;

        let response = self
            .client
            .post(url.clone())
            .json(request)
            .send()
            .map_err(ApiClientError::Reqwest)?;

        match response.status() {
            StatusCode::OK => (),
            StatusCode::BAD_REQUEST => {
                return Err(ApiClientError::from(RequestFailure::new(
                    url,
                    StatusCode::BAD_REQUEST,
                    response.json::<Error>()?.error,
                )));
            }
            status_code => {
                return Err(ApiClientError::from(RequestFailure::new(
                    url,
                    status_code,
                    response.text()?,
                )));
            }
        }

        Ok(response.json::<VerificationJobDispatch>()?.job_id)
    }

    /// # Errors
    ///
    /// Will return `Err` if the URL cannot be a base.
    pub fn get_job_status_url(&self, job_id: impl AsRef<str>) -> Result<Url, ApiClientError> {
        let mut url = self.api.clone();
        let url_clone = url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiClientError::CannotBeBase(url_clone))?
            .extend(&["jobs", job_id.as_ref()]);
        Ok(url)
    }

    /// Fetch the job once. `Ok(None)` means it hasn't finished yet.
    ///
    /// # Errors
    ///
    /// Will return `Err` on network error or if the service reports the
    /// job as failed, carrying the service-provided message.
    pub fn get_job_status(
        &self,
        job_id: impl Into<String> + Clone,
    ) -> Result<PollResult, ApiClientError> {
        let url = self.get_job_status_url(job_id.clone().into())?;
        let response = self.client.get(url.clone()).send()?;

        match response.status() {
            StatusCode::OK => (),
            StatusCode::NOT_FOUND => return Err(ApiClientError::JobNotFound(job_id.into())),
            status_code => {
                return Err(ApiClientError::from(RequestFailure::new(
                    url,
                    status_code,
                    response.text()?,
                )));
            }
        }

        let data = response.json::<VerificationJob>()?;
        debug!("job {} reported status {}", data.job_id(), data.status());

        match data.status {
            JobStatus::Success => Ok(Some(data)),
            JobStatus::Failed => {
                let message = data
                    .error_message
                    .unwrap_or_else(|| "unknown failure".to_owned());
                Err(ApiClientError::from(
                    VerificationError::VerificationFailure(message),
                ))
            }
            JobStatus::Pending | JobStatus::Unknown => Ok(None),
        }
    }

    /// Public report page for a verified class on the block explorer.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the URL cannot be a base.
    pub fn class_url(&self, class_hash: &ClassHash) -> Result<Url, ApiClientError> {
        let mut url = self.explorer.clone();
        let url_clone = url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiClientError::CannotBeBase(url_clone))?
            .extend(&["class", class_hash.as_ref()]);
        url.set_fragment(Some("code"));
        Ok(url)
    }
}

pub enum Status {
    InProgress,
    Finished(ApiClientError),
}

const fn is_in_progress(status: &Status) -> bool {
    match status {
        Status::InProgress => true,
        Status::Finished(_) => false,
    }
}

/// Poll a job until it reaches a terminal state, with exponential backoff
/// and a bounded number of attempts.
///
/// # Errors
///
/// Will return `Err` on network error, if the verification failed, or
/// with [`ApiClientError::InProgress`] when the retry attempts run out
/// before the job finishes.
pub fn poll_verification_status(
    api: &ApiClient,
    job_id: &str,
) -> Result<VerificationJob, ApiClientError> {
    let fetch = || -> Result<VerificationJob, Status> {
        let result: Option<VerificationJob> = api
            .get_job_status(job_id.to_owned())
            .map_err(Status::Finished)?;

        result.ok_or(Status::InProgress)
    };

    // So verbose because it has problems with inference
    fetch
        .retry(
            ExponentialBuilder::default()
                .with_min_delay(Duration::from_secs(2))
                .with_max_delay(Duration::from_secs(300)) // 5 mins
                .with_max_times(20),
        )
        .when(is_in_progress)
        .notify(|_, dur: Duration| {
            println!("Job: {job_id} didn't finish, retrying in {dur:?}");
        })
        .call()
        .map_err(|err| match err {
            Status::InProgress => ApiClientError::InProgress,
            Status::Finished(e) => e,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new(
            Url::parse("https://api.starkscan.co/api").unwrap(),
            Url::parse("https://starkscan.co").unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_cannot_be_a_base_url() {
        let result = ApiClient::new(
            Url::parse("mailto:someone@example.com").unwrap(),
            Url::parse("https://starkscan.co").unwrap(),
        );
        assert!(matches!(result, Err(ApiClientError::CannotBeBase(_))));
    }

    #[test]
    fn test_job_urls() {
        let client = client();
        assert_eq!(
            client.create_job_url().unwrap().as_str(),
            "https://api.starkscan.co/api/jobs"
        );
        assert_eq!(
            client.get_job_status_url("some-job").unwrap().as_str(),
            "https://api.starkscan.co/api/jobs/some-job"
        );
    }

    #[test]
    fn test_class_urls() {
        let client = client();
        let hash = ClassHash::new("0x123abc").unwrap();
        assert_eq!(
            client.get_class_url(&hash).unwrap().as_str(),
            "https://api.starkscan.co/api/classes/0x123abc"
        );
        assert_eq!(
            client.class_url(&hash).unwrap().as_str(),
            "https://starkscan.co/class/0x123abc#code"
        );
    }
}
