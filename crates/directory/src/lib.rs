//! REST client for the job, user and campus-drive services.
//!
//! Implements [`CandidateDirectory`] over the tracker's HTTP API using
//! [`reqwest`]. Every lookup is a `GET {base}/{resource}/{id}` returning a
//! `{ "data": ... }` envelope.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use ats_core::directory::{CandidateDirectory, DriveRecord, JobRecord, LookupError, UserRecord};

const JOB_RESOURCE: &str = "job";
const USER_RESOURCE: &str = "user";
const CPD_DRIVE_RESOURCE: &str = "cpd-drive";

/// HTTP client for the directory services.
#[derive(Debug, Clone)]
pub struct DirectoryApi {
    client: reqwest::Client,
    base_url: reqwest::Url,
}

/// Errors from the directory REST layer.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// The configured base URL cannot have path segments appended.
    #[error("Invalid directory base URL: {0}")]
    InvalidBaseUrl(String),

    /// The HTTP request itself failed (network, DNS, TLS, timeout, decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status other than 404.
    #[error("Directory API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl From<DirectoryError> for LookupError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::Request(e) if e.is_decode() => LookupError::Decode(e.to_string()),
            DirectoryError::Request(e) => LookupError::Transport(e.to_string()),
            DirectoryError::InvalidBaseUrl(url) => LookupError::Transport(url),
            DirectoryError::ApiError { status, body } => LookupError::Upstream { status, body },
        }
    }
}

/// `{ "data": T }` envelope; `data` may be `null` or absent for unknown ids.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
}

impl DirectoryApi {
    /// Create a client for the API rooted at `base_url`
    /// (e.g. `http://localhost:8080/api/v1`), with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, DirectoryError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Self::with_client(client, base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self, DirectoryError> {
        let base_url = reqwest::Url::parse(base_url)
            .map_err(|e| DirectoryError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(DirectoryError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Fetch one record. A 404 or a `null` payload yields `Ok(None)`.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        resource: &str,
        id: &str,
    ) -> Result<Option<T>, DirectoryError> {
        let url = self.resource_url(resource, id)?;
        tracing::debug!(%url, "Directory lookup");

        let response = self.client.get(url).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let envelope: Envelope<T> = Self::parse_response(response).await?;
        Ok(envelope.data)
    }

    /// `{base}/{resource}/{id}` with each segment percent-encoded.
    fn resource_url(&self, resource: &str, id: &str) -> Result<reqwest::Url, DirectoryError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| DirectoryError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(resource)
            .push(id);
        Ok(url)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code, or return an
    /// [`DirectoryError::ApiError`] carrying the status and body text.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, DirectoryError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(status = status.as_u16(), %body, "Directory API returned an error");
            return Err(DirectoryError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, DirectoryError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl CandidateDirectory for DirectoryApi {
    async fn get_job(&self, job_id: &str) -> Result<Option<JobRecord>, LookupError> {
        Ok(self.fetch(JOB_RESOURCE, job_id).await?)
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<UserRecord>, LookupError> {
        let user: Option<UserRecord> = self.fetch(USER_RESOURCE, user_id).await?;
        Ok(user.filter(UserRecord::is_identified))
    }

    async fn get_cpd_drive(&self, cpd_id: &str) -> Result<Option<DriveRecord>, LookupError> {
        let drive: Option<DriveRecord> = self.fetch(CPD_DRIVE_RESOURCE, cpd_id).await?;
        Ok(drive.filter(DriveRecord::is_present))
    }
}
