//! Lookup interface for the external job, user and campus-drive services.
//!
//! The import pipeline only needs to know whether a referenced id exists
//! and, for jobs, its type, status and assignee. Implementations live
//! outside this crate (see the `ats-directory` HTTP client).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Job status that accepts new candidates.
pub const JOB_STATUS_OPEN: &str = "OPEN";

/// A job posting as returned by the job service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    #[serde(rename = "_id")]
    pub id: String,
    /// Lead type the job recruits for (`intern`, `full-time`, `consultant`).
    #[serde(rename = "type")]
    pub job_type: String,
    pub status: String,
    /// User the job is assigned to; becomes the default candidate owner.
    #[serde(default)]
    pub assign_to: Option<String>,
}

impl JobRecord {
    pub fn is_open(&self) -> bool {
        self.status == JOB_STATUS_OPEN
    }
}

/// A user (recruiter) as returned by the user service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "_id")]
    pub id: String,
}

impl UserRecord {
    /// A user payload with a blank id does not identify anyone.
    pub fn is_identified(&self) -> bool {
        !self.id.trim().is_empty()
    }
}

/// A campus placement drive. Only its existence matters to the importer,
/// so the payload is kept opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DriveRecord(pub serde_json::Value);

impl DriveRecord {
    /// `false`, `0`, `""` and `null` payloads mean the drive was not found.
    pub fn is_present(&self) -> bool {
        match &self.0 {
            serde_json::Value::Null => false,
            serde_json::Value::Bool(b) => *b,
            serde_json::Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
            serde_json::Value::String(s) => !s.is_empty(),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
        }
    }
}

/// Failure to resolve a reference. Never surfaces past the row classifier;
/// every variant becomes the column's "invalid id" message.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// The request never produced a response (network, DNS, timeout).
    #[error("Lookup transport failed: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("Lookup service error ({status}): {body}")]
    Upstream { status: u16, body: String },

    /// The response body could not be decoded.
    #[error("Malformed lookup response: {0}")]
    Decode(String),
}

/// Resolves the external identifiers found in import spreadsheets.
///
/// `Ok(None)` means the service answered but the id does not exist.
#[async_trait]
pub trait CandidateDirectory: Send + Sync {
    async fn get_job(&self, job_id: &str) -> Result<Option<JobRecord>, LookupError>;

    async fn get_user(&self, user_id: &str) -> Result<Option<UserRecord>, LookupError>;

    async fn get_cpd_drive(&self, cpd_id: &str) -> Result<Option<DriveRecord>, LookupError>;
}
