#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use ats_api::config::{DirectoryConfig, ServerConfig};
use ats_api::router::build_app_router;
use ats_api::state::AppState;
use ats_core::directory::{CandidateDirectory, DriveRecord, JobRecord, LookupError, UserRecord};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        directory: DirectoryConfig {
            base_url: "http://directory.invalid/api/v1".to_string(),
            timeout_secs: 1,
        },
        import_concurrency: 4,
    }
}

/// In-memory directory seeded with one open job per lead type, a closed
/// intern job, recruiter `REC1` and campus drive `CPD1`.
#[derive(Default)]
pub struct StubDirectory {
    jobs: HashMap<String, JobRecord>,
    users: Vec<String>,
    drives: Vec<String>,
}

impl StubDirectory {
    pub fn seeded() -> Self {
        let mut dir = Self::default();
        for (id, job_type, status, assign_to) in [
            ("JOB-INT", "intern", "OPEN", Some("U-INT")),
            ("JOB-INT-CLOSED", "intern", "CLOSED", None),
            ("JOB-FT", "full-time", "OPEN", Some("U-FT")),
            ("JOB-CONS", "consultant", "OPEN", None),
        ] {
            dir.jobs.insert(
                id.to_string(),
                JobRecord {
                    id: id.to_string(),
                    job_type: job_type.to_string(),
                    status: status.to_string(),
                    assign_to: assign_to.map(str::to_string),
                },
            );
        }
        dir.users.push("REC1".to_string());
        dir.drives.push("CPD1".to_string());
        dir
    }
}

#[async_trait]
impl CandidateDirectory for StubDirectory {
    async fn get_job(&self, job_id: &str) -> Result<Option<JobRecord>, LookupError> {
        Ok(self.jobs.get(job_id).cloned())
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<UserRecord>, LookupError> {
        Ok(self
            .users
            .iter()
            .any(|u| u == user_id)
            .then(|| UserRecord {
                id: user_id.to_string(),
            }))
    }

    async fn get_cpd_drive(&self, cpd_id: &str) -> Result<Option<DriveRecord>, LookupError> {
        Ok(self
            .drives
            .iter()
            .any(|d| d == cpd_id)
            .then(|| DriveRecord(serde_json::json!({ "_id": cpd_id }))))
    }
}

/// Wraps another directory and sleeps before every job lookup.
pub struct SlowDirectory {
    pub inner: StubDirectory,
    pub delay: Duration,
}

#[async_trait]
impl CandidateDirectory for SlowDirectory {
    async fn get_job(&self, job_id: &str) -> Result<Option<JobRecord>, LookupError> {
        tokio::time::sleep(self.delay).await;
        self.inner.get_job(job_id).await
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<UserRecord>, LookupError> {
        self.inner.get_user(user_id).await
    }

    async fn get_cpd_drive(&self, cpd_id: &str) -> Result<Option<DriveRecord>, LookupError> {
        self.inner.get_cpd_drive(cpd_id).await
    }
}

/// Build the full application router with the production middleware stack
/// and a seeded in-memory directory.
pub fn build_test_app() -> Router {
    build_test_app_with(test_config(), Arc::new(StubDirectory::seeded()))
}

/// Same stack as [`build_test_app`] with a custom config and directory.
pub fn build_test_app_with(config: ServerConfig, directory: Arc<dyn CandidateDirectory>) -> Router {
    let state = AppState {
        config: Arc::new(config.clone()),
        directory,
    };
    build_app_router(state, &config)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub const MULTIPART_BOUNDARY: &str = "ats-test-boundary";

/// POST a single-file multipart form (field `file`).
pub async fn post_file(
    app: Router,
    uri: &str,
    file_name: &str,
    content_type: &str,
    contents: &[u8],
) -> Response<Body> {
    let mut body = format!(
        "--{MULTIPART_BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
         Content-Type: {content_type}\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
