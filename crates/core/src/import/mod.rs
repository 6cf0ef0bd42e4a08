//! Spreadsheet bulk import of candidates.
//!
//! Rows arrive as decoded spreadsheet cells (one array per row, header row
//! already removed). Each row is classified column by column into a
//! [`draft::CandidateDraft`] plus column errors, and the batch is
//! partitioned into valid drafts and per-row error descriptors.
//!
//! - [`cell`]: raw cell values and rows.
//! - [`columns`]: column meanings, labels and per-lead-type layouts.
//! - [`normalize`]: pure field checks and normalisers.
//! - [`draft`]: the normalised candidate record.
//! - [`report`]: column errors, row error descriptors and the batch outcome.
//! - [`classifier`]: per-row rules, including directory lookups.
//! - [`batch`]: the batch entry points.
//! - [`workbook`]: decoding uploaded `.xlsx`/`.xls` files into rows.

pub mod batch;
pub mod cell;
pub mod classifier;
pub mod columns;
pub mod draft;
pub mod normalize;
pub mod report;
pub mod workbook;

pub use batch::{validate_upload, validate_upload_buffered, FIRST_DATA_ROW};
pub use cell::{Cell, RawRow};
pub use draft::CandidateDraft;
pub use report::{ImportOutcome, RowError};
pub use workbook::{decode_workbook, is_excel_mime, UPLOAD_NOT_EXCEL};

/// Shared test helpers for import tests.
#[cfg(test)]
pub(crate) mod test_helpers {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::{json, Value};

    use super::cell::RawRow;
    use crate::directory::{
        CandidateDirectory, DriveRecord, JobRecord, LookupError, UserRecord,
    };

    /// In-memory directory. Ids listed in `failing` make the lookup error
    /// out instead of answering.
    #[derive(Default)]
    pub struct StubDirectory {
        pub jobs: HashMap<String, JobRecord>,
        pub users: HashMap<String, UserRecord>,
        pub drives: HashMap<String, DriveRecord>,
        pub failing: Vec<String>,
        pub calls: Mutex<Vec<String>>,
    }

    impl StubDirectory {
        /// Directory holding the fixtures used across import tests:
        /// one open job per lead type, a closed intern job, recruiter
        /// `REC1` and drive `CPD1`.
        pub fn seeded() -> Self {
            let mut dir = Self::default();
            dir.add_job("JOB123", "intern", "OPEN", Some("U-ASSIGNEE"));
            dir.add_job("JOB-CLOSED", "intern", "CLOSED", Some("U-ASSIGNEE"));
            dir.add_job("JOB-FT", "full-time", "OPEN", Some("U-FT"));
            dir.add_job("JOB-FT-CLOSED", "full-time", "CLOSED", Some("U-FT"));
            dir.add_job("JOB-CONS", "consultant", "OPEN", None);
            dir.users.insert(
                "REC1".to_string(),
                UserRecord {
                    id: "REC1".to_string(),
                },
            );
            dir.drives.insert(
                "CPD1".to_string(),
                DriveRecord(json!({ "_id": "CPD1", "name": "Campus 2024" })),
            );
            dir
        }

        pub fn add_job(&mut self, id: &str, job_type: &str, status: &str, assign_to: Option<&str>) {
            self.jobs.insert(
                id.to_string(),
                JobRecord {
                    id: id.to_string(),
                    job_type: job_type.to_string(),
                    status: status.to_string(),
                    assign_to: assign_to.map(str::to_string),
                },
            );
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().expect("calls lock").clone()
        }

        fn record(&self, kind: &str, id: &str) -> Result<(), LookupError> {
            self.calls
                .lock()
                .expect("calls lock")
                .push(format!("{kind}:{id}"));
            if self.failing.iter().any(|f| f == id) {
                return Err(LookupError::Transport("connection refused".to_string()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl CandidateDirectory for StubDirectory {
        async fn get_job(&self, job_id: &str) -> Result<Option<JobRecord>, LookupError> {
            self.record("job", job_id)?;
            Ok(self.jobs.get(job_id).cloned())
        }

        async fn get_user(&self, user_id: &str) -> Result<Option<UserRecord>, LookupError> {
            self.record("user", user_id)?;
            Ok(self.users.get(user_id).cloned())
        }

        async fn get_cpd_drive(&self, cpd_id: &str) -> Result<Option<DriveRecord>, LookupError> {
            self.record("drive", cpd_id)?;
            Ok(self.drives.get(cpd_id).cloned())
        }
    }

    /// Build a row from JSON cell values.
    pub fn row(cells: Value) -> RawRow {
        serde_json::from_value(cells).expect("row json")
    }

    /// A fully valid intern row referencing the seeded fixtures.
    pub fn intern_row() -> Value {
        json!([
            1, "Jane Doe", "2024-01-05", "JOB123", "JS", "SQL", 9876543210u64, "REC1",
            "jane@x.com", "applied", "WFH", "Pune", 85, "CPD1", "note"
        ])
    }

    /// A fully valid full-time row referencing the seeded fixtures.
    pub fn full_time_row() -> Value {
        json!([
            1, "John Smith", "05/01/2024", "JOB-FT", "Rust", "Go", 9123456780u64, "REC1",
            "john@example.com", "applied", "WHO", "Delhi", 72.5, 4, 6, 12.5, 18, 30,
            "2024-02-29", "https://linkedin.com/in/john", "strong systems background"
        ])
    }

    /// Replace cell `index` of a JSON row.
    pub fn with_cell(mut row: Value, index: usize, value: Value) -> Value {
        let cells = row.as_array_mut().expect("row array");
        if cells.len() <= index {
            cells.resize(index + 1, Value::Null);
        }
        cells[index] = value;
        row
    }
}
