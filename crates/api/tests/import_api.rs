//! HTTP-level integration tests for the candidate import endpoints.
//!
//! Requests go straight to the router via `tower::ServiceExt`; lookups hit
//! the seeded in-memory directory from `common`.

mod common;

use std::sync::Arc;
use std::time::Duration;

use ats_api::config::ServerConfig;
use axum::http::StatusCode;
use common::{
    body_json, build_test_app, build_test_app_with, get, post_file, post_json, test_config,
    SlowDirectory, StubDirectory,
};
use serde_json::{json, Value};

const INTERN_VALIDATE: &str = "/api/v1/candidates/import/intern/validate";
const FULL_TIME_VALIDATE: &str = "/api/v1/candidates/import/full-time/validate";
const INTERN_UPLOAD: &str = "/api/v1/candidates/import/intern/upload";

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
const INTERN_SHEET: &[u8] = include_bytes!("../../core/tests/fixtures/intern_sheet.xlsx");

fn intern_row() -> Value {
    json!([
        1, "Jane Doe", "2024-01-05", "JOB-INT", "JS", "SQL", 9876543210u64, "REC1",
        "jane@x.com", "applied", "WFH", "Pune", 85, "CPD1", "note"
    ])
}

fn full_time_row() -> Value {
    json!([
        1, "John Smith", "05/01/2024", "JOB-FT", "Rust", "Go", 9123456780u64, null,
        "john@example.com", "applied", "WHO", "Delhi", 72.5, 4, 6, 12.5, 18, 30,
        "2024-02-29", "https://linkedin.com/in/john", "strong systems background"
    ])
}

fn with_cell(mut row: Value, index: usize, value: Value) -> Value {
    row.as_array_mut().unwrap()[index] = value;
    row
}

#[tokio::test]
async fn valid_intern_row_becomes_a_draft() {
    let response = post_json(build_test_app(), INTERN_VALIDATE, json!({ "rows": [intern_row()] })).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["errorMessage"], json!([]));

    let draft = &data["data"][0];
    assert_eq!(draft["name"], "Jane Doe");
    assert_eq!(draft["typeOfLead"], "INTERN");
    assert_eq!(draft["date"], "2024-01-05T00:00:00.000Z");
    assert_eq!(draft["jobId"], "JOB-INT");
    assert_eq!(draft["mobileNumber"]["number"], "9876543210");
    assert_eq!(draft["mobileNumber"]["dialCode"], "+91");
    assert_eq!(draft["createdBy"], json!({ "_user": "REC1", "name": "ADMIN" }));
    assert_eq!(draft["status"], "APPLIED");
    assert_eq!(draft["location"], "WFH");
    assert_eq!(draft["currentLocation"]["formattedAddress"], "PUNE");
    assert_eq!(draft["testScore"], 85);
    assert_eq!(draft["_cpd"], "CPD1");
}

#[tokio::test]
async fn rejected_rows_report_spreadsheet_row_numbers() {
    let rows = json!([
        intern_row(),
        [],
        with_cell(intern_row(), 6, json!(12345)),
        with_cell(intern_row(), 3, json!("JOB-INT-CLOSED")),
    ]);
    let response = post_json(build_test_app(), INTERN_VALIDATE, json!({ "rows": rows })).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let outcome = &json["data"];
    assert_eq!(outcome["data"].as_array().unwrap().len(), 1);
    assert_eq!(
        outcome["errorMessage"],
        json!([
            { "Contact Number": "Contact Number should be a 10-digit number", "row": 4 },
            { "Job Title": "Please select Active Job Title", "row": 5 }
        ])
    );
}

#[tokio::test]
async fn job_type_mismatch_is_reported_on_job_title() {
    let rows = json!([with_cell(full_time_row(), 3, json!("JOB-INT"))]);
    let response = post_json(build_test_app(), FULL_TIME_VALIDATE, json!({ "rows": rows })).await;

    let json = body_json(response).await;
    assert_eq!(
        json["data"]["errorMessage"][0]["Job Title"],
        "Only full-time jobs are allowed"
    );
}

#[tokio::test]
async fn full_time_row_uses_job_assignee_without_recruiter() {
    let response = post_json(
        build_test_app(),
        FULL_TIME_VALIDATE,
        json!({ "rows": [full_time_row()] }),
    )
    .await;

    let json = body_json(response).await;
    let draft = &json["data"]["data"][0];
    assert_eq!(draft["typeOfLead"], "FULL-TIME");
    assert_eq!(draft["createdBy"], json!({ "_user": "U-FT", "name": "ADMIN" }));
    assert_eq!(draft["experience"], json!(4));
    assert_eq!(draft["ctc"], json!(12.5));
    assert_eq!(draft["lwd"], "2024-02-29T00:00:00.000Z");
    assert_eq!(draft["testScore"], 73);
}

#[tokio::test]
async fn over_limit_experience_rejects_full_time_row() {
    let rows = json!([with_cell(full_time_row(), 13, json!(21))]);
    let response = post_json(build_test_app(), FULL_TIME_VALIDATE, json!({ "rows": rows })).await;

    let json = body_json(response).await;
    assert_eq!(json["data"]["data"], json!([]));
    assert_eq!(
        json["data"]["errorMessage"][0],
        json!({ "Exp. (Y)": "Experience should not be greater than 20 years", "row": 2 })
    );
}

#[tokio::test]
async fn empty_row_list_is_rejected() {
    let response = post_json(build_test_app(), INTERN_VALIDATE, json!({ "rows": [] })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn unknown_lead_type_is_rejected() {
    let response = post_json(
        build_test_app(),
        "/api/v1/candidates/import/contractor/validate",
        json!({ "rows": [intern_row()] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UNKNOWN_LEAD_TYPE");
}

#[tokio::test]
async fn template_descriptor_per_lead_type() {
    let response = get(build_test_app(), "/api/v1/candidates/import/consultant/template").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(
        json["data"],
        json!({
            "url": "/consultant_candidate.xlsx",
            "name": "ATS | Candidate Import | Consultant"
        })
    );
}

#[tokio::test]
async fn list_query_from_search_params() {
    // status=[{"key":"APPLIED","value":"Applied"}], ctc={"isApply":true,"value":[3,9]}
    let uri = "/api/v1/candidates/intern/query?page=2&search=jane\
        &status=%5B%7B%22key%22%3A%22APPLIED%22%2C%22value%22%3A%22Applied%22%7D%5D\
        &ctc=%7B%22isApply%22%3Atrue%2C%22value%22%3A%5B3%2C9%5D%7D";
    let response = get(build_test_app(), uri).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let query = &json["data"];
    assert_eq!(query["page"], 2);
    assert_eq!(query["limit"], 20);
    assert_eq!(query["typeOfLead"], "INTERN");
    assert_eq!(query["filters"]["search"], "jane");
    assert_eq!(query["filters"]["campusType"], "both");
    assert_eq!(query["filters"]["status"], json!(["APPLIED"]));
    assert_eq!(
        query["filters"]["ctc"],
        json!({ "startAmount": 3.0, "endAmount": 9.0 })
    );
    assert_eq!(query["filterCount"], 2);
}

#[tokio::test]
async fn malformed_filter_param_is_rejected() {
    let response = get(build_test_app(), "/api/v1/candidates/full-time/query?source=oops").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("source"));
}

#[tokio::test]
async fn import_outlives_the_request_timeout() {
    // Four sequential 400ms job lookups exceed the 1s request timeout.
    let config = ServerConfig {
        request_timeout_secs: 1,
        import_concurrency: 1,
        ..test_config()
    };
    let directory = SlowDirectory {
        inner: StubDirectory::seeded(),
        delay: Duration::from_millis(400),
    };
    let app = build_test_app_with(config, Arc::new(directory));

    let rows = json!([intern_row(), intern_row(), intern_row(), intern_row()]);
    let response = post_json(app, INTERN_VALIDATE, json!({ "rows": rows })).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["data"].as_array().unwrap().len(), 4);
    assert_eq!(json["data"]["errorMessage"], json!([]));
}

#[tokio::test]
async fn uploaded_workbook_is_validated() {
    let response = post_file(build_test_app(), INTERN_UPLOAD, "intern.xlsx", XLSX_MIME, INTERN_SHEET).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];

    // Header dropped, blank row 3 skipped, row 4 rejected.
    let drafts = data["data"].as_array().unwrap();
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0]["name"], "Jane Doe");
    assert_eq!(drafts[0]["mobileNumber"]["number"], "9876543210");
    assert_eq!(
        data["errorMessage"],
        json!([{ "Contact Number": "Contact Number should be a 10-digit number", "row": 4 }])
    );
}

#[tokio::test]
async fn non_excel_upload_is_rejected() {
    let response = post_file(
        build_test_app(),
        INTERN_UPLOAD,
        "intern.csv",
        "text/csv",
        b"name,phone\nJane,9876543210\n",
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Upload excel or xls file");
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn unreadable_workbook_is_rejected() {
    let response = post_file(
        build_test_app(),
        INTERN_UPLOAD,
        "intern.xlsx",
        XLSX_MIME,
        b"not a zip archive",
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}
