//! Handlers for the `/candidates` resource.
//!
//! Import validation is a dry run: rows are classified and returned as
//! valid drafts plus per-row errors; nothing is persisted here. Rows come
//! either pre-decoded as JSON or as an uploaded workbook.

use axum::extract::{Multipart, Path, Query, State};
use axum::Json;
use serde::Deserialize;

use ats_core::filters::{CandidateFilterState, CandidateListQuery, SearchParams};
use ats_core::import::{
    decode_workbook, is_excel_mime, validate_upload_buffered, ImportOutcome, RawRow,
    UPLOAD_NOT_EXCEL,
};
use ats_core::lead_type::{ImportTemplate, LeadType};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Decoded spreadsheet rows, header row already removed.
#[derive(Debug, Deserialize)]
pub struct ValidateImportRequest {
    pub rows: Vec<RawRow>,
}

/// POST /api/v1/candidates/import/{type_of_lead}/validate
///
/// Classify every row. Row problems never fail the request; they are
/// reported in `errorMessage`.
pub async fn validate_import(
    State(state): State<AppState>,
    Path(type_of_lead): Path<String>,
    Json(input): Json<ValidateImportRequest>,
) -> AppResult<Json<DataResponse<ImportOutcome>>> {
    let lead_type: LeadType = type_of_lead.parse()?;
    if input.rows.is_empty() {
        return Err(AppError::BadRequest("rows must not be empty".to_string()));
    }

    run_import(&state, lead_type, &input.rows).await
}

/// Multipart field carrying the workbook.
const UPLOAD_FIELD: &str = "file";

/// POST /api/v1/candidates/import/{type_of_lead}/upload
///
/// Multipart upload of an `.xlsx`/`.xls` file in the `file` field. The
/// first sheet is decoded, its header row dropped, and the rest validated
/// exactly like [`validate_import`].
pub async fn upload_import(
    State(state): State<AppState>,
    Path(type_of_lead): Path<String>,
    mut multipart: Multipart,
) -> AppResult<Json<DataResponse<ImportOutcome>>> {
    let lead_type: LeadType = type_of_lead.parse()?;

    let mut workbook = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        if !field.content_type().is_some_and(is_excel_mime) {
            return Err(AppError::BadRequest(UPLOAD_NOT_EXCEL.to_string()));
        }
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        workbook = Some(bytes.to_vec());
        break;
    }
    let bytes = workbook
        .ok_or_else(|| AppError::BadRequest(format!("missing `{UPLOAD_FIELD}` field")))?;

    let rows = tokio::task::spawn_blocking(move || decode_workbook(bytes))
        .await
        .map_err(|e| AppError::InternalError(format!("workbook decoder panicked: {e}")))??;
    if rows.is_empty() {
        return Err(AppError::BadRequest(
            "workbook has no candidate rows".to_string(),
        ));
    }

    run_import(&state, lead_type, &rows).await
}

async fn run_import(
    state: &AppState,
    lead_type: LeadType,
    rows: &[RawRow],
) -> AppResult<Json<DataResponse<ImportOutcome>>> {
    tracing::info!(lead_type = %lead_type, rows = rows.len(), "Validating candidate import");

    let outcome = validate_upload_buffered(
        rows,
        lead_type,
        state.directory.as_ref(),
        state.config.import_concurrency,
    )
    .await;

    Ok(Json(DataResponse::new(outcome)))
}

/// GET /api/v1/candidates/import/{type_of_lead}/template
pub async fn import_template(
    Path(type_of_lead): Path<String>,
) -> AppResult<Json<DataResponse<ImportTemplate>>> {
    let lead_type: LeadType = type_of_lead.parse()?;
    Ok(Json(DataResponse::new(lead_type.template())))
}

/// GET /api/v1/candidates/{type_of_lead}/query?status=...&page=...
///
/// Translate the list screen's search params into the list request body.
pub async fn list_query(
    Path(type_of_lead): Path<String>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<DataResponse<CandidateListQuery>>> {
    let lead_type: LeadType = type_of_lead.parse()?;
    let filters = CandidateFilterState::from_params(&params)?;
    Ok(Json(DataResponse::new(filters.to_list_query(lead_type))))
}
