//! Batch entry points: classify every row and partition the results.

use futures::stream::{self, StreamExt};

use super::cell::RawRow;
use super::classifier::{classify_row, ClassifiedRow, RowVerdict};
use super::report::ImportOutcome;
use crate::directory::CandidateDirectory;
use crate::lead_type::LeadType;

/// Spreadsheet row number of the first data row (row 1 is the header).
pub const FIRST_DATA_ROW: usize = 2;

/// Validate an uploaded sheet one row at a time, in input order.
///
/// Never fails: every problem is reported in the outcome's error list.
/// Zero-length rows are skipped but still consume a row number so that
/// reported numbers match the spreadsheet.
pub async fn validate_upload(
    rows: &[RawRow],
    lead_type: LeadType,
    directory: &dyn CandidateDirectory,
) -> ImportOutcome {
    let mut outcome = ImportOutcome::default();

    for (index, raw) in rows.iter().enumerate() {
        if raw.is_empty() {
            continue;
        }
        let classified = classify_row(raw, lead_type, directory).await;
        record(&mut outcome, lead_type, FIRST_DATA_ROW + index, classified);
    }

    log_outcome(&outcome, rows.len(), lead_type);
    outcome
}

/// Like [`validate_upload`], but classifies up to `limit` rows at a time.
///
/// Results are still collected in input order, so the outcome is identical
/// to the sequential variant. A `limit` of 0 or 1 runs sequentially.
pub async fn validate_upload_buffered(
    rows: &[RawRow],
    lead_type: LeadType,
    directory: &dyn CandidateDirectory,
    limit: usize,
) -> ImportOutcome {
    if limit <= 1 {
        return validate_upload(rows, lead_type, directory).await;
    }

    let pending: Vec<_> = rows
        .iter()
        .enumerate()
        .map(|(index, raw)| classify_indexed(index, raw, lead_type, directory))
        .collect();
    let classified: Vec<(usize, Option<ClassifiedRow>)> =
        stream::iter(pending).buffered(limit).collect().await;

    let mut outcome = ImportOutcome::default();
    for (row, result) in classified {
        if let Some(result) = result {
            record(&mut outcome, lead_type, row, result);
        }
    }

    log_outcome(&outcome, rows.len(), lead_type);
    outcome
}

/// Classify one row, tagged with its spreadsheet row number. Empty rows
/// yield `None`.
async fn classify_indexed(
    index: usize,
    raw: &RawRow,
    lead_type: LeadType,
    directory: &dyn CandidateDirectory,
) -> (usize, Option<ClassifiedRow>) {
    let row = FIRST_DATA_ROW + index;
    if raw.is_empty() {
        return (row, None);
    }
    (row, Some(classify_row(raw, lead_type, directory).await))
}

fn record(outcome: &mut ImportOutcome, lead_type: LeadType, row: usize, classified: ClassifiedRow) {
    match classified.into_verdict(lead_type, row) {
        RowVerdict::Accepted(draft) => outcome.data.push(draft),
        RowVerdict::Rejected(error) => outcome.error_message.push(error),
        RowVerdict::Dropped => {
            tracing::debug!(
                row,
                "Import row dropped: mandatory fields missing without column errors"
            );
        }
    }
}

fn log_outcome(outcome: &ImportOutcome, total_rows: usize, lead_type: LeadType) {
    tracing::info!(
        lead_type = %lead_type,
        total_rows,
        valid = outcome.data.len(),
        rejected = outcome.error_message.len(),
        "Candidate import validated"
    );
}
