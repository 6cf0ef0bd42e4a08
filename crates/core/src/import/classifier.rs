//! Per-row classification: one rule per column, producing a draft and the
//! column errors of the row.
//!
//! Every rule follows the same shape: type guard, presence check, domain
//! check and, for id columns, a directory lookup. Lookup failures become
//! column errors; nothing here returns an error to the caller.
//!
//! The job column derives `createdBy` from the job's assignee. The recruiter
//! column is evaluated afterwards and, when it resolves, overwrites it.

use super::cell::{Cell, RawRow};
use super::columns::{Column, Layout};
use super::draft::{CandidateDraft, CreatedBy, CurrentLocation};
use super::normalize::{normalize_mobile, parse_date, round_score, validate_email, validate_name};
use super::report::{ColumnErrors, RowError};
use crate::directory::CandidateDirectory;
use crate::lead_type::LeadType;

// ── Bounds ───────────────────────────────────────────────────────────

pub const MAX_EXPERIENCE_YEARS: f64 = 20.0;
pub const MAX_CTC_LPA: f64 = 50.0;
pub const MAX_EXPECTED_CTC_LPA: f64 = 50.0;
pub const MAX_NOTICE_PERIOD_DAYS: f64 = 100.0;

// ── Messages ─────────────────────────────────────────────────────────

pub const NAME_REQUIRED: &str = "Name is required";
pub const NAME_INVALID: &str = "Name must be a string";
pub const DATE_INVALID: &str = "Please enter a valid date";
pub const JOB_REQUIRED: &str = "Job Title is required";
pub const JOB_NOT_TEXT: &str = "Please enter a valid job Title Id";
pub const JOB_INVALID: &str = "Invalid Job Title Id";
pub const JOB_INACTIVE: &str = "Please select Active Job Title";
pub const FIRST_SKILL_INVALID: &str = "First skill must be a string";
pub const SECOND_SKILL_INVALID: &str = "Second skill must be a string";
pub const CONTACT_REQUIRED: &str = "Contact Number is required";
pub const CONTACT_NOT_NUMBER: &str = "Please enter only numbers for Contact Number";
pub const CONTACT_LENGTH: &str = "Contact Number should be a 10-digit number";
pub const RECRUITER_INVALID: &str = "Please enter a valid recruiter Id";
pub const EMAIL_INVALID: &str = "Please enter a valid email address";
pub const STATUS_REQUIRED: &str = "Status is required";
pub const STATUS_NOT_TEXT: &str = "Status must be string";
pub const WORK_LOCATION_INVALID: &str = "Work Location must be WHO or WFH";
pub const HOME_LOCATION_INVALID: &str = "Home Location must be a string";
pub const SCORE_NOT_NUMBER: &str = "Technical score must be a number";
pub const CPD_INVALID: &str = "Please enter a valid CPD ID";
pub const COMMENTS_INVALID: &str = "Comment must be a string";
pub const EXPERIENCE_OVER_LIMIT: &str = "Experience should not be greater than 20 years";
pub const EXPERIENCE_NOT_NUMBER: &str = "Experience must be in year";
pub const EXPERIENCE_MONTHS_NOT_NUMBER: &str = "Experience must be in month";
pub const CTC_OVER_LIMIT: &str = "CTC should not be greater than 50 LPA";
pub const CTC_NOT_NUMBER: &str = "CTC must be in LPA";
pub const ECTC_OVER_LIMIT: &str = "Expected CTC should not be greater than 50 LPA";
pub const ECTC_NOT_NUMBER: &str = "Expected CTC must be in LPA";
pub const NOTICE_OVER_LIMIT: &str = "Notice period should not be greater than 100 days";
pub const NOTICE_NOT_NUMBER: &str = "Notice period must be in days";
pub const LWD_INVALID: &str = "LWD must be a date";
pub const PROFILE_URL_INVALID: &str = "Profile Url must be a valid url";

// ── Result ───────────────────────────────────────────────────────────

/// Draft and column errors of one row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifiedRow {
    pub draft: CandidateDraft,
    pub errors: ColumnErrors,
}

/// What the batch does with a classified row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowVerdict {
    Accepted(CandidateDraft),
    Rejected(RowError),
    /// Mandatory fields missing but no column reported an error.
    Dropped,
}

impl ClassifiedRow {
    /// Any column error rejects the row, even when the mandatory fields
    /// are all present.
    pub fn into_verdict(self, lead_type: LeadType, row: usize) -> RowVerdict {
        if !self.errors.is_empty() {
            RowVerdict::Rejected(self.errors.into_row_error(row))
        } else if self.draft.has_mandatory_fields(lead_type) {
            RowVerdict::Accepted(self.draft)
        } else {
            RowVerdict::Dropped
        }
    }
}

// ── Entry points ─────────────────────────────────────────────────────

/// Classify `row` with the variant matching `lead_type`.
pub async fn classify_row(
    row: &RawRow,
    lead_type: LeadType,
    directory: &dyn CandidateDirectory,
) -> ClassifiedRow {
    match lead_type {
        LeadType::Intern => classify_intern_row(row, directory).await,
        LeadType::FullTime | LeadType::Consultant => {
            classify_professional_row(row, lead_type, directory).await
        }
    }
}

/// Intern sheet: shared columns, then the campus drive and comments.
pub async fn classify_intern_row(row: &RawRow, directory: &dyn CandidateDirectory) -> ClassifiedRow {
    let mut ctx = RowContext::new(row, LeadType::Intern);
    ctx.shared_columns(directory).await;
    ctx.cpd_drive(directory).await;
    ctx.comments();
    ctx.finish()
}

/// Full-time and consultant sheets: shared columns, then experience,
/// compensation, notice period, last working day, profile URL and comments.
pub async fn classify_professional_row(
    row: &RawRow,
    lead_type: LeadType,
    directory: &dyn CandidateDirectory,
) -> ClassifiedRow {
    let mut ctx = RowContext::new(row, lead_type);
    ctx.shared_columns(directory).await;

    ctx.draft.experience = ctx.bounded_number(
        Column::ExperienceYears,
        MAX_EXPERIENCE_YEARS,
        EXPERIENCE_OVER_LIMIT,
        EXPERIENCE_NOT_NUMBER,
    );
    ctx.draft.exp_month = ctx.optional_number(Column::ExperienceMonths, EXPERIENCE_MONTHS_NOT_NUMBER);
    ctx.draft.ctc = ctx.bounded_number(Column::Ctc, MAX_CTC_LPA, CTC_OVER_LIMIT, CTC_NOT_NUMBER);
    ctx.draft.ectc = ctx.bounded_number(
        Column::ExpectedCtc,
        MAX_EXPECTED_CTC_LPA,
        ECTC_OVER_LIMIT,
        ECTC_NOT_NUMBER,
    );
    ctx.draft.notice_period = ctx.bounded_number(
        Column::NoticePeriod,
        MAX_NOTICE_PERIOD_DAYS,
        NOTICE_OVER_LIMIT,
        NOTICE_NOT_NUMBER,
    );
    ctx.draft.lwd = ctx.optional_date(Column::LastWorkingDay, LWD_INVALID);
    ctx.draft.url = ctx.optional_text(Column::ProfileUrl, PROFILE_URL_INVALID);
    ctx.comments();
    ctx.finish()
}

// ── Column rules ─────────────────────────────────────────────────────

struct RowContext<'r> {
    row: &'r RawRow,
    layout: &'static Layout,
    lead_type: LeadType,
    draft: CandidateDraft,
    errors: ColumnErrors,
}

impl<'r> RowContext<'r> {
    fn new(row: &'r RawRow, lead_type: LeadType) -> Self {
        Self {
            row,
            layout: lead_type.layout(),
            lead_type,
            draft: CandidateDraft::default(),
            errors: ColumnErrors::default(),
        }
    }

    fn finish(self) -> ClassifiedRow {
        ClassifiedRow {
            draft: self.draft,
            errors: self.errors,
        }
    }

    fn cell(&self, column: Column) -> &'r Cell {
        self.row.cell(self.layout, column)
    }

    fn reject(&mut self, column: Column, message: impl Into<String>) {
        self.errors.push(column, message);
    }

    /// Columns 1..=12.
    async fn shared_columns(&mut self, directory: &dyn CandidateDirectory) {
        self.name();
        self.draft.date = self.optional_date(Column::Date, DATE_INVALID);
        self.job(directory).await;
        self.draft.first_skill = self.optional_text(Column::FirstSkill, FIRST_SKILL_INVALID);
        self.draft.second_skill = self.optional_text(Column::SecondSkill, SECOND_SKILL_INVALID);
        self.contact_number();
        self.recruiter(directory).await;
        self.email();
        self.status();
        self.draft.location = self
            .optional_text(Column::WorkLocation, WORK_LOCATION_INVALID)
            .map(|location| location.to_uppercase());
        self.draft.current_location = self
            .optional_text(Column::HomeLocation, HOME_LOCATION_INVALID)
            .map(|address| CurrentLocation {
                formatted_address: address.to_uppercase(),
            });
        self.draft.test_score = self
            .optional_number(Column::TechnicalScore, SCORE_NOT_NUMBER)
            .map(round_score);
    }

    /// A present name that is not text is left unset without an error, so
    /// such a row is dropped rather than reported.
    fn name(&mut self) {
        match self.cell(Column::Name) {
            Cell::Text(name) if validate_name(name) => {
                self.draft.name = Some(name.trim().to_string());
                self.draft.type_of_lead = Some(self.lead_type.as_upper().to_string());
            }
            Cell::Text(_) => self.reject(Column::Name, NAME_INVALID),
            Cell::Missing => self.reject(Column::Name, NAME_REQUIRED),
            Cell::Number(_) | Cell::Other(_) => {}
        }
    }

    async fn job(&mut self, directory: &dyn CandidateDirectory) {
        let job_id = match self.cell(Column::JobTitle) {
            Cell::Text(raw) => raw.trim(),
            Cell::Missing => return self.reject(Column::JobTitle, JOB_REQUIRED),
            Cell::Number(_) | Cell::Other(_) => return self.reject(Column::JobTitle, JOB_NOT_TEXT),
        };

        let job = match directory.get_job(job_id).await {
            Ok(Some(job)) => job,
            Ok(None) => return self.reject(Column::JobTitle, JOB_INVALID),
            Err(err) => {
                tracing::warn!(job_id, error = %err, "Job lookup failed during import");
                return self.reject(Column::JobTitle, JOB_INVALID);
            }
        };

        if job.job_type != self.lead_type.as_str() {
            let message = self.lead_type.job_type_mismatch_message();
            self.reject(Column::JobTitle, message);
        } else if !job.is_open() {
            self.reject(Column::JobTitle, JOB_INACTIVE);
        } else {
            self.draft.created_by = Some(CreatedBy::import_owner(job.assign_to));
            self.draft.job_id = Some(job.id);
        }
    }

    fn contact_number(&mut self) {
        match self.cell(Column::ContactNumber) {
            Cell::Number(value) => match normalize_mobile(*value) {
                Some(mobile) => self.draft.mobile_number = Some(mobile),
                None => self.reject(Column::ContactNumber, CONTACT_LENGTH),
            },
            Cell::Missing => self.reject(Column::ContactNumber, CONTACT_REQUIRED),
            Cell::Text(_) | Cell::Other(_) => self.reject(Column::ContactNumber, CONTACT_NOT_NUMBER),
        }
    }

    /// Not found, lookup failure and a non-text id all share one message.
    async fn recruiter(&mut self, directory: &dyn CandidateDirectory) {
        let user_id = match self.cell(Column::Recruiter) {
            Cell::Text(raw) => raw.trim(),
            Cell::Missing => return,
            Cell::Number(_) | Cell::Other(_) => {
                return self.reject(Column::Recruiter, RECRUITER_INVALID)
            }
        };

        match directory.get_user(user_id).await {
            Ok(Some(user)) => {
                self.draft.created_by = Some(CreatedBy::import_owner(Some(user.id)));
            }
            Ok(None) => self.reject(Column::Recruiter, RECRUITER_INVALID),
            Err(err) => {
                tracing::warn!(user_id, error = %err, "Recruiter lookup failed during import");
                self.reject(Column::Recruiter, RECRUITER_INVALID);
            }
        }
    }

    fn email(&mut self) {
        match self.cell(Column::Email) {
            Cell::Text(email) if validate_email(email) => {
                self.draft.email = Some(email.trim().to_string());
            }
            Cell::Missing => {}
            _ => self.reject(Column::Email, EMAIL_INVALID),
        }
    }

    /// Reported as required for every lead type; only intern imports
    /// need it for promotion.
    fn status(&mut self) {
        match self.cell(Column::Status) {
            Cell::Text(status) => self.draft.status = Some(status.trim().to_uppercase()),
            Cell::Missing => self.reject(Column::Status, STATUS_REQUIRED),
            Cell::Number(_) | Cell::Other(_) => self.reject(Column::Status, STATUS_NOT_TEXT),
        }
    }

    async fn cpd_drive(&mut self, directory: &dyn CandidateDirectory) {
        let cpd_id = match self.cell(Column::CpdId) {
            Cell::Text(raw) => raw.trim(),
            Cell::Missing => return,
            Cell::Number(_) | Cell::Other(_) => return self.reject(Column::CpdId, CPD_INVALID),
        };

        match directory.get_cpd_drive(cpd_id).await {
            Ok(Some(_)) => self.draft.cpd = Some(cpd_id.to_string()),
            Ok(None) => self.reject(Column::CpdId, CPD_INVALID),
            Err(err) => {
                tracing::warn!(cpd_id, error = %err, "Drive lookup failed during import");
                self.reject(Column::CpdId, CPD_INVALID);
            }
        }
    }

    fn comments(&mut self) {
        self.draft.comments = self.optional_text(Column::Comments, COMMENTS_INVALID);
    }

    // ── Generic rules ────────────────────────────────────────────────

    /// Trimmed text; a present non-text value is rejected with `message`.
    fn optional_text(&mut self, column: Column, message: &str) -> Option<String> {
        match self.cell(column) {
            Cell::Text(text) => Some(text.trim().to_string()),
            Cell::Missing => None,
            Cell::Number(_) | Cell::Other(_) => {
                self.reject(column, message);
                None
            }
        }
    }

    fn optional_number(&mut self, column: Column, message: &str) -> Option<f64> {
        match self.cell(column) {
            Cell::Number(value) => Some(*value),
            Cell::Missing => None,
            Cell::Text(_) | Cell::Other(_) => {
                self.reject(column, message);
                None
            }
        }
    }

    /// Number with an inclusive upper bound.
    fn bounded_number(
        &mut self,
        column: Column,
        max: f64,
        over_limit: &str,
        not_number: &str,
    ) -> Option<f64> {
        let value = self.optional_number(column, not_number)?;
        if value <= max {
            Some(value)
        } else {
            self.reject(column, over_limit);
            None
        }
    }

    /// ISO date; blank text counts as omitted, anything else that does
    /// not parse is rejected with `message`.
    fn optional_date(&mut self, column: Column, message: &str) -> Option<String> {
        match self.cell(column) {
            Cell::Missing => None,
            Cell::Text(text) if text.trim().is_empty() => None,
            Cell::Text(text) => {
                let parsed = parse_date(text);
                if parsed.is_none() {
                    self.reject(column, message);
                }
                parsed
            }
            Cell::Number(_) | Cell::Other(_) => {
                self.reject(column, message);
                None
            }
        }
    }
}
