//! Candidate list filters carried in URL search params.
//!
//! The list screen keeps its filter state in the page URL so that filtered
//! views can be shared and survive reloads. Each filter is one search param
//! whose value is JSON: chip lists (`[{ "key", "value" }]`), a date chip
//! list, or a range slider (`{ "isApply", "value": [lo, hi] }`). This module
//! parses those params, counts active filters, builds the list request and
//! writes the state back.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::lead_type::LeadType;

/// Page size of the candidate list.
pub const LIST_PAGE_SIZE: u32 = 20;

pub const PARAM_PAGE: &str = "page";
pub const PARAM_SEARCH: &str = "search";
pub const PARAM_STATUS: &str = "status";
pub const PARAM_SOURCE: &str = "source";
pub const PARAM_CPD: &str = "cpd";
pub const PARAM_JOB_ID: &str = "jobId";
pub const PARAM_ASSIGN_TO: &str = "assign-to";
pub const PARAM_DATE: &str = "date";
pub const PARAM_EXPERIENCE: &str = "experience";
pub const PARAM_CTC: &str = "ctc";
pub const PARAM_ECTC: &str = "ectc";
pub const PARAM_NOTICE_PERIOD: &str = "notice-period";

/// Every param cleared by "remove filters". Page and search survive.
pub const FILTER_PARAMS: &[&str] = &[
    PARAM_STATUS,
    PARAM_SOURCE,
    PARAM_JOB_ID,
    PARAM_CPD,
    PARAM_ASSIGN_TO,
    PARAM_EXPERIENCE,
    PARAM_CTC,
    PARAM_ECTC,
    PARAM_NOTICE_PERIOD,
    PARAM_DATE,
];

/// Campus-type pseudo keys mixed into the `cpd` chip list.
const CAMPUS_KEYS: [&str; 2] = ["onCampus", "offCampus"];

const DEFAULT_RANGE: [f64; 2] = [1.0, 5.0];
const DEFAULT_NOTICE_RANGE: [f64; 2] = [15.0, 30.0];

/// Search params as a flat key/value map.
pub type SearchParams = BTreeMap<String, String>;

// ── Filter state ─────────────────────────────────────────────────────

/// A selected chip: `key` is the id sent to the API, `value` its label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterChip {
    pub key: String,
    pub value: String,
}

/// A selected date period with its resolved bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateChip {
    pub key: String,
    pub value: String,
    pub start_date: String,
    pub end_date: String,
}

/// A range slider; only applied sliders filter the list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeFilter {
    pub is_apply: bool,
    pub value: [f64; 2],
}

impl RangeFilter {
    fn unapplied(value: [f64; 2]) -> Self {
        Self {
            is_apply: false,
            value,
        }
    }

    fn to_amount(&self) -> Option<AmountRange> {
        self.is_apply.then_some(AmountRange {
            start_amount: self.value[0],
            end_amount: self.value[1],
        })
    }
}

/// Filter state of the candidate list.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateFilterState {
    pub page: u32,
    pub search: String,
    pub status: Vec<FilterChip>,
    pub source: Vec<FilterChip>,
    pub cpd: Vec<FilterChip>,
    pub job_id: Vec<FilterChip>,
    pub assign_to: Vec<FilterChip>,
    pub date: Vec<DateChip>,
    pub experience: RangeFilter,
    pub ctc: RangeFilter,
    pub ectc: RangeFilter,
    pub notice_period: RangeFilter,
}

impl Default for CandidateFilterState {
    fn default() -> Self {
        Self {
            page: 1,
            search: String::new(),
            status: Vec::new(),
            source: Vec::new(),
            cpd: Vec::new(),
            job_id: Vec::new(),
            assign_to: Vec::new(),
            date: Vec::new(),
            experience: RangeFilter::unapplied(DEFAULT_RANGE),
            ctc: RangeFilter::unapplied(DEFAULT_RANGE),
            ectc: RangeFilter::unapplied(DEFAULT_RANGE),
            notice_period: RangeFilter::unapplied(DEFAULT_NOTICE_RANGE),
        }
    }
}

impl CandidateFilterState {
    /// Parse the list's search params. Absent params take their defaults;
    /// a param that is present but not valid JSON of the expected shape is
    /// a validation error naming the param.
    pub fn from_params(params: &SearchParams) -> Result<Self, CoreError> {
        let defaults = Self::default();

        let page = match params.get(PARAM_PAGE) {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|page| *page > 0)
                .ok_or_else(|| invalid_param(PARAM_PAGE))?,
            None => defaults.page,
        };

        Ok(Self {
            page,
            search: params.get(PARAM_SEARCH).cloned().unwrap_or_default(),
            status: json_param(params, PARAM_STATUS)?.unwrap_or_default(),
            source: json_param(params, PARAM_SOURCE)?.unwrap_or_default(),
            cpd: json_param(params, PARAM_CPD)?.unwrap_or_default(),
            job_id: json_param(params, PARAM_JOB_ID)?.unwrap_or_default(),
            assign_to: json_param(params, PARAM_ASSIGN_TO)?.unwrap_or_default(),
            date: json_param(params, PARAM_DATE)?.unwrap_or_default(),
            experience: json_param(params, PARAM_EXPERIENCE)?.unwrap_or(defaults.experience),
            ctc: json_param(params, PARAM_CTC)?.unwrap_or(defaults.ctc),
            ectc: json_param(params, PARAM_ECTC)?.unwrap_or(defaults.ectc),
            notice_period: json_param(params, PARAM_NOTICE_PERIOD)?
                .unwrap_or(defaults.notice_period),
        })
    }

    /// Number of active filters: one per non-empty chip list and one per
    /// applied slider.
    pub fn filter_count(&self) -> usize {
        let chip_lists = [
            self.status.is_empty(),
            self.job_id.is_empty(),
            self.source.is_empty(),
            self.cpd.is_empty(),
            self.assign_to.is_empty(),
            self.date.is_empty(),
        ];
        let sliders = [
            self.experience.is_apply,
            self.ctc.is_apply,
            self.ectc.is_apply,
            self.notice_period.is_apply,
        ];
        chip_lists.iter().filter(|empty| !**empty).count()
            + sliders.iter().filter(|applied| **applied).count()
    }

    /// Build the list request for `lead_type`.
    pub fn to_list_query(&self, lead_type: LeadType) -> CandidateListQuery {
        let campus: Vec<&str> = self
            .cpd
            .iter()
            .map(|chip| chip.key.as_str())
            .filter(|key| CAMPUS_KEYS.contains(key))
            .collect();
        let campus_type = match campus.as_slice() {
            [single] => (*single).to_string(),
            _ => "both".to_string(),
        };

        CandidateListQuery {
            page: self.page,
            limit: LIST_PAGE_SIZE,
            type_of_lead: lead_type.as_upper().to_string(),
            filters: ListFilters {
                search: self.search.clone(),
                campus_type,
                status: keys(&self.status),
                source: keys(&self.source),
                job_id: keys(&self.job_id),
                cpd: self
                    .cpd
                    .iter()
                    .filter(|chip| !CAMPUS_KEYS.contains(&chip.key.as_str()))
                    .map(|chip| chip.key.clone())
                    .collect(),
                assign_to: keys(&self.assign_to),
                created_at: self.date.first().map(|chip| DateRange {
                    start_date: chip.start_date.clone(),
                    end_date: chip.end_date.clone(),
                }),
                experience: self.experience.to_amount(),
                ctc: self.ctc.to_amount(),
                ectc: self.ectc.to_amount(),
                notice_period: self.notice_period.to_amount(),
            },
            filter_count: self.filter_count(),
        }
    }

    /// Search params written when the user applies a filter change. The
    /// page resets to 1 since the old page may be past the new last page.
    pub fn apply_params(&self) -> Result<SearchParams, CoreError> {
        Self {
            page: 1,
            ..self.clone()
        }
        .to_params()
    }

    /// Write the state back as search params. Empty chip lists and
    /// unapplied sliders are omitted so the URL stays short.
    pub fn to_params(&self) -> Result<SearchParams, CoreError> {
        let mut params = SearchParams::new();
        params.insert(PARAM_PAGE.to_string(), self.page.to_string());
        if !self.search.is_empty() {
            params.insert(PARAM_SEARCH.to_string(), self.search.clone());
        }

        put_chips(&mut params, PARAM_STATUS, &self.status)?;
        put_chips(&mut params, PARAM_SOURCE, &self.source)?;
        put_chips(&mut params, PARAM_CPD, &self.cpd)?;
        put_chips(&mut params, PARAM_JOB_ID, &self.job_id)?;
        put_chips(&mut params, PARAM_ASSIGN_TO, &self.assign_to)?;
        put_chips(&mut params, PARAM_DATE, &self.date)?;

        for (name, range) in [
            (PARAM_EXPERIENCE, &self.experience),
            (PARAM_CTC, &self.ctc),
            (PARAM_ECTC, &self.ectc),
            (PARAM_NOTICE_PERIOD, &self.notice_period),
        ] {
            if range.is_apply {
                params.insert(name.to_string(), to_json(range)?);
            }
        }

        Ok(params)
    }
}

/// Drop every filter param, keeping page and search.
pub fn clear_filter_params(params: &mut SearchParams) {
    for name in FILTER_PARAMS {
        params.remove(*name);
    }
}

// ── List request ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmountRange {
    pub start_amount: f64,
    pub end_amount: f64,
}

/// Filters sent to the candidate list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilters {
    pub search: String,
    /// `onCampus`, `offCampus` or `both`.
    pub campus_type: String,
    pub status: Vec<String>,
    pub source: Vec<String>,
    pub job_id: Vec<String>,
    pub cpd: Vec<String>,
    pub assign_to: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<AmountRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ctc: Option<AmountRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ectc: Option<AmountRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice_period: Option<AmountRange>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateListQuery {
    pub page: u32,
    pub limit: u32,
    pub type_of_lead: String,
    pub filters: ListFilters,
    pub filter_count: usize,
}

// ── Helpers ──────────────────────────────────────────────────────────

fn invalid_param(name: &str) -> CoreError {
    CoreError::Validation(format!("Invalid filter parameter `{name}`"))
}

fn json_param<T: DeserializeOwned>(params: &SearchParams, name: &str) -> Result<Option<T>, CoreError> {
    match params.get(name).map(|raw| raw.trim()) {
        None | Some("") => Ok(None),
        Some(raw) => serde_json::from_str(raw)
            .map(Some)
            .map_err(|_| invalid_param(name)),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, CoreError> {
    serde_json::to_string(value).map_err(|e| CoreError::Internal(e.to_string()))
}

fn put_chips<T: Serialize>(params: &mut SearchParams, name: &str, chips: &[T]) -> Result<(), CoreError> {
    if !chips.is_empty() {
        params.insert(name.to_string(), to_json(&chips)?);
    }
    Ok(())
}

fn keys(chips: &[FilterChip]) -> Vec<String> {
    chips.iter().map(|chip| chip.key.clone()).collect()
}
