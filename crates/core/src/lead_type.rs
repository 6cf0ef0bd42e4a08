//! Candidate lead types and the per-type import conventions.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Category of a candidate import. Determines the spreadsheet column
/// layout, the mandatory fields and which jobs a row may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LeadType {
    Intern,
    FullTime,
    Consultant,
}

/// Downloadable sample spreadsheet for a lead type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportTemplate {
    pub url: &'static str,
    pub name: &'static str,
}

impl LeadType {
    /// Route segment and job `type` value (e.g. `"full-time"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Intern => "intern",
            Self::FullTime => "full-time",
            Self::Consultant => "consultant",
        }
    }

    /// Value stored in a draft's `typeOfLead` field.
    pub fn as_upper(&self) -> &'static str {
        match self {
            Self::Intern => "INTERN",
            Self::FullTime => "FULL-TIME",
            Self::Consultant => "CONSULTANT",
        }
    }

    /// Draft fields that must be present for a row to be promoted.
    pub fn mandatory_fields(&self) -> &'static [&'static str] {
        match self {
            Self::Intern => &["name", "mobileNumber", "jobId", "status"],
            Self::FullTime | Self::Consultant => &["name", "mobileNumber", "jobId"],
        }
    }

    /// Message shown when a referenced job belongs to another lead type.
    pub fn job_type_mismatch_message(&self) -> String {
        match self {
            Self::Intern => "Only Intern jobs are allowed".to_string(),
            other => format!("Only {} jobs are allowed", other.as_str()),
        }
    }

    pub fn template(&self) -> ImportTemplate {
        match self {
            Self::Intern => ImportTemplate {
                url: "/intern_candidate.xlsx",
                name: "ATS | Candidate Import | Intern",
            },
            Self::FullTime => ImportTemplate {
                url: "/fulltime_candidate.xlsx",
                name: "ATS | Candidate Import | Full Time",
            },
            Self::Consultant => ImportTemplate {
                url: "/consultant_candidate.xlsx",
                name: "ATS | Candidate Import | Consultant",
            },
        }
    }
}

impl std::fmt::Display for LeadType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "intern" => Ok(Self::Intern),
            "full-time" => Ok(Self::FullTime),
            "consultant" => Ok(Self::Consultant),
            _ => Err(CoreError::UnknownLeadType(s.to_string())),
        }
    }
}
