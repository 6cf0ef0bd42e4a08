//! The normalised candidate record built from one spreadsheet row.

use serde::{Deserialize, Serialize, Serializer};

use crate::lead_type::LeadType;

/// Owner name recorded on imported candidates.
pub const IMPORT_OWNER_NAME: &str = "ADMIN";

/// Phone number in the structure the candidate service stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MobileNumber {
    pub number: String,
    pub dial_code: String,
    pub iso2: String,
    pub country: String,
}

impl MobileNumber {
    /// An Indian mobile number; `number` holds the 10 local digits.
    pub fn india(number: String) -> Self {
        Self {
            number,
            dial_code: "+91".to_string(),
            iso2: "IN".to_string(),
            country: "INDIA".to_string(),
        }
    }
}

/// Candidate owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedBy {
    #[serde(rename = "_user", skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    pub name: String,
}

impl CreatedBy {
    pub fn import_owner(user: Option<String>) -> Self {
        Self {
            user,
            name: IMPORT_OWNER_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentLocation {
    pub formatted_address: String,
}

/// A candidate record prior to persistence. Only fields whose column
/// passed validation are set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_of_lead: Option<String>,
    /// ISO-8601 application date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<CreatedBy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_skill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second_skill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<MobileNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Work mode (`WFH` / `WHO`), upper-cased.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_location: Option<CurrentLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_score: Option<i64>,
    /// Campus placement drive id.
    #[serde(rename = "_cpd", skip_serializing_if = "Option::is_none")]
    pub cpd: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    /// Years of experience.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_quantity"
    )]
    pub experience: Option<f64>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_quantity"
    )]
    pub exp_month: Option<f64>,
    /// Current CTC in LPA.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_quantity"
    )]
    pub ctc: Option<f64>,
    /// Expected CTC in LPA.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_quantity"
    )]
    pub ectc: Option<f64>,
    /// Notice period in days.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_quantity"
    )]
    pub notice_period: Option<f64>,
    /// Last working day, ISO-8601.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lwd: Option<String>,
    /// Profile URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Largest magnitude at which every integer is exact in an `f64`.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Whole quantities go out as JSON integers (`4`, not `4.0`).
fn serialize_quantity<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) if v.fract() == 0.0 && v.abs() <= MAX_EXACT_INTEGER => {
            serializer.serialize_some(&(*v as i64))
        }
        Some(v) => serializer.serialize_some(v),
        None => serializer.serialize_none(),
    }
}

impl CandidateDraft {
    /// Whether the serialised field `field` is populated.
    pub fn has_field(&self, field: &str) -> bool {
        match field {
            "name" => self.name.is_some(),
            "typeOfLead" => self.type_of_lead.is_some(),
            "date" => self.date.is_some(),
            "jobId" => self.job_id.is_some(),
            "createdBy" => self.created_by.is_some(),
            "firstSkill" => self.first_skill.is_some(),
            "secondSkill" => self.second_skill.is_some(),
            "mobileNumber" => self.mobile_number.is_some(),
            "email" => self.email.is_some(),
            "status" => self.status.is_some(),
            "location" => self.location.is_some(),
            "currentLocation" => self.current_location.is_some(),
            "testScore" => self.test_score.is_some(),
            "_cpd" => self.cpd.is_some(),
            "comments" => self.comments.is_some(),
            "experience" => self.experience.is_some(),
            "expMonth" => self.exp_month.is_some(),
            "ctc" => self.ctc.is_some(),
            "ectc" => self.ectc.is_some(),
            "noticePeriod" => self.notice_period.is_some(),
            "lwd" => self.lwd.is_some(),
            "url" => self.url.is_some(),
            _ => false,
        }
    }

    /// Whether every field mandatory for `lead_type` is populated.
    pub fn has_mandatory_fields(&self, lead_type: LeadType) -> bool {
        lead_type
            .mandatory_fields()
            .iter()
            .all(|field| self.has_field(field))
    }
}
