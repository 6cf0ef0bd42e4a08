//! Column meanings and the spreadsheet layout of each lead type.
//!
//! Position 0 of every sheet is a serial-number column and carries no data,
//! so the first meaningful column sits at index 1.

use crate::lead_type::LeadType;

/// A semantic spreadsheet column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Name,
    Date,
    JobTitle,
    FirstSkill,
    SecondSkill,
    ContactNumber,
    Recruiter,
    Email,
    Status,
    WorkLocation,
    HomeLocation,
    TechnicalScore,
    CpdId,
    ExperienceYears,
    ExperienceMonths,
    Ctc,
    ExpectedCtc,
    NoticePeriod,
    LastWorkingDay,
    ProfileUrl,
    Comments,
}

impl Column {
    /// Header text of the column in the sample sheet; used as the key of
    /// row error descriptors.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Date => "Date",
            Self::JobTitle => "Job Title",
            Self::FirstSkill => "First Skill",
            Self::SecondSkill => "Second Skill",
            Self::ContactNumber => "Contact Number",
            Self::Recruiter => "Recruiter",
            Self::Email => "Email Address",
            Self::Status => "Status",
            Self::WorkLocation => "Work Location",
            Self::HomeLocation => "Home Location",
            Self::TechnicalScore => "Technical Score",
            Self::CpdId => "CPD ID",
            Self::ExperienceYears => "Exp. (Y)",
            Self::ExperienceMonths => "Exp. (M)",
            Self::Ctc => "CTC (LPA)",
            Self::ExpectedCtc => "ECTC (LPA)",
            Self::NoticePeriod => "Notice Period",
            Self::LastWorkingDay => "LWD",
            Self::ProfileUrl => "Profile Url",
            Self::Comments => "Comments",
        }
    }
}

/// Ordered data columns of a sheet, starting at index 1.
#[derive(Debug)]
pub struct Layout {
    columns: &'static [Column],
}

impl Layout {
    /// Sheet index of `column`, or `None` if the layout has no such column.
    pub fn position(&self, column: Column) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| *c == column)
            .map(|i| i + 1)
    }

    /// Total sheet width including the serial-number column.
    pub fn width(&self) -> usize {
        self.columns.len() + 1
    }

    pub fn columns(&self) -> &'static [Column] {
        self.columns
    }
}

/// Columns 1..=12, identical for every lead type.
const SHARED_HEAD: [Column; 12] = [
    Column::Name,
    Column::Date,
    Column::JobTitle,
    Column::FirstSkill,
    Column::SecondSkill,
    Column::ContactNumber,
    Column::Recruiter,
    Column::Email,
    Column::Status,
    Column::WorkLocation,
    Column::HomeLocation,
    Column::TechnicalScore,
];

const INTERN_COLUMNS: [Column; 14] = [
    SHARED_HEAD[0],
    SHARED_HEAD[1],
    SHARED_HEAD[2],
    SHARED_HEAD[3],
    SHARED_HEAD[4],
    SHARED_HEAD[5],
    SHARED_HEAD[6],
    SHARED_HEAD[7],
    SHARED_HEAD[8],
    SHARED_HEAD[9],
    SHARED_HEAD[10],
    SHARED_HEAD[11],
    Column::CpdId,
    Column::Comments,
];

const PROFESSIONAL_COLUMNS: [Column; 20] = [
    SHARED_HEAD[0],
    SHARED_HEAD[1],
    SHARED_HEAD[2],
    SHARED_HEAD[3],
    SHARED_HEAD[4],
    SHARED_HEAD[5],
    SHARED_HEAD[6],
    SHARED_HEAD[7],
    SHARED_HEAD[8],
    SHARED_HEAD[9],
    SHARED_HEAD[10],
    SHARED_HEAD[11],
    Column::ExperienceYears,
    Column::ExperienceMonths,
    Column::Ctc,
    Column::ExpectedCtc,
    Column::NoticePeriod,
    Column::LastWorkingDay,
    Column::ProfileUrl,
    Column::Comments,
];

/// Intern sheet: 15 columns.
pub static INTERN_LAYOUT: Layout = Layout {
    columns: &INTERN_COLUMNS,
};

/// Full-time and consultant sheet: 21 columns.
pub static PROFESSIONAL_LAYOUT: Layout = Layout {
    columns: &PROFESSIONAL_COLUMNS,
};

impl LeadType {
    pub fn layout(&self) -> &'static Layout {
        match self {
            Self::Intern => &INTERN_LAYOUT,
            Self::FullTime | Self::Consultant => &PROFESSIONAL_LAYOUT,
        }
    }
}
