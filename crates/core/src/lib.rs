//! Domain logic for the candidate-management screen of the applicant
//! tracker.
//!
//! Everything here is free of HTTP and storage concerns. The only I/O seam
//! is the [`directory::CandidateDirectory`] trait, which the import
//! pipeline awaits to resolve job, recruiter and campus-drive references.

pub mod directory;
pub mod error;
pub mod filters;
pub mod import;
pub mod lead_type;
