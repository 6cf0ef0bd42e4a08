//! Request handlers. Each submodule serves one resource and maps domain
//! errors via [`crate::error::AppError`].

pub mod candidates;
