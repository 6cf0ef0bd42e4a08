use std::sync::Arc;

use ats_core::directory::CandidateDirectory;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything lives behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Job, user and campus-drive lookups used by import validation.
    pub directory: Arc<dyn CandidateDirectory>,
}
