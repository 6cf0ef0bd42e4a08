pub mod candidates;
pub mod health;

use axum::Router;
use tower_http::timeout::TimeoutLayer;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /candidates/import/{type_of_lead}/validate     validate decoded rows (POST, no timeout)
/// /candidates/import/{type_of_lead}/upload       validate an .xlsx/.xls upload (POST, no timeout)
/// /candidates/import/{type_of_lead}/template     sample spreadsheet descriptor
/// /candidates/{type_of_lead}/query               list request from filter params
/// ```
///
/// `timeout` is applied to every route that does not run an import batch.
pub fn api_routes(timeout: TimeoutLayer) -> Router<AppState> {
    Router::new().nest("/candidates", candidates::router(timeout))
}
