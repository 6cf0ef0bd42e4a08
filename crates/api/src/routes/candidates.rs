//! Route definitions for the `/candidates` resource.

use axum::routing::{get, post};
use axum::Router;
use tower_http::timeout::TimeoutLayer;

use crate::handlers::candidates;
use crate::state::AppState;

/// Routes mounted at `/candidates`.
///
/// ```text
/// POST   /import/{type_of_lead}/validate   -> validate_import   (JSON rows)
/// POST   /import/{type_of_lead}/upload     -> upload_import     (multipart `file`)
/// GET    /import/{type_of_lead}/template   -> import_template
/// GET    /{type_of_lead}/query             -> list_query        (?status, ?page, ...)
/// ```
///
/// The two import routes carry no request timeout; a batch runs until its
/// last directory lookup returns.
pub fn router(timeout: TimeoutLayer) -> Router<AppState> {
    let timed = Router::new()
        .route(
            "/import/{type_of_lead}/template",
            get(candidates::import_template),
        )
        .route("/{type_of_lead}/query", get(candidates::list_query))
        .route_layer(timeout);

    Router::new()
        .route(
            "/import/{type_of_lead}/validate",
            post(candidates::validate_import),
        )
        .route(
            "/import/{type_of_lead}/upload",
            post(candidates::upload_import),
        )
        .merge(timed)
}
