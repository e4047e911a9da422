//! Route definitions for directly-addressed warranties.
//!
//! Create/list live under the product router (see [`super::product`]);
//! this module only mounts the `/warranties/{id}` operations.

use axum::routing::get;
use axum::Router;

use crate::handlers::warranty;
use crate::state::AppState;

/// Routes mounted at `/warranties`.
///
/// ```text
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        get(warranty::get_by_id)
            .put(warranty::update)
            .delete(warranty::delete),
    )
}
