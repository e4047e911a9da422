//! Route definitions for products and their nested warranties.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{product, warranty};
use crate::state::AppState;
use crate::uploads;

/// Routes mounted at `/products`.
///
/// ```text
/// GET    /                           -> list
/// POST   /                           -> create
/// GET    /{id}                       -> get_by_id
/// PUT    /{id}                       -> update
/// DELETE /{id}                       -> delete
/// POST   /{id}/image                 -> upload_image (multipart)
/// GET    /{product_id}/warranties    -> warranty::list_for_product
/// POST   /{product_id}/warranties    -> warranty::create
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(product::list).post(product::create))
        .route(
            "/{id}",
            get(product::get_by_id)
                .put(product::update)
                .delete(product::delete),
        )
        .route(
            "/{id}/image",
            post(product::upload_image)
                // Image bytes plus multipart framing overhead.
                .layer(DefaultBodyLimit::max(uploads::MAX_IMAGE_BYTES + 64 * 1024)),
        )
        .route(
            "/{product_id}/warranties",
            get(warranty::list_for_product).post(warranty::create),
        )
}
