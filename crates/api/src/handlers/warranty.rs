//! Handlers for the `/warranties` resource.
//!
//! Warranties are nested under their product for create/list and addressed
//! directly for detail/update/delete. Ownership always resolves through the
//! parent product.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use protecto_core::category::WarrantyType;
use protecto_core::error::CoreError;
use protecto_core::types::{DbId, Timestamp};
use protecto_db::models::product::Product;
use protecto_db::models::warranty::{CreateWarranty, UpdateWarranty};
use protecto_db::repositories::{ProductRepo, WarrantyRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::product::WarrantyView;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Compact product facts embedded in a warranty detail response.
#[derive(Debug, Serialize)]
pub struct ProductSummary {
    pub id: DbId,
    pub name: String,
    pub brand: String,
    pub model: String,
}

impl From<Product> for ProductSummary {
    fn from(product: Product) -> Self {
        ProductSummary {
            id: product.id,
            name: product.name,
            brand: product.brand,
            model: product.model,
        }
    }
}

/// A warranty detail response: the warranty view plus its product.
#[derive(Debug, Serialize)]
pub struct WarrantyDetail {
    #[serde(flatten)]
    pub view: WarrantyView,
    pub product: ProductSummary,
}

// ---------------------------------------------------------------------------
// Product-scoped handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/products/{product_id}/warranties
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(product_id): Path<DbId>,
    Json(input): Json<CreateWarranty>,
) -> AppResult<(StatusCode, Json<WarrantyView>)> {
    // The product must exist and belong to the caller.
    ProductRepo::find_for_user(&state.pool, product_id, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id: product_id,
        }))?;

    input.r#type.parse::<WarrantyType>().map_err(AppError::Core)?;
    validate_dates(input.start_date, input.end_date)?;

    let warranty = WarrantyRepo::create(&state.pool, product_id, &input).await?;
    Ok((
        StatusCode::CREATED,
        Json(WarrantyView::build(warranty, Utc::now())),
    ))
}

/// GET /api/v1/products/{product_id}/warranties
pub async fn list_for_product(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(product_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<WarrantyView>>>> {
    ProductRepo::find_for_user(&state.pool, product_id, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id: product_id,
        }))?;

    let warranties = WarrantyRepo::list_for_product(&state.pool, product_id).await?;
    let now = Utc::now();
    let views = warranties
        .into_iter()
        .map(|w| WarrantyView::build(w, now))
        .collect();
    Ok(Json(DataResponse { data: views }))
}

// ---------------------------------------------------------------------------
// Directly-addressed handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/warranties/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<WarrantyDetail>> {
    let warranty = WarrantyRepo::find_for_user(&state.pool, id, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Warranty",
            id,
        }))?;

    let product = ProductRepo::find_for_user(&state.pool, warranty.product_id, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id: warranty.product_id,
        }))?;

    Ok(Json(WarrantyDetail {
        view: WarrantyView::build(warranty, Utc::now()),
        product: product.into(),
    }))
}

/// PUT /api/v1/warranties/{id}
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateWarranty>,
) -> AppResult<Json<WarrantyView>> {
    if let Some(r#type) = &input.r#type {
        r#type.parse::<WarrantyType>().map_err(AppError::Core)?;
    }

    // Date ordering must hold for the row as it will be after the patch, so
    // fetch the current row to fill in whichever side the patch omits.
    if input.start_date.is_some() || input.end_date.is_some() {
        let current = WarrantyRepo::find_for_user(&state.pool, id, auth_user.user_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Warranty",
                id,
            }))?;
        validate_dates(
            input.start_date.unwrap_or(current.start_date),
            input.end_date.unwrap_or(current.end_date),
        )?;
    }

    let warranty = WarrantyRepo::update(&state.pool, id, auth_user.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Warranty",
            id,
        }))?;
    Ok(Json(WarrantyView::build(warranty, Utc::now())))
}

/// DELETE /api/v1/warranties/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = WarrantyRepo::delete_for_user(&state.pool, id, auth_user.user_id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Warranty",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

fn validate_dates(start_date: Timestamp, end_date: Timestamp) -> AppResult<()> {
    if start_date > end_date {
        return Err(AppError::Core(CoreError::Validation(
            "Warranty start date must not be after its end date".into(),
        )));
    }
    Ok(())
}
