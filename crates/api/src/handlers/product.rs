//! Handlers for the `/products` resource.
//!
//! Every response enriches the raw rows with derived warranty status.
//! Status is never read from the database -- each request takes one
//! `Utc::now()` reading and classifies every warranty against that single
//! instant, so a response is always internally consistent.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use protecto_core::category::Category;
use protecto_core::error::CoreError;
use protecto_core::expiry;
use protecto_core::status::{aggregate, classify, days_until_expiration, ProductStatus, WarrantyStatus};
use protecto_core::types::{DbId, Timestamp};
use protecto_db::models::product::{CreateProduct, Product, UpdateProduct};
use protecto_db::models::warranty::Warranty;
use protecto_db::repositories::{ProductRepo, WarrantyRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::uploads;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// A warranty with its derived status.
#[derive(Debug, Serialize)]
pub struct WarrantyView {
    #[serde(flatten)]
    pub warranty: Warranty,
    pub status: WarrantyStatus,
    /// Ceiling day count until the end date; negative once expired.
    pub days_until_expiration: i64,
}

impl WarrantyView {
    pub fn build(warranty: Warranty, now: Timestamp) -> Self {
        let status = classify(warranty.end_date, now);
        let days = days_until_expiration(warranty.end_date, now);
        WarrantyView {
            warranty,
            status,
            days_until_expiration: days,
        }
    }
}

/// A product with its warranties and derived overall status.
#[derive(Debug, Serialize)]
pub struct ProductView {
    #[serde(flatten)]
    pub product: Product,
    pub status: ProductStatus,
    pub warranties: Vec<WarrantyView>,
    /// Id of the soonest-expiring non-expired warranty, if any.
    pub next_expiring_warranty_id: Option<DbId>,
}

impl ProductView {
    pub fn build(product: Product, warranties: Vec<Warranty>, now: Timestamp) -> Self {
        let views: Vec<WarrantyView> = warranties
            .into_iter()
            .map(|w| WarrantyView::build(w, now))
            .collect();

        let status = aggregate(views.iter().map(|v| v.status));

        let next_expiring_warranty_id = expiry::upcoming(
            views
                .iter()
                .map(|v| (v.warranty.id, v.warranty.end_date))
                .collect(),
            |(_, end_date)| *end_date,
            now,
        )
        .next_expiring()
        .map(|(id, _)| *id);

        ProductView {
            product,
            status,
            warranties: views,
            next_expiring_warranty_id,
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/products
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateProduct>,
) -> AppResult<(StatusCode, Json<ProductView>)> {
    validate_create(&input)?;
    let product = ProductRepo::create(&state.pool, auth_user.user_id, &input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ProductView::build(product, Vec::new(), Utc::now())),
    ))
}

/// GET /api/v1/products
///
/// The caller's products, newest first, each with warranties and status.
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<ProductView>>>> {
    let products = ProductRepo::list_for_user(&state.pool, auth_user.user_id).await?;
    let warranties = WarrantyRepo::list_for_user(&state.pool, auth_user.user_id).await?;
    let now = Utc::now();

    // Group warranties by product, preserving insertion order within each.
    let mut by_product: std::collections::HashMap<DbId, Vec<Warranty>> =
        std::collections::HashMap::new();
    for warranty in warranties {
        by_product.entry(warranty.product_id).or_default().push(warranty);
    }

    let views = products
        .into_iter()
        .map(|product| {
            let warranties = by_product.remove(&product.id).unwrap_or_default();
            ProductView::build(product, warranties, now)
        })
        .collect();

    Ok(Json(DataResponse { data: views }))
}

/// GET /api/v1/products/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProductView>> {
    let product = find_owned(&state, id, auth_user.user_id).await?;
    let warranties = WarrantyRepo::list_for_product(&state.pool, product.id).await?;
    Ok(Json(ProductView::build(product, warranties, Utc::now())))
}

/// PUT /api/v1/products/{id}
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProduct>,
) -> AppResult<Json<ProductView>> {
    validate_update(&input)?;
    let product = ProductRepo::update(&state.pool, id, auth_user.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))?;
    let warranties = WarrantyRepo::list_for_product(&state.pool, product.id).await?;
    Ok(Json(ProductView::build(product, warranties, Utc::now())))
}

/// POST /api/v1/products/{id}/image
///
/// Multipart upload of a product image. Replaces (and best-effort deletes)
/// any previous image.
pub async fn upload_image(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<Json<ProductView>> {
    // Pull the first field named "image"; everything else is ignored.
    let mut image: Option<(&'static str, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("image") {
            continue;
        }
        let content_type = field.content_type().unwrap_or_default().to_string();
        let Some(extension) = uploads::extension_for(&content_type) else {
            return Err(AppError::Core(CoreError::Validation(
                "Invalid file type. Only JPEG, PNG and WebP are allowed.".into(),
            )));
        };
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;
        if data.len() > uploads::MAX_IMAGE_BYTES {
            return Err(AppError::Core(CoreError::Validation(
                "Image exceeds the 5 MiB size limit".into(),
            )));
        }
        image = Some((extension, data.to_vec()));
        break;
    }

    let (extension, data) = image.ok_or_else(|| {
        AppError::Core(CoreError::Validation("Missing \"image\" field".into()))
    })?;

    // Write the file first; if the product turns out not to exist the
    // orphaned file is removed again below.
    let image_url = uploads::save_image(&state.config.upload_dir, extension, &data)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store image: {e}")))?;

    let previous =
        ProductRepo::replace_image_url(&state.pool, id, auth_user.user_id, &image_url).await?;

    let Some(previous) = previous else {
        uploads::delete_image(&state.config.upload_dir, &image_url).await;
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }));
    };

    if let Some(old_url) = previous {
        uploads::delete_image(&state.config.upload_dir, &old_url).await;
    }

    let product = find_owned(&state, id, auth_user.user_id).await?;
    let warranties = WarrantyRepo::list_for_product(&state.pool, product.id).await?;
    Ok(Json(ProductView::build(product, warranties, Utc::now())))
}

/// DELETE /api/v1/products/{id}
///
/// Warranties cascade in the database; the image file is cleaned up
/// best-effort.
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ProductRepo::delete_for_user(&state.pool, id, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))?;

    if let Some(image_url) = &deleted.image_url {
        uploads::delete_image(&state.config.upload_dir, image_url).await;
    }

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

fn validate_create(input: &CreateProduct) -> AppResult<()> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Product name is required".into(),
        )));
    }
    input.category.parse::<Category>().map_err(AppError::Core)?;
    validate_price(input.purchase_price)
}

fn validate_update(input: &UpdateProduct) -> AppResult<()> {
    if let Some(name) = &input.name {
        if name.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Product name is required".into(),
            )));
        }
    }
    if let Some(category) = &input.category {
        category.parse::<Category>().map_err(AppError::Core)?;
    }
    validate_price(input.purchase_price)
}

fn validate_price(price: Option<f64>) -> AppResult<()> {
    if let Some(price) = price {
        if !price.is_finite() || price <= 0.0 {
            return Err(AppError::Core(CoreError::Validation(
                "Price must be positive".into(),
            )));
        }
    }
    Ok(())
}

async fn find_owned(state: &AppState, id: DbId, user_id: DbId) -> AppResult<Product> {
    ProductRepo::find_for_user(&state.pool, id, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))
}
