//! Handlers for the account dashboard summary.
//!
//! Aggregates are computed in-process from one consistent fetch: a single
//! `Utc::now()` reading classifies every warranty, and the same sequencer
//! that powers per-product views picks the account-wide next expiration.

use std::collections::HashMap;

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use protecto_core::expiry;
use protecto_core::status::{classify, days_until_expiration, WarrantyStatus};
use protecto_core::types::{DbId, Timestamp};
use protecto_db::repositories::{ProductRepo, WarrantyRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Warranty counts by derived status.
#[derive(Debug, Default, Serialize)]
pub struct StatusCounts {
    pub active: usize,
    pub expiring: usize,
    pub expired: usize,
}

/// The account-wide soonest-expiring warranty.
#[derive(Debug, Serialize)]
pub struct NextExpiring {
    pub warranty_id: DbId,
    pub product_id: DbId,
    pub product_name: String,
    pub provider: String,
    pub end_date: Timestamp,
    pub days_until_expiration: i64,
}

/// Response body for `GET /dashboard/summary`.
#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub total_products: usize,
    pub total_warranties: usize,
    pub warranties_by_status: StatusCounts,
    /// `None` when every warranty is expired (or none exist).
    pub next_expiring: Option<NextExpiring>,
}

// ---------------------------------------------------------------------------
// Handler
// ---------------------------------------------------------------------------

/// GET /api/v1/dashboard/summary
pub async fn summary(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<DashboardSummary>>> {
    let products = ProductRepo::list_for_user(&state.pool, auth_user.user_id).await?;
    let warranties = WarrantyRepo::list_for_user(&state.pool, auth_user.user_id).await?;
    let now = Utc::now();

    let mut counts = StatusCounts::default();
    for warranty in &warranties {
        match classify(warranty.end_date, now) {
            WarrantyStatus::Active => counts.active += 1,
            WarrantyStatus::Expiring => counts.expiring += 1,
            WarrantyStatus::Expired => counts.expired += 1,
        }
    }

    let product_names: HashMap<DbId, &str> = products
        .iter()
        .map(|p| (p.id, p.name.as_str()))
        .collect();

    let total_products = products.len();
    let total_warranties = warranties.len();

    let next_expiring = expiry::upcoming(warranties, |w| w.end_date, now)
        .next_expiring()
        .map(|warranty| NextExpiring {
            warranty_id: warranty.id,
            product_id: warranty.product_id,
            product_name: product_names
                .get(&warranty.product_id)
                .copied()
                .unwrap_or_default()
                .to_string(),
            provider: warranty.provider.clone(),
            end_date: warranty.end_date,
            days_until_expiration: days_until_expiration(warranty.end_date, now),
        });

    Ok(Json(DataResponse {
        data: DashboardSummary {
            total_products,
            total_warranties,
            warranties_by_status: counts,
            next_expiring,
        },
    }))
}
