//! Warranty entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use protecto_core::types::{DbId, Timestamp};

/// A warranty row from the `warranties` table.
///
/// A product owns zero or more warranties. Rows never carry a status
/// column -- status is recomputed from `end_date` on every read.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Warranty {
    pub id: DbId,
    pub product_id: DbId,
    /// One of `manufacturer`, `retailer`, `extended`.
    pub r#type: String,
    pub provider: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub coverage_details: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub contact_website: Option<String>,
    /// Ordered document names (filenames/labels), no binary content.
    pub documents: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new warranty.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWarranty {
    pub r#type: String,
    pub provider: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub coverage_details: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub contact_website: Option<String>,
    pub documents: Option<Vec<String>>,
}

/// DTO for updating an existing warranty. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateWarranty {
    pub r#type: Option<String>,
    pub provider: Option<String>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub coverage_details: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub contact_website: Option<String>,
    pub documents: Option<Vec<String>>,
}
