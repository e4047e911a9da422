//! Product entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use protecto_core::types::{DbId, Timestamp};

/// A product row from the `products` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub brand: String,
    pub model: String,
    /// One of the closed category set (see `protecto_core::category`).
    pub category: String,
    pub purchase_date: Timestamp,
    pub purchase_price: Option<f64>,
    pub retailer: Option<String>,
    pub serial_number: Option<String>,
    pub description: Option<String>,
    /// URL path of the uploaded product image, e.g. `/uploads/<file>`.
    pub image_url: Option<String>,
    pub product_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new product.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProduct {
    pub name: String,
    pub brand: String,
    pub model: String,
    pub category: String,
    pub purchase_date: Timestamp,
    pub purchase_price: Option<f64>,
    pub retailer: Option<String>,
    pub serial_number: Option<String>,
    pub description: Option<String>,
    pub product_url: Option<String>,
}

/// DTO for updating an existing product. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub category: Option<String>,
    pub purchase_date: Option<Timestamp>,
    pub purchase_price: Option<f64>,
    pub retailer: Option<String>,
    pub serial_number: Option<String>,
    pub description: Option<String>,
    pub product_url: Option<String>,
}
