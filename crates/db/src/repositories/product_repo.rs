//! Repository for the `products` table.
//!
//! Every query is scoped to the owning user -- a product id from another
//! account behaves exactly like a missing row.

use sqlx::PgPool;

use protecto_core::types::DbId;

use crate::models::product::{CreateProduct, Product, UpdateProduct};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, name, brand, model, category, purchase_date, \
                        purchase_price, retailer, serial_number, description, \
                        image_url, product_url, created_at, updated_at";

/// Provides CRUD operations for products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product owned by `user_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateProduct,
    ) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products (user_id, name, brand, model, category, purchase_date,
                                   purchase_price, retailer, serial_number, description,
                                   product_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.brand)
            .bind(&input.model)
            .bind(&input.category)
            .bind(input.purchase_date)
            .bind(input.purchase_price)
            .bind(&input.retailer)
            .bind(&input.serial_number)
            .bind(&input.description)
            .bind(&input.product_url)
            .fetch_one(pool)
            .await
    }

    /// Find a product by id, scoped to its owner.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's products, most recently created first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Product>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM products WHERE user_id = $1 ORDER BY created_at DESC");
        sqlx::query_as::<_, Product>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update a product. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` belongs to `user_id`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET
                name = COALESCE($3, name),
                brand = COALESCE($4, brand),
                model = COALESCE($5, model),
                category = COALESCE($6, category),
                purchase_date = COALESCE($7, purchase_date),
                purchase_price = COALESCE($8, purchase_price),
                retailer = COALESCE($9, retailer),
                serial_number = COALESCE($10, serial_number),
                description = COALESCE($11, description),
                product_url = COALESCE($12, product_url)
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.brand)
            .bind(&input.model)
            .bind(&input.category)
            .bind(input.purchase_date)
            .bind(input.purchase_price)
            .bind(&input.retailer)
            .bind(&input.serial_number)
            .bind(&input.description)
            .bind(&input.product_url)
            .fetch_optional(pool)
            .await
    }

    /// Replace a product's image URL, returning the previous one.
    ///
    /// The outer `Option` is `None` when the product does not exist (or is
    /// not owned by `user_id`); the inner one when it had no image yet.
    pub async fn replace_image_url(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        image_url: &str,
    ) -> Result<Option<Option<String>>, sqlx::Error> {
        let row: Option<(Option<String>,)> = sqlx::query_as(
            "UPDATE products p SET image_url = $3
             FROM (SELECT id, image_url FROM products WHERE id = $1 AND user_id = $2 FOR UPDATE) old
             WHERE p.id = old.id
             RETURNING old.image_url",
        )
        .bind(id)
        .bind(user_id)
        .bind(image_url)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|(previous,)| previous))
    }

    /// Delete a product (warranties cascade), returning the deleted row so
    /// the caller can clean up its image file.
    pub async fn delete_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "DELETE FROM products WHERE id = $1 AND user_id = $2 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
