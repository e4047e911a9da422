//! Repository for the `warranties` table.
//!
//! Warranties have no user_id column of their own; ownership checks join
//! through the parent product.

use sqlx::PgPool;

use protecto_core::types::DbId;

use crate::models::warranty::{CreateWarranty, UpdateWarranty, Warranty};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, product_id, type, provider, start_date, end_date, \
                        coverage_details, contact_phone, contact_email, contact_website, \
                        documents, created_at, updated_at";

/// Qualified variant for queries that join against `products`.
const W_COLUMNS: &str = "w.id, w.product_id, w.type, w.provider, w.start_date, w.end_date, \
                          w.coverage_details, w.contact_phone, w.contact_email, w.contact_website, \
                          w.documents, w.created_at, w.updated_at";

/// Provides CRUD operations for warranties.
pub struct WarrantyRepo;

impl WarrantyRepo {
    /// Insert a new warranty for a product, returning the created row.
    ///
    /// The caller is responsible for verifying product ownership first.
    pub async fn create(
        pool: &PgPool,
        product_id: DbId,
        input: &CreateWarranty,
    ) -> Result<Warranty, sqlx::Error> {
        let query = format!(
            "INSERT INTO warranties (product_id, type, provider, start_date, end_date,
                                     coverage_details, contact_phone, contact_email,
                                     contact_website, documents)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, COALESCE($10, '{{}}'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Warranty>(&query)
            .bind(product_id)
            .bind(&input.r#type)
            .bind(&input.provider)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.coverage_details)
            .bind(&input.contact_phone)
            .bind(&input.contact_email)
            .bind(&input.contact_website)
            .bind(&input.documents)
            .fetch_one(pool)
            .await
    }

    /// Find a warranty by id, scoped to the owning user via the product join.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Warranty>, sqlx::Error> {
        let query = format!(
            "SELECT {W_COLUMNS} FROM warranties w
             JOIN products p ON p.id = w.product_id
             WHERE w.id = $1 AND p.user_id = $2"
        );
        sqlx::query_as::<_, Warranty>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List a product's warranties in insertion order.
    pub async fn list_for_product(
        pool: &PgPool,
        product_id: DbId,
    ) -> Result<Vec<Warranty>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM warranties WHERE product_id = $1 ORDER BY id");
        sqlx::query_as::<_, Warranty>(&query)
            .bind(product_id)
            .fetch_all(pool)
            .await
    }

    /// List every warranty across all of a user's products, in insertion order.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Warranty>, sqlx::Error> {
        let query = format!(
            "SELECT {W_COLUMNS} FROM warranties w
             JOIN products p ON p.id = w.product_id
             WHERE p.user_id = $1
             ORDER BY w.id"
        );
        sqlx::query_as::<_, Warranty>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update a warranty. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if the warranty does not exist or is not owned by
    /// `user_id` (via its product).
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateWarranty,
    ) -> Result<Option<Warranty>, sqlx::Error> {
        let query = format!(
            "UPDATE warranties w SET
                type = COALESCE($3, w.type),
                provider = COALESCE($4, w.provider),
                start_date = COALESCE($5, w.start_date),
                end_date = COALESCE($6, w.end_date),
                coverage_details = COALESCE($7, w.coverage_details),
                contact_phone = COALESCE($8, w.contact_phone),
                contact_email = COALESCE($9, w.contact_email),
                contact_website = COALESCE($10, w.contact_website),
                documents = COALESCE($11, w.documents)
             FROM products p
             WHERE w.id = $1 AND p.id = w.product_id AND p.user_id = $2
             RETURNING {W_COLUMNS}"
        );
        sqlx::query_as::<_, Warranty>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.r#type)
            .bind(&input.provider)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.coverage_details)
            .bind(&input.contact_phone)
            .bind(&input.contact_email)
            .bind(&input.contact_website)
            .bind(&input.documents)
            .fetch_optional(pool)
            .await
    }

    /// Delete a warranty, scoped to the owning user. Returns `true` if a
    /// row was removed.
    pub async fn delete_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM warranties w
             USING products p
             WHERE w.id = $1 AND p.id = w.product_id AND p.user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
