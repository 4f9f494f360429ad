// src/db/catalog_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::catalog::{Category, Product},
};

// Catálogo: categorias e produtos.
#[derive(Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // --- Categorias ---

    pub async fn get_categories(&self) -> Result<Vec<Category>, AppError> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT * FROM categories ORDER BY sort_order, name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    pub async fn get_category(&self, id: Uuid) -> Result<Option<Category>, AppError> {
        let category = sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(category)
    }

    pub async fn create_category(
        &self,
        name: &str,
        description: Option<&str>,
        image_url: Option<&str>,
        sort_order: i32,
        is_active: bool,
    ) -> Result<Category, AppError> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, description, image_url, sort_order, is_active)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(image_url)
        .bind(sort_order)
        .bind(is_active)
        .fetch_one(&self.pool)
        .await?;
        Ok(category)
    }

    pub async fn update_category(
        &self,
        id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
        image_url: Option<&str>,
        sort_order: Option<i32>,
        is_active: Option<bool>,
    ) -> Result<Option<Category>, AppError> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories SET
                name        = COALESCE($2, name),
                description = COALESCE($3, description),
                image_url   = COALESCE($4, image_url),
                sort_order  = COALESCE($5, sort_order),
                is_active   = COALESCE($6, is_active),
                updated_at  = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(image_url)
        .bind(sort_order)
        .bind(is_active)
        .fetch_optional(&self.pool)
        .await?;
        Ok(category)
    }

    pub async fn delete_category(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // --- Produtos ---

    pub async fn get_products(&self, category_id: Option<Uuid>) -> Result<Vec<Product>, AppError> {
        let products = match category_id {
            Some(category_id) => {
                sqlx::query_as::<_, Product>(
                    "SELECT * FROM products WHERE category_id = $1 ORDER BY name",
                )
                .bind(category_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY name")
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(products)
    }

    pub async fn get_featured_products(&self) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE is_featured = TRUE ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    // Busca por substring no nome, apenas produtos ativos.
    // Consultas com menos de 3 caracteres nem chegam aqui (o handler
    // devolve lista vazia sem tocar no banco).
    pub async fn search_products(&self, query: &str, limit: i64) -> Result<Vec<Product>, AppError> {
        let pattern = format!("%{}%", query);
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT * FROM products
            WHERE name ILIKE $1 AND is_active = TRUE
            ORDER BY name
            LIMIT $2
            "#,
        )
        .bind(pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    pub async fn get_product(&self, id: Uuid) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(product)
    }

    pub async fn create_product(
        &self,
        category_id: Uuid,
        name: &str,
        description: Option<&str>,
        price_in_cents: i32,
        image_url: Option<&str>,
        stock: i32,
        is_active: bool,
        is_featured: bool,
    ) -> Result<Product, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products
                (category_id, name, description, price_in_cents, image_url, stock, is_active, is_featured)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(category_id)
        .bind(name)
        .bind(description)
        .bind(price_in_cents)
        .bind(image_url)
        .bind(stock)
        .bind(is_active)
        .bind(is_featured)
        .fetch_one(&self.pool)
        .await?;
        Ok(product)
    }

    pub async fn update_product(
        &self,
        id: Uuid,
        category_id: Option<Uuid>,
        name: Option<&str>,
        description: Option<&str>,
        price_in_cents: Option<i32>,
        image_url: Option<&str>,
        stock: Option<i32>,
        is_active: Option<bool>,
        is_featured: Option<bool>,
    ) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products SET
                category_id    = COALESCE($2, category_id),
                name           = COALESCE($3, name),
                description    = COALESCE($4, description),
                price_in_cents = COALESCE($5, price_in_cents),
                image_url      = COALESCE($6, image_url),
                stock          = COALESCE($7, stock),
                is_active      = COALESCE($8, is_active),
                is_featured    = COALESCE($9, is_featured),
                updated_at     = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(category_id)
        .bind(name)
        .bind(description)
        .bind(price_in_cents)
        .bind(image_url)
        .bind(stock)
        .bind(is_active)
        .bind(is_featured)
        .fetch_optional(&self.pool)
        .await?;
        Ok(product)
    }

    pub async fn delete_product(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
