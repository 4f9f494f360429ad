// src/handlers/products.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::StaffUser, i18n::Locale},
    models::catalog::Product,
};

// Regras da busca incremental (espelhadas no cliente).
pub const SEARCH_MIN_CHARS: usize = 3;
pub const SEARCH_DEFAULT_LIMIT: i64 = 5;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListQuery {
    pub category_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub limit: Option<i64>,
}

// ---
// Payload: CreateProduct
// ---
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductPayload {
    pub category_id: Uuid,

    #[validate(length(min = 1, message = "Ürün adı gerekli"))]
    pub name: String,

    pub description: Option<String>,

    // Centavos inteiros; zero é permitido (produto brinde).
    #[validate(range(min = 0, message = "Fiyat negatif olamaz"))]
    pub price_in_cents: i32,

    pub image_url: Option<String>,

    #[serde(default)]
    #[validate(range(min = 0, message = "Stok negatif olamaz"))]
    pub stock: i32,

    #[serde(default = "default_true")]
    pub is_active: bool,

    #[serde(default)]
    pub is_featured: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductPayload {
    pub category_id: Option<Uuid>,

    #[validate(length(min = 1, message = "Ürün adı gerekli"))]
    pub name: Option<String>,

    pub description: Option<String>,

    #[validate(range(min = 0, message = "Fiyat negatif olamaz"))]
    pub price_in_cents: Option<i32>,

    pub image_url: Option<String>,

    #[validate(range(min = 0, message = "Stok negatif olamaz"))]
    pub stock: Option<i32>,

    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
}

pub async fn get_all_products(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<ProductListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let products = app_state
        .catalog_repo
        .get_products(query.category_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(products)))
}

pub async fn get_featured_products(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let products = app_state
        .catalog_repo
        .get_featured_products()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(products)))
}

// Busca por nome. Menos de 3 caracteres devolve lista vazia sem
// consultar o banco.
pub async fn search_products(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let term = query.q.unwrap_or_default();
    if term.chars().count() < SEARCH_MIN_CHARS {
        return Ok((StatusCode::OK, Json(Vec::<Product>::new())));
    }

    let limit = query.limit.unwrap_or(SEARCH_DEFAULT_LIMIT).clamp(1, 50);
    let products = app_state
        .catalog_repo
        .search_products(&term, limit)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(products)))
}

pub async fn get_product(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let product = app_state
        .catalog_repo
        .get_product(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?
        .ok_or_else(|| AppError::ProductNotFound.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(product)))
}

pub async fn create_product(
    State(app_state): State<AppState>,
    locale: Locale,
    _staff: StaffUser,
    Json(payload): Json<CreateProductPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let product = app_state
        .catalog_repo
        .create_product(
            payload.category_id,
            &payload.name,
            payload.description.as_deref(),
            payload.price_in_cents,
            payload.image_url.as_deref(),
            payload.stock,
            payload.is_active,
            payload.is_featured,
        )
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(app_state): State<AppState>,
    locale: Locale,
    _staff: StaffUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let product = app_state
        .catalog_repo
        .update_product(
            id,
            payload.category_id,
            payload.name.as_deref(),
            payload.description.as_deref(),
            payload.price_in_cents,
            payload.image_url.as_deref(),
            payload.stock,
            payload.is_active,
            payload.is_featured,
        )
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?
        .ok_or_else(|| AppError::ProductNotFound.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(product)))
}

pub async fn delete_product(
    State(app_state): State<AppState>,
    locale: Locale,
    _staff: StaffUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = app_state
        .catalog_repo
        .delete_product(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    if !deleted {
        return Err(AppError::ProductNotFound.to_api_error(&locale, &app_state.i18n_store));
    }

    Ok(StatusCode::NO_CONTENT)
}
