// src/handlers/categories.rs

use axum::{
    Json,
    extract::{Path, State},
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
};

// ---
// Payload: CreateCategory
// ---
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryPayload {
    #[validate(length(min = 1, message = "Kategori adı gerekli"))]
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

// Atualização parcial: só os campos presentes são trocados.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryPayload {
    #[validate(length(min = 1, message = "Kategori adı gerekli"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

pub async fn get_all_categories(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let categories = app_state
        .catalog_repo
        .get_categories()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(categories)))
}

pub async fn get_category(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let category = app_state
        .catalog_repo
        .get_category(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?
        .ok_or_else(|| AppError::CategoryNotFound.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(category)))
}

pub async fn create_category(
    State(app_state): State<AppState>,
    locale: Locale,
    _staff: StaffUser,
    Json(payload): Json<CreateCategoryPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let category = app_state
        .catalog_repo
        .create_category(
            &payload.name,
            payload.description.as_deref(),
            payload.image_url.as_deref(),
            payload.sort_order,
            payload.is_active,
        )
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn update_category(
    State(app_state): State<AppState>,
    locale: Locale,
    _staff: StaffUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCategoryPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let category = app_state
        .catalog_repo
        .update_category(
            id,
            payload.name.as_deref(),
            payload.description.as_deref(),
            payload.image_url.as_deref(),
            payload.sort_order,
            payload.is_active,
        )
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?
        .ok_or_else(|| AppError::CategoryNotFound.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(category)))
}

pub async fn delete_category(
    State(app_state): State<AppState>,
    locale: Locale,
    _staff: StaffUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = app_state
        .catalog_repo
        .delete_category(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    if !deleted {
        return Err(AppError::CategoryNotFound.to_api_error(&locale, &app_state.i18n_store));
    }

    Ok(StatusCode::NO_CONTENT)
}
