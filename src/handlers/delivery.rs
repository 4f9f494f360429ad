// src/handlers/delivery.rs

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
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionFilterQuery {
    pub region_id: Option<Uuid>,
}

// ---
// Regiões de entrega
// ---

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRegionPayload {
    #[validate(length(min = 1, message = "Bölge adı gerekli"))]
    pub name: String,

    #[serde(default = "default_min_eta")]
    #[validate(range(min = 0, message = "Süre negatif olamaz"))]
    pub min_eta_minutes: i32,

    #[serde(default = "default_max_eta")]
    #[validate(range(min = 0, message = "Süre negatif olamaz"))]
    pub max_eta_minutes: i32,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_min_eta() -> i32 {
    30
}

fn default_max_eta() -> i32 {
    120
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRegionPayload {
    #[validate(length(min = 1, message = "Bölge adı gerekli"))]
    pub name: Option<String>,

    #[validate(range(min = 0, message = "Süre negatif olamaz"))]
    pub min_eta_minutes: Option<i32>,

    #[validate(range(min = 0, message = "Süre negatif olamaz"))]
    pub max_eta_minutes: Option<i32>,

    pub is_active: Option<bool>,
}

pub async fn get_all_regions(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let regions = app_state
        .delivery_repo
        .get_regions()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(regions)))
}

pub async fn create_region(
    State(app_state): State<AppState>,
    locale: Locale,
    _staff: StaffUser,
    Json(payload): Json<CreateRegionPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let region = app_state
        .delivery_repo
        .create_region(
            &payload.name,
            payload.min_eta_minutes,
            payload.max_eta_minutes,
            payload.is_active,
        )
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(region)))
}

pub async fn update_region(
    State(app_state): State<AppState>,
    locale: Locale,
    _staff: StaffUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRegionPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let region = app_state
        .delivery_repo
        .update_region(
            id,
            payload.name.as_deref(),
            payload.min_eta_minutes,
            payload.max_eta_minutes,
            payload.is_active,
        )
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?
        .ok_or_else(|| AppError::RegionNotFound.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(region)))
}

pub async fn delete_region(
    State(app_state): State<AppState>,
    locale: Locale,
    _staff: StaffUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = app_state
        .delivery_repo
        .delete_region(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    if !deleted {
        return Err(AppError::RegionNotFound.to_api_error(&locale, &app_state.i18n_store));
    }

    Ok(StatusCode::NO_CONTENT)
}

// ---
// Pontos de acampamento
// ---

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLocationPayload {
    pub region_id: Uuid,

    #[validate(length(min = 1, message = "Kamp alanı adı gerekli"))]
    pub name: String,

    pub address: Option<String>,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLocationPayload {
    pub region_id: Option<Uuid>,

    #[validate(length(min = 1, message = "Kamp alanı adı gerekli"))]
    pub name: Option<String>,

    pub address: Option<String>,
    pub is_active: Option<bool>,
}

pub async fn get_all_locations(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<RegionFilterQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let locations = app_state
        .delivery_repo
        .get_locations(query.region_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(locations)))
}

pub async fn create_location(
    State(app_state): State<AppState>,
    locale: Locale,
    _staff: StaffUser,
    Json(payload): Json<CreateLocationPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let location = app_state
        .delivery_repo
        .create_location(
            payload.region_id,
            &payload.name,
            payload.address.as_deref(),
            payload.is_active,
        )
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(location)))
}

pub async fn update_location(
    State(app_state): State<AppState>,
    locale: Locale,
    _staff: StaffUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateLocationPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let location = app_state
        .delivery_repo
        .update_location(
            id,
            payload.region_id,
            payload.name.as_deref(),
            payload.address.as_deref(),
            payload.is_active,
        )
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?
        .ok_or_else(|| AppError::LocationNotFound.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(location)))
}

pub async fn delete_location(
    State(app_state): State<AppState>,
    locale: Locale,
    _staff: StaffUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = app_state
        .delivery_repo
        .delete_location(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    if !deleted {
        return Err(AppError::LocationNotFound.to_api_error(&locale, &app_state.i18n_store));
    }

    Ok(StatusCode::NO_CONTENT)
}

// ---
// Janelas fixas de entrega
// ---

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSlotPayload {
    pub region_id: Uuid,

    // Formato "HH:MM".
    #[validate(length(equal = 5, message = "Saat biçimi HH:MM olmalıdır"))]
    pub start_time: String,

    #[validate(length(equal = 5, message = "Saat biçimi HH:MM olmalıdır"))]
    pub end_time: String,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSlotPayload {
    pub region_id: Option<Uuid>,

    #[validate(length(equal = 5, message = "Saat biçimi HH:MM olmalıdır"))]
    pub start_time: Option<String>,

    #[validate(length(equal = 5, message = "Saat biçimi HH:MM olmalıdır"))]
    pub end_time: Option<String>,

    pub is_active: Option<bool>,
}

pub async fn get_all_slots(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<RegionFilterQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let slots = app_state
        .delivery_repo
        .get_slots(query.region_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(slots)))
}

pub async fn create_slot(
    State(app_state): State<AppState>,
    locale: Locale,
    _staff: StaffUser,
    Json(payload): Json<CreateSlotPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let slot = app_state
        .delivery_repo
        .create_slot(
            payload.region_id,
            &payload.start_time,
            &payload.end_time,
            payload.is_active,
        )
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(slot)))
}

pub async fn update_slot(
    State(app_state): State<AppState>,
    locale: Locale,
    _staff: StaffUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSlotPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let slot = app_state
        .delivery_repo
        .update_slot(
            id,
            payload.region_id,
            payload.start_time.as_deref(),
            payload.end_time.as_deref(),
            payload.is_active,
        )
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?
        .ok_or_else(|| AppError::SlotNotFound.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(slot)))
}

pub async fn delete_slot(
    State(app_state): State<AppState>,
    locale: Locale,
    _staff: StaffUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = app_state
        .delivery_repo
        .delete_slot(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    if !deleted {
        return Err(AppError::SlotNotFound.to_api_error(&locale, &app_state.i18n_store));
    }

    Ok(StatusCode::NO_CONTENT)
}
