// src/handlers/settings.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::StaffUser, i18n::Locale},
};

#[derive(Debug, Deserialize, Validate)]
pub struct SetSettingPayload {
    #[validate(length(min = 1, message = "Ayar anahtarı gerekli"))]
    pub key: String,
    pub value: serde_json::Value,
    pub description: Option<String>,
}

pub async fn get_setting(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(key): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let setting = app_state
        .settings_repo
        .get_setting(&key)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?
        .ok_or_else(|| AppError::SettingNotFound.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(setting)))
}

// Upsert: cria ou substitui o valor da chave.
pub async fn set_setting(
    State(app_state): State<AppState>,
    locale: Locale,
    _staff: StaffUser,
    Json(payload): Json<SetSettingPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let setting = app_state
        .settings_repo
        .set_setting(&payload.key, &payload.value, payload.description.as_deref())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(setting)))
}
