// src/handlers/dashboard.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::{common::error::ApiError, config::AppState, middleware::{auth::StaffUser, i18n::Locale}};

// Agregados do painel administrativo. Recomputados a cada requisição.
pub async fn get_dashboard_stats(
    State(app_state): State<AppState>,
    locale: Locale,
    _staff: StaffUser,
) -> Result<impl IntoResponse, ApiError> {
    let stats = app_state
        .dashboard_service
        .get_stats()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(stats)))
}
