// src/handlers/orders.rs

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
    middleware::{auth::{AuthenticatedUser, StaffUser}, i18n::Locale},
    models::order::{CreateOrderPayload, OrderStatus},
};

#[derive(Debug, Deserialize)]
pub struct UpdateStatusPayload {
    pub status: OrderStatus,
}

// Clientes listam os próprios pedidos; staff lista todos.
pub async fn get_orders(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let orders = if user.role.is_staff() {
        app_state.order_service.list_all_orders().await
    } else {
        app_state.order_service.list_user_orders(user.id).await
    }
    .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(orders)))
}

// Lista completa para o back-office.
pub async fn get_all_orders_admin(
    State(app_state): State<AppState>,
    locale: Locale,
    _staff: StaffUser,
) -> Result<impl IntoResponse, ApiError> {
    let orders = app_state
        .order_service
        .list_all_orders()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(orders)))
}

// Um pedido só é visível para o dono ou para o staff.
pub async fn get_order(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let order = app_state
        .order_service
        .get_order(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?
        .ok_or_else(|| AppError::OrderNotFound.to_api_error(&locale, &app_state.i18n_store))?;

    if order.user_id != user.id && !user.role.is_staff() {
        return Err(AppError::Forbidden.to_api_error(&locale, &app_state.i18n_store));
    }

    Ok((StatusCode::OK, Json(order)))
}

pub async fn get_order_items(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let order = app_state
        .order_service
        .get_order(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?
        .ok_or_else(|| AppError::OrderNotFound.to_api_error(&locale, &app_state.i18n_store))?;

    if order.user_id != user.id && !user.role.is_staff() {
        return Err(AppError::Forbidden.to_api_error(&locale, &app_state.i18n_store));
    }

    let items = app_state
        .order_service
        .get_order_items(order.id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(items)))
}

// Criação do pedido: cabeçalho + snapshots + baixa de estoque em uma
// única transação (ver OrderService).
pub async fn create_order(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateOrderPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let order = app_state
        .order_service
        .create_order(user.id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(order)))
}

// Troca de status (staff). Sem validação de transição, por contrato.
pub async fn update_order_status(
    State(app_state): State<AppState>,
    locale: Locale,
    _staff: StaffUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let order = app_state
        .order_service
        .update_status(id, payload.status)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?
        .ok_or_else(|| AppError::OrderNotFound.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(order)))
}
