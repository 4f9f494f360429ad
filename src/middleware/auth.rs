// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

use crate::{common::error::AppError, config::AppState, models::auth::User};

fn bearer_token(parts_headers: &axum::http::HeaderMap) -> Option<&str> {
    parts_headers
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
}

// Middleware de autenticação: valida o Bearer token e insere o usuário
// nos "extensions" da requisição.
pub async fn auth_guard(
    State(app_state): State<AppState>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(token) = bearer_token(request.headers()) {
        let user = app_state.auth_service.validate_token(token).await?;
        request.extensions_mut().insert(user);
        return Ok(next.run(request).await);
    }

    Err(AppError::InvalidToken)
}

// Extrator para obter o usuário autenticado diretamente nos handlers
// (pressupõe o auth_guard na pilha).
pub struct AuthenticatedUser(pub User);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<User>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or(AppError::InvalidToken)
    }
}

// Guardião do back-office: exige papel admin ou personnel. Funciona
// como extrator para poder conviver com métodos públicos na mesma
// rota (GET público, POST restrito).
pub struct StaffUser(pub User);

impl FromRequestParts<AppState> for StaffUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Usuário já injetado pelo auth_guard, quando a rota passa por ele.
        let user = match parts.extensions.get::<User>() {
            Some(user) => user.clone(),
            None => {
                let token = bearer_token(&parts.headers).ok_or(AppError::InvalidToken)?;
                state.auth_service.validate_token(token).await?
            }
        };

        if !user.role.is_staff() {
            return Err(AppError::Forbidden);
        }

        Ok(StaffUser(user))
    }
}
