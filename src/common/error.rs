// src/common/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::collections::HashMap;
use thiserror::Error;

use crate::common::i18n::I18nStore;
use crate::middleware::i18n::Locale;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// As mensagens voltadas ao usuário saem do I18nStore; o texto do
// `#[error]` serve apenas para logs.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Acesso negado")]
    Forbidden,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Categoria não encontrada")]
    CategoryNotFound,

    #[error("Produto não encontrado")]
    ProductNotFound,

    #[error("Região não encontrada")]
    RegionNotFound,

    #[error("Ponto de entrega não encontrado")]
    LocationNotFound,

    #[error("Janela de entrega não encontrada")]
    SlotNotFound,

    #[error("Pedido não encontrado")]
    OrderNotFound,

    #[error("Configuração não encontrada")]
    SettingNotFound,

    #[error("Estoque insuficiente: {0}")]
    InsufficientStock(String),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    // Chave de mensagem resolvida pelo I18nStore.
    fn message_key(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation",
            AppError::EmailAlreadyExists => "email_exists",
            AppError::InvalidCredentials => "invalid_credentials",
            AppError::InvalidToken => "invalid_token",
            AppError::Forbidden => "forbidden",
            AppError::UserNotFound => "user_not_found",
            AppError::CategoryNotFound => "category_not_found",
            AppError::ProductNotFound => "product_not_found",
            AppError::RegionNotFound => "region_not_found",
            AppError::LocationNotFound => "location_not_found",
            AppError::SlotNotFound => "slot_not_found",
            AppError::OrderNotFound => "order_not_found",
            AppError::SettingNotFound => "setting_not_found",
            AppError::InsufficientStock(_) => "insufficient_stock",
            _ => "internal",
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::EmailAlreadyExists => StatusCode::CONFLICT,
            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::UserNotFound
            | AppError::CategoryNotFound
            | AppError::ProductNotFound
            | AppError::RegionNotFound
            | AppError::LocationNotFound
            | AppError::SlotNotFound
            | AppError::OrderNotFound
            | AppError::SettingNotFound => StatusCode::NOT_FOUND,
            AppError::InsufficientStock(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    // Converte para a resposta HTTP localizada.
    pub fn to_api_error(&self, locale: &Locale, store: &I18nStore) -> ApiError {
        let status = self.status_code();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            // O detalhe fica no log; o cliente recebe uma mensagem opaca.
            tracing::error!("Erro interno do servidor: {:?}", self);
        }

        let mut message = store.message(locale.lang(), self.message_key()).to_string();

        let details = match self {
            AppError::ValidationError(errors) => {
                let mut details = HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                Some(details)
            }
            AppError::InsufficientStock(product_name) => {
                message = format!("{}: {}", message, product_name);
                None
            }
            _ => None,
        };

        ApiError {
            status,
            message,
            details,
        }
    }
}

// Resposta de erro já localizada, pronta para virar HTTP.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<HashMap<String, Vec<String>>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => Json(json!({ "error": self.message, "details": details })),
            None => Json(json!({ "error": self.message })),
        };
        (self.status, body).into_response()
    }
}

// Caminho sem Locale (middleware, extratores): assume o idioma padrão.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error(&Locale::default(), &I18nStore::new())
            .into_response()
    }
}
