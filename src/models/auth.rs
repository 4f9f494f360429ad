// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// Papéis de acesso. 'personnel' é a equipe de entrega, com os mesmos
// poderes de back-office que o 'admin'.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Customer,
    Admin,
    Personnel,
}

impl UserRole {
    pub fn is_staff(&self) -> bool {
        matches!(self, UserRole::Admin | UserRole::Personnel)
    }
}

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub password_hash: String,

    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub profile_image_url: Option<String>,
    pub role: UserRole,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Telefone no formato nacional turco: 10 dígitos (5xxxxxxxxx).
fn validate_phone(phone: &str) -> Result<(), validator::ValidationError> {
    if phone.len() == 10 && phone.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        let mut err = validator::ValidationError::new("phone");
        err.message = Some("Telefon numarası 10 haneli olmalıdır (5xxxxxxxxx)".into());
        Err(err)
    }
}

// Dados para registro de um novo usuário
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserPayload {
    #[validate(email(message = "Geçerli bir e-posta adresi giriniz"))]
    pub email: String,

    #[validate(length(min = 6, message = "Şifre en az 6 karakter olmalıdır"))]
    pub password: String,

    #[validate(length(min = 1, message = "Ad gerekli"))]
    pub first_name: String,

    #[validate(length(min = 1, message = "Soyad gerekli"))]
    pub last_name: String,

    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
}

// Dados para login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginUserPayload {
    #[validate(email(message = "Geçerli bir e-posta adresi giriniz"))]
    pub email: String,

    #[validate(length(min = 6, message = "Şifre en az 6 karakter olmalıdır"))]
    pub password: String,
}

// Atualização parcial do perfil
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserPayload {
    #[validate(length(min = 1, message = "Ad gerekli"))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, message = "Soyad gerekli"))]
    pub last_name: Option<String>,

    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // Subject (ID do usuário)
    pub exp: usize, // Expiration time (quando o token expira)
    pub iat: usize, // Issued At (quando o token foi criado)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staff_roles() {
        assert!(UserRole::Admin.is_staff());
        assert!(UserRole::Personnel.is_staff());
        assert!(!UserRole::Customer.is_staff());
    }

    #[test]
    fn phone_must_have_ten_digits() {
        assert!(validate_phone("5321234567").is_ok());
        assert!(validate_phone("532123456").is_err());
        assert!(validate_phone("53212345678").is_err());
        assert!(validate_phone("5321a34567").is_err());
    }
}
