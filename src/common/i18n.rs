// src/common/i18n.rs

// Tabela de mensagens de erro por idioma. O produto é turco, então o
// turco é o idioma padrão; "en" cobre clientes com Accept-Language
// estrangeiro. Qualquer outro idioma cai no padrão.

pub const DEFAULT_LANG: &str = "tr";

#[derive(Debug, Clone, Default)]
pub struct I18nStore;

impl I18nStore {
    pub fn new() -> Self {
        Self
    }

    pub fn message(&self, lang: &str, key: &str) -> &'static str {
        match lang {
            "en" => Self::english(key),
            _ => Self::turkish(key),
        }
    }

    fn turkish(key: &str) -> &'static str {
        match key {
            "validation" => "Bir veya daha fazla alan geçersiz.",
            "email_exists" => "Bu e-posta adresi zaten kullanımda.",
            "invalid_credentials" => "E-posta veya şifre hatalı.",
            "invalid_token" => "Oturum geçersiz veya süresi dolmuş.",
            "forbidden" => "Bu işlem için yetkiniz yok.",
            "user_not_found" => "Kullanıcı bulunamadı.",
            "category_not_found" => "Kategori bulunamadı.",
            "product_not_found" => "Ürün bulunamadı.",
            "region_not_found" => "Bölge bulunamadı.",
            "location_not_found" => "Teslimat noktası bulunamadı.",
            "slot_not_found" => "Teslimat saati bulunamadı.",
            "order_not_found" => "Sipariş bulunamadı.",
            "setting_not_found" => "Ayar bulunamadı.",
            "insufficient_stock" => "Yetersiz stok",
            _ => "Beklenmeyen bir hata oluştu.",
        }
    }

    fn english(key: &str) -> &'static str {
        match key {
            "validation" => "One or more fields are invalid.",
            "email_exists" => "This e-mail address is already in use.",
            "invalid_credentials" => "Invalid e-mail or password.",
            "invalid_token" => "Session is invalid or expired.",
            "forbidden" => "You are not allowed to perform this action.",
            "user_not_found" => "User not found.",
            "category_not_found" => "Category not found.",
            "product_not_found" => "Product not found.",
            "region_not_found" => "Region not found.",
            "location_not_found" => "Delivery location not found.",
            "slot_not_found" => "Delivery slot not found.",
            "order_not_found" => "Order not found.",
            "setting_not_found" => "Setting not found.",
            "insufficient_stock" => "Insufficient stock",
            _ => "An unexpected error occurred.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_language_falls_back_to_turkish() {
        let store = I18nStore::new();
        assert_eq!(
            store.message("de", "order_not_found"),
            store.message("tr", "order_not_found")
        );
    }

    #[test]
    fn unknown_key_yields_generic_message() {
        let store = I18nStore::new();
        assert_eq!(store.message("tr", "nope"), "Beklenmeyen bir hata oluştu.");
        assert_eq!(store.message("en", "nope"), "An unexpected error occurred.");
    }
}
