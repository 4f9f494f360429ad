// src/common/format.rs

// Formatação de exibição: centavos inteiros -> string em lira turca,
// e rótulos localizados para os enums de pedido. Funções puras; o
// dinheiro circula como inteiro por todo o sistema e só vira texto aqui.

use crate::models::order::{OrderStatus, PaymentMethod};

// "₺1.234,56": separador de milhar '.', decimal ','.
pub fn format_price(cents: i64) -> String {
    let negative = cents < 0;
    let abs = cents.unsigned_abs();
    let lira = abs / 100;
    let kurus = abs % 100;

    let digits = lira.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}₺{grouped},{kurus:02}")
}

pub fn order_status_label(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Preparing => "Hazırlanıyor",
        OrderStatus::OnDelivery => "Yolda",
        OrderStatus::Delivered => "Teslim Edildi",
        OrderStatus::Cancelled => "İptal Edildi",
    }
}

pub fn payment_method_label(method: PaymentMethod) -> &'static str {
    match method {
        PaymentMethod::Cash => "Nakit",
        PaymentMethod::BankTransfer => "Havale / EFT",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_small_amounts() {
        assert_eq!(format_price(0), "₺0,00");
        assert_eq!(format_price(5), "₺0,05");
        assert_eq!(format_price(150), "₺1,50");
    }

    #[test]
    fn groups_thousands_turkish_style() {
        assert_eq!(format_price(123_456), "₺1.234,56");
        assert_eq!(format_price(100_000_000), "₺1.000.000,00");
    }

    #[test]
    fn formats_negative_amounts() {
        assert_eq!(format_price(-2_50), "-₺2,50");
    }

    #[test]
    fn labels_match_storefront_copy() {
        assert_eq!(order_status_label(OrderStatus::Preparing), "Hazırlanıyor");
        assert_eq!(order_status_label(OrderStatus::Delivered), "Teslim Edildi");
        assert_eq!(payment_method_label(PaymentMethod::Cash), "Nakit");
        assert_eq!(
            payment_method_label(PaymentMethod::BankTransfer),
            "Havale / EFT"
        );
    }
}
