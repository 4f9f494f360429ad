// src/storefront/checkout.rs

// Montagem do pedido no fim do checkout. As pré-condições são checadas
// aqui, antes de qualquer chamada de rede: violou, a submissão é
// bloqueada com uma mensagem localizada e nada sai do cliente.

use thiserror::Error;
use uuid::Uuid;

use crate::models::order::{CreateOrderPayload, OrderItemInput, PaymentMethod};

use super::cart::CartStore;
use super::slots::TimeSlot;

// Mensagens exatamente como a interface as exibe.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("Sipariş vermek için sepetinize ürün ekleyin")]
    EmptyCart,

    #[error("Lütfen bir teslimat noktası seçin")]
    MissingLocation,

    #[error("Lütfen bir teslimat saati seçin")]
    MissingSlot,

    #[error("Lütfen bir ödeme yöntemi seçin")]
    MissingPaymentMethod,
}

// "15.09.2025 14:00 - 15:00": data no formato turco + faixa horária.
// Gravada literalmente no pedido; nunca recomputada depois.
pub fn estimated_delivery_time(slot: &TimeSlot) -> String {
    format!("{} {}", slot.date.format("%d.%m.%Y"), slot.label)
}

// Projeta carrinho + escolhas do checkout no payload de POST /api/orders.
// Cada linha vira um snapshot imutável calculado do estado em memória
// do carrinho, sem nova consulta ao servidor.
pub fn build_order_payload(
    cart: &CartStore,
    camping_location_id: Option<Uuid>,
    slot: Option<&TimeSlot>,
    payment_method: Option<PaymentMethod>,
    delivery_note: Option<&str>,
) -> Result<CreateOrderPayload, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    let camping_location_id = camping_location_id.ok_or(CheckoutError::MissingLocation)?;
    let slot = slot.ok_or(CheckoutError::MissingSlot)?;
    let payment_method = payment_method.ok_or(CheckoutError::MissingPaymentMethod)?;

    let items = cart
        .items()
        .iter()
        .map(|line| OrderItemInput {
            product_id: line.product.id,
            product_name: line.product.name.clone(),
            price_in_cents: line.product.price_in_cents,
            quantity: line.quantity,
            subtotal_in_cents: i64::from(line.product.price_in_cents) * i64::from(line.quantity),
        })
        .collect();

    Ok(CreateOrderPayload {
        items,
        payment_method,
        region_id: None,
        camping_location_id: Some(camping_location_id),
        custom_address: delivery_note
            .map(str::trim)
            .filter(|note| !note.is_empty())
            .map(str::to_owned),
        delivery_slot_id: None,
        total_amount_in_cents: cart.total_in_cents(),
        estimated_delivery_time: Some(estimated_delivery_time(slot)),
    })
}

// Aceite confirmado pelo servidor: o carrinho esvazia. Em caso de
// rejeição o chamador não chama isto e o carrinho fica intacto para a
// nova tentativa.
pub fn complete_order(cart: &mut CartStore) {
    cart.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storefront::cart::test_support::{empty_cart, product};
    use crate::storefront::slots::generate_slots;
    use chrono::NaiveDate;

    fn slot_at(hour: u32) -> TimeSlot {
        let date = NaiveDate::from_ymd_opt(2025, 9, 15).unwrap();
        generate_slots(date, None)
            .into_iter()
            .find(|s| s.hour == hour)
            .unwrap()
    }

    #[test]
    fn empty_cart_is_rejected_before_anything_else() {
        let cart = empty_cart();
        let result = build_order_payload(
            &cart,
            Some(Uuid::new_v4()),
            Some(&slot_at(14)),
            Some(PaymentMethod::Cash),
            None,
        );
        assert_eq!(result.unwrap_err(), CheckoutError::EmptyCart);
    }

    #[test]
    fn each_missing_precondition_has_its_own_error() {
        let mut cart = empty_cart();
        cart.add(&product("Kola", 1500), 1);
        let slot = slot_at(14);

        let err = build_order_payload(&cart, None, Some(&slot), Some(PaymentMethod::Cash), None)
            .unwrap_err();
        assert_eq!(err, CheckoutError::MissingLocation);

        let err = build_order_payload(
            &cart,
            Some(Uuid::new_v4()),
            None,
            Some(PaymentMethod::Cash),
            None,
        )
        .unwrap_err();
        assert_eq!(err, CheckoutError::MissingSlot);

        let err =
            build_order_payload(&cart, Some(Uuid::new_v4()), Some(&slot), None, None).unwrap_err();
        assert_eq!(err, CheckoutError::MissingPaymentMethod);
    }

    #[test]
    fn payload_snapshots_cart_lines_and_totals() {
        let mut cart = empty_cart();
        let cola = product("Kola", 1500);
        let ekmek = product("Ekmek", 3000);
        cart.add(&cola, 2);
        cart.add(&ekmek, 1);

        let location = Uuid::new_v4();
        let payload = build_order_payload(
            &cart,
            Some(location),
            Some(&slot_at(14)),
            Some(PaymentMethod::BankTransfer),
            Some("  Göl kenarındaki çadır  "),
        )
        .unwrap();

        assert_eq!(payload.total_amount_in_cents, 6000);
        assert_eq!(payload.camping_location_id, Some(location));
        assert_eq!(payload.custom_address.as_deref(), Some("Göl kenarındaki çadır"));
        assert_eq!(payload.items.len(), 2);

        let cola_line = payload
            .items
            .iter()
            .find(|i| i.product_id == cola.id)
            .unwrap();
        assert_eq!(cola_line.product_name, "Kola");
        assert_eq!(cola_line.price_in_cents, 1500);
        assert_eq!(cola_line.quantity, 2);
        assert_eq!(cola_line.subtotal_in_cents, 3000);
    }

    #[test]
    fn estimated_delivery_is_date_plus_hour_range() {
        let slot = slot_at(14);
        assert_eq!(estimated_delivery_time(&slot), "15.09.2025 14:00 - 15:00");
    }

    #[test]
    fn acceptance_clears_the_cart() {
        let mut cart = empty_cart();
        cart.add(&product("Kola", 1500), 2);

        complete_order(&mut cart);

        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
    }
}
