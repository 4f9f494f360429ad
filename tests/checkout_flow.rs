// tests/checkout_flow.rs
//
// Cenários de ponta a ponta do fluxo de compra: carrinho -> janelas ->
// reconciliação -> montagem do pedido. Nada aqui toca rede ou banco;
// o fluxo do cliente é todo estado local por construção.

use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use escapetable::models::catalog::Product;
use escapetable::models::order::PaymentMethod;
use escapetable::storefront::cart::{CartItem, CartNotifier, CartStorage, CartStore, CartEvent};
use escapetable::storefront::checkout::{CheckoutError, build_order_payload, complete_order};
use escapetable::storefront::selection::{DayChoice, SlotSelection};
use escapetable::storefront::slots::{TimeSlot, generate_slots, slots_for_today};
use escapetable::storefront::ticker::SlotSets;

#[derive(Default, Clone)]
struct MemoryStorage {
    saved: Arc<Mutex<Vec<CartItem>>>,
}

impl CartStorage for MemoryStorage {
    fn save(&self, items: &[CartItem]) {
        *self.saved.lock().unwrap() = items.to_vec();
    }

    fn load(&self) -> Vec<CartItem> {
        self.saved.lock().unwrap().clone()
    }
}

#[derive(Default, Clone)]
struct SilentNotifier;

impl CartNotifier for SilentNotifier {
    fn notify(&self, _event: CartEvent) {}
}

fn product(name: &str, price_in_cents: i32) -> Product {
    let now = Utc::now();
    Product {
        id: Uuid::new_v4(),
        category_id: Uuid::new_v4(),
        name: name.to_string(),
        description: None,
        price_in_cents,
        image_url: None,
        stock: 50,
        is_active: true,
        is_featured: false,
        created_at: now,
        updated_at: now,
    }
}

fn new_cart() -> CartStore {
    CartStore::new(Box::new(MemoryStorage::default()), Box::new(SilentNotifier))
}

fn slot_at(date: NaiveDate, hour: u32) -> TimeSlot {
    generate_slots(date, None)
        .into_iter()
        .find(|s| s.hour == hour)
        .expect("hora dentro da janela de atendimento")
}

fn sept(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, day).unwrap()
}

// Cenário 1: dois produtos distintos (2 x 1500 + 1 x 3000).
#[test]
fn cart_totals_for_two_distinct_products() {
    let mut cart = new_cart();
    cart.add(&product("Kola", 1500), 2);
    cart.add(&product("Köy Ekmeği", 3000), 1);

    assert_eq!(cart.total_in_cents(), 6000);
    assert_eq!(cart.total_items(), 3);
}

// Cenário 2: checkout com carrinho vazio é barrado no cliente, antes
// de qualquer chamada de rede.
#[test]
fn empty_cart_checkout_is_rejected_client_side() {
    let cart = new_cart();

    let result = build_order_payload(
        &cart,
        Some(Uuid::new_v4()),
        Some(&slot_at(sept(15), 14)),
        Some(PaymentMethod::Cash),
        None,
    );

    assert_eq!(result.unwrap_err(), CheckoutError::EmptyCart);
}

// Cenário 3: pedido aceito esvazia o carrinho.
#[test]
fn accepted_order_clears_the_cart() {
    let mut cart = new_cart();
    cart.add(&product("Kola", 1500), 2);

    let payload = build_order_payload(
        &cart,
        Some(Uuid::new_v4()),
        Some(&slot_at(sept(15), 14)),
        Some(PaymentMethod::Cash),
        Some("Orman kampı, 12 numaralı çadır"),
    )
    .expect("pré-condições satisfeitas");

    assert_eq!(payload.total_amount_in_cents, 3000);

    // Servidor respondeu 201.
    complete_order(&mut cart);

    assert!(cart.is_empty());
    assert_eq!(cart.total_items(), 0);
}

// Cenário 4: às 21:30 do fuso do serviço não há mais janelas hoje
// (21 é excluída pela regra hora+1 e 22 está fora); às 19:30 restam
// exatamente 20:00 e 21:00.
#[test]
fn slot_generation_at_service_cutoffs() {
    // 21:30 em Istambul = 18:30 UTC.
    let at_2130 = Utc.with_ymd_and_hms(2025, 9, 15, 18, 30, 0).unwrap();
    assert!(slots_for_today(at_2130).is_empty());

    // 19:30 em Istambul = 16:30 UTC.
    let at_1930 = Utc.with_ymd_and_hms(2025, 9, 15, 16, 30, 0).unwrap();
    let hours: Vec<u32> = slots_for_today(at_1930).iter().map(|s| s.hour).collect();
    assert_eq!(hours, vec![20, 21]);
}

// Cenário 5: remover e desfazer dentro da janela restaura a linha
// exata (mesmo produto, mesma quantidade).
#[test]
fn undo_restores_the_removed_line() {
    let mut cart = new_cart();
    let cola = product("Kola", 1500);
    cart.add(&cola, 4);

    cart.remove(cola.id);
    assert!(cart.is_empty());

    assert!(cart.undo_remove());
    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items()[0].product.id, cola.id);
    assert_eq!(cart.items()[0].quantity, 4);
}

// Virada de meia-noite no meio do checkout: a escolha "amanhã @ 14"
// vira "hoje @ 14" (mesma hora, dia re-rotulado) e o pedido montado
// carrega a data certa.
#[test]
fn midnight_rollover_mid_checkout_keeps_the_wall_clock_hour() {
    let mut cart = new_cart();
    cart.add(&product("Kola", 1500), 1);

    // 23:50 de 15/09 em Istambul: só "amanhã" tem janelas.
    let before = Utc.with_ymd_and_hms(2025, 9, 15, 20, 50, 0).unwrap();
    let sets = SlotSets::at(before);
    assert!(sets.today.is_empty());

    let chosen = sets.tomorrow.iter().find(|s| s.hour == 14).unwrap();
    let mut selection = SlotSelection::new();
    selection.select(DayChoice::Tomorrow, chosen);

    // 00:05 de 16/09 em Istambul (21:05 UTC do dia 15): tick regenera.
    let after = Utc.with_ymd_and_hms(2025, 9, 15, 21, 5, 0).unwrap();
    let sets = SlotSets::at(after);
    selection.reconcile(&sets.today, &sets.tomorrow);

    assert_eq!(selection.day_choice(), Some(DayChoice::Today));
    assert_eq!(selection.selected_id(), Some("2025-09-16-14"));

    // A montagem usa a janela re-derivada.
    let slot = sets
        .today
        .iter()
        .find(|s| Some(s.id.as_str()) == selection.selected_id())
        .unwrap();
    let payload = build_order_payload(
        &cart,
        Some(Uuid::new_v4()),
        Some(slot),
        Some(PaymentMethod::BankTransfer),
        None,
    )
    .unwrap();

    assert_eq!(
        payload.estimated_delivery_time.as_deref(),
        Some("16.09.2025 14:00 - 15:00")
    );
}

// O corte alcança a escolha de "hoje": a seleção é limpa, nunca
// avançada para amanhã.
#[test]
fn passed_cutoff_clears_today_selection() {
    let today = sept(15);
    let tomorrow = sept(16);

    let mut selection = SlotSelection::new();
    let chosen = generate_slots(today, Some(11))
        .into_iter()
        .find(|s| s.hour == 13)
        .unwrap();
    selection.select(DayChoice::Today, &chosen);

    // O relógio passou das 13h.
    selection.reconcile(
        &generate_slots(today, Some(13)),
        &generate_slots(tomorrow, None),
    );

    assert_eq!(selection.selected_id(), None);
}

// Rejeição do servidor deixa o carrinho intacto para nova tentativa.
#[test]
fn rejected_order_leaves_cart_untouched() {
    let mut cart = new_cart();
    cart.add(&product("Kola", 1500), 2);

    let _payload = build_order_payload(
        &cart,
        Some(Uuid::new_v4()),
        Some(&slot_at(sept(15), 14)),
        Some(PaymentMethod::Cash),
        None,
    )
    .unwrap();

    // Servidor respondeu 409 (estoque insuficiente): nada de
    // complete_order.
    assert_eq!(cart.total_items(), 2);
    assert_eq!(cart.total_in_cents(), 3000);
}
