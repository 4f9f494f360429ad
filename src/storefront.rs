// src/storefront.rs
//
// Núcleo do fluxo de compra do cliente, reimplementado como estado
// explícito e injetável (nada de globais): carrinho, geração de janelas
// de entrega, reconciliação da seleção, montagem do pedido e busca
// incremental. O servidor enxerga só o CreateOrderPayload resultante.

pub mod cart;
pub mod checkout;
pub mod search;
pub mod selection;
pub mod slots;
pub mod ticker;
