// src/storefront/cart.rs

// Carrinho do cliente: estado explícito e injetável. A persistência
// (análoga ao local storage) entra por CartStorage e as confirmações
// visuais por CartNotifier, então o mecanismo de notificação troca sem
// tocar na lógica do carrinho.
//
// Nenhuma operação aqui é falível: falha de persistência é logada e
// nunca propagada ao usuário.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::catalog::Product;

// Chave fixa de persistência, compartilhada entre sessões.
pub const CART_STORAGE_KEY: &str = "escapetable_cart";

// Janela do "desfazer" após remover um item.
pub const UNDO_WINDOW: Duration = Duration::from_secs(5);

// Uma linha do carrinho: snapshot do produto + quantidade (>= 1).
// Conjunto chaveado pela identidade do produto, sem duplicatas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product: Product,
    pub quantity: i32,
}

// Fronteira de persistência durável do cliente.
pub trait CartStorage: Send + Sync {
    fn save(&self, items: &[CartItem]);
    fn load(&self) -> Vec<CartItem>;
}

// Evento emitido a cada mutação, para o canal de notificação.
#[derive(Debug, Clone, PartialEq)]
pub enum CartEvent {
    Added { product_name: String, quantity: i32 },
    QuantityUpdated { product_name: String, quantity: i32 },
    Removed { product_name: String },
}

pub trait CartNotifier: Send + Sync {
    fn notify(&self, event: CartEvent);
}

struct RemovedEntry {
    item: CartItem,
    removed_at: Instant,
}

pub struct CartStore {
    items: Vec<CartItem>,
    storage: Box<dyn CartStorage>,
    notifier: Box<dyn CartNotifier>,
    last_removed: Option<RemovedEntry>,
}

impl CartStore {
    // Carrega o estado persistido da sessão anterior.
    pub fn new(storage: Box<dyn CartStorage>, notifier: Box<dyn CartNotifier>) -> Self {
        let items = storage.load();
        Self {
            items,
            storage,
            notifier,
            last_removed: None,
        }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // Soma das quantidades.
    pub fn total_items(&self) -> i32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    // Soma de (preço unitário x quantidade), recomputada a cada
    // leitura. Nada de total em cache.
    pub fn total_in_cents(&self) -> i64 {
        self.items
            .iter()
            .map(|item| i64::from(item.product.price_in_cents) * i64::from(item.quantity))
            .sum()
    }

    // Adiciona: incrementa se o produto já está no carrinho, senão
    // insere. Sempre bem-sucedida; estoque não é checado nesta camada.
    pub fn add(&mut self, product: &Product, quantity: i32) {
        let quantity = quantity.max(1);

        match self.items.iter_mut().find(|i| i.product.id == product.id) {
            Some(existing) => {
                existing.quantity += quantity;
                self.notifier.notify(CartEvent::QuantityUpdated {
                    product_name: product.name.clone(),
                    quantity,
                });
            }
            None => {
                self.items.push(CartItem {
                    product: product.clone(),
                    quantity,
                });
                self.notifier.notify(CartEvent::Added {
                    product_name: product.name.clone(),
                    quantity,
                });
            }
        }

        self.persist();
    }

    // Remove a linha, guardando-a para o "desfazer". No-op se o
    // produto não está no carrinho.
    pub fn remove(&mut self, product_id: Uuid) {
        let Some(position) = self.items.iter().position(|i| i.product.id == product_id) else {
            return;
        };

        let item = self.items.remove(position);
        self.notifier.notify(CartEvent::Removed {
            product_name: item.product.name.clone(),
        });
        self.last_removed = Some(RemovedEntry {
            item,
            removed_at: Instant::now(),
        });

        self.persist();
    }

    // Reinsere a última linha removida, exatamente como era (mesmo
    // produto, mesma quantidade), se ainda dentro da janela.
    pub fn undo_remove(&mut self) -> bool {
        let Some(entry) = self.last_removed.take() else {
            return false;
        };

        if entry.removed_at.elapsed() > UNDO_WINDOW {
            return false;
        }

        let name = entry.item.product.name.clone();
        let quantity = entry.item.quantity;
        self.items.push(entry.item);
        self.notifier.notify(CartEvent::Added {
            product_name: name,
            quantity,
        });

        self.persist();
        true
    }

    // Quantidade <= 0 equivale a remover.
    pub fn set_quantity(&mut self, product_id: Uuid, quantity: i32) {
        if quantity <= 0 {
            self.remove(product_id);
            return;
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product_id) {
            item.quantity = quantity;
            let name = item.product.name.clone();
            self.notifier.notify(CartEvent::QuantityUpdated {
                product_name: name,
                quantity,
            });
            self.persist();
        }
    }

    // Esvazia o carrinho (usado após o aceite do pedido).
    pub fn clear(&mut self) {
        self.items.clear();
        self.last_removed = None;
        self.persist();
    }

    fn persist(&self) {
        self.storage.save(&self.items);
    }

    #[cfg(test)]
    pub(crate) fn expire_undo_window(&mut self) {
        if let Some(entry) = self.last_removed.as_mut() {
            if let Some(past) = Instant::now().checked_sub(UNDO_WINDOW + Duration::from_secs(1)) {
                entry.removed_at = past;
            }
        }
    }
}

// --- Implementações padrão das fronteiras ---

// Persistência em arquivo JSON sob a chave fixa, o análogo do local
// storage do navegador. Erros de E/S são logados e engolidos.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let mut path = dir.into();
        path.push(format!("{CART_STORAGE_KEY}.json"));
        Self { path }
    }
}

impl CartStorage for JsonFileStorage {
    fn save(&self, items: &[CartItem]) {
        match serde_json::to_vec(items) {
            Ok(bytes) => {
                if let Err(e) = std::fs::write(&self.path, bytes) {
                    tracing::warn!("Falha ao persistir o carrinho em {:?}: {}", self.path, e);
                }
            }
            Err(e) => tracing::warn!("Falha ao serializar o carrinho: {}", e),
        }
    }

    fn load(&self) -> Vec<CartItem> {
        match std::fs::read(&self.path) {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                tracing::warn!("Carrinho persistido ilegível, descartando: {}", e);
                Vec::new()
            }),
            // Arquivo ausente = primeira visita.
            Err(_) => Vec::new(),
        }
    }
}

// Canal de notificação padrão: loga a mensagem que a interface
// mostraria como toast.
pub struct LogNotifier;

impl CartNotifier for LogNotifier {
    fn notify(&self, event: CartEvent) {
        match event {
            CartEvent::Added {
                product_name,
                quantity,
            } => tracing::info!("Sepete eklendi: {} ({} adet)", product_name, quantity),
            CartEvent::QuantityUpdated {
                product_name,
                quantity,
            } => tracing::info!("Miktar güncellendi: {} ({} adet)", product_name, quantity),
            CartEvent::Removed { product_name } => {
                tracing::info!("Sepetten kaldırıldı: {}", product_name)
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use chrono::Utc;
    use std::sync::{Arc, Mutex};

    // Armazenamento em memória para os testes.
    #[derive(Default, Clone)]
    pub struct MemoryStorage {
        pub saved: Arc<Mutex<Vec<CartItem>>>,
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
    pub struct RecordingNotifier {
        pub events: Arc<Mutex<Vec<CartEvent>>>,
    }

    impl CartNotifier for RecordingNotifier {
        fn notify(&self, event: CartEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    pub fn product(name: &str, price_in_cents: i32) -> Product {
        let now = Utc::now();
        Product {
            id: Uuid::new_v4(),
            category_id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
            price_in_cents,
            image_url: None,
            stock: 10,
            is_active: true,
            is_featured: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn empty_cart() -> CartStore {
        CartStore::new(
            Box::new(MemoryStorage::default()),
            Box::new(RecordingNotifier::default()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn adding_same_product_increments_quantity() {
        let mut cart = empty_cart();
        let cola = product("Kola", 1500);

        cart.add(&cola, 1);
        cart.add(&cola, 2);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 3);
        assert_eq!(cart.total_items(), 3);
    }

    #[test]
    fn totals_are_recomputed_and_idempotent() {
        let mut cart = empty_cart();
        cart.add(&product("Kola", 1500), 2);
        cart.add(&product("Ekmek", 3000), 1);

        assert_eq!(cart.total_in_cents(), 6000);
        // Ler duas vezes sem mutação dá o mesmo resultado.
        assert_eq!(cart.total_in_cents(), 6000);
        assert_eq!(cart.total_items(), 3);
    }

    #[test]
    fn set_quantity_zero_removes_the_line() {
        let mut cart = empty_cart();
        let cola = product("Kola", 1500);
        cart.add(&cola, 2);

        cart.set_quantity(cola.id, 0);

        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
    }

    #[test]
    fn removing_missing_product_is_a_noop() {
        let mut cart = empty_cart();
        cart.add(&product("Kola", 1500), 1);

        cart.remove(Uuid::new_v4());

        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn undo_restores_the_exact_entry() {
        let mut cart = empty_cart();
        let cola = product("Kola", 1500);
        cart.add(&cola, 3);

        cart.remove(cola.id);
        assert!(cart.is_empty());

        assert!(cart.undo_remove());
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].product.id, cola.id);
        assert_eq!(cart.items()[0].quantity, 3);
    }

    #[test]
    fn undo_fails_after_window_expires() {
        let mut cart = empty_cart();
        let cola = product("Kola", 1500);
        cart.add(&cola, 1);
        cart.remove(cola.id);

        cart.expire_undo_window();

        assert!(!cart.undo_remove());
        assert!(cart.is_empty());
    }

    #[test]
    fn every_mutation_persists_the_full_cart() {
        let storage = MemoryStorage::default();
        let mut cart = CartStore::new(
            Box::new(storage.clone()),
            Box::new(RecordingNotifier::default()),
        );

        let cola = product("Kola", 1500);
        cart.add(&cola, 2);
        assert_eq!(storage.saved.lock().unwrap().len(), 1);

        cart.set_quantity(cola.id, 5);
        assert_eq!(storage.saved.lock().unwrap()[0].quantity, 5);

        cart.clear();
        assert!(storage.saved.lock().unwrap().is_empty());
    }

    #[test]
    fn cart_reloads_persisted_state() {
        let storage = MemoryStorage::default();
        {
            let mut cart = CartStore::new(
                Box::new(storage.clone()),
                Box::new(RecordingNotifier::default()),
            );
            cart.add(&product("Kola", 1500), 2);
        }

        let reloaded = CartStore::new(
            Box::new(storage.clone()),
            Box::new(RecordingNotifier::default()),
        );
        assert_eq!(reloaded.total_items(), 2);
    }

    #[test]
    fn json_file_storage_round_trips_under_the_fixed_key() {
        let storage = JsonFileStorage::new(std::env::temp_dir());
        let items = vec![CartItem {
            product: product("Kola", 1500),
            quantity: 2,
        }];

        storage.save(&items);
        let loaded = storage.load();

        assert_eq!(loaded, items);

        // O notificador padrão só loga; não pode entrar em pânico.
        LogNotifier.notify(CartEvent::Added {
            product_name: "Kola".to_string(),
            quantity: 2,
        });
    }

    #[test]
    fn notifications_flow_through_the_channel() {
        let notifier = RecordingNotifier::default();
        let mut cart = CartStore::new(
            Box::new(MemoryStorage::default()),
            Box::new(notifier.clone()),
        );

        let cola = product("Kola", 1500);
        cart.add(&cola, 1);
        cart.add(&cola, 1);
        cart.remove(cola.id);

        let events = notifier.events.lock().unwrap();
        assert!(matches!(events[0], CartEvent::Added { .. }));
        assert!(matches!(events[1], CartEvent::QuantityUpdated { .. }));
        assert!(matches!(events[2], CartEvent::Removed { .. }));
    }
}
