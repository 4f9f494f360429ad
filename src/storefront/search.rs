// src/storefront/search.rs

// Busca incremental com debounce. Cada consulta ganha uma geração; se
// outra consulta chega durante o debounce ou enquanto a resposta está
// em voo, o resultado antigo é descartado em vez de sobrescrever o
// novo (a corrida de resposta obsoleta).

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

// Espelha a regra do servidor: menos de 3 caracteres nem dispara.
pub const MIN_QUERY_CHARS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome<T> {
    Results(T),
    // Consulta curta demais; nenhuma requisição foi feita.
    TooShort,
    // Uma consulta mais nova tomou o lugar desta.
    Superseded,
}

#[derive(Clone, Default)]
pub struct SearchDebouncer {
    generation: Arc<AtomicU64>,
}

impl SearchDebouncer {
    pub fn new() -> Self {
        Self::default()
    }

    // Executa uma consulta debounced. `fetch` só é chamado se a
    // consulta sobreviver ao debounce; a resposta só é entregue se
    // nenhuma consulta mais nova tiver chegado enquanto isso.
    pub async fn run<F, Fut, T>(&self, query: &str, fetch: F) -> SearchOutcome<T>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = T>,
    {
        let my_generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if query.chars().count() < MIN_QUERY_CHARS {
            return SearchOutcome::TooShort;
        }

        tokio::time::sleep(SEARCH_DEBOUNCE).await;
        if self.generation.load(Ordering::SeqCst) != my_generation {
            return SearchOutcome::Superseded;
        }

        let results = fetch(query.to_owned()).await;

        // A resposta pode ter chegado depois de uma consulta mais nova.
        if self.generation.load(Ordering::SeqCst) != my_generation {
            return SearchOutcome::Superseded;
        }

        SearchOutcome::Results(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn short_queries_never_fire() {
        let debouncer = SearchDebouncer::new();
        let outcome: SearchOutcome<Vec<String>> = debouncer
            .run("ko", |_q| async { unreachable!("não deve buscar") })
            .await;
        assert_eq!(outcome, SearchOutcome::TooShort);
    }

    #[tokio::test]
    async fn lone_query_returns_results() {
        let debouncer = SearchDebouncer::new();
        let outcome = debouncer
            .run("kola", |q| async move { vec![format!("{q}-1")] })
            .await;
        assert_eq!(
            outcome,
            SearchOutcome::Results(vec!["kola-1".to_string()])
        );
    }

    // A primeira consulta é substituída durante o debounce; o resultado
    // dela é descartado, nunca sobrescreve o da segunda.
    #[tokio::test]
    async fn superseded_query_is_discarded() {
        let debouncer = SearchDebouncer::new();

        let first = debouncer.run("kola", |q| async move { q });
        let second = async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            debouncer.run("kolali", |q| async move { q }).await
        };

        let (first, second) = tokio::join!(first, second);

        assert_eq!(first, SearchOutcome::Superseded);
        assert_eq!(second, SearchOutcome::Results("kolali".to_string()));
    }

    // Resposta lenta chegando depois de uma consulta mais nova também
    // é descartada.
    #[tokio::test]
    async fn stale_response_after_newer_query_is_discarded() {
        let debouncer = SearchDebouncer::new();

        let slow = debouncer.run("kola", |q| async move {
            tokio::time::sleep(Duration::from_millis(400)).await;
            q
        });
        let fast = async {
            tokio::time::sleep(Duration::from_millis(500)).await;
            debouncer.run("ekmek", |q| async move { q }).await
        };

        let (slow, fast) = tokio::join!(slow, fast);

        assert_eq!(slow, SearchOutcome::Superseded);
        assert_eq!(fast, SearchOutcome::Results("ekmek".to_string()));
    }
}
