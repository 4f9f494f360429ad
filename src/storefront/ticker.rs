// src/storefront/ticker.rs

// Tick de minuto do checkout: reamostra o relógio, regenera os dois
// conjuntos de janelas e publica num canal watch. Quem assina decide o
// que fazer (tipicamente, reconciliar a seleção). A task é abortada no
// drop; o cancelamento no teardown é obrigatório, não opcional.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::slots::{TimeSlot, slots_for_today, slots_for_tomorrow};

pub const TICK_INTERVAL: Duration = Duration::from_secs(60);

// Os dois conjuntos de janelas de um instante.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotSets {
    pub today: Vec<TimeSlot>,
    pub tomorrow: Vec<TimeSlot>,
}

impl SlotSets {
    pub fn at(now_utc: DateTime<Utc>) -> Self {
        Self {
            today: slots_for_today(now_utc),
            tomorrow: slots_for_tomorrow(now_utc),
        }
    }
}

pub struct SlotTicker {
    handle: JoinHandle<()>,
    rx: watch::Receiver<SlotSets>,
}

impl SlotTicker {
    pub fn spawn() -> Self {
        let (tx, rx) = watch::channel(SlotSets::at(Utc::now()));

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(TICK_INTERVAL);
            // O primeiro tick do interval é imediato e o valor inicial
            // do canal já cobre esse instante.
            interval.tick().await;

            loop {
                interval.tick().await;
                if tx.send(SlotSets::at(Utc::now())).is_err() {
                    // Nenhum assinante restante.
                    break;
                }
            }
        });

        Self { handle, rx }
    }

    pub fn subscribe(&self) -> watch::Receiver<SlotSets> {
        self.rx.clone()
    }

    pub fn current(&self) -> SlotSets {
        self.rx.borrow().clone()
    }
}

impl Drop for SlotTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
