// src/storefront/selection.rs

// Reconciliação da escolha de janela. A cada regeneração (tick de
// minuto) a seleção anterior é re-derivada contra os conjuntos novos,
// cobrindo a virada de meia-noite: o que era "amanhã 14:00" passa a
// ser "hoje 14:00", preservando a hora de relógio escolhida e não o
// rótulo relativo do dia.

use serde::{Deserialize, Serialize};

use super::slots::{TimeSlot, parse_slot_hour};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayChoice {
    Today,
    Tomorrow,
}

#[derive(Debug, Clone, Default)]
pub struct SlotSelection {
    selected: Option<(DayChoice, String)>,
}

impl SlotSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, day: DayChoice, slot: &TimeSlot) {
        self.selected = Some((day, slot.id.clone()));
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn day_choice(&self) -> Option<DayChoice> {
        self.selected.as_ref().map(|(day, _)| *day)
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_ref().map(|(_, id)| id.as_str())
    }

    // Re-deriva a seleção contra os conjuntos recém-gerados.
    //
    // 1. Escolha "amanhã" cujo id (data + hora) agora pertence ao
    //    conjunto de hoje: é a virada de meia-noite. Re-aponta
    //    silenciosamente para "hoje", mesma hora.
    // 2. Escolha "hoje" cuja hora saiu do conjunto de hoje: o corte
    //    passou. Limpa a seleção; nunca avança para amanhã, porque
    //    isso trocaria a data de entrega pretendida sem o usuário.
    // 3. Tick normal: re-sincroniza o id com o objeto regenerado de
    //    mesma hora, sem mudar a intenção.
    pub fn reconcile(&mut self, today: &[TimeSlot], tomorrow: &[TimeSlot]) {
        let Some((day, id)) = self.selected.clone() else {
            return;
        };
        let Some(hour) = parse_slot_hour(&id) else {
            // Id fora do formato determinístico: não há como re-derivar.
            self.clear();
            return;
        };

        match day {
            DayChoice::Tomorrow => {
                if let Some(slot) = today.iter().find(|s| s.id == id) {
                    self.selected = Some((DayChoice::Today, slot.id.clone()));
                } else if let Some(slot) = tomorrow.iter().find(|s| s.hour == hour) {
                    self.selected = Some((DayChoice::Tomorrow, slot.id.clone()));
                }
            }
            DayChoice::Today => match today.iter().find(|s| s.hour == hour) {
                Some(slot) => self.selected = Some((DayChoice::Today, slot.id.clone())),
                None => self.clear(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storefront::slots::generate_slots;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn midnight_rollover_repoints_tomorrow_to_today() {
        let tomorrow = date(2025, 9, 16);

        // 23:40 de hoje: usuário escolhe "amanhã" às 14:00.
        let tomorrow_slots = generate_slots(tomorrow, None);
        let chosen = tomorrow_slots.iter().find(|s| s.hour == 14).unwrap();

        let mut selection = SlotSelection::new();
        selection.select(DayChoice::Tomorrow, chosen);

        // 00:05: a data de "hoje" virou 16/09 e a de "amanhã", 17/09.
        let new_today = generate_slots(tomorrow, Some(0));
        let new_tomorrow = generate_slots(date(2025, 9, 17), None);
        selection.reconcile(&new_today, &new_tomorrow);

        assert_eq!(selection.day_choice(), Some(DayChoice::Today));
        assert_eq!(selection.selected_id(), Some("2025-09-16-14"));
    }

    #[test]
    fn cutoff_clears_today_selection_never_advances() {
        let today = date(2025, 9, 15);
        let tomorrow = date(2025, 9, 16);

        // 12:30: usuário escolhe "hoje" às 14:00.
        let today_slots = generate_slots(today, Some(12));
        let chosen = today_slots.iter().find(|s| s.hour == 14).unwrap();

        let mut selection = SlotSelection::new();
        selection.select(DayChoice::Today, chosen);

        // 14:10: a hora 14 saiu do conjunto de hoje.
        let new_today = generate_slots(today, Some(14));
        let new_tomorrow = generate_slots(tomorrow, None);
        selection.reconcile(&new_today, &new_tomorrow);

        assert_eq!(selection.selected_id(), None);
        assert_eq!(selection.day_choice(), None);
    }

    #[test]
    fn ordinary_tick_preserves_selection() {
        let today = date(2025, 9, 15);
        let tomorrow = date(2025, 9, 16);

        let today_slots = generate_slots(today, Some(10));
        let chosen = today_slots.iter().find(|s| s.hour == 18).unwrap();

        let mut selection = SlotSelection::new();
        selection.select(DayChoice::Today, chosen);

        // Um minuto depois, mesma hora corrente.
        selection.reconcile(
            &generate_slots(today, Some(10)),
            &generate_slots(tomorrow, None),
        );

        assert_eq!(selection.day_choice(), Some(DayChoice::Today));
        assert_eq!(selection.selected_id(), Some("2025-09-15-18"));
    }

    // Antes da virada, uma escolha deliberada de "amanhã" não pode ser
    // puxada para hoje só porque a mesma hora existe no conjunto de
    // hoje: o id (data + hora) é que decide.
    #[test]
    fn tomorrow_selection_survives_while_same_hour_exists_today() {
        let today = date(2025, 9, 15);
        let tomorrow = date(2025, 9, 16);

        let tomorrow_slots = generate_slots(tomorrow, None);
        let chosen = tomorrow_slots.iter().find(|s| s.hour == 14).unwrap();

        let mut selection = SlotSelection::new();
        selection.select(DayChoice::Tomorrow, chosen);

        // 10:00 de hoje: o conjunto de hoje também tem 14:00.
        selection.reconcile(
            &generate_slots(today, Some(10)),
            &generate_slots(tomorrow, None),
        );

        assert_eq!(selection.day_choice(), Some(DayChoice::Tomorrow));
        assert_eq!(selection.selected_id(), Some("2025-09-16-14"));
    }

    #[test]
    fn reconcile_without_selection_is_a_noop() {
        let mut selection = SlotSelection::new();
        selection.reconcile(
            &generate_slots(date(2025, 9, 15), Some(10)),
            &generate_slots(date(2025, 9, 16), None),
        );
        assert_eq!(selection.selected_id(), None);
    }
}
