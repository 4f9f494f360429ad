// src/storefront/slots.rs

// Geração das janelas dinâmicas de entrega. Função pura: recebe a data
// e a hora corrente e devolve as janelas reserváveis. Todos os cortes
// são calculados no fuso fixo do serviço (Europe/Istanbul),
// independente do fuso do cliente.

use chrono::{DateTime, Duration, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;
use serde::Serialize;

pub const SERVICE_TZ: Tz = chrono_tz::Europe::Istanbul;

// Janela de atendimento: [8, 22). No máximo 14 janelas de uma hora.
pub const OPENING_HOUR: u32 = 8;
pub const CLOSING_HOUR: u32 = 22;

// Janela dinâmica de uma hora. Nunca persistida; a identidade deriva
// de {data, hora} e é estável entre regenerações.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub id: String,
    pub label: String,
    pub start_time: String,
    pub end_time: String,
    pub date: NaiveDate,
    pub hour: u32,
}

impl TimeSlot {
    fn new(date: NaiveDate, hour: u32) -> Self {
        let start_time = format!("{hour:02}:00");
        let end_time = format!("{:02}:00", hour + 1);
        Self {
            id: format!("{}-{}", date.format("%Y-%m-%d"), hour),
            label: format!("{start_time} - {end_time}"),
            start_time,
            end_time,
            date,
            hour,
        }
    }
}

// Extrai a hora do id determinístico ("2025-09-15-14" -> 14).
pub fn parse_slot_hour(id: &str) -> Option<u32> {
    id.rsplit('-').next()?.parse().ok()
}

// Gera as janelas de um dia. Com `current_hour` (caso "hoje"), a
// primeira hora candidata é max(hora corrente + 1, 8): a hora corrente
// e as passadas ficam de fora, com pelo menos uma hora de folga antes
// da primeira janela reservável. Sem `current_hour` (caso "amanhã"),
// o intervalo completo.
//
// Hora inicial >= 22 produz a sequência vazia: estado terminal válido
// ("sem janelas hoje"), não um erro.
pub fn generate_slots(date: NaiveDate, current_hour: Option<u32>) -> Vec<TimeSlot> {
    let first_hour = match current_hour {
        Some(hour) => (hour + 1).max(OPENING_HOUR),
        None => OPENING_HOUR,
    };

    (first_hour..CLOSING_HOUR)
        .map(|hour| TimeSlot::new(date, hour))
        .collect()
}

pub fn service_now(now_utc: DateTime<Utc>) -> DateTime<Tz> {
    now_utc.with_timezone(&SERVICE_TZ)
}

// Janelas de "hoje" relativas ao instante dado.
pub fn slots_for_today(now_utc: DateTime<Utc>) -> Vec<TimeSlot> {
    let now = service_now(now_utc);
    generate_slots(now.date_naive(), Some(now.hour()))
}

// Janelas de "amanhã": sempre o intervalo completo.
pub fn slots_for_tomorrow(now_utc: DateTime<Utc>) -> Vec<TimeSlot> {
    let now = service_now(now_utc);
    generate_slots(now.date_naive() + Duration::days(1), None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn tomorrow_spans_full_service_window() {
        let slots = generate_slots(date(2025, 9, 16), None);
        assert_eq!(slots.len(), 14);
        assert_eq!(slots.first().unwrap().hour, 8);
        assert_eq!(slots.last().unwrap().hour, 21);
        assert_eq!(slots.last().unwrap().label, "21:00 - 22:00");
    }

    #[test]
    fn today_excludes_current_and_past_hours() {
        let slots = generate_slots(date(2025, 9, 15), Some(14));
        assert!(slots.iter().all(|s| s.hour > 14));
        assert_eq!(slots.first().unwrap().hour, 15);
    }

    #[test]
    fn early_morning_still_starts_at_opening() {
        let slots = generate_slots(date(2025, 9, 15), Some(5));
        assert_eq!(slots.first().unwrap().hour, 8);
        assert_eq!(slots.len(), 14);
    }

    // 19:30 -> janelas às 20:00 e 21:00, nada além.
    #[test]
    fn late_evening_yields_remaining_slots_only() {
        let slots = generate_slots(date(2025, 9, 15), Some(19));
        let hours: Vec<u32> = slots.iter().map(|s| s.hour).collect();
        assert_eq!(hours, vec![20, 21]);
    }

    // 21:30 -> vazio: a hora 21 é excluída pela regra hora+1 e 22 já
    // está fora da janela de atendimento.
    #[test]
    fn past_cutoff_yields_empty_set_not_error() {
        let slots = generate_slots(date(2025, 9, 15), Some(21));
        assert!(slots.is_empty());

        let slots = generate_slots(date(2025, 9, 15), Some(23));
        assert!(slots.is_empty());
    }

    #[test]
    fn slot_identity_is_deterministic() {
        let a = generate_slots(date(2025, 9, 15), Some(12));
        let b = generate_slots(date(2025, 9, 15), Some(12));
        assert_eq!(a, b);
        assert_eq!(a.first().unwrap().id, "2025-09-15-13");
        assert_eq!(parse_slot_hour(&a.first().unwrap().id), Some(13));
    }

    // A âncora é o fuso do serviço: 20:30 UTC = 23:30 em Istambul
    // (UTC+3), então "hoje" já não tem janelas e "amanhã" é o dia
    // seguinte no calendário de Istambul.
    #[test]
    fn cutoffs_follow_istanbul_clock_not_utc() {
        let now_utc = Utc.with_ymd_and_hms(2025, 9, 15, 20, 30, 0).unwrap();

        let today = slots_for_today(now_utc);
        assert!(today.is_empty());

        let tomorrow = slots_for_tomorrow(now_utc);
        assert_eq!(tomorrow.first().unwrap().date, date(2025, 9, 16));
        assert_eq!(tomorrow.len(), 14);
    }

    // O conjunto de hoje só encolhe conforme o relógio avança.
    #[test]
    fn today_set_shrinks_monotonically() {
        let mut previous = generate_slots(date(2025, 9, 15), Some(8)).len();
        for hour in 9..=22 {
            let current = generate_slots(date(2025, 9, 15), Some(hour)).len();
            assert!(current <= previous);
            previous = current;
        }
        assert_eq!(previous, 0);
    }
}
