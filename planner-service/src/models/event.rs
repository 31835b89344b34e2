//! Event rows as stored in the hosted `events` table.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Table holding persisted events.
pub const EVENTS_TABLE: &str = "events";

/// A planned event. The storage service assigns `id` on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,

    pub event_name: String,

    pub event_type: String,

    /// Calendar date, transported as `YYYY-MM-DD`.
    pub event_date: NaiveDate,

    pub number_of_guests: u32,

    pub budget: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_storage_row() {
        let row = json!({
            "id": 7,
            "event_name": "Meera & Arjun",
            "event_type": "Rajasthani Royal Wedding",
            "event_date": "2025-11-21",
            "number_of_guests": 350,
            "budget": 4500000.0,
            "created_at": "2025-01-01T00:00:00Z"
        });

        let event: Event = serde_json::from_value(row).unwrap();

        assert_eq!(event.id, 7);
        assert_eq!(event.event_date, NaiveDate::from_ymd_opt(2025, 11, 21).unwrap());
        assert_eq!(event.number_of_guests, 350);
    }

    #[test]
    fn encodes_date_as_iso_string() {
        let event = Event {
            id: 1,
            event_name: "Sangeet".to_string(),
            event_type: "Punjabi Wedding".to_string(),
            event_date: NaiveDate::from_ymd_opt(2026, 2, 14).unwrap(),
            number_of_guests: 120,
            budget: 800000.0,
        };

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["event_date"], "2026-02-14");
    }
}
