//! Display formatting for chat slot cards.

use chrono::{NaiveTime, Timelike};

use crate::api::dto::Slot;

/// Convert a 24-hour "HH:MM" (or "HH:MM:SS") value to "h:MM AM/PM".
///
/// Absent values render as "N/A"; anything unparseable is shown as given.
pub fn format_time(value: Option<&str>) -> String {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return "N/A".to_string();
    };

    let parsed = NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"));

    match parsed {
        Ok(time) => {
            let (pm, hour) = time.hour12();
            format!("{}:{:02} {}", hour, time.minute(), if pm { "PM" } else { "AM" })
        }
        Err(_) => raw.to_string(),
    }
}

/// Display model for one slot card
#[derive(Debug, Clone, PartialEq)]
pub struct SlotCard {
    pub start_label: String,
    pub end_label: String,
    pub status_label: &'static str,
    pub available: bool,
    pub staffing_label: String,
}

impl From<&Slot> for SlotCard {
    fn from(slot: &Slot) -> Self {
        let available = slot.is_available();
        Self {
            start_label: format_time(slot.start.as_deref()),
            end_label: format!("to {}", format_time(slot.end.as_deref())),
            status_label: if available { "Available" } else { "Fully booked" },
            available,
            staffing_label: format!(
                "{} of {} staff free",
                slot.available_employees, slot.required_employees
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_afternoon() {
        assert_eq!(format_time(Some("14:00")), "2:00 PM");
        assert_eq!(format_time(Some("15:00")), "3:00 PM");
    }

    #[test]
    fn test_midnight_and_noon() {
        assert_eq!(format_time(Some("00:30")), "12:30 AM");
        assert_eq!(format_time(Some("12:05")), "12:05 PM");
        assert_eq!(format_time(Some("09:45:00")), "9:45 AM");
    }

    #[test]
    fn test_absent_and_garbage() {
        assert_eq!(format_time(None), "N/A");
        assert_eq!(format_time(Some("  ")), "N/A");
        assert_eq!(format_time(Some("soon")), "soon");
    }

    #[test]
    fn test_slot_card_labels() {
        let slot = Slot {
            start: Some("14:00".to_string()),
            end: Some("15:00".to_string()),
            available_employees: 0,
            required_employees: 1,
        };
        let card = SlotCard::from(&slot);
        assert_eq!(card.start_label, "2:00 PM");
        assert_eq!(card.end_label, "to 3:00 PM");
        assert_eq!(card.status_label, "Fully booked");
        assert!(!card.available);
    }
}
