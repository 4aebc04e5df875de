//! Test Helpers

use jiff::civil::{DateTime, date};

use crate::domain::reserves::data::{NewReserve, VisitorData};

pub(crate) fn visitor(name: &str, phone: &str) -> VisitorData {
    VisitorData {
        name: name.to_string(),
        phone: phone.to_string(),
        organization: "Acme".to_string(),
    }
}

/// A visit on the given day of March 2025.
pub(crate) fn visit_date(day: i8, hour: i8) -> DateTime {
    date(2025, 3, day).at(hour, 0, 0, 0)
}

pub(crate) fn new_reserve(visitors: Vec<VisitorData>) -> NewReserve {
    new_reserve_on(visit_date(14, 9), visitors)
}

pub(crate) fn new_reserve_on(date: DateTime, visitors: Vec<VisitorData>) -> NewReserve {
    NewReserve {
        place: "Lobby".to_string(),
        purpose: "Interview".to_string(),
        date,
        visitors,
    }
}
