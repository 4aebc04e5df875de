//! Reserve Data

use jiff::civil::DateTime;

use crate::domain::reserves::records::{ReserveUuid, VisitorUuid};

/// Input format for visit dates, e.g. `2025-03-14 09:30`.
pub const VISIT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Visitor Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitorData {
    pub name: String,
    pub phone: String,
    pub organization: String,
}

/// New Reserve Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReserve {
    pub place: String,
    pub purpose: String,
    pub date: DateTime,
    pub visitors: Vec<VisitorData>,
}

/// Visitor Update Data
///
/// Entries with a `uuid` update that visitor; entries without one are added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitorUpdate {
    pub uuid: Option<VisitorUuid>,
    pub name: String,
    pub phone: String,
    pub organization: String,
}

/// Reserve Update Data
///
/// `visitors` is the complete visitor set after the update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReserveUpdate {
    pub uuid: ReserveUuid,
    pub place: String,
    pub purpose: String,
    pub date: DateTime,
    pub visitors: Vec<VisitorUpdate>,
}

/// Name and phone a visitor identifies themselves with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitorIdentity {
    pub name: String,
    pub phone: String,
}

/// Result of deleting a reserve by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The reserve and its visitors were removed.
    Deleted,

    /// No reserve had that id, e.g. a repeated delete request.
    NotFound,
}

/// Result of removing one visitor from a reserve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitorRemoval {
    /// The visitor was removed; others remain on the reserve.
    VisitorRemoved,

    /// The visitor was the last one, so the reserve was removed too.
    ReserveRemoved,
}

/// Parse a visit date in [`VISIT_DATE_FORMAT`].
///
/// # Errors
///
/// Returns an error when the input does not match the format.
pub fn parse_visit_date(input: &str) -> Result<DateTime, jiff::Error> {
    DateTime::strptime(VISIT_DATE_FORMAT, input.trim())
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn parses_minute_precision_dates() {
        let parsed = parse_visit_date("2025-03-14 09:30").expect("date should parse");

        assert_eq!(parsed, date(2025, 3, 14).at(9, 30, 0, 0));
    }

    #[test]
    fn rejects_other_formats() {
        assert!(parse_visit_date("14/03/2025").is_err());
    }
}
