//! Reservation request validation.

use rustc_hash::FxHashSet;

use crate::domain::reserves::{
    ReservesServiceError,
    data::{NewReserve, ReserveUpdate, VisitorData},
};

/// Fails with [`ReservesServiceError::PhoneDuplicated`] when two visitors
/// share a phone number.
///
/// # Errors
///
/// Returns [`ReservesServiceError::PhoneDuplicated`] on the first repeated phone.
pub fn check_duplicated_phone(visitors: &[VisitorData]) -> Result<(), ReservesServiceError> {
    ensure_unique_phones(visitors.iter().map(|visitor| visitor.phone.as_str()))
}

pub(crate) fn validate_new_reserve(reserve: &NewReserve) -> Result<(), ReservesServiceError> {
    require("place", &reserve.place)?;
    require("purpose", &reserve.purpose)?;

    if reserve.visitors.is_empty() {
        return Err(ReservesServiceError::NoVisitors);
    }

    for visitor in &reserve.visitors {
        require("visitor.name", &visitor.name)?;
        require("visitor.phone", &visitor.phone)?;
    }

    check_duplicated_phone(&reserve.visitors)
}

pub(crate) fn validate_reserve_update(update: &ReserveUpdate) -> Result<(), ReservesServiceError> {
    require("place", &update.place)?;
    require("purpose", &update.purpose)?;

    if update.visitors.is_empty() {
        return Err(ReservesServiceError::NoVisitors);
    }

    for visitor in &update.visitors {
        require("visitor.name", &visitor.name)?;
        require("visitor.phone", &visitor.phone)?;
    }

    // The same visitor may not be listed twice.
    let mut listed = FxHashSet::default();

    if !update
        .visitors
        .iter()
        .filter_map(|visitor| visitor.uuid)
        .all(|uuid| listed.insert(uuid))
    {
        return Err(ReservesServiceError::InvalidData);
    }

    ensure_unique_phones(update.visitors.iter().map(|visitor| visitor.phone.as_str()))
}

fn ensure_unique_phones<'a>(
    phones: impl IntoIterator<Item = &'a str>,
) -> Result<(), ReservesServiceError> {
    let mut seen = FxHashSet::default();

    for phone in phones {
        if !seen.insert(phone) {
            return Err(ReservesServiceError::PhoneDuplicated);
        }
    }

    Ok(())
}

fn require(field: &'static str, value: &str) -> Result<(), ReservesServiceError> {
    if value.trim().is_empty() {
        return Err(ReservesServiceError::MissingField(field));
    }

    Ok(())
}
