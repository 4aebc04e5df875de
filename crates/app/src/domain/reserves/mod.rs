//! Reserves
//!
//! A reserve is one visit appointment: a place, a date, the staff member
//! being visited and one or more visitors. Visitors are owned by exactly one
//! reserve and never outlive it.

mod cascade;
pub mod data;
pub mod errors;
pub mod records;
mod repositories;
pub mod service;
pub mod validation;
pub mod views;

pub(crate) use cascade::ReserveCascade;

pub use errors::ReservesServiceError;
pub use service::*;
pub use validation::check_duplicated_phone;
