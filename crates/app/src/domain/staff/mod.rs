//! Staff

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;
pub mod views;

pub(crate) use repository::SqlStaffRepository;

pub use errors::StaffServiceError;
pub use service::*;
