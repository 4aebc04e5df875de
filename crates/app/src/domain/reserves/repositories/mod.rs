//! Reserve Repositories

mod reserves;
mod visitors;

pub(crate) use reserves::{ReserveFields, SqlReservesRepository};
pub(crate) use visitors::{SealedVisitor, SqlVisitorsRepository};
