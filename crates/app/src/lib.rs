//! Visitor reservation domain, persistence and response mapping.

pub mod context;
pub mod crypto;
pub mod database;
pub mod domain;
pub mod responses;

#[cfg(test)]
mod test;

pub mod uuids;
