//! Visitor Domain Concerns

pub mod reserves;
pub mod staff;
