//! Reserve Records

use jiff::{Timestamp, civil::DateTime};

use crate::{domain::staff::records::StaffUuid, uuids::TypedUuid};

/// Reserve UUID
pub type ReserveUuid = TypedUuid<ReserveRecord>;

/// Reserve Record
#[derive(Debug, Clone)]
pub struct ReserveRecord {
    pub uuid: ReserveUuid,
    pub place: String,
    pub target_staff: StaffUuid,
    pub purpose: String,
    pub date: DateTime,
    pub visitors: Vec<VisitorRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Visitor UUID
pub type VisitorUuid = TypedUuid<VisitorRecord>;

/// Visitor Record
///
/// `name` and `phone` hold ciphertext.
#[derive(Debug, Clone)]
pub struct VisitorRecord {
    pub uuid: VisitorUuid,
    pub reserve_uuid: ReserveUuid,
    pub name: String,
    pub phone: String,
    pub organization: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
