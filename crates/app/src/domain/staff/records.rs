//! Staff Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Staff UUID
pub type StaffUuid = TypedUuid<StaffRecord>;

/// Staff Record
///
/// `name` and `phone` hold ciphertext.
#[derive(Debug, Clone)]
pub struct StaffRecord {
    pub uuid: StaffUuid,
    pub name: String,
    pub phone: String,
    pub department: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
