//! Staff Views

use serde::Serialize;

use crate::{
    crypto::{CodecError, FieldCodec},
    domain::staff::records::{StaffRecord, StaffUuid},
};

/// Decrypted staff member, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaffView {
    pub uuid: StaffUuid,
    pub name: String,
    pub phone: String,
    pub department: String,
}

impl StaffView {
    pub(crate) fn decrypt(record: &StaffRecord, codec: &FieldCodec) -> Result<Self, CodecError> {
        Ok(Self {
            uuid: record.uuid,
            name: codec.decrypt(&record.name)?,
            phone: codec.decrypt(&record.phone)?,
            department: record.department.clone(),
        })
    }
}
