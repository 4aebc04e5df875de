//! Reserve Views

use jiff::civil::DateTime;
use serde::Serialize;

use crate::{
    crypto::{CodecError, FieldCodec},
    domain::{
        reserves::records::{ReserveRecord, ReserveUuid, VisitorRecord, VisitorUuid},
        staff::records::{StaffRecord, StaffUuid},
    },
};

/// Decrypted visitor, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisitorView {
    pub uuid: VisitorUuid,
    pub name: String,
    pub phone: String,
    pub organization: String,
}

/// Decrypted reserve with its visitors, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReserveView {
    pub uuid: ReserveUuid,
    pub place: String,
    pub target_staff: StaffUuid,
    pub target_staff_name: String,
    pub purpose: String,
    pub date: DateTime,
    pub visitors: Vec<VisitorView>,
}

impl VisitorView {
    pub(crate) fn decrypt(record: &VisitorRecord, codec: &FieldCodec) -> Result<Self, CodecError> {
        Ok(Self {
            uuid: record.uuid,
            name: codec.decrypt(&record.name)?,
            phone: codec.decrypt(&record.phone)?,
            organization: record.organization.clone(),
        })
    }
}

impl ReserveView {
    pub(crate) fn decrypt(
        reserve: &ReserveRecord,
        staff: &StaffRecord,
        codec: &FieldCodec,
    ) -> Result<Self, CodecError> {
        let visitors = reserve
            .visitors
            .iter()
            .map(|visitor| VisitorView::decrypt(visitor, codec))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            uuid: reserve.uuid,
            place: reserve.place.clone(),
            target_staff: reserve.target_staff,
            target_staff_name: codec.decrypt(&staff.name)?,
            purpose: reserve.purpose.clone(),
            date: reserve.date,
            visitors,
        })
    }
}
