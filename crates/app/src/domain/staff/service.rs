//! Staff Service

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::{Span, info};

use crate::{
    crypto::FieldCodec,
    database::Db,
    domain::{
        reserves::ReserveCascade,
        staff::{
            SqlStaffRepository, StaffServiceError,
            data::{NewStaff, StaffUpdate},
            records::StaffUuid,
            views::StaffView,
        },
    },
};

/// Longest accepted plaintext name or phone number.
pub const MAX_FIELD_CHARS: usize = 20;

#[derive(Debug, Clone)]
pub struct SqlStaffService {
    db: Db,
    codec: Arc<FieldCodec>,
    staff: SqlStaffRepository,
    cascade: ReserveCascade,
}

impl SqlStaffService {
    #[must_use]
    pub fn new(db: Db, codec: Arc<FieldCodec>) -> Self {
        Self {
            db,
            codec,
            staff: SqlStaffRepository::new(),
            cascade: ReserveCascade::new(),
        }
    }
}

#[async_trait]
impl StaffService for SqlStaffService {
    #[tracing::instrument(
        name = "staff.service.create_staff",
        skip(self, staff),
        fields(staff_uuid = tracing::field::Empty),
        err
    )]
    async fn create_staff(&self, staff: NewStaff) -> Result<StaffView, StaffServiceError> {
        let name = self.codec.encrypt(check_field("name", &staff.name)?)?;
        let phone = self.codec.encrypt(check_field("phone", &staff.phone)?)?;

        let uuid = StaffUuid::new();

        Span::current().record("staff_uuid", tracing::field::display(uuid));

        let mut tx = self.db.begin().await?;

        let record = self
            .staff
            .create_staff(&mut tx, uuid, &name, &phone, staff.department.trim())
            .await?;

        tx.commit().await?;

        info!(staff_uuid = %record.uuid, "created staff");

        Ok(StaffView::decrypt(&record, &self.codec)?)
    }

    #[tracing::instrument(
        name = "staff.service.get_staff",
        skip(self),
        fields(staff_uuid = %staff),
        err
    )]
    async fn get_staff(&self, staff: StaffUuid) -> Result<StaffView, StaffServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self
            .staff
            .get_staff(&mut tx, staff)
            .await?
            .ok_or(StaffServiceError::NotFound)?;

        tx.commit().await?;

        Ok(StaffView::decrypt(&record, &self.codec)?)
    }

    #[tracing::instrument(
        name = "staff.service.find_staff_by_name",
        skip(self, name),
        fields(staff_count = tracing::field::Empty),
        err
    )]
    async fn find_staff_by_name(&self, name: String) -> Result<Vec<StaffView>, StaffServiceError> {
        let name = self.codec.encrypt(name.trim())?;

        let mut tx = self.db.begin().await?;

        let records = self.staff.find_staff_by_name(&mut tx, &name).await?;

        tx.commit().await?;

        Span::current().record("staff_count", records.len());

        records
            .iter()
            .map(|record| StaffView::decrypt(record, &self.codec).map_err(StaffServiceError::from))
            .collect()
    }

    #[tracing::instrument(
        name = "staff.service.update_staff",
        skip(self, update),
        fields(staff_uuid = %staff),
        err
    )]
    async fn update_staff(
        &self,
        staff: StaffUuid,
        update: StaffUpdate,
    ) -> Result<StaffView, StaffServiceError> {
        let name = self.codec.encrypt(check_field("name", &update.name)?)?;
        let phone = self.codec.encrypt(check_field("phone", &update.phone)?)?;

        let mut tx = self.db.begin().await?;

        let record = self
            .staff
            .update_staff(&mut tx, staff, &name, &phone)
            .await?
            .ok_or(StaffServiceError::NotFound)?;

        tx.commit().await?;

        info!(staff_uuid = %staff, "updated staff");

        Ok(StaffView::decrypt(&record, &self.codec)?)
    }

    #[tracing::instrument(
        name = "staff.service.delete_staff",
        skip(self),
        fields(staff_uuid = %staff, removed_reserves = tracing::field::Empty),
        err
    )]
    async fn delete_staff(&self, staff: StaffUuid) -> Result<u64, StaffServiceError> {
        let mut tx = self.db.begin().await?;

        self.staff
            .get_staff(&mut tx, staff)
            .await?
            .ok_or(StaffServiceError::NotFound)?;

        let removed = self.cascade.delete_reserves_for_staff(&mut tx, staff).await?;

        Span::current().record("removed_reserves", removed);

        self.staff.delete_staff(&mut tx, staff).await?;

        tx.commit().await?;

        info!(staff_uuid = %staff, removed, "deleted staff");

        Ok(removed)
    }
}

#[automock]
#[async_trait]
pub trait StaffService: Send + Sync {
    /// Register a staff member.
    async fn create_staff(&self, staff: NewStaff) -> Result<StaffView, StaffServiceError>;

    /// Retrieve a single staff member.
    async fn get_staff(&self, staff: StaffUuid) -> Result<StaffView, StaffServiceError>;

    /// Staff members whose name equals `name` exactly.
    async fn find_staff_by_name(&self, name: String) -> Result<Vec<StaffView>, StaffServiceError>;

    /// Replace a staff member's name and phone.
    async fn update_staff(
        &self,
        staff: StaffUuid,
        update: StaffUpdate,
    ) -> Result<StaffView, StaffServiceError>;

    /// Remove a staff member along with every reserve targeting them.
    async fn delete_staff(&self, staff: StaffUuid) -> Result<u64, StaffServiceError>;
}

/// Trim a name or phone, the form it is stored and searched in.
fn check_field<'a>(field: &'static str, value: &'a str) -> Result<&'a str, StaffServiceError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(StaffServiceError::MissingField(field));
    }

    if value.chars().count() > MAX_FIELD_CHARS {
        return Err(StaffServiceError::FieldTooLong(field));
    }

    Ok(value)
}
