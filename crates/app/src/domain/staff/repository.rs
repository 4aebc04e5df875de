//! Staff Repository

use sqlx::{FromRow, Row, Sqlite, Transaction, query, query_as, sqlite::SqliteRow};

use crate::{
    database::try_get_timestamp,
    domain::staff::records::{StaffRecord, StaffUuid},
};

const CREATE_STAFF_SQL: &str = include_str!("sql/create_staff.sql");
const GET_STAFF_SQL: &str = include_str!("sql/get_staff.sql");
const FIND_STAFF_BY_NAME_SQL: &str = include_str!("sql/find_staff_by_name.sql");
const UPDATE_STAFF_SQL: &str = include_str!("sql/update_staff.sql");
const DELETE_STAFF_SQL: &str = include_str!("sql/delete_staff.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqlStaffRepository;

impl SqlStaffRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert a staff row. `name` and `phone` must already be encrypted.
    pub(crate) async fn create_staff(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        staff: StaffUuid,
        name: &str,
        phone: &str,
        department: &str,
    ) -> Result<StaffRecord, sqlx::Error> {
        query_as::<Sqlite, StaffRecord>(CREATE_STAFF_SQL)
            .bind(staff.into_uuid())
            .bind(name)
            .bind(phone)
            .bind(department)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_staff(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        staff: StaffUuid,
    ) -> Result<Option<StaffRecord>, sqlx::Error> {
        query_as::<Sqlite, StaffRecord>(GET_STAFF_SQL)
            .bind(staff.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn find_staff_by_name(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        name: &str,
    ) -> Result<Vec<StaffRecord>, sqlx::Error> {
        query_as::<Sqlite, StaffRecord>(FIND_STAFF_BY_NAME_SQL)
            .bind(name)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_staff(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        staff: StaffUuid,
        name: &str,
        phone: &str,
    ) -> Result<Option<StaffRecord>, sqlx::Error> {
        query_as::<Sqlite, StaffRecord>(UPDATE_STAFF_SQL)
            .bind(staff.into_uuid())
            .bind(name)
            .bind(phone)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn delete_staff(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        staff: StaffUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_STAFF_SQL)
            .bind(staff.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, SqliteRow> for StaffRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: StaffUuid::from_uuid(row.try_get("id")?),
            name: row.try_get("name")?,
            phone: row.try_get("phone")?,
            department: row.try_get("department")?,
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}
