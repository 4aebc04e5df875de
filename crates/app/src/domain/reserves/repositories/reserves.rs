//! Reserves Repository

use jiff::civil::DateTime;
use sqlx::{FromRow, Row, Sqlite, Transaction, query, query_as, query_scalar, sqlite::SqliteRow};
use uuid::Uuid;

use crate::{
    database::{try_get_datetime, try_get_timestamp},
    domain::{
        reserves::records::{ReserveRecord, ReserveUuid},
        staff::records::StaffUuid,
    },
};

const GET_RESERVE_SQL: &str = include_str!("../sql/get_reserve.sql");
const CREATE_RESERVE_SQL: &str = include_str!("../sql/create_reserve.sql");
const UPDATE_RESERVE_SQL: &str = include_str!("../sql/update_reserve.sql");
const DELETE_RESERVE_SQL: &str = include_str!("../sql/delete_reserve.sql");
const LIST_RESERVES_FOR_STAFF_SQL: &str = include_str!("../sql/list_reserves_for_staff.sql");
const FIND_RESERVES_BY_VISITOR_SQL: &str = include_str!("../sql/find_reserves_by_visitor.sql");

/// Reserve fields written on create and update.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ReserveFields<'a> {
    pub(crate) place: &'a str,
    pub(crate) target_staff: StaffUuid,
    pub(crate) purpose: &'a str,
    pub(crate) date: DateTime,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct SqlReservesRepository;

impl SqlReservesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Load a reserve without its visitors.
    pub(crate) async fn get_reserve(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        reserve: ReserveUuid,
    ) -> Result<Option<ReserveRecord>, sqlx::Error> {
        query_as::<Sqlite, ReserveRecord>(GET_RESERVE_SQL)
            .bind(reserve.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_reserve(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        reserve: ReserveUuid,
        fields: ReserveFields<'_>,
    ) -> Result<ReserveRecord, sqlx::Error> {
        query_as::<Sqlite, ReserveRecord>(CREATE_RESERVE_SQL)
            .bind(reserve.into_uuid())
            .bind(fields.place)
            .bind(fields.target_staff.into_uuid())
            .bind(fields.purpose)
            .bind(fields.date.to_string())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_reserve(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        reserve: ReserveUuid,
        fields: ReserveFields<'_>,
    ) -> Result<ReserveRecord, sqlx::Error> {
        query_as::<Sqlite, ReserveRecord>(UPDATE_RESERVE_SQL)
            .bind(reserve.into_uuid())
            .bind(fields.place)
            .bind(fields.target_staff.into_uuid())
            .bind(fields.purpose)
            .bind(fields.date.to_string())
            .fetch_one(&mut **tx)
            .await
    }

    /// Delete the reserve row only. Its visitors must already be gone.
    pub(crate) async fn delete_reserve(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        reserve: ReserveUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_RESERVE_SQL)
            .bind(reserve.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn list_reserves_for_staff(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        staff: StaffUuid,
    ) -> Result<Vec<ReserveUuid>, sqlx::Error> {
        let uuids: Vec<Uuid> = query_scalar(LIST_RESERVES_FOR_STAFF_SQL)
            .bind(staff.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        Ok(uuids.into_iter().map(ReserveUuid::from_uuid).collect())
    }

    /// Reserves with a visitor matching both encrypted fields, newest visit first.
    pub(crate) async fn find_reserves_by_visitor(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        name: &str,
        phone: &str,
    ) -> Result<Vec<ReserveRecord>, sqlx::Error> {
        query_as::<Sqlite, ReserveRecord>(FIND_RESERVES_BY_VISITOR_SQL)
            .bind(name)
            .bind(phone)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, SqliteRow> for ReserveRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ReserveUuid::from_uuid(row.try_get("id")?),
            place: row.try_get("place")?,
            target_staff: StaffUuid::from_uuid(row.try_get("target_staff")?),
            purpose: row.try_get("purpose")?,
            date: try_get_datetime(row, "date")?,
            visitors: Vec::new(),
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}
