//! Visitors Repository

use sqlx::{FromRow, Row, Sqlite, Transaction, query, query_as, query_scalar, sqlite::SqliteRow};

use crate::{
    database::try_get_timestamp,
    domain::reserves::records::{ReserveUuid, VisitorRecord, VisitorUuid},
};

const LIST_VISITORS_SQL: &str = include_str!("../sql/list_visitors.sql");
const CREATE_VISITOR_SQL: &str = include_str!("../sql/create_visitor.sql");
const UPDATE_VISITOR_SQL: &str = include_str!("../sql/update_visitor.sql");
const DELETE_VISITOR_SQL: &str = include_str!("../sql/delete_visitor.sql");
const DELETE_RESERVE_VISITORS_SQL: &str = include_str!("../sql/delete_reserve_visitors.sql");
const FIND_RESERVE_VISITOR_SQL: &str = include_str!("../sql/find_reserve_visitor.sql");
const COUNT_RESERVE_VISITORS_SQL: &str = include_str!("../sql/count_reserve_visitors.sql");

/// Encrypted visitor fields as written to storage.
#[derive(Debug, Clone)]
pub(crate) struct SealedVisitor {
    pub(crate) name: String,
    pub(crate) phone: String,
    pub(crate) organization: String,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct SqlVisitorsRepository;

impl SqlVisitorsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_visitors(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        reserve: ReserveUuid,
    ) -> Result<Vec<VisitorRecord>, sqlx::Error> {
        query_as::<Sqlite, VisitorRecord>(LIST_VISITORS_SQL)
            .bind(reserve.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_visitor(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        visitor: VisitorUuid,
        reserve: ReserveUuid,
        sealed: &SealedVisitor,
    ) -> Result<VisitorRecord, sqlx::Error> {
        query_as::<Sqlite, VisitorRecord>(CREATE_VISITOR_SQL)
            .bind(visitor.into_uuid())
            .bind(reserve.into_uuid())
            .bind(&sealed.name)
            .bind(&sealed.phone)
            .bind(&sealed.organization)
            .fetch_one(&mut **tx)
            .await
    }

    /// Overwrite a visitor of `reserve`; fails with `RowNotFound` when the
    /// visitor belongs elsewhere.
    pub(crate) async fn update_visitor(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        visitor: VisitorUuid,
        reserve: ReserveUuid,
        sealed: &SealedVisitor,
    ) -> Result<VisitorRecord, sqlx::Error> {
        query_as::<Sqlite, VisitorRecord>(UPDATE_VISITOR_SQL)
            .bind(visitor.into_uuid())
            .bind(reserve.into_uuid())
            .bind(&sealed.name)
            .bind(&sealed.phone)
            .bind(&sealed.organization)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_visitor(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        visitor: VisitorUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_VISITOR_SQL)
            .bind(visitor.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_reserve_visitors(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        reserve: ReserveUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_RESERVE_VISITORS_SQL)
            .bind(reserve.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// First visitor of `reserve` matching both encrypted fields.
    pub(crate) async fn find_reserve_visitor(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        reserve: ReserveUuid,
        name: &str,
        phone: &str,
    ) -> Result<Option<VisitorRecord>, sqlx::Error> {
        query_as::<Sqlite, VisitorRecord>(FIND_RESERVE_VISITOR_SQL)
            .bind(reserve.into_uuid())
            .bind(name)
            .bind(phone)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn count_reserve_visitors(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        reserve: ReserveUuid,
    ) -> Result<i64, sqlx::Error> {
        query_scalar(COUNT_RESERVE_VISITORS_SQL)
            .bind(reserve.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, SqliteRow> for VisitorRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: VisitorUuid::from_uuid(row.try_get("id")?),
            reserve_uuid: ReserveUuid::from_uuid(row.try_get("reserve_id")?),
            name: row.try_get("name")?,
            phone: row.try_get("phone")?,
            organization: row.try_get("organization")?,
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}
