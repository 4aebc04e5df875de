//! Reserves Service

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashSet;
use sqlx::{Sqlite, Transaction};
use tracing::{Span, info};

use crate::{
    crypto::FieldCodec,
    database::Db,
    domain::{
        reserves::{
            ReserveCascade, ReservesServiceError,
            data::{
                DeleteOutcome, NewReserve, ReserveUpdate, VisitorData, VisitorIdentity,
                VisitorRemoval,
            },
            records::{ReserveRecord, ReserveUuid, VisitorUuid},
            repositories::{
                ReserveFields, SealedVisitor, SqlReservesRepository, SqlVisitorsRepository,
            },
            validation::{self, validate_new_reserve, validate_reserve_update},
            views::ReserveView,
        },
        staff::{
            SqlStaffRepository,
            records::{StaffRecord, StaffUuid},
        },
    },
};

#[derive(Debug, Clone)]
pub struct SqlReservesService {
    db: Db,
    codec: Arc<FieldCodec>,
    reserves: SqlReservesRepository,
    visitors: SqlVisitorsRepository,
    staff: SqlStaffRepository,
    cascade: ReserveCascade,
}

impl SqlReservesService {
    #[must_use]
    pub fn new(db: Db, codec: Arc<FieldCodec>) -> Self {
        Self {
            db,
            codec,
            reserves: SqlReservesRepository::new(),
            visitors: SqlVisitorsRepository::new(),
            staff: SqlStaffRepository::new(),
            cascade: ReserveCascade::new(),
        }
    }

    fn seal(
        &self,
        name: &str,
        phone: &str,
        organization: &str,
    ) -> Result<SealedVisitor, ReservesServiceError> {
        Ok(SealedVisitor {
            name: self.codec.encrypt(name)?,
            phone: self.codec.encrypt(phone)?,
            organization: organization.to_string(),
        })
    }

    async fn require_staff(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        staff: StaffUuid,
    ) -> Result<StaffRecord, ReservesServiceError> {
        self.staff
            .get_staff(tx, staff)
            .await?
            .ok_or(ReservesServiceError::StaffNotFound)
    }

    async fn load_view(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        mut reserve: ReserveRecord,
    ) -> Result<ReserveView, ReservesServiceError> {
        let staff = self.require_staff(tx, reserve.target_staff).await?;

        reserve.visitors = self.visitors.list_visitors(tx, reserve.uuid).await?;

        Ok(ReserveView::decrypt(&reserve, &staff, &self.codec)?)
    }
}

#[async_trait]
impl ReservesService for SqlReservesService {
    #[tracing::instrument(
        name = "reserves.service.find_by_id",
        skip(self),
        fields(reserve_uuid = %reserve),
        err
    )]
    async fn find_by_id(&self, reserve: ReserveUuid) -> Result<ReserveView, ReservesServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self
            .reserves
            .get_reserve(&mut tx, reserve)
            .await?
            .ok_or(ReservesServiceError::NotFound)?;

        let view = self.load_view(&mut tx, record).await?;

        tx.commit().await?;

        Ok(view)
    }

    #[tracing::instrument(
        name = "reserves.service.find_reserves_by_name_and_phone",
        skip(self, identity),
        fields(reserve_count = tracing::field::Empty),
        err
    )]
    async fn find_reserves_by_name_and_phone(
        &self,
        identity: VisitorIdentity,
    ) -> Result<Vec<ReserveView>, ReservesServiceError> {
        let name = self.codec.encrypt(&identity.name)?;
        let phone = self.codec.encrypt(&identity.phone)?;

        let mut tx = self.db.begin().await?;

        let records = self
            .reserves
            .find_reserves_by_visitor(&mut tx, &name, &phone)
            .await?;

        let mut views = Vec::with_capacity(records.len());

        for record in records {
            views.push(self.load_view(&mut tx, record).await?);
        }

        tx.commit().await?;

        Span::current().record("reserve_count", views.len());

        Ok(views)
    }

    #[tracing::instrument(
        name = "reserves.service.save_reserve",
        skip(self, reserve),
        fields(
            staff_uuid = %staff,
            reserve_uuid = tracing::field::Empty,
            visitor_count = reserve.visitors.len()
        ),
        err
    )]
    async fn save_reserve(
        &self,
        reserve: NewReserve,
        staff: StaffUuid,
    ) -> Result<ReserveRecord, ReservesServiceError> {
        validate_new_reserve(&reserve)?;

        let sealed = reserve
            .visitors
            .iter()
            .map(|visitor| self.seal(&visitor.name, &visitor.phone, &visitor.organization))
            .collect::<Result<Vec<_>, _>>()?;

        let mut tx = self.db.begin().await?;

        self.require_staff(&mut tx, staff).await?;

        let reserve_uuid = ReserveUuid::new();

        Span::current().record("reserve_uuid", tracing::field::display(reserve_uuid));

        let mut record = self
            .reserves
            .create_reserve(
                &mut tx,
                reserve_uuid,
                ReserveFields {
                    place: &reserve.place,
                    target_staff: staff,
                    purpose: &reserve.purpose,
                    date: reserve.date,
                },
            )
            .await?;

        for visitor in &sealed {
            let created = self
                .visitors
                .create_visitor(&mut tx, VisitorUuid::new(), reserve_uuid, visitor)
                .await?;

            record.visitors.push(created);
        }

        tx.commit().await?;

        info!(reserve_uuid = %record.uuid, staff_uuid = %staff, "created reserve");

        Ok(record)
    }

    #[tracing::instrument(
        name = "reserves.service.update_reserve",
        skip(self, update),
        fields(
            staff_uuid = %staff,
            reserve_uuid = %update.uuid,
            visitor_count = update.visitors.len(),
            removed_visitors = tracing::field::Empty
        ),
        err
    )]
    async fn update_reserve(
        &self,
        update: ReserveUpdate,
        staff: StaffUuid,
    ) -> Result<ReserveRecord, ReservesServiceError> {
        validate_reserve_update(&update)?;

        let sealed = update
            .visitors
            .iter()
            .map(|visitor| {
                self.seal(&visitor.name, &visitor.phone, &visitor.organization)
                    .map(|sealed| (visitor.uuid, sealed))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut tx = self.db.begin().await?;

        self.reserves
            .get_reserve(&mut tx, update.uuid)
            .await?
            .ok_or(ReservesServiceError::NotFound)?;

        self.require_staff(&mut tx, staff).await?;

        let mut record = self
            .reserves
            .update_reserve(
                &mut tx,
                update.uuid,
                ReserveFields {
                    place: &update.place,
                    target_staff: staff,
                    purpose: &update.purpose,
                    date: update.date,
                },
            )
            .await?;

        let existing: FxHashSet<VisitorUuid> = self
            .visitors
            .list_visitors(&mut tx, update.uuid)
            .await?
            .into_iter()
            .map(|visitor| visitor.uuid)
            .collect();

        let mut listed = FxHashSet::default();

        for (uuid, visitor) in &sealed {
            match uuid {
                Some(uuid) => {
                    if !existing.contains(uuid) {
                        return Err(ReservesServiceError::VisitorNotFound);
                    }

                    self.visitors
                        .update_visitor(&mut tx, *uuid, update.uuid, visitor)
                        .await?;

                    listed.insert(*uuid);
                }
                None => {
                    self.visitors
                        .create_visitor(&mut tx, VisitorUuid::new(), update.uuid, visitor)
                        .await?;
                }
            }
        }

        let mut removed_visitors = 0_u64;

        for uuid in existing.difference(&listed) {
            removed_visitors += self.visitors.delete_visitor(&mut tx, *uuid).await?;
        }

        Span::current().record("removed_visitors", removed_visitors);

        record.visitors = self.visitors.list_visitors(&mut tx, update.uuid).await?;

        tx.commit().await?;

        info!(reserve_uuid = %record.uuid, staff_uuid = %staff, "updated reserve");

        Ok(record)
    }

    #[tracing::instrument(
        name = "reserves.service.delete_by_id",
        skip(self),
        fields(reserve_uuid = %reserve),
        err
    )]
    async fn delete_by_id(
        &self,
        reserve: ReserveUuid,
    ) -> Result<DeleteOutcome, ReservesServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.cascade.delete_reserve(&mut tx, reserve).await?;

        tx.commit().await?;

        if rows_affected == 0 {
            return Ok(DeleteOutcome::NotFound);
        }

        info!(reserve_uuid = %reserve, "deleted reserve");

        Ok(DeleteOutcome::Deleted)
    }

    #[tracing::instrument(
        name = "reserves.service.delete_all_by_staff_id",
        skip(self),
        fields(staff_uuid = %staff),
        err
    )]
    async fn delete_all_by_staff_id(&self, staff: StaffUuid) -> Result<u64, ReservesServiceError> {
        let mut tx = self.db.begin().await?;

        let removed = self.cascade.delete_reserves_for_staff(&mut tx, staff).await?;

        tx.commit().await?;

        info!(staff_uuid = %staff, removed, "deleted reserves for staff");

        Ok(removed)
    }

    #[tracing::instrument(
        name = "reserves.service.visitor_reserve_delete",
        skip(self, identity),
        fields(reserve_uuid = %reserve, visitor_uuid = tracing::field::Empty),
        err
    )]
    async fn visitor_reserve_delete(
        &self,
        reserve: ReserveUuid,
        identity: VisitorIdentity,
    ) -> Result<VisitorRemoval, ReservesServiceError> {
        let name = self.codec.encrypt(&identity.name)?;
        let phone = self.codec.encrypt(&identity.phone)?;

        let mut tx = self.db.begin().await?;

        self.reserves
            .get_reserve(&mut tx, reserve)
            .await?
            .ok_or(ReservesServiceError::NotFound)?;

        let visitor = self
            .visitors
            .find_reserve_visitor(&mut tx, reserve, &name, &phone)
            .await?
            .ok_or(ReservesServiceError::VisitorNotFound)?;

        Span::current().record("visitor_uuid", tracing::field::display(visitor.uuid));

        self.visitors.delete_visitor(&mut tx, visitor.uuid).await?;

        let remaining = self.visitors.count_reserve_visitors(&mut tx, reserve).await?;

        let removal = if remaining == 0 {
            self.cascade.delete_reserve(&mut tx, reserve).await?;

            VisitorRemoval::ReserveRemoved
        } else {
            VisitorRemoval::VisitorRemoved
        };

        tx.commit().await?;

        info!(reserve_uuid = %reserve, visitor_uuid = %visitor.uuid, ?removal, "removed visitor");

        Ok(removal)
    }

    fn check_duplicated_phone(&self, visitors: &[VisitorData]) -> Result<(), ReservesServiceError> {
        validation::check_duplicated_phone(visitors)
    }
}

#[automock]
#[async_trait]
pub trait ReservesService: Send + Sync {
    /// Retrieve a reserve with its decrypted visitors and target staff name.
    async fn find_by_id(&self, reserve: ReserveUuid) -> Result<ReserveView, ReservesServiceError>;

    /// Reserves with a visitor matching both name and phone, newest visit first.
    async fn find_reserves_by_name_and_phone(
        &self,
        identity: VisitorIdentity,
    ) -> Result<Vec<ReserveView>, ReservesServiceError>;

    /// Create a reserve and its visitors for the given staff member.
    async fn save_reserve(
        &self,
        reserve: NewReserve,
        staff: StaffUuid,
    ) -> Result<ReserveRecord, ReservesServiceError>;

    /// Replace a reserve's details and visitor set.
    async fn update_reserve(
        &self,
        update: ReserveUpdate,
        staff: StaffUuid,
    ) -> Result<ReserveRecord, ReservesServiceError>;

    /// Delete a reserve and its visitors. A missing reserve is not an error.
    async fn delete_by_id(
        &self,
        reserve: ReserveUuid,
    ) -> Result<DeleteOutcome, ReservesServiceError>;

    /// Delete every reserve targeting a staff member.
    async fn delete_all_by_staff_id(&self, staff: StaffUuid) -> Result<u64, ReservesServiceError>;

    /// Remove the matching visitor, and the reserve once it has no visitors left.
    async fn visitor_reserve_delete(
        &self,
        reserve: ReserveUuid,
        identity: VisitorIdentity,
    ) -> Result<VisitorRemoval, ReservesServiceError>;

    /// Reject visitor lists in which two entries share a phone number.
    fn check_duplicated_phone(&self, visitors: &[VisitorData]) -> Result<(), ReservesServiceError>;
}

#[cfg(test)]
mod tests {
    use sqlx::query_scalar;
    use testresult::TestResult;

    use crate::{
        domain::reserves::data::VisitorUpdate,
        test::{TestContext, helpers::*},
    };

    use super::*;

    fn identity(name: &str, phone: &str) -> VisitorIdentity {
        VisitorIdentity {
            name: name.to_string(),
            phone: phone.to_string(),
        }
    }

    fn keep(visitor: &crate::domain::reserves::views::VisitorView) -> VisitorUpdate {
        VisitorUpdate {
            uuid: Some(visitor.uuid),
            name: visitor.name.clone(),
            phone: visitor.phone.clone(),
            organization: visitor.organization.clone(),
        }
    }

    fn add(name: &str, phone: &str) -> VisitorUpdate {
        VisitorUpdate {
            uuid: None,
            name: name.to_string(),
            phone: phone.to_string(),
            organization: String::new(),
        }
    }

    fn update_of(view: &ReserveView, visitors: Vec<VisitorUpdate>) -> ReserveUpdate {
        ReserveUpdate {
            uuid: view.uuid,
            place: view.place.clone(),
            purpose: view.purpose.clone(),
            date: view.date,
            visitors,
        }
    }

    #[tokio::test]
    async fn save_reserve_persists_reserve_and_visitors() -> TestResult {
        let ctx = TestContext::new().await;
        let staff = ctx.create_staff("staff 1").await;

        let record = ctx
            .reserves
            .save_reserve(
                new_reserve(vec![
                    visitor("visitor 1", "01011111111"),
                    visitor("visitor 2", "01022222222"),
                ]),
                staff,
            )
            .await?;

        assert_eq!(record.target_staff, staff);
        assert_eq!(record.visitors.len(), 2);

        let view = ctx.reserves.find_by_id(record.uuid).await?;

        assert_eq!(view.place, "Lobby");
        assert_eq!(view.target_staff_name, "staff 1");
        assert_eq!(view.visitors.len(), 2);
        assert!(
            view.visitors
                .iter()
                .any(|v| v.name == "visitor 1" && v.phone == "01011111111")
        );

        Ok(())
    }

    #[tokio::test]
    async fn save_reserve_stores_personal_data_encrypted() -> TestResult {
        let ctx = TestContext::new().await;
        let staff = ctx.create_staff("staff 1").await;

        ctx.reserves
            .save_reserve(new_reserve(vec![visitor("visitor 1", "01011111111")]), staff)
            .await?;

        let stored_phone: String = query_scalar("SELECT phone FROM visitors")
            .fetch_one(ctx.db.pool())
            .await?;

        assert_ne!(stored_phone, "01011111111");
        assert_eq!(ctx.codec.encrypt("01011111111")?, stored_phone);

        Ok(())
    }

    #[tokio::test]
    async fn save_reserve_rejects_duplicated_phone() -> TestResult {
        let ctx = TestContext::new().await;
        let staff = ctx.create_staff("staff 1").await;

        let result = ctx
            .reserves
            .save_reserve(
                new_reserve(vec![
                    visitor("visitor 1", "01012345678"),
                    visitor("visitor 2", "01012345678"),
                ]),
                staff,
            )
            .await;

        assert!(matches!(result, Err(ReservesServiceError::PhoneDuplicated)));

        let reserves: i64 = query_scalar("SELECT COUNT(*) FROM reserves")
            .fetch_one(ctx.db.pool())
            .await?;

        assert_eq!(reserves, 0);

        Ok(())
    }

    #[tokio::test]
    async fn save_reserve_requires_a_visitor() {
        let ctx = TestContext::new().await;
        let staff = ctx.create_staff("staff 1").await;

        let result = ctx.reserves.save_reserve(new_reserve(Vec::new()), staff).await;

        assert!(matches!(result, Err(ReservesServiceError::NoVisitors)));
    }

    #[tokio::test]
    async fn save_reserve_unknown_staff_returns_staff_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .reserves
            .save_reserve(
                new_reserve(vec![visitor("visitor 1", "01011111111")]),
                StaffUuid::new(),
            )
            .await;

        assert!(matches!(result, Err(ReservesServiceError::StaffNotFound)));
    }

    #[tokio::test]
    async fn find_by_id_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.reserves.find_by_id(ReserveUuid::new()).await;

        assert!(matches!(result, Err(ReservesServiceError::NotFound)));
    }

    #[tokio::test]
    async fn find_reserves_by_name_and_phone_orders_by_date_descending() -> TestResult {
        let ctx = TestContext::new().await;
        let staff = ctx.create_staff("staff 1").await;

        let earlier = ctx
            .reserves
            .save_reserve(
                new_reserve_on(visit_date(10, 9), vec![visitor("visitor 1", "01011111111")]),
                staff,
            )
            .await?;

        let later = ctx
            .reserves
            .save_reserve(
                new_reserve_on(
                    visit_date(12, 14),
                    vec![
                        visitor("visitor 1", "01011111111"),
                        visitor("visitor 2", "01022222222"),
                    ],
                ),
                staff,
            )
            .await?;

        ctx.reserves
            .save_reserve(new_reserve(vec![visitor("visitor 3", "01033333333")]), staff)
            .await?;

        let found = ctx
            .reserves
            .find_reserves_by_name_and_phone(identity("visitor 1", "01011111111"))
            .await?;

        let uuids: Vec<_> = found.iter().map(|view| view.uuid).collect();

        assert_eq!(uuids, vec![later.uuid, earlier.uuid]);

        Ok(())
    }

    #[tokio::test]
    async fn find_reserves_requires_both_name_and_phone() -> TestResult {
        let ctx = TestContext::new().await;
        let staff = ctx.create_staff("staff 1").await;

        ctx.reserves
            .save_reserve(new_reserve(vec![visitor("visitor 1", "01011111111")]), staff)
            .await?;

        let wrong_phone = ctx
            .reserves
            .find_reserves_by_name_and_phone(identity("visitor 1", "01099999999"))
            .await?;

        let wrong_name = ctx
            .reserves
            .find_reserves_by_name_and_phone(identity("visitor 9", "01011111111"))
            .await?;

        assert!(wrong_phone.is_empty());
        assert!(wrong_name.is_empty());

        Ok(())
    }

    // Updates are a full replace: visitors left out of the payload are removed.
    #[tokio::test]
    async fn update_reserve_replaces_visitor_set() -> TestResult {
        let ctx = TestContext::new().await;
        let staff = ctx.create_staff("staff 1").await;

        let record = ctx
            .reserves
            .save_reserve(
                new_reserve(vec![
                    visitor("visitor 1", "01011111111"),
                    visitor("visitor 2", "01022222222"),
                ]),
                staff,
            )
            .await?;

        let view = ctx.reserves.find_by_id(record.uuid).await?;

        let kept = view
            .visitors
            .iter()
            .find(|v| v.name == "visitor 1")
            .expect("visitor 1 should exist");

        let mut renamed = keep(kept);
        renamed.organization = "Globex".to_string();

        let mut update = update_of(&view, vec![renamed, add("visitor 3", "01033333333")]);
        update.place = "Meeting room".to_string();
        update.purpose = "Contract review".to_string();
        update.date = visit_date(21, 15);

        ctx.reserves.update_reserve(update, staff).await?;

        let updated = ctx.reserves.find_by_id(record.uuid).await?;

        assert_eq!(updated.place, "Meeting room");
        assert_eq!(updated.purpose, "Contract review");
        assert_eq!(updated.date, visit_date(21, 15));
        assert_eq!(updated.visitors.len(), 2);

        let first = updated
            .visitors
            .iter()
            .find(|v| v.uuid == kept.uuid)
            .expect("kept visitor should remain");

        assert_eq!(first.organization, "Globex");
        assert!(updated.visitors.iter().any(|v| v.name == "visitor 3"));
        assert!(!updated.visitors.iter().any(|v| v.name == "visitor 2"));

        Ok(())
    }

    #[tokio::test]
    async fn update_reserve_can_retarget_staff() -> TestResult {
        let ctx = TestContext::new().await;
        let staff = ctx.create_staff("staff 1").await;
        let other = ctx.create_staff("staff 2").await;

        let record = ctx
            .reserves
            .save_reserve(new_reserve(vec![visitor("visitor 1", "01011111111")]), staff)
            .await?;

        let view = ctx.reserves.find_by_id(record.uuid).await?;
        let visitors = view.visitors.iter().map(keep).collect();

        let updated = ctx
            .reserves
            .update_reserve(update_of(&view, visitors), other)
            .await?;

        assert_eq!(updated.target_staff, other);
        assert_eq!(
            ctx.reserves.find_by_id(record.uuid).await?.target_staff_name,
            "staff 2"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_reserve_rejects_duplicated_phone() -> TestResult {
        let ctx = TestContext::new().await;
        let staff = ctx.create_staff("staff 1").await;

        let record = ctx
            .reserves
            .save_reserve(new_reserve(vec![visitor("visitor 1", "01011111111")]), staff)
            .await?;

        let view = ctx.reserves.find_by_id(record.uuid).await?;

        let mut visitors: Vec<_> = view.visitors.iter().map(keep).collect();
        visitors.push(add("visitor 2", "01011111111"));

        let result = ctx
            .reserves
            .update_reserve(update_of(&view, visitors), staff)
            .await;

        assert!(matches!(result, Err(ReservesServiceError::PhoneDuplicated)));

        Ok(())
    }

    #[tokio::test]
    async fn update_reserve_rejects_foreign_visitor() -> TestResult {
        let ctx = TestContext::new().await;
        let staff = ctx.create_staff("staff 1").await;

        let first = ctx
            .reserves
            .save_reserve(new_reserve(vec![visitor("visitor 1", "01011111111")]), staff)
            .await?;

        let second = ctx
            .reserves
            .save_reserve(new_reserve(vec![visitor("visitor 2", "01022222222")]), staff)
            .await?;

        let first_view = ctx.reserves.find_by_id(first.uuid).await?;
        let second_view = ctx.reserves.find_by_id(second.uuid).await?;

        let visitors = second_view.visitors.iter().map(keep).collect();

        let result = ctx
            .reserves
            .update_reserve(update_of(&first_view, visitors), staff)
            .await;

        assert!(matches!(result, Err(ReservesServiceError::VisitorNotFound)));

        // Failed update leaves both reserves untouched.
        assert_eq!(ctx.reserves.find_by_id(first.uuid).await?, first_view);
        assert_eq!(ctx.reserves.find_by_id(second.uuid).await?, second_view);

        Ok(())
    }

    #[tokio::test]
    async fn update_reserve_unknown_uuid_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let staff = ctx.create_staff("staff 1").await;

        let update = ReserveUpdate {
            uuid: ReserveUuid::new(),
            place: "Lobby".to_string(),
            purpose: "Interview".to_string(),
            date: visit_date(14, 9),
            visitors: vec![add("visitor 1", "01011111111")],
        };

        let result = ctx.reserves.update_reserve(update, staff).await;

        assert!(matches!(result, Err(ReservesServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn delete_by_id_removes_reserve_and_visitors() -> TestResult {
        let ctx = TestContext::new().await;
        let staff = ctx.create_staff("staff 1").await;

        let record = ctx
            .reserves
            .save_reserve(
                new_reserve(vec![
                    visitor("visitor 1", "01011111111"),
                    visitor("visitor 2", "01022222222"),
                ]),
                staff,
            )
            .await?;

        let outcome = ctx.reserves.delete_by_id(record.uuid).await?;

        assert_eq!(outcome, DeleteOutcome::Deleted);

        let visitors: i64 = query_scalar("SELECT COUNT(*) FROM visitors")
            .fetch_one(ctx.db.pool())
            .await?;

        assert_eq!(visitors, 0);
        assert!(matches!(
            ctx.reserves.find_by_id(record.uuid).await,
            Err(ReservesServiceError::NotFound)
        ));

        Ok(())
    }

    #[tokio::test]
    async fn delete_by_id_twice_reports_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let staff = ctx.create_staff("staff 1").await;

        let record = ctx
            .reserves
            .save_reserve(new_reserve(vec![visitor("visitor 1", "01011111111")]), staff)
            .await?;

        assert_eq!(
            ctx.reserves.delete_by_id(record.uuid).await?,
            DeleteOutcome::Deleted
        );
        assert_eq!(
            ctx.reserves.delete_by_id(record.uuid).await?,
            DeleteOutcome::NotFound
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_all_by_staff_id_removes_only_that_staff() -> TestResult {
        let ctx = TestContext::new().await;
        let staff = ctx.create_staff("staff 1").await;
        let other = ctx.create_staff("staff 2").await;

        let mut removed = Vec::new();

        for phone in ["01011111111", "01022222222"] {
            let record = ctx
                .reserves
                .save_reserve(new_reserve(vec![visitor("visitor", phone)]), staff)
                .await?;

            removed.push(record.uuid);
        }

        let kept = ctx
            .reserves
            .save_reserve(new_reserve(vec![visitor("visitor", "01033333333")]), other)
            .await?;

        assert_eq!(ctx.reserves.delete_all_by_staff_id(staff).await?, 2);
        assert_eq!(ctx.reserves.delete_all_by_staff_id(staff).await?, 0);

        let remaining: i64 = query_scalar("SELECT COUNT(*) FROM visitors")
            .fetch_one(ctx.db.pool())
            .await?;

        assert_eq!(remaining, 1);
        assert!(ctx.reserves.find_by_id(kept.uuid).await.is_ok());

        for reserve in removed {
            assert!(matches!(
                ctx.reserves.find_by_id(reserve).await,
                Err(ReservesServiceError::NotFound)
            ));
        }

        Ok(())
    }

    #[tokio::test]
    async fn visitor_reserve_delete_keeps_reserve_with_other_visitors() -> TestResult {
        let ctx = TestContext::new().await;
        let staff = ctx.create_staff("staff 1").await;

        let record = ctx
            .reserves
            .save_reserve(
                new_reserve(vec![
                    visitor("visitor 1", "01011111111"),
                    visitor("visitor 2", "01022222222"),
                ]),
                staff,
            )
            .await?;

        let removal = ctx
            .reserves
            .visitor_reserve_delete(record.uuid, identity("visitor 1", "01011111111"))
            .await?;

        assert_eq!(removal, VisitorRemoval::VisitorRemoved);

        let view = ctx.reserves.find_by_id(record.uuid).await?;

        assert_eq!(view.visitors.len(), 1);
        assert!(view.visitors.iter().all(|v| v.name == "visitor 2"));

        Ok(())
    }

    #[tokio::test]
    async fn visitor_reserve_delete_of_last_visitor_removes_reserve() -> TestResult {
        let ctx = TestContext::new().await;
        let staff = ctx.create_staff("staff 1").await;

        let record = ctx
            .reserves
            .save_reserve(new_reserve(vec![visitor("visitor 1", "01011111111")]), staff)
            .await?;

        let removal = ctx
            .reserves
            .visitor_reserve_delete(record.uuid, identity("visitor 1", "01011111111"))
            .await?;

        assert_eq!(removal, VisitorRemoval::ReserveRemoved);
        assert!(matches!(
            ctx.reserves.find_by_id(record.uuid).await,
            Err(ReservesServiceError::NotFound)
        ));

        Ok(())
    }

    #[tokio::test]
    async fn visitor_reserve_delete_requires_matching_identity() -> TestResult {
        let ctx = TestContext::new().await;
        let staff = ctx.create_staff("staff 1").await;

        let record = ctx
            .reserves
            .save_reserve(new_reserve(vec![visitor("visitor 1", "01011111111")]), staff)
            .await?;

        let result = ctx
            .reserves
            .visitor_reserve_delete(record.uuid, identity("visitor 1", "01099999999"))
            .await;

        assert!(matches!(result, Err(ReservesServiceError::VisitorNotFound)));
        assert_eq!(ctx.reserves.find_by_id(record.uuid).await?.visitors.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn visitor_reserve_delete_unknown_reserve_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .reserves
            .visitor_reserve_delete(ReserveUuid::new(), identity("visitor 1", "01011111111"))
            .await;

        assert!(matches!(result, Err(ReservesServiceError::NotFound)));
    }

    #[tokio::test]
    async fn service_exposes_duplicate_phone_check() {
        let ctx = TestContext::new().await;

        let visitors = [
            visitor("visitor 1", "01012345678"),
            visitor("visitor 2", "01012345678"),
        ];

        assert!(ctx.reserves.check_duplicated_phone(&visitors).is_err());
        assert!(ctx.reserves.check_duplicated_phone(&visitors[..1]).is_ok());
    }
}
