//! Reserve cascade deletes.
//!
//! Visitors are removed before the reserve that owns them. Shared with the
//! staff registry so removing a staff member and their reserves happens in
//! one transaction.

use sqlx::{Sqlite, Transaction};

use crate::domain::{
    reserves::{
        records::ReserveUuid,
        repositories::{SqlReservesRepository, SqlVisitorsRepository},
    },
    staff::records::StaffUuid,
};

#[derive(Debug, Clone, Default)]
pub(crate) struct ReserveCascade {
    reserves: SqlReservesRepository,
    visitors: SqlVisitorsRepository,
}

impl ReserveCascade {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            reserves: SqlReservesRepository::new(),
            visitors: SqlVisitorsRepository::new(),
        }
    }

    /// Delete a reserve and its visitors, returning the reserve rows removed.
    pub(crate) async fn delete_reserve(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        reserve: ReserveUuid,
    ) -> Result<u64, sqlx::Error> {
        self.visitors.delete_reserve_visitors(tx, reserve).await?;

        self.reserves.delete_reserve(tx, reserve).await
    }

    /// Delete every reserve targeting `staff`, returning how many were removed.
    pub(crate) async fn delete_reserves_for_staff(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        staff: StaffUuid,
    ) -> Result<u64, sqlx::Error> {
        let reserves = self.reserves.list_reserves_for_staff(tx, staff).await?;

        let mut removed = 0;

        for reserve in reserves {
            removed += self.delete_reserve(tx, reserve).await?;
        }

        Ok(removed)
    }
}
