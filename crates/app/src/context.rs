//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    crypto::{CodecError, CodecKey, FieldCodec},
    database::{self, Db},
    domain::{
        reserves::{ReservesService, SqlReservesService},
        staff::{SqlStaffService, StaffService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrate(#[source] sqlx::migrate::MigrateError),

    #[error("failed to initialise field codec")]
    Codec(#[source] CodecError),
}

#[derive(Clone)]
pub struct AppContext {
    pub reserves: Arc<dyn ReservesService>,
    pub staff: Arc<dyn StaffService>,
}

impl AppContext {
    /// Build application context from a database URL and codec key.
    ///
    /// Pending migrations are applied before the services are built.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting, migrating, or building the codec fails.
    pub async fn from_database_url(url: &str, key: &CodecKey) -> Result<Self, AppInitError> {
        let codec = Arc::new(FieldCodec::new(key).map_err(AppInitError::Codec)?);

        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrate)?;

        Ok(Self::from_db(Db::new(pool), codec))
    }

    #[must_use]
    pub fn from_db(db: Db, codec: Arc<FieldCodec>) -> Self {
        Self {
            reserves: Arc::new(SqlReservesService::new(db.clone(), Arc::clone(&codec))),
            staff: Arc::new(SqlStaffService::new(db, codec)),
        }
    }
}
