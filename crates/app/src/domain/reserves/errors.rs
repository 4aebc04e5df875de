//! Reserves service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind as SqlErrorKind},
};
use thiserror::Error;

use crate::{crypto::CodecError, responses::ErrorKind};

/// Reserve service error variants.
#[derive(Debug, Error)]
pub enum ReservesServiceError {
    /// Two visitors in one request share a phone number.
    #[error("visitor phone numbers must be unique within a reservation")]
    PhoneDuplicated,

    /// A reservation needs at least one visitor.
    #[error("a reservation needs at least one visitor")]
    NoVisitors,

    /// A required field was blank.
    #[error("`{0}` is required")]
    MissingField(&'static str),

    /// Reserve already exists.
    #[error("reservation already exists")]
    AlreadyExists,

    /// Reserve was not found.
    #[error("reservation not found")]
    NotFound,

    /// Target staff member was not found.
    #[error("staff not found")]
    StaffNotFound,

    /// No visitor of the reservation matched.
    #[error("visitor not found")]
    VisitorNotFound,

    /// Referenced related row does not exist.
    #[error("related resource not found")]
    InvalidReference,

    /// Required data was missing.
    #[error("missing required data")]
    MissingRequiredData,

    /// Provided data failed validation.
    #[error("invalid data")]
    InvalidData,

    /// Stored personal data could not be decrypted.
    #[error("stored visitor data could not be decoded")]
    Codec(#[from] CodecError),

    /// Underlying SQL/storage error.
    #[error("storage error")]
    Sql(#[source] Error),
}

impl ReservesServiceError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::PhoneDuplicated
            | Self::NoVisitors
            | Self::MissingField(_)
            | Self::MissingRequiredData
            | Self::InvalidData => ErrorKind::Validation,
            Self::NotFound
            | Self::StaffNotFound
            | Self::VisitorNotFound
            | Self::InvalidReference => ErrorKind::NotFound,
            Self::Codec(_) => ErrorKind::Codec,
            Self::AlreadyExists | Self::Sql(_) => ErrorKind::Storage,
        }
    }
}

impl From<Error> for ReservesServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(SqlErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(SqlErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(SqlErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(SqlErrorKind::CheckViolation) => Self::InvalidData,
            Some(SqlErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
