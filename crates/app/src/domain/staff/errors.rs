//! Staff service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind as SqlErrorKind},
};
use thiserror::Error;

use crate::{
    crypto::CodecError, domain::staff::service::MAX_FIELD_CHARS, responses::ErrorKind,
};

/// Staff service error variants.
#[derive(Debug, Error)]
pub enum StaffServiceError {
    /// Staff member already exists.
    #[error("staff already exists")]
    AlreadyExists,

    /// Staff member was not found.
    #[error("staff not found")]
    NotFound,

    /// A required field was blank.
    #[error("`{0}` is required")]
    MissingField(&'static str),

    /// A field exceeded its length limit.
    #[error("`{0}` must be at most {max} characters", max = MAX_FIELD_CHARS)]
    FieldTooLong(&'static str),

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
    #[error("stored staff data could not be decoded")]
    Codec(#[from] CodecError),

    /// Underlying SQL/storage error.
    #[error("storage error")]
    Sql(#[source] Error),
}

impl StaffServiceError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingField(_)
            | Self::FieldTooLong(_)
            | Self::MissingRequiredData
            | Self::InvalidData => ErrorKind::Validation,
            Self::NotFound | Self::InvalidReference => ErrorKind::NotFound,
            Self::Codec(_) => ErrorKind::Codec,
            Self::AlreadyExists | Self::Sql(_) => ErrorKind::Storage,
        }
    }
}

impl From<Error> for StaffServiceError {
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
