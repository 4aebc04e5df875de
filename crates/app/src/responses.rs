//! Response mapping for reservation operations.
//!
//! Turns service results into the codes and error kinds a boundary hands
//! back to its caller. Messages never carry decrypted personal data.

use std::fmt::{self, Display};

use serde::Serialize;
use tracing::{error, info, warn};

use crate::domain::{
    reserves::{
        ReservesService, ReservesServiceError,
        data::{DeleteOutcome, NewReserve, ReserveUpdate, VisitorIdentity, VisitorRemoval},
        records::ReserveUuid,
        views::ReserveView,
    },
    staff::{StaffServiceError, records::StaffUuid},
};

/// Classification of a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotFound,
    Codec,
    Storage,
}

/// Result code for operations that report a status instead of a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResponseCode {
    #[serde(rename = "2000")]
    Success,

    #[serde(rename = "4000")]
    Failure,
}

impl ResponseCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "2000",
            Self::Failure => "4000",
        }
    }
}

impl Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<DeleteOutcome> for ResponseCode {
    fn from(outcome: DeleteOutcome) -> Self {
        match outcome {
            DeleteOutcome::Deleted => Self::Success,
            DeleteOutcome::NotFound => Self::Failure,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    pub code: ResponseCode,
    pub message: String,
}

impl Response {
    fn new(code: ResponseCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub kind: ErrorKind,
    pub message: String,
}

/// What a boundary returns for one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Outcome<T> {
    Payload(T),
    Code(Response),
    Error(ErrorResponse),
}

/// Map a reserves service error, logging it at a level matching its kind.
#[must_use]
pub fn into_error_response(error: &ReservesServiceError) -> ErrorResponse {
    let kind = error.kind();

    log_failure(kind, error);

    ErrorResponse {
        kind,
        message: error.to_string(),
    }
}

/// Map a staff service error, logging it at a level matching its kind.
#[must_use]
pub fn into_staff_error_response(error: &StaffServiceError) -> ErrorResponse {
    let kind = error.kind();

    log_failure(kind, error);

    ErrorResponse {
        kind,
        message: error.to_string(),
    }
}

fn log_failure(kind: ErrorKind, error: &(dyn std::error::Error + 'static)) {
    let source = error.source().map(ToString::to_string);

    match kind {
        ErrorKind::Codec | ErrorKind::Storage => {
            error!(%error, source = source.as_deref(), "operation failed");
        }
        ErrorKind::Validation => warn!(%error, "rejected request"),
        ErrorKind::NotFound => info!(%error, "resource not found"),
    }
}

fn payload_or_error<T>(result: Result<T, ReservesServiceError>) -> Outcome<T> {
    match result {
        Ok(value) => Outcome::Payload(value),
        Err(error) => Outcome::Error(into_error_response(&error)),
    }
}

pub async fn find_by_id<S>(service: &S, reserve: ReserveUuid) -> Outcome<ReserveView>
where
    S: ReservesService + ?Sized,
{
    payload_or_error(service.find_by_id(reserve).await)
}

pub async fn find_reserves_by_name_and_phone<S>(
    service: &S,
    identity: VisitorIdentity,
) -> Outcome<Vec<ReserveView>>
where
    S: ReservesService + ?Sized,
{
    payload_or_error(service.find_reserves_by_name_and_phone(identity).await)
}

/// Create a reserve, answering with its id.
pub async fn save_reserve<S>(
    service: &S,
    reserve: NewReserve,
    staff: StaffUuid,
) -> Outcome<ReserveUuid>
where
    S: ReservesService + ?Sized,
{
    payload_or_error(
        service
            .save_reserve(reserve, staff)
            .await
            .map(|record| record.uuid),
    )
}

/// Update a reserve, answering with its id.
pub async fn update_reserve<S>(
    service: &S,
    update: ReserveUpdate,
    staff: StaffUuid,
) -> Outcome<ReserveUuid>
where
    S: ReservesService + ?Sized,
{
    payload_or_error(
        service
            .update_reserve(update, staff)
            .await
            .map(|record| record.uuid),
    )
}

/// A missing reserve answers with the failure code rather than an error.
pub async fn delete_by_id<S>(service: &S, reserve: ReserveUuid) -> Outcome<()>
where
    S: ReservesService + ?Sized,
{
    match service.delete_by_id(reserve).await {
        Ok(outcome @ DeleteOutcome::Deleted) => {
            Outcome::Code(Response::new(outcome.into(), "reservation deleted"))
        }
        Ok(outcome @ DeleteOutcome::NotFound) => {
            Outcome::Code(Response::new(outcome.into(), "reservation not found"))
        }
        Err(error) => Outcome::Error(into_error_response(&error)),
    }
}

pub async fn delete_all_by_staff_id<S>(service: &S, staff: StaffUuid) -> Outcome<()>
where
    S: ReservesService + ?Sized,
{
    match service.delete_all_by_staff_id(staff).await {
        Ok(removed) => Outcome::Code(Response::new(
            ResponseCode::Success,
            format!("deleted {removed} reservation(s)"),
        )),
        Err(error) => Outcome::Error(into_error_response(&error)),
    }
}

pub async fn visitor_reserve_delete<S>(
    service: &S,
    reserve: ReserveUuid,
    identity: VisitorIdentity,
) -> Outcome<()>
where
    S: ReservesService + ?Sized,
{
    match service.visitor_reserve_delete(reserve, identity).await {
        Ok(VisitorRemoval::VisitorRemoved) => {
            Outcome::Code(Response::new(ResponseCode::Success, "visitor removed"))
        }
        Ok(VisitorRemoval::ReserveRemoved) => Outcome::Code(Response::new(
            ResponseCode::Success,
            "visitor removed; reservation had no visitors left and was deleted",
        )),
        Err(error) => Outcome::Error(into_error_response(&error)),
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        crypto::CodecError,
        domain::{reserves::MockReservesService, staff::records::StaffUuid},
        test::helpers::{new_reserve, visit_date, visitor},
    };

    use super::*;

    fn identity() -> VisitorIdentity {
        VisitorIdentity {
            name: "visitor 1".to_string(),
            phone: "01011111111".to_string(),
        }
    }

    fn view(uuid: ReserveUuid) -> ReserveView {
        ReserveView {
            uuid,
            place: "Lobby".to_string(),
            target_staff: StaffUuid::new(),
            target_staff_name: "staff 1".to_string(),
            purpose: "Interview".to_string(),
            date: visit_date(14, 9),
            visitors: Vec::new(),
        }
    }

    #[test]
    fn response_codes_serialize_as_strings() -> TestResult {
        assert_eq!(serde_json::to_string(&ResponseCode::Success)?, "\"2000\"");
        assert_eq!(serde_json::to_string(&ResponseCode::Failure)?, "\"4000\"");
        assert_eq!(ResponseCode::Failure.to_string(), "4000");

        Ok(())
    }

    #[test]
    fn error_response_serializes_kind_and_message() -> TestResult {
        let response = into_error_response(&ReservesServiceError::PhoneDuplicated);

        let json = serde_json::to_value(&response)?;

        assert_eq!(json["kind"], "validation");
        assert_eq!(
            json["message"],
            "visitor phone numbers must be unique within a reservation"
        );

        Ok(())
    }

    #[test]
    fn storage_errors_do_not_leak_sql() {
        let response = into_error_response(&ReservesServiceError::Sql(sqlx::Error::PoolTimedOut));

        assert_eq!(response.kind, ErrorKind::Storage);
        assert_eq!(response.message, "storage error");
    }

    #[test]
    fn codec_errors_are_classified_as_codec() {
        let response = into_error_response(&ReservesServiceError::Codec(CodecError::Truncated));

        assert_eq!(response.kind, ErrorKind::Codec);
    }

    #[test]
    fn staff_errors_map_to_the_same_taxonomy() {
        let response = into_staff_error_response(&StaffServiceError::FieldTooLong("phone"));

        assert_eq!(response.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn delete_by_id_reports_success_code() {
        let reserve = ReserveUuid::new();

        let mut service = MockReservesService::new();

        service
            .expect_delete_by_id()
            .once()
            .withf(move |uuid| *uuid == reserve)
            .return_once(|_| Ok(DeleteOutcome::Deleted));

        let outcome = delete_by_id(&service, reserve).await;

        assert!(matches!(
            outcome,
            Outcome::Code(Response {
                code: ResponseCode::Success,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn delete_by_id_of_missing_reserve_reports_failure_code() {
        let mut service = MockReservesService::new();

        service
            .expect_delete_by_id()
            .once()
            .return_once(|_| Ok(DeleteOutcome::NotFound));

        let outcome = delete_by_id(&service, ReserveUuid::new()).await;

        assert!(matches!(
            outcome,
            Outcome::Code(Response {
                code: ResponseCode::Failure,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn find_by_id_wraps_payload() {
        let reserve = ReserveUuid::new();

        let mut service = MockReservesService::new();

        service
            .expect_find_by_id()
            .once()
            .withf(move |uuid| *uuid == reserve)
            .return_once(move |uuid| Ok(view(uuid)));

        service.expect_delete_by_id().never();

        let outcome = find_by_id(&service, reserve).await;

        assert!(matches!(outcome, Outcome::Payload(view) if view.uuid == reserve));
    }

    #[tokio::test]
    async fn find_by_id_not_found_maps_to_error_kind() {
        let mut service = MockReservesService::new();

        service
            .expect_find_by_id()
            .once()
            .return_once(|_| Err(ReservesServiceError::NotFound));

        let outcome = find_by_id(&service, ReserveUuid::new()).await;

        assert!(matches!(
            outcome,
            Outcome::Error(ErrorResponse {
                kind: ErrorKind::NotFound,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn save_reserve_validation_error_is_reported() {
        let staff = StaffUuid::new();

        let mut service = MockReservesService::new();

        service
            .expect_save_reserve()
            .once()
            .withf(move |_, uuid| *uuid == staff)
            .return_once(|_, _| Err(ReservesServiceError::PhoneDuplicated));

        let reserve = new_reserve(vec![
            visitor("visitor 1", "01012345678"),
            visitor("visitor 2", "01012345678"),
        ]);

        let outcome = save_reserve(&service, reserve, staff).await;

        assert!(matches!(outcome, Outcome::Error(_)));
    }

    #[tokio::test]
    async fn visitor_reserve_delete_reports_reserve_removal() -> TestResult {
        let mut service = MockReservesService::new();

        service
            .expect_visitor_reserve_delete()
            .once()
            .withf(|_, identity| identity.phone == "01011111111")
            .return_once(|_, _| Ok(VisitorRemoval::ReserveRemoved));

        let outcome = visitor_reserve_delete(&service, ReserveUuid::new(), identity()).await;

        let json = serde_json::to_value(&outcome)?;

        assert_eq!(json["code"], "2000");

        Ok(())
    }

    #[tokio::test]
    async fn delete_all_by_staff_id_reports_count() {
        let mut service = MockReservesService::new();

        service
            .expect_delete_all_by_staff_id()
            .once()
            .return_once(|_| Ok(3));

        let outcome = delete_all_by_staff_id(&service, StaffUuid::new()).await;

        assert!(matches!(
            outcome,
            Outcome::Code(Response { ref message, .. }) if message == "deleted 3 reservation(s)"
        ));
    }
}
