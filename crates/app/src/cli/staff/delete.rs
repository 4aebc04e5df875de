use clap::Args;
use visitor_app::{
    domain::staff::records::StaffUuid,
    responses::{Outcome, Response, ResponseCode},
};

use crate::{
    cli::{app_context, print_outcome, staff::into_outcome},
    config::{CodecConfig, DatabaseConfig},
};

#[derive(Debug, Args)]
pub(crate) struct DeleteStaffArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    #[command(flatten)]
    codec: CodecConfig,

    /// Staff member UUID; their reservations are deleted too
    #[arg(long)]
    staff_uuid: StaffUuid,
}

pub(crate) async fn run(args: DeleteStaffArgs) -> Result<(), String> {
    let ctx = app_context(&args.database, &args.codec).await?;

    let outcome = match into_outcome(ctx.staff.delete_staff(args.staff_uuid).await) {
        Outcome::Payload(removed) => Outcome::<()>::Code(Response {
            code: ResponseCode::Success,
            message: format!("staff deleted with {removed} reservation(s)"),
        }),
        Outcome::Code(response) => Outcome::Code(response),
        Outcome::Error(error) => Outcome::Error(error),
    };

    print_outcome(&outcome)
}
