use clap::Args;
use visitor_app::{domain::staff::records::StaffUuid, responses};

use crate::{
    cli::{app_context, print_outcome},
    config::{CodecConfig, DatabaseConfig},
};

#[derive(Debug, Args)]
pub(crate) struct DeleteForStaffArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    #[command(flatten)]
    codec: CodecConfig,

    /// Staff member whose reservations are deleted
    #[arg(long)]
    staff_uuid: StaffUuid,
}

pub(crate) async fn run(args: DeleteForStaffArgs) -> Result<(), String> {
    let ctx = app_context(&args.database, &args.codec).await?;

    let outcome = responses::delete_all_by_staff_id(ctx.reserves.as_ref(), args.staff_uuid).await;

    print_outcome(&outcome)
}
