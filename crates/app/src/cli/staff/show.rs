use clap::Args;
use visitor_app::domain::staff::records::StaffUuid;

use crate::{
    cli::{app_context, print_outcome, staff::into_outcome},
    config::{CodecConfig, DatabaseConfig},
};

#[derive(Debug, Args)]
pub(crate) struct ShowStaffArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    #[command(flatten)]
    codec: CodecConfig,

    /// Staff member UUID
    #[arg(long)]
    staff_uuid: StaffUuid,
}

pub(crate) async fn run(args: ShowStaffArgs) -> Result<(), String> {
    let ctx = app_context(&args.database, &args.codec).await?;

    print_outcome(&into_outcome(ctx.staff.get_staff(args.staff_uuid).await))
}
