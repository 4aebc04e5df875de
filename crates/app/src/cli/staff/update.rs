use clap::Args;
use visitor_app::domain::staff::{data::StaffUpdate, records::StaffUuid};

use crate::{
    cli::{app_context, print_outcome, staff::into_outcome},
    config::{CodecConfig, DatabaseConfig},
};

#[derive(Debug, Args)]
pub(crate) struct UpdateStaffArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    #[command(flatten)]
    codec: CodecConfig,

    /// Staff member UUID
    #[arg(long)]
    staff_uuid: StaffUuid,

    /// New name
    #[arg(long)]
    name: String,

    /// New phone number
    #[arg(long)]
    phone: String,
}

pub(crate) async fn run(args: UpdateStaffArgs) -> Result<(), String> {
    let ctx = app_context(&args.database, &args.codec).await?;

    let result = ctx
        .staff
        .update_staff(
            args.staff_uuid,
            StaffUpdate {
                name: args.name,
                phone: args.phone,
            },
        )
        .await;

    print_outcome(&into_outcome(result))
}
