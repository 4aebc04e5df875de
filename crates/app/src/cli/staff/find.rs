use clap::Args;

use crate::{
    cli::{app_context, print_outcome, staff::into_outcome},
    config::{CodecConfig, DatabaseConfig},
};

#[derive(Debug, Args)]
pub(crate) struct FindStaffArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    #[command(flatten)]
    codec: CodecConfig,

    /// Exact staff member name
    #[arg(long)]
    name: String,
}

pub(crate) async fn run(args: FindStaffArgs) -> Result<(), String> {
    let ctx = app_context(&args.database, &args.codec).await?;

    print_outcome(&into_outcome(ctx.staff.find_staff_by_name(args.name).await))
}
