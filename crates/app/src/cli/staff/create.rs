use clap::Args;
use visitor_app::domain::staff::data::NewStaff;

use crate::{
    cli::{app_context, print_outcome, staff::into_outcome},
    config::{CodecConfig, DatabaseConfig},
};

#[derive(Debug, Args)]
pub(crate) struct CreateStaffArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    #[command(flatten)]
    codec: CodecConfig,

    /// Staff member name
    #[arg(long)]
    name: String,

    /// Staff member phone number
    #[arg(long)]
    phone: String,

    /// Department the staff member works in
    #[arg(long, default_value = "")]
    department: String,
}

pub(crate) async fn run(args: CreateStaffArgs) -> Result<(), String> {
    let ctx = app_context(&args.database, &args.codec).await?;

    let result = ctx
        .staff
        .create_staff(NewStaff {
            name: args.name,
            phone: args.phone,
            department: args.department,
        })
        .await;

    print_outcome(&into_outcome(result))
}
