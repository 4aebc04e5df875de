use clap::Args;
use visitor_app::{domain::reserves::data::VisitorIdentity, responses};

use crate::{
    cli::{app_context, print_outcome},
    config::{CodecConfig, DatabaseConfig},
};

#[derive(Debug, Args)]
pub(crate) struct FindReservesArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    #[command(flatten)]
    codec: CodecConfig,

    /// Visitor name
    #[arg(long)]
    name: String,

    /// Visitor phone number
    #[arg(long)]
    phone: String,
}

pub(crate) async fn run(args: FindReservesArgs) -> Result<(), String> {
    let ctx = app_context(&args.database, &args.codec).await?;

    let identity = VisitorIdentity {
        name: args.name,
        phone: args.phone,
    };

    let outcome = responses::find_reserves_by_name_and_phone(ctx.reserves.as_ref(), identity).await;

    print_outcome(&outcome)
}
