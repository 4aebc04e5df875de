use clap::Args;
use visitor_app::{
    domain::reserves::{data::VisitorIdentity, records::ReserveUuid},
    responses,
};

use crate::{
    cli::{app_context, print_outcome},
    config::{CodecConfig, DatabaseConfig},
};

#[derive(Debug, Args)]
pub(crate) struct DeleteVisitorArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    #[command(flatten)]
    codec: CodecConfig,

    /// Reservation UUID
    #[arg(long)]
    reserve_uuid: ReserveUuid,

    /// Visitor name
    #[arg(long)]
    name: String,

    /// Visitor phone number
    #[arg(long)]
    phone: String,
}

pub(crate) async fn run(args: DeleteVisitorArgs) -> Result<(), String> {
    let ctx = app_context(&args.database, &args.codec).await?;

    let identity = VisitorIdentity {
        name: args.name,
        phone: args.phone,
    };

    print_outcome(
        &responses::visitor_reserve_delete(ctx.reserves.as_ref(), args.reserve_uuid, identity)
            .await,
    )
}
