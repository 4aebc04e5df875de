use clap::Args;
use visitor_app::{domain::reserves::records::ReserveUuid, responses};

use crate::{
    cli::{app_context, print_outcome},
    config::{CodecConfig, DatabaseConfig},
};

#[derive(Debug, Args)]
pub(crate) struct ShowReserveArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    #[command(flatten)]
    codec: CodecConfig,

    /// Reservation UUID
    #[arg(long)]
    reserve_uuid: ReserveUuid,
}

pub(crate) async fn run(args: ShowReserveArgs) -> Result<(), String> {
    let ctx = app_context(&args.database, &args.codec).await?;

    print_outcome(&responses::find_by_id(ctx.reserves.as_ref(), args.reserve_uuid).await)
}
