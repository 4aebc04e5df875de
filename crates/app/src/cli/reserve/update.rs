use clap::Args;
use jiff::civil::DateTime;
use visitor_app::{
    domain::{
        reserves::{
            data::{ReserveUpdate, VisitorData, VisitorUpdate, parse_visit_date},
            records::ReserveUuid,
        },
        staff::records::StaffUuid,
    },
    responses,
};

use crate::{
    cli::{
        app_context, print_outcome,
        reserve::{parse_visitor, parse_visitor_update},
    },
    config::{CodecConfig, DatabaseConfig},
};

/// Visitors not listed with `--keep-visitor` or `--visitor` are removed.
#[derive(Debug, Args)]
pub(crate) struct UpdateReserveArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    #[command(flatten)]
    codec: CodecConfig,

    /// Reservation UUID
    #[arg(long)]
    reserve_uuid: ReserveUuid,

    /// UUID of the staff member being visited
    #[arg(long)]
    staff_uuid: StaffUuid,

    /// Where the visit takes place
    #[arg(long)]
    place: String,

    /// Reason for the visit
    #[arg(long)]
    purpose: String,

    /// Visit date and time, `yyyy-mm-dd HH:MM`
    #[arg(long, value_parser = parse_visit_date)]
    date: DateTime,

    /// Existing visitor as `uuid,name,phone[,organization]`
    #[arg(long = "keep-visitor", value_parser = parse_visitor_update)]
    kept: Vec<VisitorUpdate>,

    /// New visitor as `name,phone[,organization]`
    #[arg(long = "visitor", value_parser = parse_visitor)]
    added: Vec<VisitorData>,
}

pub(crate) async fn run(args: UpdateReserveArgs) -> Result<(), String> {
    let ctx = app_context(&args.database, &args.codec).await?;

    let mut visitors = args.kept;

    visitors.extend(args.added.into_iter().map(|visitor| VisitorUpdate {
        uuid: None,
        name: visitor.name,
        phone: visitor.phone,
        organization: visitor.organization,
    }));

    let update = ReserveUpdate {
        uuid: args.reserve_uuid,
        place: args.place,
        purpose: args.purpose,
        date: args.date,
        visitors,
    };

    let outcome = responses::update_reserve(ctx.reserves.as_ref(), update, args.staff_uuid).await;

    print_outcome(&outcome)
}
