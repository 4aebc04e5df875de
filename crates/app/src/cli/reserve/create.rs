use clap::Args;
use jiff::civil::DateTime;
use visitor_app::{
    context::AppContext,
    domain::{
        reserves::data::{NewReserve, VisitorData, parse_visit_date},
        staff::records::StaffUuid,
    },
    responses,
};

use crate::{
    cli::{app_context, print_outcome, reserve::parse_visitor},
    config::{CodecConfig, DatabaseConfig},
};

#[derive(Debug, Args)]
pub(crate) struct CreateReserveArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    #[command(flatten)]
    codec: CodecConfig,

    /// UUID of the staff member being visited
    #[arg(long, required_unless_present = "staff_name", conflicts_with = "staff_name")]
    staff_uuid: Option<StaffUuid>,

    /// Exact name of the staff member being visited
    #[arg(long)]
    staff_name: Option<String>,

    /// Where the visit takes place
    #[arg(long)]
    place: String,

    /// Reason for the visit
    #[arg(long)]
    purpose: String,

    /// Visit date and time, `yyyy-mm-dd HH:MM`
    #[arg(long, value_parser = parse_visit_date)]
    date: DateTime,

    /// Visitor as `name,phone[,organization]`; repeat for each visitor
    #[arg(long = "visitor", value_parser = parse_visitor, required = true)]
    visitors: Vec<VisitorData>,
}

pub(crate) async fn run(args: CreateReserveArgs) -> Result<(), String> {
    let ctx = app_context(&args.database, &args.codec).await?;

    let staff = match (args.staff_uuid, args.staff_name) {
        (Some(uuid), _) => uuid,
        (None, Some(name)) => resolve_staff(&ctx, name).await?,
        (None, None) => {
            return Err("one of --staff-uuid or --staff-name is required".to_string());
        }
    };

    let reserve = NewReserve {
        place: args.place,
        purpose: args.purpose,
        date: args.date,
        visitors: args.visitors,
    };

    print_outcome(&responses::save_reserve(ctx.reserves.as_ref(), reserve, staff).await)
}

async fn resolve_staff(ctx: &AppContext, name: String) -> Result<StaffUuid, String> {
    let found = ctx
        .staff
        .find_staff_by_name(name)
        .await
        .map_err(|error| format!("failed to look up staff: {error}"))?;

    match found.as_slice() {
        [staff] => Ok(staff.uuid),
        [] => Err("no staff member has that name".to_string()),
        _ => Err("several staff members share that name; use --staff-uuid".to_string()),
    }
}
