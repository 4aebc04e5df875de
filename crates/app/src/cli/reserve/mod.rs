use clap::{Args, Subcommand};
use visitor_app::domain::reserves::{
    data::{VisitorData, VisitorUpdate},
    records::VisitorUuid,
};

mod create;
mod delete;
mod delete_for_staff;
mod delete_visitor;
mod find;
mod show;
mod update;

#[derive(Debug, Args)]
pub(crate) struct ReserveCommand {
    #[command(subcommand)]
    command: ReserveSubcommand,
}

#[derive(Debug, Subcommand)]
enum ReserveSubcommand {
    Create(create::CreateReserveArgs),
    Show(show::ShowReserveArgs),
    Find(find::FindReservesArgs),
    Update(update::UpdateReserveArgs),
    Delete(delete::DeleteReserveArgs),
    DeleteVisitor(delete_visitor::DeleteVisitorArgs),
    DeleteForStaff(delete_for_staff::DeleteForStaffArgs),
}

pub(crate) async fn run(command: ReserveCommand) -> Result<(), String> {
    match command.command {
        ReserveSubcommand::Create(args) => create::run(args).await,
        ReserveSubcommand::Show(args) => show::run(args).await,
        ReserveSubcommand::Find(args) => find::run(args).await,
        ReserveSubcommand::Update(args) => update::run(args).await,
        ReserveSubcommand::Delete(args) => delete::run(args).await,
        ReserveSubcommand::DeleteVisitor(args) => delete_visitor::run(args).await,
        ReserveSubcommand::DeleteForStaff(args) => delete_for_staff::run(args).await,
    }
}

/// Parse `name,phone[,organization]`.
fn parse_visitor(value: &str) -> Result<VisitorData, String> {
    let mut parts = value.splitn(3, ',').map(str::trim);

    let (Some(name), Some(phone)) = (parts.next(), parts.next()) else {
        return Err("expected `name,phone[,organization]`".to_string());
    };

    Ok(VisitorData {
        name: name.to_string(),
        phone: phone.to_string(),
        organization: parts.next().unwrap_or_default().to_string(),
    })
}

/// Parse `uuid,name,phone[,organization]` for an existing visitor.
fn parse_visitor_update(value: &str) -> Result<VisitorUpdate, String> {
    let (uuid, rest) = value
        .split_once(',')
        .ok_or_else(|| "expected `uuid,name,phone[,organization]`".to_string())?;

    let uuid: VisitorUuid = uuid
        .trim()
        .parse()
        .map_err(|error| format!("invalid visitor uuid: {error}"))?;

    let visitor = parse_visitor(rest)?;

    Ok(VisitorUpdate {
        uuid: Some(uuid),
        name: visitor.name,
        phone: visitor.phone,
        organization: visitor.organization,
    })
}
