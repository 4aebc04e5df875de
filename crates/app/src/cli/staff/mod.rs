use clap::{Args, Subcommand};
use visitor_app::{
    domain::staff::StaffServiceError,
    responses::{Outcome, into_staff_error_response},
};

mod create;
mod delete;
mod find;
mod show;
mod update;

#[derive(Debug, Args)]
pub(crate) struct StaffCommand {
    #[command(subcommand)]
    command: StaffSubcommand,
}

#[derive(Debug, Subcommand)]
enum StaffSubcommand {
    Create(create::CreateStaffArgs),
    Show(show::ShowStaffArgs),
    Find(find::FindStaffArgs),
    Update(update::UpdateStaffArgs),
    Delete(delete::DeleteStaffArgs),
}

pub(crate) async fn run(command: StaffCommand) -> Result<(), String> {
    match command.command {
        StaffSubcommand::Create(args) => create::run(args).await,
        StaffSubcommand::Show(args) => show::run(args).await,
        StaffSubcommand::Find(args) => find::run(args).await,
        StaffSubcommand::Update(args) => update::run(args).await,
        StaffSubcommand::Delete(args) => delete::run(args).await,
    }
}

fn into_outcome<T>(result: Result<T, StaffServiceError>) -> Outcome<T> {
    match result {
        Ok(value) => Outcome::Payload(value),
        Err(error) => Outcome::Error(into_staff_error_response(&error)),
    }
}
