use clap::{Parser, Subcommand};
use serde::Serialize;
use visitor_app::{context::AppContext, responses::Outcome};

use crate::config::{CodecConfig, DatabaseConfig, LoggingConfig};

mod db;
mod key;
mod reserve;
mod staff;

#[derive(Debug, Parser)]
#[command(name = "visitor-app", about = "Visitor reservation CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    Key(key::KeyCommand),
    Staff(staff::StaffCommand),
    Reserve(reserve::ReserveCommand),
}

impl Cli {
    pub(crate) fn logging(&self) -> &LoggingConfig {
        &self.logging
    }

    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::Key(command) => key::run(command),
            Commands::Staff(command) => staff::run(command).await,
            Commands::Reserve(command) => reserve::run(command).await,
        }
    }
}

async fn app_context(database: &DatabaseConfig, codec: &CodecConfig) -> Result<AppContext, String> {
    let key = codec.key()?;

    AppContext::from_database_url(&database.database_url, &key)
        .await
        .map_err(|error| format!("failed to initialise application: {error}"))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|error| format!("failed to encode output: {error}"))?;

    println!("{json}");

    Ok(())
}

/// Print an outcome, failing the command when it carries an error.
fn print_outcome<T: Serialize>(outcome: &Outcome<T>) -> Result<(), String> {
    print_json(outcome)?;

    if let Outcome::Error(error) = outcome {
        return Err(error.message.clone());
    }

    Ok(())
}
