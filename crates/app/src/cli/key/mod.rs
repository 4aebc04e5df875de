use clap::{Args, Subcommand};

mod generate;

#[derive(Debug, Args)]
pub(crate) struct KeyCommand {
    #[command(subcommand)]
    command: KeySubcommand,
}

#[derive(Debug, Subcommand)]
enum KeySubcommand {
    Generate(generate::GenerateKeyArgs),
}

pub(crate) fn run(command: KeyCommand) -> Result<(), String> {
    match command.command {
        KeySubcommand::Generate(args) => generate::run(&args),
    }
}
