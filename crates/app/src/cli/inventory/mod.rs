use clap::{Args, Subcommand};

mod summary;

#[derive(Debug, Args)]
pub(crate) struct InventoryCommand {
    #[command(subcommand)]
    command: InventorySubcommand,
}

#[derive(Debug, Subcommand)]
enum InventorySubcommand {
    Summary(summary::SummaryArgs),
}

pub(crate) async fn run(command: InventoryCommand) -> Result<(), String> {
    match command.command {
        InventorySubcommand::Summary(args) => summary::run(args).await,
    }
}
