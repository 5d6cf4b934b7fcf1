use clap::{Args, Subcommand};

mod create;
mod list;
mod low_stock;

#[derive(Debug, Args)]
pub(crate) struct ProductCommand {
    #[command(subcommand)]
    command: ProductSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductSubcommand {
    Create(create::CreateProductArgs),
    List(list::ListProductsArgs),
    LowStock(low_stock::LowStockArgs),
}

pub(crate) async fn run(command: ProductCommand) -> Result<(), String> {
    match command.command {
        ProductSubcommand::Create(args) => create::run(args).await,
        ProductSubcommand::List(args) => list::run(args).await,
        ProductSubcommand::LowStock(args) => low_stock::run(args).await,
    }
}
