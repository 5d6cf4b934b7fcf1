use clap::{Parser, Subcommand};
use kasir_app::{database, domain::products::PgProductsService};

mod db;
mod inventory;
mod product;
mod table;

#[derive(Debug, Parser)]
#[command(name = "kasir-app", about = "Kasir CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Product(product::ProductCommand),
    Inventory(inventory::InventoryCommand),
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Product(command) => product::run(command).await,
            Commands::Inventory(command) => inventory::run(command).await,
            Commands::Db(command) => db::run(command).await,
        }
    }
}

async fn products_service(database_url: &str) -> Result<PgProductsService, String> {
    let pool = database::connect(database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    Ok(PgProductsService::new(database::Db::new(pool)))
}
