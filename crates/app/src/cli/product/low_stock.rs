use clap::Args;
use kasir_app::domain::products::ProductsService;

use crate::cli::{products_service, table};

#[derive(Debug, Args)]
pub(crate) struct LowStockArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: LowStockArgs) -> Result<(), String> {
    let service = products_service(&args.database_url).await?;

    let products = service
        .low_stock_products()
        .await
        .map_err(|error| format!("failed to list low stock products: {error}"))?;

    if products.is_empty() {
        println!("every product is above its minimum stock");
        return Ok(());
    }

    println!("{}", table::products(&products));

    Ok(())
}
