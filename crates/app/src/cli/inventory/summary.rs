use clap::Args;
use kasir::catalog::InventorySummary;
use kasir_app::domain::products::ProductsService;

use crate::cli::{products_service, table};

#[derive(Debug, Args)]
pub(crate) struct SummaryArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: SummaryArgs) -> Result<(), String> {
    let service = products_service(&args.database_url).await?;

    let products = service
        .list_products()
        .await
        .map_err(|error| format!("failed to list products: {error}"))?;

    println!("{}", table::summary(&InventorySummary::from_products(&products)));

    Ok(())
}
