use clap::Args;
use kasir::catalog::{self, CategoryFilter};
use kasir_app::domain::products::ProductsService;

use crate::cli::{products_service, table};

#[derive(Debug, Args)]
pub(crate) struct ListProductsArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Match name, barcode or supplier
    #[arg(long, short)]
    query: Option<String>,

    /// Only this category; `all` lists every category
    #[arg(long, short, default_value = "all")]
    category: String,
}

pub(crate) async fn run(args: ListProductsArgs) -> Result<(), String> {
    let service = products_service(&args.database_url).await?;

    let products = service
        .list_products()
        .await
        .map_err(|error| format!("failed to list products: {error}"))?;

    let filter = CategoryFilter::parse(&args.category);
    let matches: Vec<_> = catalog::query(&products, args.query.as_deref().unwrap_or(""), &filter)
        .into_iter()
        .cloned()
        .collect();

    if matches.is_empty() {
        println!("no products found");
        return Ok(());
    }

    println!("{}", table::products(&matches));

    Ok(())
}
