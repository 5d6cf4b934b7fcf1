use clap::Args;
use kasir::products::{Category, NewProduct};
use kasir_app::domain::products::ProductsService;

use crate::cli::{products_service, table};

#[derive(Debug, Args)]
pub(crate) struct CreateProductArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Product name
    #[arg(long)]
    name: String,

    /// Unit price in rupiah
    #[arg(long)]
    price: u64,

    /// Category key or label (food, beverage, personal_care, makanan, ...)
    #[arg(long)]
    category: String,

    /// Opening stock
    #[arg(long, default_value_t = 0)]
    stock: u32,

    /// Low stock threshold
    #[arg(long, default_value_t = 0)]
    min_stock: u32,

    /// Barcode used by the scanner
    #[arg(long)]
    barcode: Option<String>,

    /// Description
    #[arg(long)]
    description: Option<String>,

    /// Supplier name
    #[arg(long)]
    supplier: Option<String>,

    /// Image reference
    #[arg(long)]
    image: Option<String>,
}

pub(crate) async fn run(args: CreateProductArgs) -> Result<(), String> {
    let service = products_service(&args.database_url).await?;

    let product = service
        .create_product(NewProduct {
            name: args.name,
            price: Some(args.price),
            category: Some(Category::from(args.category.as_str())),
            stock: args.stock,
            min_stock: args.min_stock,
            barcode: args.barcode,
            description: args.description,
            supplier: args.supplier,
            image: args.image,
        })
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    println!("{}", table::products(std::slice::from_ref(&product)));

    Ok(())
}
