use kasir::{
    catalog::{InventorySummary, stock_status},
    money::format_idr,
    products::Product,
};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

pub(crate) fn products(products: &[Product]) -> String {
    let mut builder = Builder::default();

    builder.push_record([
        "UUID", "Name", "Category", "Price", "Stock", "Min", "Status", "Barcode",
    ]);

    for product in products {
        builder.push_record([
            product.uuid.to_string(),
            product.name.clone(),
            product.category.to_string(),
            format_idr(product.price),
            product.stock.to_string(),
            product.min_stock.to_string(),
            stock_status(product).as_str().to_string(),
            product.barcode.clone().unwrap_or_default(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(3..6), Alignment::right());

    table.to_string()
}

pub(crate) fn summary(summary: &InventorySummary) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Products".to_string(), summary.product_count.to_string()]);
    builder.push_record(["Low stock".to_string(), summary.low_stock_count.to_string()]);
    builder.push_record([
        "Inventory value".to_string(),
        format_idr(summary.inventory_value),
    ]);
    builder.push_record([
        "Average price".to_string(),
        summary
            .average_price
            .map_or_else(|| "-".to_string(), format_idr),
    ]);
    builder.push_record([
        "Top category".to_string(),
        summary
            .top_category
            .as_ref()
            .map_or_else(|| "-".to_string(), ToString::to_string),
    ]);

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::last(), Alignment::right());

    table.to_string()
}
