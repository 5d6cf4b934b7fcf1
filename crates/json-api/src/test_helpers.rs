//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};

use kasir::{
    checkout::CheckoutState,
    products::{Category, Product, ProductUuid},
    settlement::Totals,
};
use kasir_app::domain::{
    products::MockProductsService,
    registers::{MockRegistersService, RegisterSnapshot, RegisterUuid},
};

use crate::state::State;

pub(crate) fn make_product(uuid: ProductUuid) -> Product {
    Product {
        uuid,
        name: "Teh Botol".to_string(),
        price: 1_000,
        category: Category::Beverage,
        stock: 20,
        min_stock: 5,
        barcode: Some("8991002101111".to_string()),
        description: None,
        supplier: Some("Sosro".to_string()),
        image: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn empty_snapshot(uuid: RegisterUuid) -> RegisterSnapshot {
    RegisterSnapshot {
        uuid,
        lines: Vec::new(),
        totals: Totals::default(),
        checkout: CheckoutState::Idle,
    }
}

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_create_product().never();
    products.expect_update_product().never();
    products.expect_delete_product().never();
    products.expect_low_stock_products().never();
    products.expect_find_by_barcode().never();

    products
}

fn strict_registers_mock() -> MockRegistersService {
    let mut registers = MockRegistersService::new();

    registers.expect_open_register().never();
    registers.expect_get_register().never();
    registers.expect_close_register().never();
    registers.expect_add_item().never();
    registers.expect_scan_barcode().never();
    registers.expect_remove_item().never();
    registers.expect_set_quantity().never();
    registers.expect_open_checkout().never();
    registers.expect_select_payment_method().never();
    registers.expect_cancel_checkout().never();
    registers.expect_confirm_payment().never();

    registers
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    service(
        State::with_services(Arc::new(products), Arc::new(strict_registers_mock())),
        route,
    )
}

pub(crate) fn registers_service(registers: MockRegistersService, route: Router) -> Service {
    service(
        State::with_services(Arc::new(strict_products_mock()), Arc::new(registers)),
        route,
    )
}

fn service(state: Arc<State>, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state)).push(route))
}
