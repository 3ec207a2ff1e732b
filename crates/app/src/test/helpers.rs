//! Test Helpers

use vitrine::{
    customers::Customer,
    orders::{Order, OrderItem, RegistrationStatus},
    products::{ProductDetails, ProductId, Visibility},
};

use crate::{
    domain::orders::{OrdersService, OrdersServiceError, data::NewOrder},
    test::TestContext,
};

pub(crate) fn product_details(name: &str, price: u64) -> ProductDetails {
    ProductDetails {
        name: name.to_string(),
        price,
        image_url: "https://images.example.com/product.png".to_string(),
        category: "Geral".to_string(),
        action: None,
        indication: None,
        quantity_info: None,
        visibility: Visibility::InStock,
    }
}

pub(crate) fn customer(national_id: &str) -> Customer {
    Customer {
        name: "Ana Lima".to_string(),
        email: "ana@example.com".to_string(),
        national_id: national_id.to_string(),
    }
}

pub(crate) fn order_item(product: i64, unit_price: u64, quantity: u32) -> OrderItem {
    OrderItem {
        product_id: ProductId::new(product),
        name: format!("PRODUTO {product}"),
        unit_price,
        quantity,
    }
}

/// Record an order of `(product, quantity)` lines at 10.00 each.
pub(crate) async fn create_order(
    ctx: &TestContext,
    national_id: &str,
    lines: &[(i64, u32)],
) -> Result<Order, OrdersServiceError> {
    ctx.orders
        .create_order(NewOrder {
            customer: customer(national_id),
            items: lines
                .iter()
                .map(|(product, quantity)| order_item(*product, 1_000, *quantity))
                .collect(),
            customer_status: RegistrationStatus::Pending,
        })
        .await
}
