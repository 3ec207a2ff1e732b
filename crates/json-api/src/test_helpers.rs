//! Test helpers.

use std::sync::Arc;

use jiff::{Timestamp, tz::TimeZone};
use salvo::{affix_state::inject, prelude::*};
use testresult::TestResult;
use vitrine::{
    customers::Customer,
    orders::{Order, OrderItem, RegistrationStatus},
    products::{Product, ProductId, Visibility},
};
use vitrine_app::{
    auth::AdminCredentials,
    context::AppContext,
    domain::{
        checkout::{MockCheckoutService, data::CheckoutSettings},
        orders::MockOrdersService,
        products::MockProductsService,
        settings::MockSettingsService,
    },
};

use crate::state::State;

pub(crate) const TEST_ADMIN_PASSWORD: &str = "senha-de-teste";

/// Service mocks backing a test state; any call without an expectation fails the test.
#[derive(Default)]
pub(crate) struct Mocks {
    pub(crate) products: MockProductsService,
    pub(crate) orders: MockOrdersService,
    pub(crate) settings: MockSettingsService,
    pub(crate) checkout: MockCheckoutService,
}

impl Mocks {
    pub(crate) fn with_products(products: MockProductsService) -> Self {
        Self {
            products,
            ..Self::default()
        }
    }

    pub(crate) fn with_orders(orders: MockOrdersService) -> Self {
        Self {
            orders,
            ..Self::default()
        }
    }

    pub(crate) fn with_settings(settings: MockSettingsService) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub(crate) fn with_checkout(checkout: MockCheckoutService) -> Self {
        Self {
            checkout,
            ..Self::default()
        }
    }

    pub(crate) fn into_state(self) -> TestResult<Arc<State>> {
        Ok(State::from_app_context(AppContext {
            products: Arc::new(self.products),
            orders: Arc::new(self.orders),
            settings: Arc::new(self.settings),
            checkout: Arc::new(self.checkout),
            admin: Arc::new(AdminCredentials::from_password(
                TEST_ADMIN_PASSWORD.to_string(),
            )?),
            store: CheckoutSettings {
                time_zone: TimeZone::UTC,
                whatsapp_number: "5511987654321".to_string(),
                store_email: "loja@example.com".to_string(),
            },
        }))
    }

    /// Serve `route` with the mocks injected as application state.
    pub(crate) fn into_service(self, route: Router) -> TestResult<Service> {
        Ok(Service::new(
            Router::new().hoop(inject(self.into_state()?)).push(route),
        ))
    }
}

pub(crate) fn make_product(id: i64) -> Product {
    Product {
        id: ProductId::new(id),
        name: "GANODERMA JIAONANG".to_string(),
        price: 4_990,
        promo_price: None,
        promo_start_date: None,
        promo_end_date: None,
        image_url: "https://images.example.com/ganoderma.png".to_string(),
        category: "Imunidade".to_string(),
        action: None,
        indication: None,
        quantity_info: Some("60 cápsulas".to_string()),
        visibility: Visibility::InStock,
    }
}

pub(crate) fn make_customer(national_id: &str) -> Customer {
    Customer {
        name: "Maria Souza".to_string(),
        email: "maria@example.com".to_string(),
        national_id: national_id.to_string(),
    }
}

/// Open order for `quantity` units of product 1 at 49.90, placed at the Unix epoch.
pub(crate) fn make_order(national_id: &str, quantity: u32) -> Order {
    Order::place(
        make_customer(national_id),
        vec![OrderItem {
            product_id: ProductId::new(1),
            name: "GANODERMA JIAONANG".to_string(),
            unit_price: 4_990,
            quantity,
        }],
        RegistrationStatus::Pending,
        Timestamp::UNIX_EPOCH,
    )
}
