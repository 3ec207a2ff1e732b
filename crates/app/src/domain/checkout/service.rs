//! Checkout service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::{Span, debug, error, info, warn};
use vitrine::{
    basket::Cart,
    checkout::{confirmation_email, whatsapp_message, whatsapp_url},
    customers::{Customer, format_national_id},
    orders::RegistrationStatus,
    promotions::today_in,
};

use crate::domain::{
    checkout::{
        data::{CheckoutReceipt, CheckoutRequest, CheckoutSettings},
        errors::CheckoutError,
    },
    orders::{OrdersService, data::NewOrder},
    products::{ProductsService, ProductsServiceError},
};

/// Checkout over the products and orders services.
#[derive(Clone)]
pub struct StoreCheckoutService {
    products: Arc<dyn ProductsService>,
    orders: Arc<dyn OrdersService>,
    settings: CheckoutSettings,
}

impl StoreCheckoutService {
    #[must_use]
    pub fn new(
        products: Arc<dyn ProductsService>,
        orders: Arc<dyn OrdersService>,
        settings: CheckoutSettings,
    ) -> Self {
        Self {
            products,
            orders,
            settings,
        }
    }

    async fn build_cart(&self, request: &CheckoutRequest) -> Result<Cart, CheckoutError> {
        let today = today_in(&self.settings.time_zone);

        let mut cart = Cart::new();

        for line in &request.lines {
            if line.quantity == 0 {
                continue;
            }

            let product = self
                .products
                .get_product(line.product_id)
                .await
                .map_err(|error| match error {
                    ProductsServiceError::NotFound => {
                        CheckoutError::ProductNotFound(line.product_id)
                    }
                    other => CheckoutError::Products(other),
                })?;

            let priced_on = match line.quote {
                Some(quote) => quote.pricing_date(&product, today).unwrap_or_else(|| {
                    warn!(
                        product_id = %line.product_id,
                        quoted = quote.unit_price,
                        added_on = %quote.added_on,
                        "price quote not honoured; pricing at today's price"
                    );

                    today
                }),
                None => today,
            };

            cart.add(&product, line.quantity, priced_on)?;
        }

        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        Ok(cart)
    }

    async fn registration_status(&self, national_id: &str) -> RegistrationStatus {
        match self.orders.has_orders_for(national_id.to_string()).await {
            Ok(true) => RegistrationStatus::Registered,
            Ok(false) => RegistrationStatus::Pending,
            Err(error) => {
                warn!(%error, "registration lookup failed; treating customer as pending");

                RegistrationStatus::Pending
            }
        }
    }
}

#[async_trait]
impl CheckoutService for StoreCheckoutService {
    #[tracing::instrument(
        name = "checkout.service.checkout",
        skip(self, request),
        fields(
            line_count = request.lines.len(),
            customer_status = tracing::field::Empty,
            order_recorded = tracing::field::Empty
        ),
        err
    )]
    async fn checkout(&self, request: CheckoutRequest) -> Result<CheckoutReceipt, CheckoutError> {
        request.customer.validate()?;

        if request.lines.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let customer = Customer {
            name: request.customer.name.trim().to_string(),
            email: request.customer.email.trim().to_string(),
            national_id: format_national_id(&request.customer.national_id),
        };

        let cart = self.build_cart(&request).await?;
        let total_price = cart.total_price();
        let items = cart.into_order_items();

        let customer_status = self.registration_status(&customer.national_id).await;

        let span = Span::current();

        span.record("customer_status", tracing::field::display(customer_status.as_str()));

        let order_id = match self
            .orders
            .create_order(NewOrder {
                customer: customer.clone(),
                items: items.clone(),
                customer_status,
            })
            .await
        {
            Ok(order) => Some(order.id),
            Err(error) => {
                error!(%error, "failed to record order; continuing checkout");

                None
            }
        };

        span.record("order_recorded", tracing::field::display(order_id.is_some()));

        let message = whatsapp_message(&customer, &items, total_price, customer_status);
        let whatsapp_url = whatsapp_url(&self.settings.whatsapp_number, &message);

        let email = confirmation_email(
            &customer,
            &items,
            total_price,
            &self.settings.whatsapp_number,
            &self.settings.store_email,
        );

        info!(
            to = %email.to,
            cc = %email.cc,
            subject = email.subject,
            "confirmation e-mail sent (simulated)"
        );

        debug!(body = %email.body, "confirmation e-mail body");

        Ok(CheckoutReceipt {
            order_id,
            order_recorded: order_id.is_some(),
            customer_status,
            items,
            total_price,
            message,
            whatsapp_url,
        })
    }
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Validates the customer, prices the requested lines, records the order and builds the
    /// WhatsApp hand-off.
    ///
    /// A line is priced on the day of its quote when the quote is recent and matches the
    /// catalogue on that day, and at today's effective price otherwise.
    ///
    /// Failing to look up the customer's registration or to record the order does not fail the
    /// checkout; the receipt reports it instead.
    async fn checkout(&self, request: CheckoutRequest) -> Result<CheckoutReceipt, CheckoutError>;
}

#[cfg(test)]
mod tests {
    use jiff::{Timestamp, civil::Date, tz::TimeZone};
    use sqlx::Error;
    use testresult::TestResult;
    use vitrine::{
        basket::{CartError, PriceQuote},
        customers::CustomerError,
        orders::{Order, OrderItem},
        products::{Product, ProductId, Visibility},
    };

    use crate::domain::{
        checkout::data::CheckoutLine,
        orders::{MockOrdersService, OrdersServiceError},
        products::MockProductsService,
    };

    use super::*;

    fn settings() -> CheckoutSettings {
        CheckoutSettings {
            time_zone: TimeZone::UTC,
            whatsapp_number: "55 11 99999-0000".to_string(),
            store_email: "loja@example.com".to_string(),
        }
    }

    fn customer() -> Customer {
        Customer {
            name: " Ana Lima ".to_string(),
            email: "ana@example.com".to_string(),
            national_id: "11111111111".to_string(),
        }
    }

    fn product(id: i64, price: u64, visibility: Visibility) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("PRODUTO {id}"),
            price,
            promo_price: None,
            promo_start_date: None,
            promo_end_date: None,
            image_url: format!("https://images.example.com/{id}.png"),
            category: "Geral".to_string(),
            action: None,
            indication: None,
            quantity_info: None,
            visibility,
        }
    }

    fn request(lines: &[(i64, u32)]) -> CheckoutRequest {
        CheckoutRequest {
            customer: customer(),
            lines: lines
                .iter()
                .map(|(id, quantity)| CheckoutLine {
                    product_id: ProductId::new(*id),
                    quantity: *quantity,
                    quote: None,
                })
                .collect(),
        }
    }

    fn products_returning(catalog: Vec<Product>) -> MockProductsService {
        let mut products = MockProductsService::new();

        products.expect_get_product().returning(move |id| {
            catalog
                .iter()
                .find(|product| product.id == id)
                .cloned()
                .ok_or(ProductsServiceError::NotFound)
        });

        products
    }

    fn recorded(order: NewOrder) -> Order {
        Order::place(
            order.customer,
            order.items,
            order.customer_status,
            Timestamp::now(),
        )
    }

    fn service(products: MockProductsService, orders: MockOrdersService) -> StoreCheckoutService {
        StoreCheckoutService::new(Arc::new(products), Arc::new(orders), settings())
    }

    #[tokio::test]
    async fn new_customer_checkout_records_pending_order() -> TestResult {
        let products = products_returning(vec![product(1, 7_500, Visibility::InStock)]);
        let mut orders = MockOrdersService::new();

        orders
            .expect_has_orders_for()
            .once()
            .withf(|national_id| national_id == "111.111.111-11")
            .return_once(|_| Ok(false));

        orders
            .expect_create_order()
            .once()
            .withf(|order| {
                order.customer.name == "Ana Lima"
                    && order.customer.national_id == "111.111.111-11"
                    && order.customer_status == RegistrationStatus::Pending
                    && order.items.len() == 1
            })
            .return_once(|order| Ok(recorded(order)));

        let receipt = service(products, orders).checkout(request(&[(1, 2)])).await?;

        assert!(receipt.order_recorded);
        assert!(receipt.order_id.is_some());
        assert_eq!(receipt.customer_status, RegistrationStatus::Pending);
        assert_eq!(receipt.total_price, 15_000);
        assert_eq!(
            receipt.items,
            vec![OrderItem {
                product_id: ProductId::new(1),
                name: "PRODUTO 1".to_string(),
                unit_price: 7_500,
                quantity: 2,
            }]
        );
        assert!(receipt.message.contains("cadastramento"));
        assert!(
            receipt
                .whatsapp_url
                .starts_with("https://wa.me/5511999990000?text=Ol%C3%A1!")
        );

        Ok(())
    }

    fn promotion_ended_yesterday() -> TestResult<(Product, Date)> {
        let yesterday = today_in(&TimeZone::UTC).yesterday()?;

        let mut promoted = product(1, 10_000, Visibility::InStock);
        promoted.promo_price = Some(8_000);
        promoted.promo_end_date = Some(yesterday);

        Ok((promoted, yesterday))
    }

    fn recording_orders() -> MockOrdersService {
        let mut orders = MockOrdersService::new();

        orders.expect_has_orders_for().return_once(|_| Ok(false));
        orders
            .expect_create_order()
            .return_once(|order| Ok(recorded(order)));

        orders
    }

    #[tokio::test]
    async fn quoted_price_survives_promotion_ending_before_checkout() -> TestResult {
        let (promoted, yesterday) = promotion_ended_yesterday()?;

        let mut quoted = request(&[(1, 1)]);
        quoted.lines[0].quote = Some(PriceQuote {
            unit_price: 8_000,
            added_on: yesterday,
        });

        let receipt = service(products_returning(vec![promoted]), recording_orders())
            .checkout(quoted)
            .await?;

        assert_eq!(receipt.items[0].unit_price, 8_000);
        assert_eq!(receipt.total_price, 8_000);

        Ok(())
    }

    #[tokio::test]
    async fn unquoted_or_mismatched_lines_are_priced_today() -> TestResult {
        let (promoted, yesterday) = promotion_ended_yesterday()?;

        let receipt = service(
            products_returning(vec![promoted.clone()]),
            recording_orders(),
        )
        .checkout(request(&[(1, 1)]))
        .await?;

        assert_eq!(receipt.total_price, 10_000);

        let mut understated = request(&[(1, 1)]);
        understated.lines[0].quote = Some(PriceQuote {
            unit_price: 100,
            added_on: yesterday,
        });

        let receipt = service(products_returning(vec![promoted]), recording_orders())
            .checkout(understated)
            .await?;

        assert_eq!(receipt.total_price, 10_000);

        Ok(())
    }

    #[tokio::test]
    async fn returning_customer_is_registered() -> TestResult {
        let products = products_returning(vec![product(1, 1_000, Visibility::InStock)]);
        let mut orders = MockOrdersService::new();

        orders
            .expect_has_orders_for()
            .once()
            .return_once(|_| Ok(true));

        orders
            .expect_create_order()
            .once()
            .withf(|order| order.customer_status == RegistrationStatus::Registered)
            .return_once(|order| Ok(recorded(order)));

        let receipt = service(products, orders).checkout(request(&[(1, 1)])).await?;

        assert_eq!(receipt.customer_status, RegistrationStatus::Registered);
        assert!(receipt.message.contains("Cadastro válido"));

        Ok(())
    }

    #[tokio::test]
    async fn lookup_failure_is_treated_as_pending() -> TestResult {
        let products = products_returning(vec![product(1, 1_000, Visibility::InStock)]);
        let mut orders = MockOrdersService::new();

        orders
            .expect_has_orders_for()
            .once()
            .return_once(|_| Err(OrdersServiceError::Sql(Error::PoolTimedOut)));

        orders
            .expect_create_order()
            .once()
            .return_once(|order| Ok(recorded(order)));

        let receipt = service(products, orders).checkout(request(&[(1, 1)])).await?;

        assert_eq!(receipt.customer_status, RegistrationStatus::Pending);

        Ok(())
    }

    #[tokio::test]
    async fn failing_to_record_the_order_still_completes_checkout() -> TestResult {
        let products = products_returning(vec![product(1, 1_000, Visibility::InStock)]);
        let mut orders = MockOrdersService::new();

        orders
            .expect_has_orders_for()
            .once()
            .return_once(|_| Ok(false));

        orders
            .expect_create_order()
            .once()
            .return_once(|_| Err(OrdersServiceError::Sql(Error::PoolTimedOut)));

        let receipt = service(products, orders).checkout(request(&[(1, 1)])).await?;

        assert!(!receipt.order_recorded);
        assert_eq!(receipt.order_id, None);
        assert!(receipt.whatsapp_url.starts_with("https://wa.me/"));

        Ok(())
    }

    #[tokio::test]
    async fn invalid_customer_is_rejected_before_any_lookup() {
        let mut products = MockProductsService::new();
        let mut orders = MockOrdersService::new();

        products.expect_get_product().never();
        orders.expect_has_orders_for().never();
        orders.expect_create_order().never();

        let mut invalid = request(&[(1, 1)]);
        invalid.customer.email = "ana".to_string();

        let result = service(products, orders).checkout(invalid).await;

        assert!(
            matches!(
                result,
                Err(CheckoutError::InvalidCustomer(CustomerError::InvalidEmail))
            ),
            "expected InvalidEmail, got {result:?}"
        );
    }

    #[tokio::test]
    async fn empty_cart_is_rejected() {
        let mut products = MockProductsService::new();
        let mut orders = MockOrdersService::new();

        products.expect_get_product().never();
        orders.expect_create_order().never();

        let result = service(products, orders).checkout(request(&[])).await;

        assert!(
            matches!(result, Err(CheckoutError::EmptyCart)),
            "expected EmptyCart, got {result:?}"
        );
    }

    #[tokio::test]
    async fn zero_quantity_lines_leave_an_empty_cart() {
        let mut products = MockProductsService::new();
        let mut orders = MockOrdersService::new();

        products.expect_get_product().never();
        orders.expect_create_order().never();

        let result = service(products, orders).checkout(request(&[(1, 0)])).await;

        assert!(
            matches!(result, Err(CheckoutError::EmptyCart)),
            "expected EmptyCart, got {result:?}"
        );
    }

    #[tokio::test]
    async fn unknown_product_is_reported() {
        let products = products_returning(Vec::new());
        let mut orders = MockOrdersService::new();

        orders.expect_create_order().never();

        let result = service(products, orders).checkout(request(&[(9, 1)])).await;

        assert!(
            matches!(result, Err(CheckoutError::ProductNotFound(id)) if id == ProductId::new(9)),
            "expected ProductNotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn out_of_stock_product_is_rejected() {
        let products = products_returning(vec![product(1, 1_000, Visibility::OutOfStock)]);
        let mut orders = MockOrdersService::new();

        orders.expect_create_order().never();

        let result = service(products, orders).checkout(request(&[(1, 1)])).await;

        assert!(
            matches!(
                result,
                Err(CheckoutError::Unavailable(CartError::Unavailable(id)))
                    if id == ProductId::new(1)
            ),
            "expected Unavailable, got {result:?}"
        );
    }
}
