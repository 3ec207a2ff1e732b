//! Checkout errors.

use thiserror::Error;
use vitrine::{basket::CartError, customers::CustomerError, products::ProductId};

use crate::domain::products::ProductsServiceError;

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error(transparent)]
    InvalidCustomer(#[from] CustomerError),

    #[error("cart is empty")]
    EmptyCart,

    #[error("product {0} not found")]
    ProductNotFound(ProductId),

    #[error(transparent)]
    Unavailable(#[from] CartError),

    #[error("failed to load products")]
    Products(#[source] ProductsServiceError),
}
