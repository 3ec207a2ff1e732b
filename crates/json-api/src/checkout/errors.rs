//! Checkout Errors

use salvo::http::StatusError;
use tracing::warn;
use vitrine::basket::CartError;
use vitrine_app::domain::checkout::errors::CheckoutError;

/// Map checkout failures to responses. Briefs are in Portuguese because the storefront shows
/// them to the customer.
pub(crate) fn into_status_error(error: CheckoutError) -> StatusError {
    match error {
        CheckoutError::InvalidCustomer(source) => {
            StatusError::bad_request().brief(source.to_string())
        }
        CheckoutError::EmptyCart => StatusError::bad_request().brief("Seu carrinho está vazio."),
        CheckoutError::ProductNotFound(product_id) => {
            warn!(%product_id, "checkout referenced an unknown product");

            StatusError::not_found().brief(format!("Produto {product_id} não encontrado."))
        }
        CheckoutError::Unavailable(CartError::Unavailable(product_id)) => {
            StatusError::conflict()
                .brief(format!("Produto {product_id} indisponível no momento."))
        }
        CheckoutError::Products(source) => crate::products::into_status_error(source),
    }
}
