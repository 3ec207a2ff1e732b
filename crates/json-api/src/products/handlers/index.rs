//! Product Index Handler

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// Every product, hidden ones included, ordered by name
    pub products: Vec<ProductResponse>,
}

/// Product Index Handler
///
/// Returns every product priced on the given date, today by default.
#[endpoint(
    tags("products"),
    summary = "List Products",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    on: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let on = on.into_reference_date(state.today())?;

    let products = state
        .app
        .products
        .list_products()
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductsResponse {
        products: products
            .into_iter()
            .map(|product| ProductResponse::new(product, on))
            .collect(),
    }))
}
