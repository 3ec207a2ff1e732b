//! Catalog Handler

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use vitrine::catalog::{CatalogFilter, categories, storefront};

use crate::{
    extensions::*,
    products::{get::ProductResponse, into_status_error},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CatalogResponse {
    /// Listed products matching the filter, ordered by name
    pub products: Vec<ProductResponse>,

    /// Categories of every listed product, for the category picker
    pub categories: Vec<String>,
}

/// Catalog Handler
///
/// Lists in-stock and out-of-stock products priced for today. Hidden products never appear.
#[endpoint(tags("storefront"), summary = "Browse Catalog")]
pub(crate) async fn handler(
    search: QueryParam<String, false>,
    category: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<CatalogResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let today = state.today();

    let filter = CatalogFilter {
        search: search.into_inner(),
        category: category.into_inner(),
    };

    let products = state
        .app
        .products
        .list_products()
        .await
        .map_err(into_status_error)?;

    Ok(Json(CatalogResponse {
        categories: categories(&products),
        products: storefront(&products, &filter)
            .into_iter()
            .map(|product| ProductResponse::new(product.clone(), today))
            .collect(),
    }))
}
