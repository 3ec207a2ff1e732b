//! Catalog

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::products::Product;

/// Storefront search and category filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CatalogFilter {
    /// Case-insensitive fragment of the product name
    #[serde(default)]
    pub search: Option<String>,

    /// Exact category; `None` matches every category
    #[serde(default)]
    pub category: Option<String>,
}

impl CatalogFilter {
    /// Whether `product` passes the filter. Visibility is not considered.
    pub fn matches(&self, product: &Product) -> bool {
        let search_matches = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|search| !search.is_empty())
            .is_none_or(|search| {
                product
                    .name
                    .to_lowercase()
                    .contains(&search.to_lowercase())
            });

        let category_matches = self
            .category
            .as_deref()
            .filter(|category| !category.is_empty())
            .is_none_or(|category| product.category == category);

        search_matches && category_matches
    }
}

/// Listed products passing `filter`, in the given order.
pub fn storefront<'a>(products: &'a [Product], filter: &CatalogFilter) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|product| product.is_listed() && filter.matches(product))
        .collect()
}

/// Distinct categories of the listed products, sorted.
pub fn categories(products: &[Product]) -> Vec<String> {
    products
        .iter()
        .filter(|product| product.is_listed())
        .map(|product| product.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
