//! Products service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{Span, debug, info};
use vitrine::{
    products::{Product, ProductId, Visibility},
    promotions::{BulkChange, BulkPromotion, PromotionWindow, check_base_price},
};

use crate::{
    database::Db,
    domain::products::{
        data::{BulkPromotionSummary, NewProduct, ProductUpdate},
        errors::ProductsServiceError,
        repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, product: ProductId) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    #[tracing::instrument(
        name = "products.service.create_product",
        skip(self, product),
        fields(product_id = tracing::field::Empty, has_promotion = product.promotion.is_some()),
        err
    )]
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError> {
        product.details.validate()?;

        if let Some(window) = &product.promotion {
            window.validate(product.details.price)?;
        }

        let details = product.details.normalized();

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_product(&mut tx, &details, product.promotion.as_ref())
            .await?;

        tx.commit().await?;

        Span::current().record("product_id", tracing::field::display(created.id));

        info!(product_id = %created.id, "created product");

        Ok(created)
    }

    #[tracing::instrument(
        name = "products.service.update_product",
        skip(self, update),
        fields(product_id = %product, price = update.details.price),
        err
    )]
    async fn update_product(
        &self,
        product: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError> {
        update.details.validate()?;

        let details = update.details.normalized();

        let mut tx = self.db.begin().await?;

        let current = self.repository.lock_product(&mut tx, product).await?;

        check_base_price(&current, details.price)?;

        let updated = self
            .repository
            .update_product(&mut tx, product, &details)
            .await?;

        tx.commit().await?;

        info!(product_id = %product, "updated product");

        Ok(updated)
    }

    #[tracing::instrument(
        name = "products.service.update_visibility",
        skip(self),
        fields(product_id = %product, visibility = %visibility),
        err
    )]
    async fn update_visibility(
        &self,
        product: ProductId,
        visibility: Visibility,
    ) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_visibility(&mut tx, product, visibility)
            .await?;

        tx.commit().await?;

        info!(product_id = %product, visibility = %visibility, "updated product visibility");

        Ok(updated)
    }

    #[tracing::instrument(
        name = "products.service.set_promotion",
        skip(self, promotion),
        fields(product_id = %product, clearing = promotion.is_none()),
        err
    )]
    async fn set_promotion(
        &self,
        product: ProductId,
        promotion: Option<PromotionWindow>,
    ) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        if let Some(window) = &promotion {
            let current = self.repository.lock_product(&mut tx, product).await?;

            window.validate(current.price)?;
        }

        let updated = self
            .repository
            .update_promotion(&mut tx, product, promotion.as_ref())
            .await?;

        tx.commit().await?;

        info!(product_id = %product, "updated product promotion");

        Ok(updated)
    }

    #[tracing::instrument(
        name = "products.service.apply_bulk_promotion",
        skip(self, promotion),
        fields(
            discount_percent = tracing::field::Empty,
            updated = tracing::field::Empty,
            skipped = tracing::field::Empty
        ),
        err
    )]
    async fn apply_bulk_promotion(
        &self,
        promotion: BulkPromotion,
    ) -> Result<BulkPromotionSummary, ProductsServiceError> {
        promotion.validate()?;

        let span = Span::current();

        if let Some(percent) = promotion.discount_percent {
            span.record("discount_percent", tracing::field::display(percent));
        }

        let mut tx = self.db.begin().await?;

        let prices = self.repository.lock_prices(&mut tx).await?;

        let mut summary = BulkPromotionSummary::default();

        for (product, price) in prices {
            let window = match promotion.change_for(price)? {
                BulkChange::Apply(window) => Some(window),
                BulkChange::Clear => None,
                BulkChange::Skip => {
                    debug!(product_id = %product, price, "discount rounds to no saving, skipping");

                    summary.skipped += 1;

                    continue;
                }
            };

            self.repository
                .update_promotion(&mut tx, product, window.as_ref())
                .await?;

            summary.updated += 1;
        }

        tx.commit().await?;

        span.record("updated", summary.updated);
        span.record("skipped", summary.skipped);

        info!(
            updated = summary.updated,
            skipped = summary.skipped,
            "applied bulk promotion"
        );

        Ok(summary)
    }

    #[tracing::instrument(
        name = "products.service.delete_product",
        skip(self),
        fields(product_id = %product),
        err
    )]
    async fn delete_product(&self, product: ProductId) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        info!(product_id = %product, "deleted product");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves all products, ordered by name.
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductId) -> Result<Product, ProductsServiceError>;

    /// Validates and creates a product. The name is stored upper-cased.
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError>;

    /// Validates and replaces every editable field of a product except its promotion. A new base
    /// price at or below the stored promotional price is rejected.
    async fn update_product(
        &self,
        product: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError>;

    /// Changes whether a product is listed and purchasable.
    async fn update_visibility(
        &self,
        product: ProductId,
        visibility: Visibility,
    ) -> Result<Product, ProductsServiceError>;

    /// Sets or, with `None`, clears a product's promotion.
    async fn set_promotion(
        &self,
        product: ProductId,
        promotion: Option<PromotionWindow>,
    ) -> Result<Product, ProductsServiceError>;

    /// Applies a percentage promotion to every product, or clears every promotion, in one
    /// transaction. Products whose discounted price would round to no saving are skipped and
    /// counted.
    async fn apply_bulk_promotion(
        &self,
        promotion: BulkPromotion,
    ) -> Result<BulkPromotionSummary, ProductsServiceError>;

    /// Deletes a product.
    async fn delete_product(&self, product: ProductId) -> Result<(), ProductsServiceError>;
}
