//! Products Repository

use jiff_sqlx::Date as SqlxDate;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use vitrine::{
    products::{Product, ProductDetails, ProductId, Visibility},
    promotions::PromotionWindow,
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const LOCK_PRODUCT_SQL: &str = include_str!("sql/lock_product.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const UPDATE_VISIBILITY_SQL: &str = include_str!("sql/update_visibility.sql");
const UPDATE_PROMOTION_SQL: &str = include_str!("sql/update_promotion.sql");
const LOCK_PRICES_SQL: &str = include_str!("sql/lock_prices.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");

/// Promotion columns as bound to a statement.
type PromotionParams = (Option<i64>, Option<SqlxDate>, Option<SqlxDate>);

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let rows = query_as::<Postgres, ProductRow>(LIST_PRODUCTS_SQL)
            .fetch_all(&mut **tx)
            .await?;

        Ok(rows.into_iter().map(ProductRow::into_product).collect())
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, ProductRow>(GET_PRODUCT_SQL)
            .bind(product.into_inner())
            .fetch_one(&mut **tx)
            .await
            .map(ProductRow::into_product)
    }

    /// Fetch a product and hold its row lock until the transaction ends.
    pub(crate) async fn lock_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, ProductRow>(LOCK_PRODUCT_SQL)
            .bind(product.into_inner())
            .fetch_one(&mut **tx)
            .await
            .map(ProductRow::into_product)
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        details: &ProductDetails,
        promotion: Option<&PromotionWindow>,
    ) -> Result<Product, sqlx::Error> {
        let (promo_price, promo_start_date, promo_end_date) = promotion_params(promotion)?;

        query_as::<Postgres, ProductRow>(CREATE_PRODUCT_SQL)
            .bind(&details.name)
            .bind(encode_amount("price", details.price)?)
            .bind(promo_price)
            .bind(promo_start_date)
            .bind(promo_end_date)
            .bind(&details.image_url)
            .bind(&details.category)
            .bind(&details.action)
            .bind(&details.indication)
            .bind(&details.quantity_info)
            .bind(details.visibility.as_str())
            .fetch_one(&mut **tx)
            .await
            .map(ProductRow::into_product)
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
        details: &ProductDetails,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, ProductRow>(UPDATE_PRODUCT_SQL)
            .bind(product.into_inner())
            .bind(&details.name)
            .bind(encode_amount("price", details.price)?)
            .bind(&details.image_url)
            .bind(&details.category)
            .bind(&details.action)
            .bind(&details.indication)
            .bind(&details.quantity_info)
            .bind(details.visibility.as_str())
            .fetch_one(&mut **tx)
            .await
            .map(ProductRow::into_product)
    }

    pub(crate) async fn update_visibility(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
        visibility: Visibility,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, ProductRow>(UPDATE_VISIBILITY_SQL)
            .bind(product.into_inner())
            .bind(visibility.as_str())
            .fetch_one(&mut **tx)
            .await
            .map(ProductRow::into_product)
    }

    pub(crate) async fn update_promotion(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
        promotion: Option<&PromotionWindow>,
    ) -> Result<Product, sqlx::Error> {
        let (promo_price, promo_start_date, promo_end_date) = promotion_params(promotion)?;

        query_as::<Postgres, ProductRow>(UPDATE_PROMOTION_SQL)
            .bind(product.into_inner())
            .bind(promo_price)
            .bind(promo_start_date)
            .bind(promo_end_date)
            .fetch_one(&mut **tx)
            .await
            .map(ProductRow::into_product)
    }

    /// Lock every product row and return `(id, base price)` pairs.
    pub(crate) async fn lock_prices(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<(ProductId, u64)>, sqlx::Error> {
        let rows: Vec<(i64, i64)> = query_as(LOCK_PRICES_SQL).fetch_all(&mut **tx).await?;

        rows.into_iter()
            .map(|(id, price)| Ok((ProductId::new(id), decode_amount("price", price)?)))
            .collect()
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_inner())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

fn promotion_params(promotion: Option<&PromotionWindow>) -> Result<PromotionParams, sqlx::Error> {
    let Some(window) = promotion else {
        return Ok((None, None, None));
    };

    Ok((
        Some(encode_amount("promo_price", window.promo_price)?),
        window.promo_start_date.map(SqlxDate::from),
        window.promo_end_date.map(SqlxDate::from),
    ))
}

fn encode_amount(column: &str, amount: u64) -> Result<i64, sqlx::Error> {
    i64::try_from(amount).map_err(|e| sqlx::Error::Encode(format!("{column}: {e}").into()))
}

fn decode_amount(column: &str, amount: i64) -> Result<u64, sqlx::Error> {
    u64::try_from(amount).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

/// Row wrapper so `FromRow` can be implemented for the storefront's product type.
struct ProductRow(Product);

impl ProductRow {
    fn into_product(self) -> Product {
        self.0
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let visibility: String = row.try_get("visibility")?;

        let visibility =
            visibility
                .parse::<Visibility>()
                .map_err(|e| sqlx::Error::ColumnDecode {
                    index: "visibility".to_string(),
                    source: Box::new(e),
                })?;

        Ok(Self(Product {
            id: ProductId::new(row.try_get("id")?),
            name: row.try_get("name")?,
            price: decode_amount("price", row.try_get("price")?)?,
            promo_price: row
                .try_get::<Option<i64>, _>("promo_price")?
                .map(|amount| decode_amount("promo_price", amount))
                .transpose()?,
            promo_start_date: row
                .try_get::<Option<SqlxDate>, _>("promo_start_date")?
                .map(SqlxDate::to_jiff),
            promo_end_date: row
                .try_get::<Option<SqlxDate>, _>("promo_end_date")?
                .map(SqlxDate::to_jiff),
            image_url: row.try_get("image_url")?,
            category: row.try_get("category")?,
            action: row.try_get("action")?,
            indication: row.try_get("indication")?,
            quantity_info: row.try_get("quantity_info")?,
            visibility,
        }))
    }
}
