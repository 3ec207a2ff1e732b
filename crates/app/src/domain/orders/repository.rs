//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{
    FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar,
    types::Json,
};
use uuid::Uuid;
use vitrine::{
    customers::Customer,
    orders::{Order, OrderId, OrderItem, RegistrationStatus, SaleStatus},
};

use crate::domain::orders::data::OrderUpdate;

const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const LIST_ORDERS_FOR_UPDATE_SQL: &str = include_str!("sql/list_orders_for_update.sql");
const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const UPDATE_ORDER_SQL: &str = include_str!("sql/update_order.sql");
const UPDATE_OBSERVATION_SQL: &str = include_str!("sql/update_observation.sql");
const DELETE_ORDER_SQL: &str = include_str!("sql/delete_order.sql");
const ORDER_EXISTS_FOR_CPF_SQL: &str = include_str!("sql/order_exists_for_cpf.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Orders, newest first.
    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Order>, sqlx::Error> {
        let rows = query_as::<Postgres, OrderRow>(LIST_ORDERS_SQL)
            .fetch_all(&mut **tx)
            .await?;

        Ok(rows.into_iter().map(OrderRow::into_order).collect())
    }

    /// Orders, newest first, locked until the transaction ends.
    pub(crate) async fn list_orders_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Order>, sqlx::Error> {
        let rows = query_as::<Postgres, OrderRow>(LIST_ORDERS_FOR_UPDATE_SQL)
            .fetch_all(&mut **tx)
            .await?;

        Ok(rows.into_iter().map(OrderRow::into_order).collect())
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &Order,
    ) -> Result<Order, sqlx::Error> {
        let total_price = i64::try_from(order.total_price)
            .map_err(|e| sqlx::Error::Encode(format!("total_price: {e}").into()))?;

        query_as::<Postgres, OrderRow>(CREATE_ORDER_SQL)
            .bind(order.id.into_uuid())
            .bind(SqlxTimestamp::from(order.date))
            .bind(Json(&order.customer))
            .bind(Json(&order.items))
            .bind(total_price)
            .bind(order.status.as_str())
            .bind(&order.observation)
            .bind(order.customer_status.as_str())
            .fetch_one(&mut **tx)
            .await
            .map(OrderRow::into_order)
    }

    pub(crate) async fn update_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
        update: &OrderUpdate,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, OrderRow>(UPDATE_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(update.status.map(SaleStatus::as_str))
            .bind(update.observation.as_deref())
            .bind(update.customer_status.map(RegistrationStatus::as_str))
            .fetch_one(&mut **tx)
            .await
            .map(OrderRow::into_order)
    }

    pub(crate) async fn update_observation(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
        observation: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_OBSERVATION_SQL)
            .bind(order.into_uuid())
            .bind(observation)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ORDER_SQL)
            .bind(order.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn order_exists_for_cpf(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        national_id: &str,
    ) -> Result<bool, sqlx::Error> {
        query_scalar(ORDER_EXISTS_FOR_CPF_SQL)
            .bind(national_id)
            .fetch_one(&mut **tx)
            .await
    }
}

/// Row wrapper so `FromRow` can be implemented for the storefront's order type.
struct OrderRow(Order);

impl OrderRow {
    fn into_order(self) -> Order {
        self.0
    }
}

fn decode_column<T, E>(column: &str, result: Result<T, E>) -> sqlx::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for OrderRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let id: Uuid = row.try_get("id")?;
        let total_price: i64 = row.try_get("total_price")?;
        let status: String = row.try_get("status")?;
        let customer_status: String = row.try_get("customer_status")?;

        Ok(Self(Order {
            id: OrderId::from_uuid(id),
            date: row.try_get::<SqlxTimestamp, _>("date")?.to_jiff(),
            customer: row.try_get::<Json<Customer>, _>("customer")?.0,
            items: row.try_get::<Json<Vec<OrderItem>>, _>("items")?.0,
            total_price: decode_column("total_price", u64::try_from(total_price))?,
            status: decode_column("status", status.parse::<SaleStatus>())?,
            observation: row.try_get("observation")?,
            customer_status: decode_column(
                "customer_status",
                customer_status.parse::<RegistrationStatus>(),
            )?,
        }))
    }
}
