use crate::db::PgPool;
use crate::db_models::{NewOrder, OrderStatus};
use crate::errors::custom::{CustomError, DbError};
use crate::schema::{customers, menus, orders};
use diesel::dsl::sum;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::instrument;

/// Every order starts life in this state.
pub const INITIAL_STATUS: OrderStatus = OrderStatus::Processing;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderQuantity(i32);

impl OrderQuantity {
    pub fn parse(quantity: i32) -> Result<Self, String> {
        if quantity <= 0 {
            return Err("Quantity must be a positive integer".to_string());
        }
        Ok(Self(quantity))
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacedOrder {
    pub order_id: i32,
    pub total_price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    pub customer_name: String,
    pub total_amount: Decimal,
}

impl OrderSummary {
    fn empty() -> Self {
        Self {
            customer_name: String::new(),
            total_amount: Decimal::ZERO,
        }
    }
}

/// Largest total the `orders.total` column (`NUMERIC(12, 2)`) can hold.
pub fn max_order_total() -> Decimal {
    Decimal::new(999_999_999_999, 2)
}

/// Exact `unit_price * quantity`; never rounds.
pub fn compute_total(unit_price: Decimal, quantity: OrderQuantity) -> Result<Decimal, CustomError> {
    unit_price
        .checked_mul(Decimal::from(quantity.get()))
        .filter(|total| *total <= max_order_total())
        .ok_or_else(|| CustomError::ValidationError("Order total is out of range".to_string()))
}

/******************************************/
// Placing an order
/******************************************/
/// Reads the menu price and writes the order in one transaction. The
/// restaurant is taken from the menu row, never from the caller.
#[instrument(name = "Place order", skip(pool))]
pub async fn place_order(
    pool: &PgPool,
    customer_id: i32,
    menu_item_id: i32,
    quantity: OrderQuantity,
) -> Result<PlacedOrder, CustomError> {
    let mut conn = pool
        .get()
        .await
        .map_err(|err| DbError::ConnectionError(err.to_string()))?;

    conn.transaction::<_, CustomError, _>(|conn| {
        async move {
            let (restaurant_id, unit_price) = menus::table
                .filter(menus::id.eq(menu_item_id))
                .select((menus::restaurant_id, menus::price))
                .first::<(i32, Decimal)>(conn)
                .await
                .optional()?
                .ok_or_else(|| CustomError::NotFoundError("Menu not found".to_string()))?;

            let total = compute_total(unit_price, quantity)?;
            let new_order = NewOrder {
                customer_id,
                restaurant_id,
                menu_id: menu_item_id,
                quantity: quantity.get(),
                price: unit_price,
                total,
                order_status: INITIAL_STATUS,
            };
            let order_id = diesel::insert_into(orders::table)
                .values(&new_order)
                .returning(orders::id)
                .get_result::<i32>(conn)
                .await?;

            tracing::info!(order_id, %total, "Order placed");
            Ok(PlacedOrder {
                order_id,
                total_price: total,
            })
        }
        .scope_boxed()
    })
    .await
}

/******************************************/
// Summarising a customer's orders
/******************************************/
/// Sum of stored totals for the customer. No orders yields the empty
/// summary, not an error.
#[instrument(name = "Summarize orders", skip(pool))]
pub async fn summarize(pool: &PgPool, customer_id: i32) -> Result<OrderSummary, CustomError> {
    let mut conn = pool
        .get()
        .await
        .map_err(|err| DbError::ConnectionError(err.to_string()))?;

    let row = orders::table
        .inner_join(customers::table)
        .filter(orders::customer_id.eq(customer_id))
        .group_by(customers::id)
        .select((customers::fullname, sum(orders::total)))
        .first::<(String, Option<Decimal>)>(&mut conn)
        .await
        .optional()?;

    Ok(match row {
        Some((customer_name, Some(total_amount))) => OrderSummary {
            customer_name,
            total_amount,
        },
        _ => OrderSummary::empty(),
    })
}
