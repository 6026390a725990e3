use crate::schema::{customers, menus, orders, restaurants};
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel_derive_enum::DbEnum;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Public projection of a customer row. The password hash is not part of
/// this type, so it can never be selected into a listing.
#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = customers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CustomerProfile {
    pub id: i32,
    pub username: String,
    pub fullname: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = customers)]
pub struct NewCustomerRow<'a> {
    pub fullname: &'a str,
    pub address: &'a str,
    pub phone: &'a str,
    pub email: &'a str,
    pub username: &'a str,
    pub password_hash: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = restaurants)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Restaurant {
    pub id: i32,
    pub restaurant_name: String,
    pub address: String,
    pub phone: String,
    pub menu_description: Option<String>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = menus)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MenuItem {
    pub id: i32,
    pub restaurant_id: i32,
    pub menu_name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, DbEnum, Serialize, Deserialize)]
#[ExistingTypePath = "crate::schema::sql_types::OrderStatus"]
#[DbValueStyle = "PascalCase"]
pub enum OrderStatus {
    Processing,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Order {
    pub id: i32,
    pub customer_id: i32,
    pub restaurant_id: i32,
    pub menu_id: i32,
    pub quantity: i32,
    pub price: Decimal,
    pub total: Decimal,
    pub order_status: OrderStatus,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrder {
    pub customer_id: i32,
    pub restaurant_id: i32,
    pub menu_id: i32,
    pub quantity: i32,
    pub price: Decimal,
    pub total: Decimal,
    pub order_status: OrderStatus,
}
