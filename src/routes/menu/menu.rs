use crate::db::PgPool;
use crate::db_models::{MenuItem, Restaurant};
use crate::errors::custom::{CustomError, DbError};
use crate::middleware::AuthenticatedCustomer;
use crate::schema::{menus, restaurants};
use actix_web::{web, HttpResponse};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::instrument;

/// One menu row flattened together with the restaurant that serves it.
#[derive(Debug, Clone, Serialize)]
pub struct MenuListing {
    pub menu_id: i32,
    pub menu_name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: String,
    pub restaurant_id: i32,
    pub restaurant_name: String,
    pub restaurant_address: String,
    pub restaurant_phone: String,
    pub menu_description: Option<String>,
}

impl From<(MenuItem, Restaurant)> for MenuListing {
    fn from((menu, restaurant): (MenuItem, Restaurant)) -> Self {
        Self {
            menu_id: menu.id,
            menu_name: menu.menu_name,
            description: menu.description,
            price: menu.price,
            category: menu.category,
            restaurant_id: restaurant.id,
            restaurant_name: restaurant.restaurant_name,
            restaurant_address: restaurant.address,
            restaurant_phone: restaurant.phone,
            menu_description: restaurant.menu_description,
        }
    }
}

// TODO: add limit/offset once the catalogue outgrows a single response.
#[instrument(name = "Load menus", skip(pool))]
pub async fn list_menu(pool: &PgPool) -> Result<Vec<MenuListing>, CustomError> {
    let mut conn = pool
        .get()
        .await
        .map_err(|err| DbError::ConnectionError(err.to_string()))?;

    let rows = menus::table
        .inner_join(restaurants::table)
        .order(menus::id.asc())
        .select((MenuItem::as_select(), Restaurant::as_select()))
        .load::<(MenuItem, Restaurant)>(&mut conn)
        .await?;

    Ok(rows.into_iter().map(MenuListing::from).collect())
}

/******************************************/
// Menu listing route
/******************************************/
/**
 * @route   GET /menus
 * @access  JWT Protected
 */
#[instrument(name = "List menus", skip(pool, customer), fields(customer_id = customer.0.id))]
pub async fn get_menus(
    pool: web::Data<PgPool>,
    customer: AuthenticatedCustomer,
) -> Result<HttpResponse, CustomError> {
    let listing = list_menu(&pool).await?;
    Ok(HttpResponse::Ok().json(listing))
}
