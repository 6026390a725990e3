use super::order_engine::{self, OrderQuantity};
use crate::{db::PgPool, errors::custom::CustomError, middleware::AuthenticatedCustomer};
use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::instrument;

#[derive(serde::Deserialize, Debug)]
pub struct CreateOrder {
    pub menu_id: Option<i32>,
    pub quantity: Option<i32>,
}

impl CreateOrder {
    pub fn validate(self) -> Result<(i32, OrderQuantity), String> {
        match (self.menu_id, self.quantity) {
            (Some(menu_id), Some(quantity)) => Ok((menu_id, OrderQuantity::parse(quantity)?)),
            _ => Err("Missing menu_id or quantity".to_string()),
        }
    }
}

/******************************************/
// New Order Creation route
/******************************************/
/**
 * @route   POST /orders
 * @access  JWT Protected
 */
#[instrument(name = "Create new Order", skip(req_order, pool, customer), fields(customer_id = customer.0.id))]
pub async fn create_order(
    pool: web::Data<PgPool>,
    req_order: web::Json<CreateOrder>,
    customer: AuthenticatedCustomer,
) -> Result<HttpResponse, CustomError> {
    let (menu_id, quantity) = req_order
        .into_inner()
        .validate()
        .map_err(CustomError::ValidationError)?;

    let placed = order_engine::place_order(&pool, customer.0.id, menu_id, quantity).await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "Order placed successfully",
        "orderId": placed.order_id,
        "total_price": placed.total_price
    })))
}

/******************************************/
// Order summary of the logged in customer
/******************************************/
/**
 * @route   GET /orders/summary
 * @access  JWT Protected
 */
#[instrument(name = "Get order summary", skip(pool, customer), fields(customer_id = customer.0.id))]
pub async fn order_summary(
    pool: web::Data<PgPool>,
    customer: AuthenticatedCustomer,
) -> Result<HttpResponse, CustomError> {
    let summary = order_engine::summarize(&pool, customer.0.id).await?;
    Ok(HttpResponse::Ok().json(summary))
}
