use crate::helper::spawn_app;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use food_ordering::db_models::{MenuItem, Order, OrderStatus};
use food_ordering::routes::menu::seed::seed_menus;
use food_ordering::schema::{menus, orders};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::str::FromStr;

fn decimal_field(body: &Value, key: &str) -> Decimal {
    Decimal::from_str(body[key].as_str().expect("decimal field is a string")).unwrap()
}

fn menu_priced(seeded: &[MenuItem], price: Decimal) -> &MenuItem {
    seeded
        .iter()
        .find(|m| m.price == price)
        .expect("seed data has a menu at this price")
}

#[tokio::test]
async fn order_total_is_price_times_quantity() {
    let app = spawn_app().await;
    let seeded = seed_menus(&app.db_pool).await.unwrap();
    let boat_noodles = menu_priced(&seeded, Decimal::new(1999, 2));
    let token = app.login_test_user().await;

    let response = app
        .create_order(&json!({ "menu_id": boat_noodles.id, "quantity": 3 }), &token)
        .await;

    assert_eq!(response.status().as_u16(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Order placed successfully");
    assert_eq!(decimal_field(&body, "total_price"), Decimal::new(5997, 2));
    let order_id = body["orderId"].as_i64().expect("orderId missing") as i32;

    let mut conn = app.db_pool.get().await.unwrap();
    let stored: Order = orders::table
        .find(order_id)
        .select(Order::as_select())
        .first(&mut conn)
        .await
        .unwrap();
    assert_eq!(stored.customer_id, app.test_user.user_id);
    assert_eq!(stored.restaurant_id, boat_noodles.restaurant_id);
    assert_eq!(stored.quantity, 3);
    assert_eq!(stored.price, boat_noodles.price);
    assert_eq!(stored.total, Decimal::new(5997, 2));
    assert_eq!(stored.order_status, OrderStatus::Processing);
    drop(conn);
    app.cleanup().await;
}

#[tokio::test]
async fn later_price_changes_do_not_touch_existing_orders() {
    let app = spawn_app().await;
    let seeded = seed_menus(&app.db_pool).await.unwrap();
    let menu = menu_priced(&seeded, Decimal::new(1000, 2));
    let token = app.login_test_user().await;

    let response = app
        .create_order(&json!({ "menu_id": menu.id, "quantity": 2 }), &token)
        .await;
    assert_eq!(response.status().as_u16(), 201);
    let body: Value = response.json().await.unwrap();
    let order_id = body["orderId"].as_i64().unwrap() as i32;

    let mut conn = app.db_pool.get().await.unwrap();
    diesel::update(menus::table.find(menu.id))
        .set(menus::price.eq(Decimal::new(9900, 2)))
        .execute(&mut conn)
        .await
        .unwrap();
    let (price, total): (Decimal, Decimal) = orders::table
        .find(order_id)
        .select((orders::price, orders::total))
        .first(&mut conn)
        .await
        .unwrap();
    drop(conn);

    assert_eq!(price, Decimal::new(1000, 2));
    assert_eq!(total, Decimal::new(2000, 2));

    let response = app.get_authorized("/orders/summary", &token).await;
    let summary: Value = response.json().await.unwrap();
    assert_eq!(decimal_field(&summary, "total_amount"), Decimal::new(2000, 2));
    app.cleanup().await;
}

#[tokio::test]
async fn unknown_menu_returns_404_and_creates_nothing() {
    let app = spawn_app().await;
    seed_menus(&app.db_pool).await.unwrap();
    let token = app.login_test_user().await;

    let response = app
        .create_order(&json!({ "menu_id": 999_999, "quantity": 1 }), &token)
        .await;

    assert_eq!(response.status().as_u16(), 404);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Menu not found");

    let mut conn = app.db_pool.get().await.unwrap();
    let count: i64 = orders::table.count().get_result(&mut conn).await.unwrap();
    assert_eq!(count, 0);
    drop(conn);
    app.cleanup().await;
}

#[tokio::test]
async fn invalid_order_bodies_return_400() {
    let app = spawn_app().await;
    let seeded = seed_menus(&app.db_pool).await.unwrap();
    let token = app.login_test_user().await;
    let test_cases = vec![
        (json!({ "quantity": 1 }), "Missing menu_id or quantity"),
        (json!({ "menu_id": seeded[0].id }), "Missing menu_id or quantity"),
        (
            json!({ "menu_id": seeded[0].id, "quantity": 0 }),
            "Quantity must be a positive integer",
        ),
        (
            json!({ "menu_id": seeded[0].id, "quantity": -2 }),
            "Quantity must be a positive integer",
        ),
        (
            json!({ "menu_id": seeded[0].id, "quantity": "two" }),
            "Invalid JSON body",
        ),
    ];

    for (body, expected) in test_cases {
        let response = app.create_order(&body, &token).await;
        assert_eq!(response.status().as_u16(), 400, "payload {}", body);
        let error: Value = response.json().await.unwrap();
        assert_eq!(error["error"], expected, "payload {}", body);
    }
    app.cleanup().await;
}

#[tokio::test]
async fn total_beyond_the_stored_range_is_a_validation_error() {
    let app = spawn_app().await;
    let seeded = seed_menus(&app.db_pool).await.unwrap();
    let boat_noodles = menu_priced(&seeded, Decimal::new(1999, 2));
    let token = app.login_test_user().await;

    let response = app
        .create_order(
            &json!({ "menu_id": boat_noodles.id, "quantity": 1_000_000_000 }),
            &token,
        )
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Order total is out of range");

    let mut conn = app.db_pool.get().await.unwrap();
    let count: i64 = orders::table.count().get_result(&mut conn).await.unwrap();
    assert_eq!(count, 0);
    drop(conn);
    app.cleanup().await;
}

#[tokio::test]
async fn summary_without_orders_is_empty() {
    let app = spawn_app().await;
    let token = app.login_test_user().await;

    let response = app.get_authorized("/orders/summary", &token).await;

    assert_eq!(response.status().as_u16(), 200);
    let summary: Value = response.json().await.unwrap();
    assert_eq!(summary["customer_name"], "");
    assert_eq!(decimal_field(&summary, "total_amount"), Decimal::ZERO);
    app.cleanup().await;
}

#[tokio::test]
async fn summary_adds_up_order_totals() {
    let app = spawn_app().await;
    let seeded = seed_menus(&app.db_pool).await.unwrap();
    let ten = menu_priced(&seeded, Decimal::new(1000, 2));
    let fifteen = menu_priced(&seeded, Decimal::new(1500, 2));
    let token = app.login_test_user().await;

    for menu in [ten, fifteen] {
        let response = app
            .create_order(&json!({ "menu_id": menu.id, "quantity": 1 }), &token)
            .await;
        assert_eq!(response.status().as_u16(), 201);
    }

    let response = app.get_authorized("/orders/summary", &token).await;

    assert_eq!(response.status().as_u16(), 200);
    let summary: Value = response.json().await.unwrap();
    assert_eq!(summary["customer_name"], app.test_user.fullname.as_str());
    assert_eq!(decimal_field(&summary, "total_amount"), Decimal::new(25, 0));
    app.cleanup().await;
}

#[tokio::test]
async fn summaries_are_scoped_to_the_caller() {
    let app = spawn_app().await;
    let seeded = seed_menus(&app.db_pool).await.unwrap();
    let token = app.login_test_user().await;
    let response = app
        .create_order(&json!({ "menu_id": seeded[0].id, "quantity": 4 }), &token)
        .await;
    assert_eq!(response.status().as_u16(), 201);

    let response = app
        .register(&json!({
            "fullname": "Ploy Kaewmanee",
            "address": "3 Old Town, Phuket",
            "phone": "0822222222",
            "email": "ploy@example.com",
            "username": "ploy",
            "password": "mango-sticky-rice"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 201);
    let response = app
        .login(&json!({ "username": "ploy", "password": "mango-sticky-rice" }))
        .await;
    let body: Value = response.json().await.unwrap();
    let other_token = body["token"].as_str().unwrap();

    let response = app.get_authorized("/orders/summary", other_token).await;
    let summary: Value = response.json().await.unwrap();
    assert_eq!(summary["customer_name"], "");
    assert_eq!(decimal_field(&summary, "total_amount"), Decimal::ZERO);
    app.cleanup().await;
}
