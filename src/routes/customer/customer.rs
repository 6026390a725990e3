use super::credential_store;
use crate::auth_jwt::auth::TokenService;
use crate::db::PgPool;
use crate::errors::custom::CustomError;
use crate::middleware::AuthenticatedCustomer;
use crate::validations::customer::NewCustomer;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

#[derive(Deserialize)]
pub struct CreateCustomerBody {
    fullname: Option<String>,
    address: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    pub username: Option<String>,
    password: Option<String>,
}

impl CreateCustomerBody {
    pub fn validate(self) -> Result<NewCustomer, String> {
        NewCustomer::parse(
            self.fullname,
            self.address,
            self.phone,
            self.email,
            self.username,
            self.password,
        )
    }
}

#[derive(Deserialize)]
pub struct LoginCustomerBody {
    pub username: Option<String>,
    pub password: Option<String>,
}

/******************************************/
// Registering Customer Route
/******************************************/
/**
 * @route   POST /auth/register
 * @access  Public
 */
#[instrument(
    name = "Register a new customer",
    skip(req_user, pool),
    fields(username = ?req_user.username)
)]
pub async fn register_customer(
    pool: web::Data<PgPool>,
    req_user: web::Json<CreateCustomerBody>,
) -> Result<HttpResponse, CustomError> {
    let new_customer = req_user
        .into_inner()
        .validate()
        .map_err(CustomError::ValidationError)?;

    let user_id = credential_store::register(&pool, new_customer).await?;
    tracing::info!(user_id, "Customer registered");
    Ok(HttpResponse::Created().json(json!({
        "message": "User registered successfully",
        "userId": user_id
    })))
}

/******************************************/
// Login Route
/******************************************/
/**
 * @route   POST /auth/login
 * @access  Public
 */
#[instrument(
    name = "Login a customer",
    skip(req_login, pool, token_service),
    fields(username = ?req_login.username)
)]
pub async fn login_customer(
    pool: web::Data<PgPool>,
    token_service: web::Data<TokenService>,
    req_login: web::Json<LoginCustomerBody>,
) -> Result<HttpResponse, CustomError> {
    let LoginCustomerBody { username, password } = req_login.into_inner();
    let (Some(username), Some(password)) = (
        username.filter(|u| !u.trim().is_empty()),
        password.filter(|p| !p.is_empty()),
    ) else {
        return Err(CustomError::ValidationError(
            "Missing username or password".to_string(),
        ));
    };

    let identity = credential_store::authenticate(&pool, &username, password).await?;
    let token = token_service.issue(&identity)?;
    Ok(HttpResponse::Ok().json(json!({ "token": token })))
}

/******************************************/
// Profile Route
/******************************************/
/**
 * @route   GET /profile
 * @access  JWT Protected
 */
#[instrument(name = "Get profile", skip(customer), fields(customer_id = customer.0.id))]
pub async fn profile(customer: AuthenticatedCustomer) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "message": "Welcome!",
        "user": customer.0
    }))
}

/******************************************/
// Customer Listing Route
/******************************************/
/**
 * @route   GET /customers
 * @access  JWT Protected
 */
#[instrument(name = "List customers", skip(pool, customer), fields(customer_id = customer.0.id))]
pub async fn list_customers(
    pool: web::Data<PgPool>,
    customer: AuthenticatedCustomer,
) -> Result<HttpResponse, CustomError> {
    let rows = credential_store::list_customers(&pool).await?;
    Ok(HttpResponse::Ok().json(rows))
}
