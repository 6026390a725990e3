use crate::auth_jwt::auth::Identity;
use crate::db::PgPool;
use crate::db_models::{CustomerProfile, NewCustomerRow};
use crate::errors::custom::{AuthError, CustomError, DbError};
use crate::schema::customers::dsl::*;
use crate::validations::customer::NewCustomer;
use actix_web::web;
use argon2::{password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::instrument;

const USERNAME_TAKEN: &str = "Username already exists";

// Verified against when the username is unknown, so a miss costs the same
// as a wrong password.
const FALLBACK_PASSWORD_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$gZiV/M1gPc22ElAH/Jh1Hw$CWOrkoo7oJBQ/iyh7uJ0LO2aLEfrHwTWllSAxT0zRno";

fn generate_random_salt() -> SaltString {
    let mut rng = rand::thread_rng();
    SaltString::generate(&mut rng)
}

pub fn hash_password(candidate: &str) -> Result<String, CustomError> {
    let salt = generate_random_salt();
    Argon2::default()
        .hash_password(candidate.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| CustomError::HashingError(err.to_string()))
}

#[instrument(name = "Verify password", skip(expected_hash, candidate))]
pub fn verify_password(expected_hash: &str, candidate: &str) -> Result<bool, CustomError> {
    let password_hashed = PasswordHash::new(expected_hash)
        .map_err(|err| CustomError::HashingError(err.to_string()))?;

    Ok(Argon2::default()
        .verify_password(candidate.as_bytes(), &password_hashed)
        .is_ok())
}

#[instrument(name = "Check username exists", skip(pool))]
async fn username_exists(pool: &PgPool, user_name: &str) -> Result<bool, CustomError> {
    let mut conn = pool
        .get()
        .await
        .map_err(|err| DbError::ConnectionError(err.to_string()))?;
    let found = diesel::select(exists(customers.filter(username.eq(user_name))))
        .get_result::<bool>(&mut conn)
        .await?;
    Ok(found)
}

/******************************************/
// Registering a customer
/******************************************/
#[instrument(
    name = "Store new customer",
    skip(pool, new_customer),
    fields(username = %new_customer.username.as_ref())
)]
pub async fn register(pool: &PgPool, new_customer: NewCustomer) -> Result<i32, CustomError> {
    if username_exists(pool, new_customer.username.as_ref()).await? {
        return Err(CustomError::ConflictError(USERNAME_TAKEN.to_string()));
    }

    let password = new_customer.password.clone();
    let password_hashed = web::block(move || hash_password(&password))
        .await
        .map_err(|err| CustomError::BlockingError(err.to_string()))??;

    let mut conn = pool
        .get()
        .await
        .map_err(|err| DbError::ConnectionError(err.to_string()))?;
    let row = NewCustomerRow {
        fullname: new_customer.fullname.as_ref(),
        address: new_customer.address.as_ref(),
        phone: new_customer.phone.as_ref(),
        email: new_customer.email.as_ref(),
        username: new_customer.username.as_ref(),
        password_hash: &password_hashed,
    };

    // The unique constraint settles concurrent registrations of one name.
    diesel::insert_into(customers)
        .values(&row)
        .returning(id)
        .get_result::<i32>(&mut conn)
        .await
        .map_err(registration_insert_error)
}

/// The only unique column on `customers` is `username`.
fn registration_insert_error(err: diesel::result::Error) -> CustomError {
    match CustomError::from(err) {
        CustomError::ConflictError(_) => CustomError::ConflictError(USERNAME_TAKEN.to_string()),
        other => other,
    }
}

#[instrument(name = "Get stored credentials", skip(pool))]
async fn get_stored_credentials(
    pool: &PgPool,
    user_name: &str,
) -> Result<Option<(i32, String, String)>, CustomError> {
    let mut conn = pool
        .get()
        .await
        .map_err(|err| DbError::ConnectionError(err.to_string()))?;

    let row = customers
        .filter(username.eq(user_name))
        .select((id, username, password_hash))
        .first::<(i32, String, String)>(&mut conn)
        .await
        .optional()?;
    Ok(row)
}

/******************************************/
// Authenticating a customer
/******************************************/
#[instrument(name = "Validate credentials", skip(pool, password))]
pub async fn authenticate(
    pool: &PgPool,
    user_name: &str,
    password: String,
) -> Result<Identity, CustomError> {
    let stored = get_stored_credentials(pool, user_name).await?;

    let expected_hash = stored
        .as_ref()
        .map(|(_, _, hash)| hash.clone())
        .unwrap_or_else(|| FALLBACK_PASSWORD_HASH.to_string());
    let is_valid = web::block(move || verify_password(&expected_hash, &password))
        .await
        .map_err(|err| CustomError::BlockingError(err.to_string()))??;

    match stored {
        Some((user_id, stored_username, _)) if is_valid => Ok(Identity {
            id: user_id,
            username: stored_username,
        }),
        _ => Err(CustomError::AuthenticationError(AuthError::InvalidCredentials)),
    }
}

/******************************************/
// Listing customers (no credentials)
/******************************************/
#[instrument(name = "List customers", skip(pool))]
pub async fn list_customers(pool: &PgPool) -> Result<Vec<CustomerProfile>, CustomError> {
    let mut conn = pool
        .get()
        .await
        .map_err(|err| DbError::ConnectionError(err.to_string()))?;
    let rows = customers
        .select(CustomerProfile::as_select())
        .order(id.asc())
        .load(&mut conn)
        .await?;
    Ok(rows)
}
