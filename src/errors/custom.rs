use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CustomError {
    #[error("Database Error: {0}")]
    DatabaseError(#[from] DbError),

    #[error("Blocking Error: {0}")]
    BlockingError(String),

    #[error("Hashing Error: {0}")]
    HashingError(String),

    #[error("Validation Error: {0}")]
    ValidationError(String),

    #[error("Conflict Error: {0}")]
    ConflictError(String),

    #[error("Not Found Error: {0}")]
    NotFoundError(String),

    #[error("Authentication Error: {0}")]
    AuthenticationError(#[from] AuthError),
}

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Connection Error: {0}")]
    ConnectionError(String),

    #[error("Query Error: {0}")]
    QueryBuilderError(String),

    #[error("Migration Error: {0}")]
    MigrationError(String),
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Missing bearer token")]
    MissingToken,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("Token creation failed: {0}")]
    TokenCreationError(String),

    #[error("Signing secret is not configured")]
    MissingSecret,
}

impl From<DieselError> for CustomError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                CustomError::ConflictError("Resource already exists".to_string())
            }
            other => CustomError::DatabaseError(DbError::QueryBuilderError(other.to_string())),
        }
    }
}

impl CustomError {
    /// Message that is safe to hand back to the caller. Server-side faults
    /// collapse into a generic string; the detail stays in the logs.
    pub fn client_message(&self) -> String {
        match self {
            CustomError::ValidationError(msg)
            | CustomError::ConflictError(msg)
            | CustomError::NotFoundError(msg) => msg.clone(),
            CustomError::AuthenticationError(AuthError::InvalidCredentials) => {
                AuthError::InvalidCredentials.to_string()
            }
            CustomError::AuthenticationError(AuthError::MissingToken) => {
                "Access denied. No token provided".to_string()
            }
            CustomError::AuthenticationError(
                AuthError::InvalidToken(_) | AuthError::TokenExpired,
            ) => "Invalid or expired token".to_string(),
            _ => "Server error".to_string(),
        }
    }
}

impl ResponseError for CustomError {
    fn status_code(&self) -> StatusCode {
        match self {
            CustomError::ValidationError(_) | CustomError::ConflictError(_) => {
                StatusCode::BAD_REQUEST
            }
            CustomError::NotFoundError(_) => StatusCode::NOT_FOUND,
            CustomError::AuthenticationError(err) => match err {
                AuthError::InvalidCredentials
                | AuthError::MissingToken
                | AuthError::InvalidToken(_)
                | AuthError::TokenExpired => StatusCode::UNAUTHORIZED,
                AuthError::TokenCreationError(_) | AuthError::MissingSecret => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            CustomError::DatabaseError(_)
            | CustomError::BlockingError(_)
            | CustomError::HashingError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        HttpResponse::build(status).json(json!({ "error": self.client_message() }))
    }
}
