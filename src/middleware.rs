use crate::auth_jwt::auth::{Claims, TokenService};
use crate::errors::custom::{AuthError, CustomError};
use actix_web::body::MessageBody;
use actix_web::dev::{Payload, ServiceRequest, ServiceResponse};
use actix_web::http::header::{HeaderMap, AUTHORIZATION};
use actix_web::{web, Error, FromRequest, HttpMessage, HttpRequest};
use actix_web_lab::middleware::Next;
use std::future::{ready, Ready};

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/******************************************/
// Bearer token guard for protected routes
/******************************************/
pub async fn jwt_auth_middleware(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let token_service = req
        .app_data::<web::Data<TokenService>>()
        .cloned()
        .ok_or_else(|| CustomError::AuthenticationError(AuthError::MissingSecret))?;

    let claims = {
        let token = bearer_token(req.headers())
            .ok_or(CustomError::AuthenticationError(AuthError::MissingToken))?;
        token_service.verify(token).map_err(|err| {
            tracing::debug!(error = %err, "Rejected bearer token");
            CustomError::AuthenticationError(err)
        })?
    };

    req.extensions_mut().insert(claims);
    next.call(req).await
}

/// Identity of the caller, placed in request extensions by
/// [`jwt_auth_middleware`].
#[derive(Debug, Clone)]
pub struct AuthenticatedCustomer(pub Claims);

impl FromRequest for AuthenticatedCustomer {
    type Error = CustomError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<Claims>()
                .cloned()
                .map(AuthenticatedCustomer)
                .ok_or(CustomError::AuthenticationError(AuthError::MissingToken)),
        )
    }
}
