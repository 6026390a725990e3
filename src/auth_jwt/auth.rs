use crate::errors::custom::AuthError;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Lifetime of every session token, in seconds.
pub const TOKEN_TTL_SECS: i64 = 60 * 60;

pub fn token_ttl() -> Duration {
    Duration::seconds(TOKEN_TTL_SECS)
}

/// The minimal identity a token is issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: i32,
    pub username: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Claims {
    pub id: i32,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn identity(&self) -> Identity {
        Identity {
            id: self.id,
            username: self.username.clone(),
        }
    }
}

/// Issues and verifies HS256 session tokens with a secret loaded once at
/// startup. Verification never touches the database.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &str) -> Result<Self, AuthError> {
        if secret.trim().is_empty() {
            return Err(AuthError::MissingSecret);
        }
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is compared against the caller-supplied clock in `verify_at`.
        validation.validate_exp = false;
        validation.leeway = 0;
        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    pub fn issue(&self, identity: &Identity) -> Result<String, AuthError> {
        self.issue_at(identity, Utc::now())
    }

    pub fn issue_at(
        &self,
        identity: &Identity,
        issued_at: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let claims = Claims {
            id: identity.id,
            username: identity.username.clone(),
            iat: issued_at.timestamp(),
            exp: (issued_at + token_ttl()).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|err| AuthError::TokenCreationError(err.to_string()))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        self.verify_at(token, Utc::now())
    }

    /// A token is valid strictly before its `exp` second; at `exp` it is
    /// already expired.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, AuthError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|err| AuthError::InvalidToken(err.to_string()))?;

        if now.timestamp() >= token_data.claims.exp {
            return Err(AuthError::TokenExpired);
        }
        Ok(token_data.claims)
    }
}
