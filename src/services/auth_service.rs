use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::AppError;

/// Name of the cookie carrying the session token.
pub const TOKEN_COOKIE: &str = "token";

/// Session tokens expire one hour after issuance.
pub const TOKEN_TTL_HOURS: i64 = 1;

// JWT Claims: whatever identity the client signed in with, plus timestamps
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub iat: usize,
    pub exp: usize,
    #[serde(flatten)]
    pub identity: Map<String, Value>,
}

impl Claims {
    pub fn email(&self) -> Option<&str> {
        self.identity.get("email").and_then(Value::as_str)
    }
}

/// Signs and verifies HS256 session tokens with the shared secret.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

/// Signing only fails on a broken key or claim set, never on client input.
fn signing_error(err: jsonwebtoken::errors::Error) -> AppError {
    AppError::InternalError(format!("Failed to generate token: {}", err))
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        Self::with_ttl(secret, Duration::hours(TOKEN_TTL_HOURS))
    }

    pub fn with_ttl(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn issue(&self, mut identity: Map<String, Value>) -> Result<String, AppError> {
        // Timestamps are ours to set
        identity.remove("iat");
        identity.remove("exp");

        let now = Utc::now();
        let claims = Claims {
            iat: now.timestamp().max(0) as usize,
            exp: (now + self.ttl).timestamp().max(0) as usize,
            identity,
        };

        encode(&Header::default(), &claims, &self.encoding).map_err(signing_error)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // The identity payload is arbitrary and may carry its own `aud`
        validation.validate_aud = false;

        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        Ok(data.claims)
    }
}
