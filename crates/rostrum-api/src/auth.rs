//! JWT-based bearer authentication
//!
//! The orchestrator never sees the raw credential: middleware resolves the
//! token to a stable numeric user id (creating the user row on first sight)
//! and hands that id to the handlers.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// JWT claims for API authentication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the stable auth identity (maps to `users.auth_id`)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Issuer
    pub iss: String,
}

impl Claims {
    /// Create new claims for a user identity.
    pub fn for_subject(sub: &str, expires_in: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: sub.to_string(),
            exp: (now + expires_in).timestamp(),
            iat: now.timestamp(),
            iss: "rostrum-api".to_string(),
        }
    }
}

/// The resolved request identity: a row in the users table.
#[derive(Debug, Clone, Copy)]
pub struct AuthedUser(pub i64);

/// JWT authentication handler
#[derive(Clone)]
pub struct JwtAuth {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtAuth {
    /// Create new JWT auth with a shared secret.
    pub fn new(secret: &str) -> Self {
        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::default();
        validation.set_issuer(&["rostrum-api"]);
        validation.validate_exp = true;

        Self {
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Create from environment (required in production).
    pub fn from_env() -> Result<Self, ApiError> {
        let secret = std::env::var("ROSTRUM_JWT_SECRET").map_err(|_| {
            ApiError::Internal(
                "ROSTRUM_JWT_SECRET environment variable is required. \
                 Generate with: openssl rand -base64 32"
                    .to_string(),
            )
        })?;

        if secret.len() < 32 {
            return Err(ApiError::Internal(
                "ROSTRUM_JWT_SECRET must be at least 32 characters".to_string(),
            ));
        }

        Ok(Self::new(&secret))
    }

    /// Generate a token for claims.
    pub fn encode(&self, claims: &Claims) -> Result<String, ApiError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| ApiError::Internal(format!("JWT encoding error: {}", e)))
    }

    /// Validate and decode a token.
    pub fn decode(&self, token: &str) -> Result<Claims, ApiError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    ApiError::unauthorized("token_expired", "Token is expired.")
                }
                _ => ApiError::unauthorized(
                    "invalid_token",
                    "Unable to validate authentication token.",
                ),
            })
    }

    /// Extract the token from an `Authorization: Bearer <token>` header.
    pub fn extract_from_header(header: &str) -> Result<&str, ApiError> {
        let mut parts = header.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => {
                Ok(token)
            }
            _ => Err(ApiError::unauthorized(
                "invalid_header",
                "Authorization header must be 'Bearer token'.",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth() -> JwtAuth {
        JwtAuth::new("unit-test-secret-at-least-32-chars!!")
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let auth = auth();
        let claims = Claims::for_subject("auth0|alice", Duration::hours(1));
        let token = auth.encode(&claims).unwrap();

        let decoded = auth.decode(&token).unwrap();
        assert_eq!(decoded.sub, "auth0|alice");
        assert_eq!(decoded.iss, "rostrum-api");
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let auth = auth();
        let claims = Claims::for_subject("auth0|alice", Duration::seconds(-300));
        let token = auth.encode(&claims).unwrap();

        let err = auth.decode(&token).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized { ref code, .. } if code == "token_expired"));
    }

    #[test]
    fn test_header_extraction() {
        assert_eq!(JwtAuth::extract_from_header("Bearer abc").unwrap(), "abc");
        assert_eq!(JwtAuth::extract_from_header("bearer abc").unwrap(), "abc");
        assert!(JwtAuth::extract_from_header("Basic abc").is_err());
        assert!(JwtAuth::extract_from_header("Bearer").is_err());
        assert!(JwtAuth::extract_from_header("Bearer a b").is_err());
    }
}
