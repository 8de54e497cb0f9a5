//! JWT verification for protected resources.
//!
//! Tokens are issued elsewhere; this side only checks the HS256 signature
//! and expiry and turns the claims into a `Principal`.

use axum::http::HeaderMap;
use hrms_core::{bearer_token, Authenticator, Principal, ServiceError};
use jsonwebtoken::{DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// JWT claims: what's inside the token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: user ID.
    pub sub: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Issued at (unix timestamp).
    pub iat: i64,
    /// Expiration (unix timestamp).
    pub exp: i64,
}

pub struct JwtAuthenticator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtAuthenticator {
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::default(),
        }
    }

    pub fn verify(&self, token: &str) -> Result<Claims, ServiceError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| ServiceError::Unauthorized(format!("invalid token: {}", e)))
    }
}

impl Authenticator for JwtAuthenticator {
    fn authenticate(&self, headers: &HeaderMap) -> Result<Principal, ServiceError> {
        let token = bearer_token(headers)
            .ok_or_else(|| ServiceError::Unauthorized("missing authorization token".into()))?;
        let claims = self.verify(token)?;
        Ok(Principal::new(claims.sub, claims.name))
    }
}
