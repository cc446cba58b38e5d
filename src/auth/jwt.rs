//! JWT token handling
//!
//! This module provides JWT token creation and verification.

use crate::auth::roles::SystemRole;
use crate::config::AuthConfig;
use crate::utils::error::{ApiError, Result};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};
use uuid::Uuid;

/// JWT handler for token operations
#[derive(Clone)]
pub struct JwtHandler {
    /// Encoding key for signing tokens
    encoding_key: EncodingKey,
    /// Decoding key for verifying tokens
    decoding_key: DecodingKey,
    /// JWT algorithm
    algorithm: Algorithm,
    /// Token expiration time in seconds
    expiration: u64,
    /// Token issuer
    issuer: String,
}

impl std::fmt::Debug for JwtHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtHandler")
            .field("algorithm", &self.algorithm)
            .field("expiration", &self.expiration)
            .field("issuer", &self.issuer)
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: Uuid,
    /// Issued at timestamp
    pub iat: u64,
    /// Expiration timestamp
    pub exp: u64,
    /// Issuer
    pub iss: String,
    /// Audience
    pub aud: String,
    /// JWT ID
    pub jti: String,
    /// System role
    pub role: SystemRole,
    /// Token type
    pub token_type: TokenType,
}

/// Token type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    /// Access token for API access
    Access,
    /// Refresh token for obtaining new access tokens
    Refresh,
}

/// Token pair (access + refresh)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Access token
    pub access_token: String,
    /// Refresh token
    pub refresh_token: String,
    /// Token type (always "Bearer")
    pub token_type: String,
    /// Expires in seconds
    pub expires_in: u64,
}

impl JwtHandler {
    /// Create a new JWT handler
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            expiration: config.jwt_expiration,
            issuer: "taskhub".to_string(),
        }
    }

    /// Create an access token for a user
    pub fn create_access_token(&self, user_id: Uuid, role: SystemRole) -> Result<String> {
        let now = Self::unix_now()?;

        let claims = Claims {
            sub: user_id,
            iat: now,
            exp: now + self.expiration,
            iss: self.issuer.clone(),
            aud: "api".to_string(),
            jti: Uuid::new_v4().to_string(),
            role,
            token_type: TokenType::Access,
        };

        let header = Header::new(self.algorithm);
        let token = encode(&header, &claims, &self.encoding_key).map_err(ApiError::Jwt)?;

        debug!("Created access token for user: {}", user_id);
        Ok(token)
    }

    /// Create a refresh token for a user
    pub fn create_refresh_token(&self, user_id: Uuid, role: SystemRole) -> Result<String> {
        let now = Self::unix_now()?;

        let claims = Claims {
            sub: user_id,
            iat: now,
            exp: now + (self.expiration * 24), // Refresh tokens last 24x longer
            iss: self.issuer.clone(),
            aud: "refresh".to_string(),
            jti: Uuid::new_v4().to_string(),
            role,
            token_type: TokenType::Refresh,
        };

        let header = Header::new(self.algorithm);
        let token = encode(&header, &claims, &self.encoding_key).map_err(ApiError::Jwt)?;

        debug!("Created refresh token for user: {}", user_id);
        Ok(token)
    }

    /// Create a token pair (access + refresh)
    pub fn create_token_pair(&self, user_id: Uuid, role: SystemRole) -> Result<TokenPair> {
        let access_token = self.create_access_token(user_id, role)?;
        let refresh_token = self.create_refresh_token(user_id, role)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: self.expiration,
        })
    }

    /// Verify and decode a token
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&["api", "refresh"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            warn!("JWT verification failed: {}", e);
            ApiError::Jwt(e)
        })?;

        debug!("Token verified for user: {}", token_data.claims.sub);
        Ok(token_data.claims)
    }

    /// Verify an access token and return its claims
    ///
    /// Refresh tokens are rejected here so they cannot be replayed as
    /// access tokens.
    pub fn verify_access_token(&self, token: &str) -> Result<Claims> {
        let claims = self.verify_token(token)?;

        if claims.token_type != TokenType::Access {
            return Err(ApiError::auth("Invalid token type for API access"));
        }

        Ok(claims)
    }

    /// Verify a refresh token and return its claims
    pub fn verify_refresh_token(&self, token: &str) -> Result<Claims> {
        let claims = self.verify_token(token)?;

        if claims.token_type != TokenType::Refresh {
            return Err(ApiError::auth("Invalid token type for refresh"));
        }

        Ok(claims)
    }

    fn unix_now() -> Result<u64> {
        Ok(SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| ApiError::internal(format!("System time error: {}", e)))?
            .as_secs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthConfig;

    fn handler() -> JwtHandler {
        JwtHandler::new(&AuthConfig {
            jwt_secret: "test-secret-for-unit-tests-only".to_string(),
            jwt_expiration: 3600,
        })
    }

    #[test]
    fn test_access_token_roundtrip() {
        let handler = handler();
        let user_id = Uuid::new_v4();

        let token = handler
            .create_access_token(user_id, SystemRole::User)
            .unwrap();
        let claims = handler.verify_access_token(&token).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, SystemRole::User);
        assert_eq!(claims.token_type, TokenType::Access);
    }

    #[test]
    fn test_refresh_token_rejected_as_access_token() {
        let handler = handler();
        let token = handler
            .create_refresh_token(Uuid::new_v4(), SystemRole::User)
            .unwrap();

        assert!(handler.verify_access_token(&token).is_err());
        assert!(handler.verify_refresh_token(&token).is_ok());
    }

    #[test]
    fn test_tampered_token_rejected() {
        let handler = handler();
        let token = handler
            .create_access_token(Uuid::new_v4(), SystemRole::Sysadmin)
            .unwrap();

        let mut tampered = token.clone();
        tampered.push('x');
        assert!(handler.verify_token(&tampered).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let handler = handler();
        let other = JwtHandler::new(&AuthConfig {
            jwt_secret: "a-different-secret-entirely".to_string(),
            jwt_expiration: 3600,
        });

        let token = handler
            .create_access_token(Uuid::new_v4(), SystemRole::User)
            .unwrap();
        assert!(other.verify_token(&token).is_err());
    }

    #[test]
    fn test_token_pair_shape() {
        let handler = handler();
        let pair = handler
            .create_token_pair(Uuid::new_v4(), SystemRole::User)
            .unwrap();

        assert_eq!(pair.token_type, "Bearer");
        assert_eq!(pair.expires_in, 3600);
        assert_ne!(pair.access_token, pair.refresh_token);
    }
}
