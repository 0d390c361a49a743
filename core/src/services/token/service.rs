//! HS256 token authority implementation

use chrono::Duration;
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::session::{AuthToken, TokenId};
use crate::errors::{DomainError, ValidationError};
use crate::services::clock::{Clock, SystemClock};

use super::config::TokenAuthorityConfig;

/// Issues and verifies auth tokens
pub trait TokenAuthority: Send + Sync {
    /// Issue a token valid for `expiry`
    ///
    /// # Returns
    /// * `Ok((AuthToken, TokenId))` - The signed token and the id it carries
    /// * `Err(DomainError::Internal)` - Signing failed
    fn issue(&self, expiry: Duration) -> Result<(AuthToken, TokenId), DomainError>;

    /// Verify a token and extract its id
    ///
    /// # Returns
    /// * `Ok(TokenId)` - Signature, algorithm and expiry check out
    /// * `Err(ValidationError::InvalidToken)` - Malformed, forged or wrong algorithm
    /// * `Err(ValidationError::ExpiredToken)` - Past its `exp` claim
    fn parse(&self, token: &AuthToken) -> Result<TokenId, DomainError>;
}

/// Source of fresh token ids
pub trait TokenIdGenerator: Send + Sync {
    fn generate(&self) -> TokenId;
}

/// Random UUIDv4 token ids
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidTokenIdGenerator;

impl TokenIdGenerator for UuidTokenIdGenerator {
    fn generate(&self) -> TokenId {
        TokenId::new_v4()
    }
}

/// JWT claims carried by an auth token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Token id
    pub sub: String,
    /// Expiry, seconds since the epoch
    pub exp: i64,
    /// Issue time, seconds since the epoch
    pub iat: i64,
}

/// Token authority signing HS256 JWTs with a server-held secret
pub struct JwtTokenAuthority {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn TokenIdGenerator>,
}

impl JwtTokenAuthority {
    /// Creates a token authority using the system clock and random ids
    pub fn new(config: TokenAuthorityConfig) -> Self {
        Self::with_sources(config, Arc::new(SystemClock), Arc::new(UuidTokenIdGenerator))
    }

    /// Creates a token authority with an explicit clock and id generator
    ///
    /// # Arguments
    ///
    /// * `config` - Signing secret and leeway
    /// * `clock` - Time source for `iat`/`exp` and the explicit expiry check
    /// * `ids` - Token id generator
    pub fn with_sources(
        config: TokenAuthorityConfig,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn TokenIdGenerator>,
    ) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.leeway_seconds;
        validation.validate_exp = true;

        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            clock,
            ids,
        }
    }
}

impl TokenAuthority for JwtTokenAuthority {
    fn issue(&self, expiry: Duration) -> Result<(AuthToken, TokenId), DomainError> {
        let token_id = self.ids.generate();
        let now = self.clock.now();
        let claims = TokenClaims {
            sub: token_id.to_string(),
            exp: (now + expiry).timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to sign token: {}", e)))?;

        Ok((AuthToken::new(token), token_id))
    }

    fn parse(&self, token: &AuthToken) -> Result<TokenId, DomainError> {
        let data = decode::<TokenClaims>(token.as_str(), &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => ValidationError::ExpiredToken,
                _ => ValidationError::InvalidToken,
            })?;

        let leeway = i64::try_from(self.validation.leeway).unwrap_or(i64::MAX);
        if data.claims.exp.saturating_add(leeway) <= self.clock.now().timestamp() {
            return Err(ValidationError::ExpiredToken.into());
        }

        let id = Uuid::parse_str(&data.claims.sub).map_err(|_| ValidationError::InvalidToken)?;
        Ok(TokenId::from(id))
    }
}
