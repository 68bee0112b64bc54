use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::SecurityConfig;

/// The two token kinds. Each signs with its own secret and lifetime, so a
/// token issued as one variant never verifies as the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenVariant {
    Access,
    Refresh,
}

impl TokenVariant {
    fn secret<'a>(&self, security: &'a SecurityConfig) -> &'a str {
        match self {
            TokenVariant::Access => &security.access_token_secret,
            TokenVariant::Refresh => &security.refresh_token_secret,
        }
    }

    fn lifetime(&self) -> Duration {
        match self {
            TokenVariant::Access => Duration::hours(1),
            TokenVariant::Refresh => Duration::days(3),
        }
    }
}

/// Signed payload: the principal id plus its public contact. No secret
/// material ever goes in here.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub contact: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    fn new(variant: TokenVariant, user_id: Uuid, contact: String) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            contact,
            iat: now.timestamp(),
            exp: (now + variant.lifetime()).timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token secret not configured")]
    MissingSecret,

    #[error("Token generation error: {0}")]
    Signing(String),

    #[error("{0}")]
    Invalid(String),
}

/// Sign a token of the given variant for a principal.
pub fn issue(
    variant: TokenVariant,
    user_id: Uuid,
    contact: &str,
    security: &SecurityConfig,
) -> Result<String, TokenError> {
    let secret = variant.secret(security);
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let claims = Claims::new(variant, user_id, contact.to_string());
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| TokenError::Signing(e.to_string()))
}

/// Verify a token against the given variant's secret, rejecting on signature
/// mismatch or expiry.
pub fn verify(
    token: &str,
    variant: TokenVariant,
    security: &SecurityConfig,
) -> Result<Claims, TokenError> {
    let secret = variant.secret(security);
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| TokenError::Invalid(format!("Invalid token: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;

    #[test]
    fn access_token_round_trips() {
        let config = test_config();
        let id = Uuid::new_v4();
        let token = issue(TokenVariant::Access, id, "2250700000001", &config.security).unwrap();
        let claims = verify(&token, TokenVariant::Access, &config.security).unwrap();
        assert_eq!(claims.sub, id);
        assert_eq!(claims.contact, "2250700000001");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn variants_do_not_cross_verify() {
        let config = test_config();
        let id = Uuid::new_v4();
        let access = issue(TokenVariant::Access, id, "c", &config.security).unwrap();
        let refresh = issue(TokenVariant::Refresh, id, "c", &config.security).unwrap();

        assert!(matches!(
            verify(&access, TokenVariant::Refresh, &config.security),
            Err(TokenError::Invalid(_))
        ));
        assert!(matches!(
            verify(&refresh, TokenVariant::Access, &config.security),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn access_and_refresh_tokens_differ() {
        let config = test_config();
        let id = Uuid::new_v4();
        let access = issue(TokenVariant::Access, id, "c", &config.security).unwrap();
        let refresh = issue(TokenVariant::Refresh, id, "c", &config.security).unwrap();
        assert_ne!(access, refresh);
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = test_config();
        let claims = Claims {
            sub: Uuid::new_v4(),
            contact: "c".to_string(),
            iat: Utc::now().timestamp() - 7200,
            exp: Utc::now().timestamp() - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.security.access_token_secret.as_bytes()),
        )
        .unwrap();
        assert!(matches!(
            verify(&token, TokenVariant::Access, &config.security),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn empty_secret_is_rejected() {
        let mut config = test_config();
        config.security.access_token_secret.clear();
        assert!(matches!(
            issue(TokenVariant::Access, Uuid::new_v4(), "c", &config.security),
            Err(TokenError::MissingSecret)
        ));
    }
}
