use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

use crate::{auth::repo::User, config::JwtConfig, error::ApiError};

/// Tokens are valid for a fixed 24 hours from issuance.
pub const TOKEN_VALIDITY: TimeDuration = TimeDuration::hours(24);

/// Identity claims carried by an issued token. Built per token, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: String,
    pub iat: usize,
    pub nbf: usize,
    pub exp: usize,
    pub iss: String,
    pub aud: String,
}

/// JWT signing and verification keys plus the issuer/audience tags.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    secret_empty: bool,
    issuer: String,
    audience: String,
}

impl JwtKeys {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            secret_empty: config.secret.is_empty(),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
        }
    }

    /// Sign a token for the given user with iat = nbf = now and
    /// exp = now + [`TOKEN_VALIDITY`].
    pub fn sign(&self, user: &User) -> Result<String, ApiError> {
        if self.secret_empty {
            return Err(ApiError::Signing(anyhow::anyhow!("signing secret is empty")));
        }
        let now = OffsetDateTime::now_utc();
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role.clone(),
            iat: now.unix_timestamp() as usize,
            nbf: now.unix_timestamp() as usize,
            exp: (now + TOKEN_VALIDITY).unix_timestamp() as usize,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| ApiError::Signing(e.into()))?;
        debug!(user_id = %user.id, "jwt signed");
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let mut validation = Validation::default();
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        debug!(user_id = %data.claims.sub, "jwt verified");
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_keys(secret: &str, issuer: &str, audience: &str) -> JwtKeys {
        JwtKeys::new(&JwtConfig {
            secret: secret.into(),
            issuer: issuer.into(),
            audience: audience.into(),
        })
    }

    fn make_user() -> User {
        let now = OffsetDateTime::now_utc();
        User {
            id: Uuid::new_v4(),
            email: "test@example.com".into(),
            password_hash: "irrelevant".into(),
            role: "user".into(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn sign_and_verify_roundtrip() {
        let keys = make_keys("dev-secret", "test-issuer", "test-aud");
        let user = make_user();
        let token = keys.sign(&user).expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, user.email);
        assert_eq!(claims.role, "user");
        assert_eq!(claims.iss, "test-issuer");
        assert_eq!(claims.aud, "test-aud");
    }

    #[test]
    fn expiry_is_exactly_24_hours_after_issuance() {
        let keys = make_keys("dev-secret", "iss", "aud");
        let token = keys.sign(&make_user()).expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
        assert_eq!(claims.nbf, claims.iat);
    }

    #[test]
    fn empty_secret_is_a_signing_failure() {
        let keys = make_keys("", "iss", "aud");
        let err = keys.sign(&make_user()).unwrap_err();
        assert!(matches!(err, ApiError::Signing(_)));
    }

    #[test]
    fn verify_rejects_wrong_issuer_or_audience() {
        let good = make_keys("same-secret", "good-iss", "good-aud");
        let bad = make_keys("same-secret", "bad-iss", "bad-aud");
        let token = good.sign(&make_user()).expect("sign");
        assert!(bad.verify(&token).is_err());
    }
}
