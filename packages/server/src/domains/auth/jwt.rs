use anyhow::Result;
use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT Claims - data stored in the token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,  // Username
    pub role: String, // Role name, e.g. "ROLE_ADMIN"
    pub iat: i64,     // Issued at timestamp
    pub exp: i64,     // Expiration timestamp
}

/// JWT Service - creates and verifies JWT tokens
///
/// Symmetric HMAC-SHA256 signing with a single shared secret; issuer and
/// verifier are the same process. The TTL is fixed at construction.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl JwtService {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Issue a token for a username and role, expiring after the
    /// configured TTL.
    pub fn issue(&self, username: &str, role: &str) -> Result<String> {
        let now = chrono::Utc::now();
        let claims = Claims {
            sub: username.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(Into::into)
    }

    /// Whether a token verifies against the shared secret, is well
    /// formed and has not expired. Total over all string inputs; never
    /// panics.
    pub fn validate(&self, token: &str) -> bool {
        self.decode(token).is_ok()
    }

    /// Username claim of a token. Callers that skip [`validate`] get an
    /// error here for anything malformed.
    ///
    /// [`validate`]: JwtService::validate
    pub fn subject_of(&self, token: &str) -> Result<String> {
        Ok(self.decode(token)?.sub)
    }

    /// Role claim of a token.
    pub fn role_of(&self, token: &str) -> Result<String> {
        Ok(self.decode(token)?.role)
    }

    fn decode(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is exact; no clock leeway.
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(Into::into)
    }
}
