use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tanam_domain::ID;
use tracing::debug;

/// Resolves the bearer token of a request to the authenticated user
pub trait ISessionResolver: Send + Sync {
    fn resolve(&self, token: &str) -> Option<ID>;
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Claims {
    exp: usize,      // Expiration time (as UTC timestamp)
    iat: usize,      // Issued at (as UTC timestamp)
    user_id: String, // Subject (whom token refers to)
}

/// Session tokens are HS256 signed json web tokens
pub struct JwtSessionResolver {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtSessionResolver {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// `issued_at` and `expires_at` are unix timestamps in seconds
    pub fn issue_token(
        &self,
        user_id: &ID,
        issued_at: usize,
        expires_at: usize,
    ) -> anyhow::Result<String> {
        let claims = Claims {
            exp: expires_at,
            iat: issued_at,
            user_id: user_id.as_string(),
        };
        Ok(encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )?)
    }

    fn decode_token(&self, token: &str) -> anyhow::Result<ID> {
        let claims = decode::<Claims>(
            token,
            &self.decoding_key,
            &Validation::new(Algorithm::HS256),
        )?
        .claims;
        Ok(claims.user_id.parse::<ID>()?)
    }
}

impl ISessionResolver for JwtSessionResolver {
    fn resolve(&self, token: &str) -> Option<ID> {
        match self.decode_token(token) {
            Ok(user_id) => Some(user_id),
            Err(e) => {
                debug!("Rejected session token: {:?}", e);
                None
            }
        }
    }
}
