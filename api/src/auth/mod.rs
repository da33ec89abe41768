pub mod claims;
pub mod extractors;
pub mod guards;
pub mod middleware;

pub use claims::{AuthUser, Claims};

use chrono::{Duration, Utc};
use common::config;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

/// Generates a JWT and its expiry timestamp for a given user.
pub fn generate_jwt(user_id: i64) -> (String, String) {
    let expiry = Utc::now() + Duration::minutes(config::jwt_duration_minutes() as i64);
    let claims = Claims {
        sub: user_id,
        exp: expiry.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config::jwt_secret().as_bytes()),
    )
    .expect("Token encoding failed");

    (token, expiry.to_rfc3339())
}

/// Verifies a bearer token and returns its claims.
///
/// Verification happens on every call; results are never cached between
/// requests.
pub fn decode_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config::jwt_secret().as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
}
