use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const ROLE_MEMBER: &str = "MEMBER";
pub const ROLE_ADMIN: &str = "ADMIN";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,
    pub role: String,
    pub exp: i64,
}

impl Claims {
    pub fn new(member_id: Uuid, role: String) -> Self {
        Self {
            sub: member_id,
            role,
            exp: (Utc::now() + Duration::hours(8)).timestamp(),
        }
    }
}

pub fn encode_token(claims: &Claims, secret: &str) -> Result<String, String> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| format!("JWT encode failed: {e}"))
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| format!("JWT decode failed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_preserves_claims() {
        let id = Uuid::now_v7();
        let claims = Claims::new(id, ROLE_ADMIN.to_string());
        let token = encode_token(&claims, "secret-long-enough-for-tests").unwrap();
        let decoded = decode_token(&token, "secret-long-enough-for-tests").unwrap();
        assert_eq!(decoded.sub, id);
        assert_eq!(decoded.role, ROLE_ADMIN);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let claims = Claims::new(Uuid::now_v7(), ROLE_MEMBER.to_string());
        let token = encode_token(&claims, "secret-a").unwrap();
        assert!(decode_token(&token, "secret-b").is_err());
    }
}
