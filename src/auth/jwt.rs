use crate::entities::user;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Token payload. Besides the standard identity claims the token is
/// enriched with the profile fields the frontend renders without a
/// follow-up request. Optional fields are carried as null, never omitted.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id
    pub exp: i64,
    pub iat: i64,
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub picture: Option<String>,
    pub presentation: Option<String>,
    pub email: String,
}

impl Claims {
    pub fn for_user(user: &user::Model, expiration_hours: i64) -> Self {
        let now = Utc::now();
        Claims {
            sub: user.id.to_string(),
            exp: (now + Duration::hours(expiration_hours)).timestamp(),
            iat: now.timestamp(),
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            picture: user.picture.clone(),
            presentation: user.presentation.clone(),
            email: user.email.clone(),
        }
    }
}

pub fn create_token(claims: &Claims, secret: &str) -> Result<String, anyhow::Error> {
    let token = encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )?;
    Ok(token)
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, anyhow::Error> {
    let validation = Validation::default();
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &validation,
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bare_user() -> user::Model {
        user::Model {
            id: 7,
            email: "ada@example.com".to_string(),
            roles: json!([]),
            password: "$2b$12$hash".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            slug: "ada-lovelace-42".to_string(),
            picture: None,
            presentation: None,
        }
    }

    #[test]
    fn claims_carry_profile_fields() {
        let mut user = bare_user();
        user.picture = Some("avatars/ada.png".to_string());
        user.presentation = Some("I write programs for engines.".to_string());

        let claims = Claims::for_user(&user, 24);
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.id, 7);
        assert_eq!(claims.first_name, "Ada");
        assert_eq!(claims.last_name, "Lovelace");
        assert_eq!(claims.email, "ada@example.com");
        assert_eq!(claims.picture.as_deref(), Some("avatars/ada.png"));
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn absent_optional_fields_serialize_as_null() {
        let claims = Claims::for_user(&bare_user(), 24);
        let value = serde_json::to_value(&claims).unwrap();
        assert!(value.get("picture").unwrap().is_null());
        assert!(value.get("presentation").unwrap().is_null());
    }

    #[test]
    fn token_roundtrip_preserves_claims() {
        let claims = Claims::for_user(&bare_user(), 24);
        let token = create_token(&claims, "test-secret").unwrap();
        let decoded = verify_token(&token, "test-secret").unwrap();
        assert_eq!(decoded.id, claims.id);
        assert_eq!(decoded.email, claims.email);
        assert!(verify_token(&token, "other-secret").is_err());
    }
}
