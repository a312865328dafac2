//! Request identity supplied by the identity collaborator (JWT claims)

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;

/// Role carried in the token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Client,
    Provider,
    Admin,
}

/// JWT claims for an authenticated request
///
/// The booking core trusts this identity input and never reads ambient
/// session state; the claims are passed explicitly into every operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    /// Subject (login name)
    pub sub: String,
    /// Internal user id
    pub user_id: i32,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    // Authorization checks

    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.role == Role::Admin {
            Ok(())
        } else {
            Err(AppError::Authorization(
                "Administrator role required".to_string(),
            ))
        }
    }

    pub fn require_provider(&self) -> Result<(), AppError> {
        if self.role == Role::Provider {
            Ok(())
        } else {
            Err(AppError::Authorization("Provider role required".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trip() {
        let claims = UserClaims {
            sub: "alice".to_string(),
            user_id: 42,
            role: Role::Client,
            exp: chrono::Utc::now().timestamp() + 3600,
            iat: chrono::Utc::now().timestamp(),
        };
        let token = claims.create_token("secret").unwrap();
        let parsed = UserClaims::from_token(&token, "secret").unwrap();
        assert_eq!(parsed.user_id, 42);
        assert_eq!(parsed.role, Role::Client);
    }

    #[test]
    fn wrong_secret_rejected() {
        let claims = UserClaims {
            sub: "alice".to_string(),
            user_id: 42,
            role: Role::Admin,
            exp: chrono::Utc::now().timestamp() + 3600,
            iat: chrono::Utc::now().timestamp(),
        };
        let token = claims.create_token("secret").unwrap();
        assert!(UserClaims::from_token(&token, "other").is_err());
    }
}
