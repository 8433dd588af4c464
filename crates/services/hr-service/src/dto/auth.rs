use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::rules::printable_ascii;

/// Self-registration. New accounts always get the `User` role.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(
        length(min = 3, max = 100, message = "Name must be 3-100 characters"),
        custom(function = "printable_ascii")
    )]
    #[schema(example = "Alice Doe")]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[validate(
        length(min = 8, max = 100, message = "Password must be 8-100 characters"),
        custom(function = "printable_ascii")
    )]
    #[schema(example = "password123")]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[validate(
        length(min = 8, max = 100, message = "Password must be 8-100 characters"),
        custom(function = "printable_ascii")
    )]
    #[schema(example = "password123")]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    /// Always `Bearer`
    pub token_type: String,
    /// Lifetime in seconds
    pub expires_in: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_rules() {
        let valid = RegisterRequest {
            name: "Alice Doe".to_string(),
            email: "alice@example.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(valid.validate().is_ok());

        let short = RegisterRequest {
            password: "short".to_string(),
            ..valid.clone()
        };
        assert!(short.validate().is_err());

        let bad_email = RegisterRequest {
            email: "alice".to_string(),
            ..valid
        };
        assert!(bad_email.validate().is_err());
    }
}
