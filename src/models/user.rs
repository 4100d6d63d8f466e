// src/models/user.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use url::Url;
use validator::Validate;

/// Represents the 'users' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,

    pub name: String,

    /// Stored lowercased; unique index enforced.
    pub email: String,

    /// Argon2 password hash.
    /// Skipped during serialization to prevent leaking sensitive data.
    #[serde(skip)]
    pub password: String,

    pub phone_number: String,

    /// Optional avatar URL.
    pub avatar: Option<String>,

    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Wire shape of a user account (never includes the credential hash).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBody {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub avatar: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserBody {
    fn from(user: User) -> Self {
        UserBody {
            id: user.id,
            name: user.name,
            email: user.email,
            phone_number: user.phone_number,
            avatar: user.avatar,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user (Registration).
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(
        min = 2,
        max = 100,
        message = "Name length must be between 2 and 100 characters."
    ))]
    pub name: String,

    #[validate(email(message = "Please enter a valid email address."))]
    pub email: String,

    #[validate(
        length(
            min = 8,
            max = 128,
            message = "Password length must be between 8 and 128 characters."
        ),
        custom(function = validate_password_strength)
    )]
    pub password: String,

    #[validate(length(
        min = 10,
        max = 15,
        message = "Phone number length must be between 10 and 15 characters."
    ))]
    pub phone_number: String,

    #[validate(custom(function = validate_avatar_url))]
    pub avatar: Option<String>,
}

/// DTO for user login.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Passwords must mix at least one lowercase letter, one uppercase letter
/// and one digit.
fn validate_password_strength(password: &str) -> Result<(), validator::ValidationError> {
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !(has_lower && has_upper && has_digit) {
        return Err(validator::ValidationError::new("password_too_weak"));
    }
    Ok(())
}

/// Validates that the avatar, when present, is a correctly formatted URL.
fn validate_avatar_url(avatar: &str) -> Result<(), validator::ValidationError> {
    if avatar.len() > 500 || Url::parse(avatar).is_err() {
        return Err(validator::ValidationError::new("invalid_url"));
    }
    Ok(())
}
