// src/handlers/auth.rs

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::Utc;
use serde_json::json;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::user::{LoginRequest, RegisterRequest, User, UserBody},
    utils::{
        hash::{hash_password, verify_password},
        jwt::{Claims, sign_jwt},
    },
};

/// Registers a new user account.
///
/// Hashes the password using Argon2 before storing it, lowercases the email
/// and returns 201 Created with the user (excluding the credential hash)
/// and a signed token.
pub async fn register(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let email = payload.email.trim().to_lowercase();
    let hashed_password = hash_password(&payload.password)?;
    let now = Utc::now();

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (name, email, password, phone_number, avatar, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
        RETURNING id, name, email, password, phone_number, avatar, created_at, updated_at
        "#,
    )
    .bind(payload.name.trim())
    .bind(&email)
    .bind(&hashed_password)
    .bind(&payload.phone_number)
    .bind(&payload.avatar)
    .bind(now)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        let duplicate = e
            .as_database_error()
            .map(|db| db.is_unique_violation())
            .unwrap_or(false);
        if duplicate {
            AppError::Conflict("Email already registered".to_string())
        } else {
            tracing::error!("Failed to register user: {:?}", e);
            AppError::from(e)
        }
    })?;

    let token = sign_jwt(user.id, &user.email, &config.jwt_secret, config.jwt_expiration)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "user": UserBody::from(user),
            "token": token,
        })),
    ))
}

/// Authenticates a user and returns a JWT token.
///
/// Verifies the email and password against the database. The same 401 is
/// returned for an unknown email and a wrong password.
pub async fn login(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(|_| AppError::Validation {
        message: "Invalid credentials".to_string(),
        details: None,
    })?;

    let email = payload.email.trim().to_lowercase();

    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, password, phone_number, avatar, created_at, updated_at
        FROM users
        WHERE email = ?1
        "#,
    )
    .bind(&email)
    .fetch_optional(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Login DB error: {:?}", e);
        AppError::Internal(e.to_string())
    })?;

    let user = user.ok_or(AppError::InvalidCredentials)?;

    let is_valid = verify_password(&payload.password, &user.password)?;

    if !is_valid {
        return Err(AppError::InvalidCredentials);
    }

    let token = sign_jwt(user.id, &user.email, &config.jwt_secret, config.jwt_expiration)?;

    Ok(Json(json!({
        "user": UserBody::from(user),
        "token": token,
    })))
}

/// Get the current authenticated user's account.
pub async fn me(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;

    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, password, phone_number, avatar, created_at, updated_at
        FROM users
        WHERE id = ?1
        "#,
    )
    .bind(user_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("User not found".to_string()))?;

    Ok(Json(json!({ "user": UserBody::from(user) })))
}
