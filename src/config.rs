// src/config.rs

use std::env;

use dotenvy::dotenv;

use crate::grading::PassPolicy;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    /// Token lifetime in seconds.
    pub jwt_expiration: u64,
    pub rust_log: String,
    /// Threshold for marking a lesson completed. Applied both when grading a
    /// quiz submission and when re-validating a client-reported score.
    pub pass_policy: PassPolicy,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");

        let jwt_expiration = env::var("JWT_EXPIRATION")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(36_000);

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let pass_policy = env::var("PASS_POLICY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();

        Self {
            database_url,
            jwt_secret,
            jwt_expiration,
            rust_log,
            pass_policy,
        }
    }
}
