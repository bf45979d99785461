use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    /// Token lifetime in seconds. Fixed at startup, not per token.
    pub jwt_expiration_secs: i64,
    pub bcrypt_cost: u32,
    pub admin_username: String,
    /// When set, the admin account is (re)seeded at startup.
    pub admin_password: Option<String>,
    /// Empty list means any origin is allowed.
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_expiration_secs: env::var("JWT_EXPIRATION_SECS")
                .unwrap_or_else(|_| "86400".to_string())
                .parse()
                .context("JWT_EXPIRATION_SECS must be a valid number")?,
            bcrypt_cost: env::var("BCRYPT_COST")
                .map(|v| v.parse().context("BCRYPT_COST must be a valid number"))
                .unwrap_or(Ok(bcrypt::DEFAULT_COST))?,
            admin_username: env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string()),
            admin_password: env::var("ADMIN_PASSWORD").ok(),
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
        })
    }
}
