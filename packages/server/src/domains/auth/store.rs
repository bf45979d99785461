//! Credential store seam.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::domains::auth::models::AppUser;

/// Read-only lookup of credentials by username.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<AppUser>>;
}

/// Postgres-backed credential store.
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<AppUser>> {
        AppUser::find_by_username(username, &self.pool).await
    }
}
