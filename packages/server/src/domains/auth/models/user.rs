use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

/// Credential record - SQL persistence layer
///
/// A username/password-hash/role triple. Rows are written by the seed
/// process at startup; the core only ever reads them.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct AppUser {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub role_name: String,
}

impl AppUser {
    /// Find a credential by username, joined with its role name
    pub async fn find_by_username(username: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT u.id, u.username, u.password_hash, r.name AS role_name
             FROM app_user u
             JOIN role r ON r.id = u.role_id
             WHERE u.username = $1",
        )
        .bind(username)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Insert or update a credential. Used by the startup seed process.
    pub async fn upsert(
        username: &str,
        password_hash: &str,
        role_name: &str,
        pool: &PgPool,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO app_user (id, username, password_hash, role_id)
             SELECT gen_random_uuid(), $1, $2, r.id FROM role r WHERE r.name = $3
             ON CONFLICT (username)
             DO UPDATE SET password_hash = EXCLUDED.password_hash, role_id = EXCLUDED.role_id",
        )
        .bind(username)
        .bind(password_hash)
        .bind(role_name)
        .execute(pool)
        .await?;
        Ok(())
    }
}
