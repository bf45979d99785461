//! Member store seam.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::pagination::PageRequest;
use crate::domains::member::models::{Member, NewMember};

/// Persistence operations for member records. Each call is a single
/// store statement; atomicity within one call is the store's job.
#[async_trait]
pub trait MemberStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Member>>;

    /// One page of members plus the total matching count.
    async fn find_page(
        &self,
        req: &PageRequest,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Result<(Vec<Member>, i64)>;

    async fn exists_by_id(&self, id: Uuid) -> Result<bool>;

    async fn exists_by_email(&self, email: &str) -> Result<bool>;

    async fn insert(&self, new: NewMember) -> Result<Member>;

    async fn update(&self, member: &Member) -> Result<Member>;

    async fn delete(&self, id: Uuid) -> Result<bool>;

    /// Connectivity probe for the health endpoint.
    async fn ping(&self) -> Result<()>;
}

/// Postgres-backed member store.
pub struct PgMemberStore {
    pool: PgPool,
}

impl PgMemberStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberStore for PgMemberStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Member>> {
        Member::find_by_id(id, &self.pool).await
    }

    async fn find_page(
        &self,
        req: &PageRequest,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Result<(Vec<Member>, i64)> {
        Member::find_page(req, first_name, last_name, &self.pool).await
    }

    async fn exists_by_id(&self, id: Uuid) -> Result<bool> {
        Member::exists_by_id(id, &self.pool).await
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool> {
        Member::exists_by_email(email, &self.pool).await
    }

    async fn insert(&self, new: NewMember) -> Result<Member> {
        Member::insert(&new, &self.pool).await
    }

    async fn update(&self, member: &Member) -> Result<Member> {
        member.update(&self.pool).await
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        Member::delete(id, &self.pool).await
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
