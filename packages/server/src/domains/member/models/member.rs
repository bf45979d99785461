use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::pagination::PageRequest;

/// Member model - SQL persistence layer
#[derive(sqlx::FromRow, Debug, Clone, PartialEq)]
pub struct Member {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field values for a member about to be inserted. The store assigns
/// the id and both timestamps.
#[derive(Debug, Clone)]
pub struct NewMember {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub email: String,
}

/// Map an API sort field to its column. Unknown fields pass through
/// verbatim and are rejected by the database, not here.
fn sort_column(sort: &str) -> &str {
    match sort {
        "id" => "id",
        "firstName" => "first_name",
        "lastName" => "last_name",
        "dateOfBirth" => "date_of_birth",
        "email" => "email",
        "createdAt" => "created_at",
        "updatedAt" => "updated_at",
        other => other,
    }
}

impl Member {
    /// Find member by ID
    pub async fn find_by_id(id: Uuid, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM member WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn exists_by_id(id: Uuid, pool: &PgPool) -> Result<bool> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM member WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn exists_by_email(email: &str, pool: &PgPool) -> Result<bool> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM member WHERE email = $1)")
            .bind(email)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }

    /// Fetch one page of members plus the total matching count.
    ///
    /// When either name filter is given, matches are a case-insensitive
    /// substring test on first name OR last name, with the missing
    /// filter standing in as the empty string (which matches every
    /// row). With no filters, all members are returned.
    pub async fn find_page(
        req: &PageRequest,
        first_name: Option<&str>,
        last_name: Option<&str>,
        pool: &PgPool,
    ) -> Result<(Vec<Self>, i64)> {
        let order = format!("{} {}", sort_column(&req.sort), req.direction);

        if first_name.is_some() || last_name.is_some() {
            let first = first_name.unwrap_or("");
            let last = last_name.unwrap_or("");

            let rows = sqlx::query_as::<_, Self>(&format!(
                "SELECT * FROM member
                 WHERE first_name ILIKE '%' || $1 || '%' OR last_name ILIKE '%' || $2 || '%'
                 ORDER BY {order}
                 LIMIT $3 OFFSET $4"
            ))
            .bind(first)
            .bind(last)
            .bind(req.size)
            .bind(req.offset())
            .fetch_all(pool)
            .await?;

            let total: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM member
                 WHERE first_name ILIKE '%' || $1 || '%' OR last_name ILIKE '%' || $2 || '%'",
            )
            .bind(first)
            .bind(last)
            .fetch_one(pool)
            .await?;

            Ok((rows, total))
        } else {
            let rows = sqlx::query_as::<_, Self>(&format!(
                "SELECT * FROM member ORDER BY {order} LIMIT $1 OFFSET $2"
            ))
            .bind(req.size)
            .bind(req.offset())
            .fetch_all(pool)
            .await?;

            let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM member")
                .fetch_one(pool)
                .await?;

            Ok((rows, total))
        }
    }

    /// Insert a new member. The unique index on email is the last line
    /// of defense behind the service-level pre-check.
    pub async fn insert(new: &NewMember, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO member (id, first_name, last_name, date_of_birth, email, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, now(), now())
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(new.date_of_birth)
        .bind(&new.email)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Persist field changes; `updated_at` is reset by the statement,
    /// `id` and `created_at` never change.
    pub async fn update(&self, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE member
             SET first_name = $2, last_name = $3, date_of_birth = $4, email = $5, updated_at = now()
             WHERE id = $1
             RETURNING *",
        )
        .bind(self.id)
        .bind(&self.first_name)
        .bind(&self.last_name)
        .bind(self.date_of_birth)
        .bind(&self.email)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Hard delete. Returns whether a row was removed.
    pub async fn delete(id: Uuid, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM member WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
