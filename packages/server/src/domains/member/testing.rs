//! In-memory member store for tests.
//!
//! Mirrors the Postgres store's observable behavior, including the
//! unique-email rejection on insert/update and the empty-filter
//! matches-everything semantics, and counts calls so tests can assert
//! on store traffic.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::common::pagination::{PageRequest, SortDirection};
use crate::domains::member::models::{Member, NewMember};
use crate::domains::member::store::MemberStore;

#[derive(Default)]
pub struct InMemoryMemberStore {
    members: Mutex<HashMap<Uuid, Member>>,
    find_by_id_calls: AtomicUsize,
    insert_calls: AtomicUsize,
    exists_by_email_calls: AtomicUsize,
}

impl InMemoryMemberStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find_by_id_calls(&self) -> usize {
        self.find_by_id_calls.load(Ordering::SeqCst)
    }

    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    pub fn exists_by_email_calls(&self) -> usize {
        self.exists_by_email_calls.load(Ordering::SeqCst)
    }

    fn matches(member: &Member, first_name: Option<&str>, last_name: Option<&str>) -> bool {
        if first_name.is_none() && last_name.is_none() {
            return true;
        }
        let first = first_name.unwrap_or("").to_lowercase();
        let last = last_name.unwrap_or("").to_lowercase();
        member.first_name.to_lowercase().contains(&first)
            || member.last_name.to_lowercase().contains(&last)
    }
}

#[async_trait]
impl MemberStore for InMemoryMemberStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Member>> {
        self.find_by_id_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.members.lock().unwrap().get(&id).cloned())
    }

    async fn find_page(
        &self,
        req: &PageRequest,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Result<(Vec<Member>, i64)> {
        let mut rows: Vec<Member> = self
            .members
            .lock()
            .unwrap()
            .values()
            .filter(|m| Self::matches(m, first_name, last_name))
            .cloned()
            .collect();

        match req.sort.as_str() {
            "createdAt" => rows.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            "firstName" => rows.sort_by(|a, b| a.first_name.cmp(&b.first_name)),
            "lastName" => rows.sort_by(|a, b| a.last_name.cmp(&b.last_name)),
            "email" => rows.sort_by(|a, b| a.email.cmp(&b.email)),
            other => bail!("Unknown sort field: {}", other),
        }
        if req.direction == SortDirection::Desc {
            rows.reverse();
        }

        let total = rows.len() as i64;
        let page = rows
            .into_iter()
            .skip(req.offset() as usize)
            .take(req.size as usize)
            .collect();
        Ok((page, total))
    }

    async fn exists_by_id(&self, id: Uuid) -> Result<bool> {
        Ok(self.members.lock().unwrap().contains_key(&id))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool> {
        self.exists_by_email_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .members
            .lock()
            .unwrap()
            .values()
            .any(|m| m.email == email))
    }

    async fn insert(&self, new: NewMember) -> Result<Member> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        let mut members = self.members.lock().unwrap();
        if members.values().any(|m| m.email == new.email) {
            // Unique constraint stand-in
            bail!("duplicate key value violates unique constraint \"member_email_key\"");
        }

        let now = Utc::now();
        let member = Member {
            id: Uuid::new_v4(),
            first_name: new.first_name,
            last_name: new.last_name,
            date_of_birth: new.date_of_birth,
            email: new.email,
            created_at: now,
            updated_at: now,
        };
        members.insert(member.id, member.clone());
        Ok(member)
    }

    async fn update(&self, member: &Member) -> Result<Member> {
        let mut members = self.members.lock().unwrap();
        if members
            .values()
            .any(|m| m.id != member.id && m.email == member.email)
        {
            bail!("duplicate key value violates unique constraint \"member_email_key\"");
        }
        let existing = members
            .get(&member.id)
            .ok_or_else(|| anyhow::anyhow!("no row with id {}", member.id))?;

        let updated = Member {
            created_at: existing.created_at,
            updated_at: Utc::now(),
            ..member.clone()
        };
        members.insert(updated.id, updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        Ok(self.members.lock().unwrap().remove(&id).is_some())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
