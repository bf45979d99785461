use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::common::pagination::PageRequest;
use crate::domains::member::cache::MemberCache;
use crate::domains::member::data::{MemberData, PagedMemberData};
use crate::domains::member::models::NewMember;
use crate::domains::member::store::MemberStore;

/// Business failures of member operations.
#[derive(Error, Debug)]
pub enum MemberError {
    #[error("Member not found with id: {0}")]
    NotFound(Uuid),

    #[error("Member already exists with email: {0}")]
    DuplicateEmail(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// CRUD orchestration over the member store with a read cache on the
/// single-member lookup path.
///
/// The email uniqueness pre-checks are check-then-act: a concurrent
/// writer can slip in between the check and the insert/update, in
/// which case the store's unique constraint rejects the write and the
/// failure surfaces as `Internal`.
pub struct MemberService {
    store: Arc<dyn MemberStore>,
    cache: MemberCache,
}

impl MemberService {
    pub fn new(store: Arc<dyn MemberStore>) -> Self {
        Self {
            store,
            cache: MemberCache::new(),
        }
    }

    pub async fn list(
        &self,
        req: &PageRequest,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Result<PagedMemberData, MemberError> {
        info!(
            "Fetching members with page: {}, size: {}, firstName: {:?}, lastName: {:?}",
            req.page, req.size, first_name, last_name
        );
        let (rows, total) = self.store.find_page(req, first_name, last_name).await?;
        info!("Successfully fetched {} members", rows.len());

        Ok(PagedMemberData::new(
            rows.into_iter().map(Into::into).collect(),
            req.page,
            req.size,
            total,
        ))
    }

    /// Cache-first single lookup. A hit never touches the store; a miss
    /// loads, projects and populates the cache.
    pub async fn get_by_id(&self, id: Uuid) -> Result<MemberData, MemberError> {
        if let Some(cached) = self.cache.get(id) {
            debug!("Cache hit for member: {}", id);
            return Ok(cached);
        }

        info!("Fetching member by id: {}", id);
        let member = self.store.find_by_id(id).await?.ok_or_else(|| {
            error!("Member not found with id: {}", id);
            MemberError::NotFound(id)
        })?;

        let data = MemberData::from(member);
        self.cache.put(id, data.clone());
        Ok(data)
    }

    /// Uniqueness pre-check, then insert. The cache is not populated;
    /// the next read misses and fills it.
    pub async fn create(&self, new: NewMember) -> Result<MemberData, MemberError> {
        info!("Creating new member with email: {}", new.email);
        if self.store.exists_by_email(&new.email).await? {
            error!("Duplicate email found: {}", new.email);
            return Err(MemberError::DuplicateEmail(new.email));
        }

        let member = self.store.insert(new).await?;
        info!("Successfully created member with id: {}", member.id);
        Ok(member.into())
    }

    /// Load, check email uniqueness when it changes, persist, evict.
    /// Keeping the current email never triggers the duplicate check.
    pub async fn update(&self, id: Uuid, changes: NewMember) -> Result<MemberData, MemberError> {
        info!("Updating member with id: {}", id);
        let mut member = self.store.find_by_id(id).await?.ok_or_else(|| {
            error!("Member not found for update with id: {}", id);
            MemberError::NotFound(id)
        })?;

        if member.email != changes.email && self.store.exists_by_email(&changes.email).await? {
            error!("Duplicate email found during update: {}", changes.email);
            return Err(MemberError::DuplicateEmail(changes.email));
        }

        member.first_name = changes.first_name;
        member.last_name = changes.last_name;
        member.date_of_birth = changes.date_of_birth;
        member.email = changes.email;

        let updated = self.store.update(&member).await?;
        // Evicted only after the store write succeeds; on failure the
        // cached projection still matches the unchanged record.
        self.cache.evict(id);
        info!("Successfully updated member with id: {}", updated.id);
        Ok(updated.into())
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), MemberError> {
        info!("Deleting member with id: {}", id);
        if !self.store.exists_by_id(id).await? {
            error!("Member not found for deletion with id: {}", id);
            return Err(MemberError::NotFound(id));
        }

        self.store.delete(id).await?;
        self.cache.evict(id);
        info!("Successfully deleted member with id: {}", id);
        Ok(())
    }
}
