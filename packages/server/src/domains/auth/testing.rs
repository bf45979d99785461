//! In-memory credential store for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::common::password;
use crate::domains::auth::models::AppUser;
use crate::domains::auth::store::CredentialStore;

/// Credential store backed by a HashMap. Passwords are hashed with the
/// minimum bcrypt cost to keep tests fast.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    users: Mutex<HashMap<String, AppUser>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, username: &str, plaintext_password: &str, role_name: &str) -> Self {
        let hash = password::hash(plaintext_password, password::MIN_COST)
            .expect("bcrypt hashing should not fail");
        self.users.lock().unwrap().insert(
            username.to_string(),
            AppUser {
                id: Uuid::new_v4(),
                username: username.to_string(),
                password_hash: hash,
                role_name: role_name.to_string(),
            },
        );
        self
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<AppUser>> {
        Ok(self.users.lock().unwrap().get(username).cloned())
    }
}
