use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};
use userlookup_application::{UserSeeder, UserStore};
use userlookup_core::{AppError, AppResult};
use userlookup_domain::{User, UserId};

/// In-memory user store implementation.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a store pre-populated with the given users.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> AppResult<Self> {
        let mut seeded = HashMap::new();
        for user in users {
            let user_id = user.user_id();
            if seeded.insert(user_id, user).is_some() {
                return Err(duplicate_user(user_id));
            }
        }

        Ok(Self {
            users: RwLock::new(seeded),
        })
    }

    /// Returns the number of stored users.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Returns whether the store holds no users.
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn exists(&self, user_id: UserId) -> AppResult<bool> {
        let exists = self.users.read().await.contains_key(&user_id);
        debug!(user_id = %user_id, exists, "checked user existence in memory");
        Ok(exists)
    }

    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<User>> {
        let user = self.users.read().await.get(&user_id).cloned();
        debug!(user_id = %user_id, found = user.is_some(), "looked up user in memory");
        Ok(user)
    }
}

#[async_trait]
impl UserSeeder for InMemoryUserStore {
    async fn insert_users(&self, users: &[User]) -> AppResult<()> {
        let mut stored = self.users.write().await;

        // Validate the whole batch before touching the map.
        let mut batch_ids = HashSet::with_capacity(users.len());
        for user in users {
            let user_id = user.user_id();
            if stored.contains_key(&user_id) || !batch_ids.insert(user_id) {
                return Err(duplicate_user(user_id));
            }
        }

        stored.extend(users.iter().map(|user| (user.user_id(), user.clone())));
        info!(inserted = users.len(), total = stored.len(), "seeded in-memory user store");

        Ok(())
    }
}

fn duplicate_user(user_id: UserId) -> AppError {
    AppError::Conflict(format!("user '{user_id}' already exists"))
}

#[cfg(test)]
mod tests;
