//! In-memory user store implementation for testing.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use entities::{Mood, NewUser, User};
use tokio::sync::RwLock;

use crate::{UserStore, UserStoreError, UserStoreResult};

#[derive(Debug, Default)]
struct MemoryUsers {
    rows: HashMap<i64, User>,
    last_id: i64,
}

/// In-memory user store for testing purposes.
///
/// Ids are assigned sequentially starting at 1, like an autoincrement column.
#[derive(Debug, Default, Clone)]
pub struct MemoryUserStore {
    users: Arc<RwLock<MemoryUsers>>,
}

impl MemoryUserStore {
    /// Creates a new in-memory user store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored users.
    pub async fn len(&self) -> usize {
        self.users.read().await.rows.len()
    }

    /// Returns true if no user has been stored.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create_user(&self, user: NewUser) -> UserStoreResult<User> {
        let mut users = self.users.write().await;
        users.last_id += 1;
        let user = user.into_user(users.last_id);
        users.rows.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: i64) -> UserStoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.rows.get(&id).cloned())
    }

    async fn update_mood(&self, id: i64, mood: Mood) -> UserStoreResult<User> {
        let mut users = self.users.write().await;
        let user = users
            .rows
            .get_mut(&id)
            .ok_or_else(|| UserStoreError::not_found("User", id.to_string()))?;
        user.mood = Some(mood);
        Ok(user.clone())
    }

    async fn list_users(&self) -> UserStoreResult<Vec<User>> {
        let users = self.users.read().await;
        let mut result: Vec<User> = users.rows.values().cloned().collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(result)
    }
}
