//! User store trait definition.

use async_trait::async_trait;
use entities::{Mood, NewUser, User};

use crate::UserStoreResult;

/// Trait for user storage operations.
///
/// Every operation touches a single row; there are no transactions. Two
/// concurrent mood updates for the same id resolve as last-write-wins.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a user and returns it with its assigned id and no mood.
    async fn create_user(&self, user: NewUser) -> UserStoreResult<User>;

    /// Gets a user by ID.
    async fn get_user(&self, id: i64) -> UserStoreResult<Option<User>>;

    /// Overwrites a user's mood and returns the updated record.
    ///
    /// Fails with [`UserStoreError::NotFound`](crate::UserStoreError::NotFound)
    /// if no row has this id; nothing is created in that case.
    async fn update_mood(&self, id: i64, mood: Mood) -> UserStoreResult<User>;

    /// Lists all users, newest first.
    async fn list_users(&self) -> UserStoreResult<Vec<User>>;
}
