//! SQLite user store backed by sqlx.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use entities::{Mood, NewUser, User};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    FromRow, Pool, Sqlite,
};

use crate::{UserStore, UserStoreError, UserStoreResult};

/// Database row for User
#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    name: String,
    mood: Option<String>,
    created_at: String,
}

impl TryFrom<UserRow> for User {
    type Error = UserStoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let mood = match row.mood.as_deref() {
            Some(raw) => Some(Mood::parse(raw).ok_or_else(|| {
                UserStoreError::InvalidRow(format!("user {} has unknown mood {raw:?}", row.id))
            })?),
            None => None,
        };
        let created_at = DateTime::parse_from_rfc3339(&row.created_at)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                UserStoreError::InvalidRow(format!("user {} has bad created_at: {e}", row.id))
            })?;

        Ok(User {
            id: row.id,
            name: row.name,
            mood,
            created_at,
        })
    }
}

/// Fixed-width timestamps so that text ordering matches time ordering.
fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// SQLite user store
#[derive(Clone)]
pub struct SqliteUserStore {
    pool: Pool<Sqlite>,
}

impl SqliteUserStore {
    /// Create a store over an existing pool. Call [`init`](Self::init) before use.
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Connects to `database_url`, creating the database file if missing, and
    /// initializes the schema.
    pub async fn connect(database_url: &str) -> UserStoreResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let store = Self::new(pool);
        store.init().await?;
        Ok(store)
    }

    /// Opens a private in-memory database with the schema applied.
    ///
    /// The pool is capped at one connection since every SQLite in-memory
    /// connection is its own database.
    pub async fn connect_in_memory() -> UserStoreResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        let store = Self::new(pool);
        store.init().await?;
        Ok(store)
    }

    /// Returns a reference to the connection pool
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Initialize the database table
    pub async fn init(&self) -> UserStoreResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                mood TEXT CHECK (mood IS NULL OR mood IN ('ambitious', 'calm', 'bold', 'minimal')),
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| UserStoreError::Migration(format!("Failed to create users table: {e}")))?;

        // Listing is ordered by creation time
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_users_created_at
            ON users (created_at)
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| UserStoreError::Migration(format!("Failed to create index: {e}")))?;

        tracing::debug!("User schema ready");
        Ok(())
    }
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn create_user(&self, user: NewUser) -> UserStoreResult<User> {
        let row: UserRow = sqlx::query_as(
            r#"
            INSERT INTO users (name, mood, created_at)
            VALUES (?, NULL, ?)
            RETURNING id, name, mood, created_at
            "#,
        )
        .bind(&user.name)
        .bind(format_timestamp(&user.created_at))
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn get_user(&self, id: i64) -> UserStoreResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, name, mood, created_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn update_mood(&self, id: i64, mood: Mood) -> UserStoreResult<User> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            UPDATE users
            SET mood = ?
            WHERE id = ?
            RETURNING id, name, mood, created_at
            "#,
        )
        .bind(mood.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| UserStoreError::not_found("User", id.to_string()))?
            .try_into()
    }

    async fn list_users(&self) -> UserStoreResult<Vec<User>> {
        let rows: Vec<UserRow> = sqlx::query_as(
            r#"
            SELECT id, name, mood, created_at
            FROM users
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(User::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[tokio::test]
    async fn test_create_and_get() {
        let store = SqliteUserStore::connect_in_memory().await.unwrap();

        let created = store.create_user(NewUser::new("Ada")).await.unwrap();
        assert!(created.id > 0);
        assert!(created.mood.is_none());

        let fetched = store.get_user(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Ada");
        assert!(fetched.mood.is_none());
    }

    #[tokio::test]
    async fn test_created_at_is_the_stored_value() {
        let store = SqliteUserStore::connect_in_memory().await.unwrap();
        let user = NewUser {
            name: "Ada".to_string(),
            created_at: DateTime::parse_from_rfc3339("2025-12-31T23:59:50.116248781Z")
                .unwrap()
                .with_timezone(&Utc),
        };

        let created = store.create_user(user).await.unwrap();
        let fetched = store.get_user(created.id).await.unwrap().unwrap();
        assert_eq!(created, fetched);

        let updated = store.update_mood(created.id, Mood::Bold).await.unwrap();
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(store.list_users().await.unwrap()[0].created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_update_mood_is_idempotent() {
        let store = SqliteUserStore::connect_in_memory().await.unwrap();
        let user = store.create_user(NewUser::new("Ada")).await.unwrap();

        let first = store.update_mood(user.id, Mood::Calm).await.unwrap();
        let second = store.update_mood(user.id, Mood::Calm).await.unwrap();

        assert_eq!(first.mood, Some(Mood::Calm));
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_update_mood_unknown_id_creates_nothing() {
        let store = SqliteUserStore::connect_in_memory().await.unwrap();

        let err = store.update_mood(42, Mood::Bold).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(store.list_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_check_constraint_rejects_unknown_mood() {
        let store = SqliteUserStore::connect_in_memory().await.unwrap();
        let user = store.create_user(NewUser::new("Ada")).await.unwrap();

        let result = sqlx::query("UPDATE users SET mood = 'sleepy' WHERE id = ?")
            .bind(user.id)
            .execute(store.pool())
            .await;
        assert!(result.is_err());

        let fetched = store.get_user(user.id).await.unwrap().unwrap();
        assert!(fetched.mood.is_none());
    }

    #[tokio::test]
    async fn test_list_users_newest_first() {
        let store = SqliteUserStore::connect_in_memory().await.unwrap();
        let now = Utc::now();

        for (name, age) in [("First", 10), ("Second", 5), ("Third", 0)] {
            let user = NewUser {
                name: name.to_string(),
                created_at: now - Duration::seconds(age),
            };
            store.create_user(user).await.unwrap();
        }

        let names: Vec<String> = store
            .list_users()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.name)
            .collect();
        assert_eq!(names, vec!["Third", "Second", "First"]);
    }
}
