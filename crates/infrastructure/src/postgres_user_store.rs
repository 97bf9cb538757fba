//! PostgreSQL-backed user store.

use async_trait::async_trait;
use sqlx::PgPool;

use userlookup_application::{UserSeeder, UserStore};
use userlookup_core::{AppError, AppResult};
use userlookup_domain::{User, UserId};

/// PostgreSQL implementation of the user store and seeder ports.
///
/// Expects a `users (user_id INTEGER PRIMARY KEY, name TEXT NOT NULL)`
/// table. Each query checks a connection out of the pool for its own
/// duration only.
#[derive(Clone)]
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    /// Creates a store with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    user_id: i32,
    name: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User::new(UserId::new(row.user_id), row.name)
    }
}

mod lookup;
mod seed;


#[async_trait]
impl UserStore for PostgresUserStore {
    async fn exists(&self, user_id: UserId) -> AppResult<bool> {
        self.exists_impl(user_id).await
    }

    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<User>> {
        self.find_by_id_impl(user_id).await
    }
}

#[async_trait]
impl UserSeeder for PostgresUserStore {
    async fn insert_users(&self, users: &[User]) -> AppResult<()> {
        self.insert_users_impl(users).await
    }
}

fn user_conflict_or_internal(error: sqlx::Error, user_id: UserId, operation: &str) -> AppError {
    if let sqlx::Error::Database(ref database_error) = error
        && database_error.code().as_deref() == Some("23505")
    {
        return AppError::Conflict(format!("user '{user_id}' already exists"));
    }

    AppError::Internal(format!("failed to {operation}: {error}"))
}
