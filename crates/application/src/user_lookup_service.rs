//! User lookup ports and application service.
//!
//! The service is a read-only facade: it forwards every query to the
//! configured [`UserStore`] and returns the store's answer untouched,
//! including any store failure.

use std::sync::Arc;

use async_trait::async_trait;

use userlookup_core::AppResult;
use userlookup_domain::{User, UserId};

// ---------------------------------------------------------------------------
// Ports
// ---------------------------------------------------------------------------

/// Read port over the collection of user records.
///
/// Implementations match on exact `UserId` equality and must not mutate
/// observable state while answering.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Returns whether a user with the given identifier is present.
    async fn exists(&self, user_id: UserId) -> AppResult<bool>;

    /// Finds a user by their unique identifier.
    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<User>>;
}

/// Bulk insertion port used to populate a store before it serves queries.
#[async_trait]
pub trait UserSeeder: Send + Sync {
    /// Inserts the given users in order.
    ///
    /// The batch is all-or-nothing: a duplicate identifier, within the
    /// batch or against an existing record, fails with
    /// `AppError::Conflict` and leaves the store unchanged.
    async fn insert_users(&self, users: &[User]) -> AppResult<()>;
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Application service answering user existence and retrieval queries.
#[derive(Clone)]
pub struct UserLookupService {
    user_store: Arc<dyn UserStore>,
}

mod retrieval;


impl UserLookupService {
    /// Creates a new user lookup service.
    #[must_use]
    pub fn new(user_store: Arc<dyn UserStore>) -> Self {
        Self { user_store }
    }

    /// Returns a reference to the backing store for use by other services.
    #[must_use]
    pub fn user_store(&self) -> &Arc<dyn UserStore> {
        &self.user_store
    }
}
