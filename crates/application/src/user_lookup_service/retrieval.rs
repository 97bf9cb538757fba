use super::*;

impl UserLookupService {
    /// Returns whether a user with the given identifier exists.
    pub async fn user_exists(&self, user_id: UserId) -> AppResult<bool> {
        self.user_store.exists(user_id).await
    }

    /// Returns a user by ID, if it exists.
    pub async fn get_user_by_id(&self, user_id: UserId) -> AppResult<Option<User>> {
        self.user_store.find_by_id(user_id).await
    }
}
