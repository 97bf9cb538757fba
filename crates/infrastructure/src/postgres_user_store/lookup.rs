use tracing::debug;

use super::*;

impl PostgresUserStore {
    pub(super) async fn exists_impl(&self, user_id: UserId) -> AppResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM users
                WHERE user_id = $1
            )
            "#,
        )
        .bind(user_id.as_i32())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to check user existence: {error}"))
        })?;

        debug!(user_id = %user_id, exists, "checked user existence");
        Ok(exists)
    }

    pub(super) async fn find_by_id_impl(&self, user_id: UserId) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, name
            FROM users
            WHERE user_id = $1
            LIMIT 1
            "#,
        )
        .bind(user_id.as_i32())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find user by id: {error}")))?;

        debug!(user_id = %user_id, found = row.is_some(), "looked up user by id");
        Ok(row.map(User::from))
    }
}
