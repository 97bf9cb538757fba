use tracing::info;

use super::*;

impl PostgresUserStore {
    pub(super) async fn insert_users_impl(&self, users: &[User]) -> AppResult<()> {
        let mut transaction = self.pool.begin().await.map_err(|error| {
            AppError::Internal(format!("failed to begin user seed transaction: {error}"))
        })?;

        // Dropping the transaction on an early return rolls the batch back.
        for user in users {
            sqlx::query(
                r#"
                INSERT INTO users (user_id, name)
                VALUES ($1, $2)
                "#,
            )
            .bind(user.user_id().as_i32())
            .bind(user.name())
            .execute(&mut *transaction)
            .await
            .map_err(|error| user_conflict_or_internal(error, user.user_id(), "insert user"))?;
        }

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit user seed transaction: {error}"))
        })?;

        info!(inserted = users.len(), "seeded postgres user store");
        Ok(())
    }
}
