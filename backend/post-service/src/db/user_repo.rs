use super::{StoreResult, UserStore};
use crate::models::{Identifier, NewUser, User};
use async_trait::async_trait;
use sqlx::PgPool;

/// PostgreSQL-backed user store
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn get(&self, id: &Identifier) -> StoreResult<Option<User>> {
        let Some(id) = id.as_int() else {
            return Ok(None);
        };

        let user = sqlx::query_as::<_, User>("SELECT id, name FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn list(&self) -> StoreResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>("SELECT id, name FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    async fn insert(&self, user: &NewUser) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (name) VALUES ($1) RETURNING id, name",
        )
        .bind(&user.name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn update(&self, id: &Identifier, user: &NewUser) -> StoreResult<Option<User>> {
        let Some(id) = id.as_int() else {
            return Ok(None);
        };

        let user = sqlx::query_as::<_, User>(
            "UPDATE users SET name = $2 WHERE id = $1 RETURNING id, name",
        )
        .bind(id)
        .bind(&user.name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn remove(&self, id: &Identifier) -> StoreResult<bool> {
        let Some(id) = id.as_int() else {
            return Ok(false);
        };

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
