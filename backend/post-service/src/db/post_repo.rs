use super::{PostStore, StoreResult};
use crate::models::{Identifier, NewPost, Post};
use async_trait::async_trait;
use sqlx::PgPool;

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    user_id: String,
    text: String,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: row.id,
            user_id: Identifier::from(row.user_id),
            text: row.text,
        }
    }
}

/// PostgreSQL-backed post store
#[derive(Clone)]
pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn get(&self, id: &Identifier) -> StoreResult<Option<Post>> {
        let Some(id) = id.as_int() else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, user_id, text
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Post::from))
    }

    async fn list(&self) -> StoreResult<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, user_id, text
            FROM posts
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn insert(&self, post: &NewPost) -> StoreResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (user_id, text)
            VALUES ($1, $2)
            RETURNING id, user_id, text
            "#,
        )
        .bind(post.user_id.to_string())
        .bind(&post.text)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Post::from))
    }

    async fn update(&self, id: &Identifier, post: &NewPost) -> StoreResult<Option<Post>> {
        let Some(id) = id.as_int() else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, PostRow>(
            r#"
            UPDATE posts
            SET user_id = $2, text = $3
            WHERE id = $1
            RETURNING id, user_id, text
            "#,
        )
        .bind(id)
        .bind(post.user_id.to_string())
        .bind(&post.text)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Post::from))
    }

    async fn remove(&self, id: &Identifier) -> StoreResult<bool> {
        let Some(id) = id.as_int() else {
            return Ok(false);
        };

        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
