use super::{StoreResult, TagStore};
use crate::models::{Identifier, Tag, TagPayload};
use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::types::Json;
use sqlx::PgPool;

#[derive(sqlx::FromRow)]
struct TagRow {
    id: i64,
    attributes: Json<Map<String, Value>>,
}

impl From<TagRow> for Tag {
    fn from(row: TagRow) -> Self {
        Tag {
            id: row.id,
            attributes: row.attributes.0,
        }
    }
}

/// PostgreSQL-backed tag store; attributes are kept in a JSONB column
#[derive(Clone)]
pub struct PgTagStore {
    pool: PgPool,
}

impl PgTagStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TagStore for PgTagStore {
    async fn get(&self, id: &Identifier) -> StoreResult<Option<Tag>> {
        let Some(id) = id.as_int() else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, TagRow>("SELECT id, attributes FROM tags WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Tag::from))
    }

    async fn list(&self) -> StoreResult<Vec<Tag>> {
        let rows = sqlx::query_as::<_, TagRow>("SELECT id, attributes FROM tags ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Tag::from).collect())
    }

    async fn insert(&self, tag: &TagPayload) -> StoreResult<Option<Tag>> {
        let attributes = tag.clone().into_attributes();

        let row = sqlx::query_as::<_, TagRow>(
            "INSERT INTO tags (attributes) VALUES ($1) RETURNING id, attributes",
        )
        .bind(Json(attributes))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Tag::from))
    }

    async fn update(&self, id: &Identifier, tag: &TagPayload) -> StoreResult<Option<Tag>> {
        let Some(id) = id.as_int() else {
            return Ok(None);
        };
        let attributes = tag.clone().into_attributes();

        let row = sqlx::query_as::<_, TagRow>(
            "UPDATE tags SET attributes = $2 WHERE id = $1 RETURNING id, attributes",
        )
        .bind(id)
        .bind(Json(attributes))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Tag::from))
    }

    async fn remove(&self, id: &Identifier) -> StoreResult<bool> {
        let Some(id) = id.as_int() else {
            return Ok(false);
        };

        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
