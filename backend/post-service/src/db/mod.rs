/// Data access layer
///
/// Handlers reach persistence only through the `PostStore`, `UserStore` and
/// `TagStore` capabilities bundled in [`Stores`]. Two backends exist:
/// - `memory`: process-local maps, used for development and tests
/// - `post_repo` / `user_repo` / `tag_repo`: PostgreSQL via sqlx
pub mod memory;
pub mod post_repo;
pub mod tag_repo;
pub mod user_repo;

use crate::config::{StoreBackend, StoreConfig};
use crate::models::{Identifier, NewPost, NewUser, Post, Tag, TagPayload, User};
use anyhow::Context;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

pub use memory::{memory_stores, seed_users};
pub use post_repo::PgPostStore;
pub use tag_repo::PgTagStore;
pub use user_repo::PgUserStore;

/// Failure raised by a store call. Opaque to API clients.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait PostStore: Send + Sync {
    async fn get(&self, id: &Identifier) -> StoreResult<Option<Post>>;
    async fn list(&self) -> StoreResult<Vec<Post>>;
    async fn insert(&self, post: &NewPost) -> StoreResult<Option<Post>>;
    async fn update(&self, id: &Identifier, post: &NewPost) -> StoreResult<Option<Post>>;
    async fn remove(&self, id: &Identifier) -> StoreResult<bool>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get(&self, id: &Identifier) -> StoreResult<Option<User>>;
    async fn list(&self) -> StoreResult<Vec<User>>;
    async fn insert(&self, user: &NewUser) -> StoreResult<Option<User>>;
    async fn update(&self, id: &Identifier, user: &NewUser) -> StoreResult<Option<User>>;
    async fn remove(&self, id: &Identifier) -> StoreResult<bool>;
}

#[async_trait]
pub trait TagStore: Send + Sync {
    async fn get(&self, id: &Identifier) -> StoreResult<Option<Tag>>;
    async fn list(&self) -> StoreResult<Vec<Tag>>;
    async fn insert(&self, tag: &TagPayload) -> StoreResult<Option<Tag>>;
    async fn update(&self, id: &Identifier, tag: &TagPayload) -> StoreResult<Option<Tag>>;
    async fn remove(&self, id: &Identifier) -> StoreResult<bool>;
}

/// Store capabilities injected into the router as `web::Data<Stores>`
#[derive(Clone)]
pub struct Stores {
    pub posts: Arc<dyn PostStore>,
    pub users: Arc<dyn UserStore>,
    pub tags: Arc<dyn TagStore>,
}

impl Stores {
    pub fn new(
        posts: Arc<dyn PostStore>,
        users: Arc<dyn UserStore>,
        tags: Arc<dyn TagStore>,
    ) -> Self {
        Self { posts, users, tags }
    }
}

/// Build the configured store backend.
///
/// The Postgres backend connects through `db-pool` and runs the embedded
/// migrations before returning.
pub async fn build_stores(config: &StoreConfig) -> anyhow::Result<Stores> {
    match config.backend {
        StoreBackend::Memory => {
            let stores = memory_stores();
            let seeded = seed_users(stores.users.as_ref(), &config.seed_users)
                .await
                .context("Failed to seed users")?;
            tracing::info!(seeded_users = seeded.len(), "Using in-memory stores");
            Ok(stores)
        }
        StoreBackend::Postgres => {
            config.database.log_config();
            let pool = db_pool::create_pool(config.database.clone())
                .await
                .context("Failed to create database pool")?;

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Database migrations completed successfully");

            Ok(Stores::new(
                Arc::new(PgPostStore::new(pool.clone())),
                Arc::new(PgUserStore::new(pool.clone())),
                Arc::new(PgTagStore::new(pool)),
            ))
        }
    }
}
