#![allow(dead_code)]
//! Shared fixtures for the HTTP tests: app construction, seeded memory
//! stores and mockall store doubles.

use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App};
use async_trait::async_trait;
use mockall::mock;
use post_service::db::{
    memory_stores, seed_users, PostStore, StoreError, StoreResult, Stores, TagStore, UserStore,
};
use post_service::handlers;
use post_service::models::{Identifier, NewPost, NewUser, Post, Tag, TagPayload, User};

mock! {
    pub PostStore {}

    #[async_trait]
    impl PostStore for PostStore {
        async fn get(&self, id: &Identifier) -> StoreResult<Option<Post>>;
        async fn list(&self) -> StoreResult<Vec<Post>>;
        async fn insert(&self, post: &NewPost) -> StoreResult<Option<Post>>;
        async fn update(&self, id: &Identifier, post: &NewPost) -> StoreResult<Option<Post>>;
        async fn remove(&self, id: &Identifier) -> StoreResult<bool>;
    }
}

mock! {
    pub UserStore {}

    #[async_trait]
    impl UserStore for UserStore {
        async fn get(&self, id: &Identifier) -> StoreResult<Option<User>>;
        async fn list(&self) -> StoreResult<Vec<User>>;
        async fn insert(&self, user: &NewUser) -> StoreResult<Option<User>>;
        async fn update(&self, id: &Identifier, user: &NewUser) -> StoreResult<Option<User>>;
        async fn remove(&self, id: &Identifier) -> StoreResult<bool>;
    }
}

mock! {
    pub TagStore {}

    #[async_trait]
    impl TagStore for TagStore {
        async fn get(&self, id: &Identifier) -> StoreResult<Option<Tag>>;
        async fn list(&self) -> StoreResult<Vec<Tag>>;
        async fn insert(&self, tag: &TagPayload) -> StoreResult<Option<Tag>>;
        async fn update(&self, id: &Identifier, tag: &TagPayload) -> StoreResult<Option<Tag>>;
        async fn remove(&self, id: &Identifier) -> StoreResult<bool>;
    }
}

pub fn unavailable() -> StoreError {
    StoreError::Unavailable("connection refused".to_string())
}

/// Post store whose every call fails
pub fn failing_post_store() -> MockPostStore {
    let mut store = MockPostStore::new();
    store.expect_get().returning(|_| Err(unavailable()));
    store.expect_list().returning(|| Err(unavailable()));
    store.expect_insert().returning(|_| Err(unavailable()));
    store.expect_update().returning(|_, _| Err(unavailable()));
    store.expect_remove().returning(|_| Err(unavailable()));
    store
}

/// User store whose every call fails
pub fn failing_user_store() -> MockUserStore {
    let mut store = MockUserStore::new();
    store.expect_get().returning(|_| Err(unavailable()));
    store.expect_list().returning(|| Err(unavailable()));
    store.expect_insert().returning(|_| Err(unavailable()));
    store.expect_update().returning(|_, _| Err(unavailable()));
    store.expect_remove().returning(|_| Err(unavailable()));
    store
}

/// Tag store whose every call fails
pub fn failing_tag_store() -> MockTagStore {
    let mut store = MockTagStore::new();
    store.expect_get().returning(|_| Err(unavailable()));
    store.expect_list().returning(|| Err(unavailable()));
    store.expect_insert().returning(|_| Err(unavailable()));
    store.expect_update().returning(|_, _| Err(unavailable()));
    store.expect_remove().returning(|_| Err(unavailable()));
    store
}

/// Memory stores with users `ada` (id 1) and `grace` (id 2)
pub async fn seeded_stores() -> Stores {
    let stores = memory_stores();
    seed_users(
        stores.users.as_ref(),
        &["ada".to_string(), "grace".to_string()],
    )
    .await
    .expect("seed users");
    stores
}

pub async fn init_app(
    stores: Stores,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(stores))
            .configure(handlers::configure_routes),
    )
    .await
}
