/// In-memory store backend
///
/// Each entity lives in a `DashMap` keyed by its integer id, with ids handed
/// out from an atomic sequence starting at 1.
use super::{PostStore, StoreResult, Stores, TagStore, UserStore};
use crate::models::{Identifier, NewPost, NewUser, Post, Tag, TagPayload, User};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

struct Table<T> {
    rows: DashMap<i64, T>,
    next_id: AtomicI64,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    fn get(&self, id: &Identifier) -> Option<T> {
        let key = id.as_int()?;
        self.rows.get(&key).map(|row| row.value().clone())
    }

    /// All rows in ascending id order
    fn list(&self) -> Vec<T> {
        let mut rows: Vec<(i64, T)> = self
            .rows
            .iter()
            .map(|row| (*row.key(), row.value().clone()))
            .collect();
        rows.sort_by_key(|(id, _)| *id);
        rows.into_iter().map(|(_, row)| row).collect()
    }

    fn insert_with(&self, build: impl FnOnce(i64) -> T) -> T {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let row = build(id);
        self.rows.insert(id, row.clone());
        row
    }

    fn update_with(&self, id: &Identifier, apply: impl FnOnce(&mut T)) -> Option<T> {
        let key = id.as_int()?;
        let mut row = self.rows.get_mut(&key)?;
        apply(row.value_mut());
        Some(row.value().clone())
    }

    fn remove(&self, id: &Identifier) -> bool {
        id.as_int()
            .map(|key| self.rows.remove(&key).is_some())
            .unwrap_or(false)
    }
}

pub struct MemoryPostStore {
    table: Table<Post>,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self {
            table: Table::new(),
        }
    }
}

impl Default for MemoryPostStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn get(&self, id: &Identifier) -> StoreResult<Option<Post>> {
        Ok(self.table.get(id))
    }

    async fn list(&self) -> StoreResult<Vec<Post>> {
        Ok(self.table.list())
    }

    async fn insert(&self, post: &NewPost) -> StoreResult<Option<Post>> {
        Ok(Some(self.table.insert_with(|id| Post {
            id,
            user_id: post.user_id.clone(),
            text: post.text.clone(),
        })))
    }

    async fn update(&self, id: &Identifier, post: &NewPost) -> StoreResult<Option<Post>> {
        Ok(self.table.update_with(id, |row| {
            row.user_id = post.user_id.clone();
            row.text = post.text.clone();
        }))
    }

    async fn remove(&self, id: &Identifier) -> StoreResult<bool> {
        Ok(self.table.remove(id))
    }
}

pub struct MemoryUserStore {
    table: Table<User>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self {
            table: Table::new(),
        }
    }
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn get(&self, id: &Identifier) -> StoreResult<Option<User>> {
        Ok(self.table.get(id))
    }

    async fn list(&self) -> StoreResult<Vec<User>> {
        Ok(self.table.list())
    }

    async fn insert(&self, user: &NewUser) -> StoreResult<Option<User>> {
        Ok(Some(self.table.insert_with(|id| User {
            id,
            name: user.name.clone(),
        })))
    }

    async fn update(&self, id: &Identifier, user: &NewUser) -> StoreResult<Option<User>> {
        Ok(self.table.update_with(id, |row| row.name = user.name.clone()))
    }

    async fn remove(&self, id: &Identifier) -> StoreResult<bool> {
        Ok(self.table.remove(id))
    }
}

pub struct MemoryTagStore {
    table: Table<Tag>,
}

impl MemoryTagStore {
    pub fn new() -> Self {
        Self {
            table: Table::new(),
        }
    }
}

impl Default for MemoryTagStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TagStore for MemoryTagStore {
    async fn get(&self, id: &Identifier) -> StoreResult<Option<Tag>> {
        Ok(self.table.get(id))
    }

    async fn list(&self) -> StoreResult<Vec<Tag>> {
        Ok(self.table.list())
    }

    async fn insert(&self, tag: &TagPayload) -> StoreResult<Option<Tag>> {
        let attributes = tag.clone().into_attributes();
        Ok(Some(self.table.insert_with(|id| Tag { id, attributes })))
    }

    async fn update(&self, id: &Identifier, tag: &TagPayload) -> StoreResult<Option<Tag>> {
        let attributes = tag.clone().into_attributes();
        Ok(self.table.update_with(id, |row| row.attributes = attributes))
    }

    async fn remove(&self, id: &Identifier) -> StoreResult<bool> {
        Ok(self.table.remove(id))
    }
}

/// Fresh, empty in-memory stores
pub fn memory_stores() -> Stores {
    Stores::new(
        Arc::new(MemoryPostStore::new()),
        Arc::new(MemoryUserStore::new()),
        Arc::new(MemoryTagStore::new()),
    )
}

/// Insert one user per name, returning the created users in order
pub async fn seed_users(users: &dyn UserStore, names: &[String]) -> StoreResult<Vec<User>> {
    let mut created = Vec::with_capacity(names.len());
    for name in names {
        let user = NewUser {
            name: Some(name.clone()),
        };
        if let Some(user) = users.insert(&user).await? {
            created.push(user);
        }
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn new_post(user_id: i64, text: &str) -> NewPost {
        NewPost {
            user_id: Identifier::Int(user_id),
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn post_ids_are_sequential_and_listed_in_order() {
        let store = MemoryPostStore::new();
        let first = store.insert(&new_post(1, "first")).await.unwrap().unwrap();
        let second = store.insert(&new_post(1, "second")).await.unwrap().unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        let listed = store.list().await.unwrap();
        assert_eq!(listed, vec![first, second]);
    }

    #[tokio::test]
    async fn update_and_remove_report_missing_rows() {
        let store = MemoryPostStore::new();
        let missing = Identifier::Int(10);
        assert!(store.update(&missing, &new_post(1, "x")).await.unwrap().is_none());
        assert!(!store.remove(&missing).await.unwrap());

        let post = store.insert(&new_post(1, "draft")).await.unwrap().unwrap();
        let id = Identifier::Int(post.id);
        let updated = store.update(&id, &new_post(2, "final")).await.unwrap().unwrap();
        assert_eq!(updated.user_id, Identifier::Int(2));
        assert_eq!(updated.text, "final");

        assert!(store.remove(&id).await.unwrap());
        assert!(store.get(&id).await.unwrap().is_none());
        assert!(!store.remove(&id).await.unwrap());
    }

    #[tokio::test]
    async fn text_identifiers_never_match() {
        let users = MemoryUserStore::new();
        seed_users(&users, &["ada".to_string()]).await.unwrap();
        assert!(users.get(&Identifier::Int(1)).await.unwrap().is_some());
        assert!(users
            .get(&Identifier::Text("u1".to_string()))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn tag_update_replaces_attributes() {
        let store = MemoryTagStore::new();
        let payload: TagPayload = serde_json::from_value(json!({"tag": "rust"})).unwrap();
        let tag = store.insert(&payload).await.unwrap().unwrap();
        assert_eq!(tag.attributes.get("tag"), Some(&json!("rust")));

        let payload: TagPayload =
            serde_json::from_value(json!({"label": "systems", "id": 40})).unwrap();
        let updated = store
            .update(&Identifier::Int(tag.id), &payload)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.id, tag.id);
        assert_eq!(
            serde_json::to_value(&updated).unwrap(),
            json!({"id": 1, "label": "systems"})
        );
    }
}
