// In-memory stores for handler and service tests

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::auth::{
    error::AuthError,
    models::{NewUser, User},
    password::PasswordService,
    repository::UserStore,
};
use crate::categories::{
    models::{Category, NewCategory},
    repository::CategoryStore,
};
use crate::error::ApiError;

struct Table<T> {
    next_id: i32,
    rows: Vec<T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            rows: Vec::new(),
        }
    }
}

impl<T> Table<T> {
    fn allocate_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub struct InMemoryUserStore {
    table: Mutex<Table<User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a user with a real password verifier
    pub async fn seed(&self, username: &str, password: &str, role: &str) -> User {
        let hash = PasswordService::hash_password(password).unwrap();
        self.create(NewUser::new(username, hash).with_nickname(username).with_role(role))
            .await
            .unwrap()
    }

    pub async fn set_role(&self, id: i32, role: &str) {
        let mut table = self.table.lock().await;
        let user = table.rows.iter_mut().find(|u| u.id == id).unwrap();
        user.role = role.to_string();
        user.updated_at = Utc::now();
    }

    pub async fn remove(&self, id: i32) {
        self.table.lock().await.rows.retain(|u| u.id != id);
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError> {
        let table = self.table.lock().await;
        Ok(table.rows.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AuthError> {
        let table = self.table.lock().await;
        Ok(table.rows.iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, AuthError> {
        let mut table = self.table.lock().await;
        if table.rows.iter().any(|u| u.username == user.username) {
            return Err(AuthError::UsernameAlreadyExists);
        }
        let now = Utc::now();
        let created = User {
            id: table.allocate_id(),
            username: user.username,
            password_hash: user.password_hash,
            nickname: user.nickname,
            avatar: user.avatar,
            role: user.role,
            created_at: now,
            updated_at: now,
        };
        table.rows.push(created.clone());
        Ok(created)
    }
}

#[derive(Default)]
pub struct InMemoryCategoryStore {
    table: Mutex<Table<Category>>,
}

impl InMemoryCategoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CategoryStore for InMemoryCategoryStore {
    async fn list(&self) -> Result<Vec<Category>, ApiError> {
        let mut rows = self.table.lock().await.rows.clone();
        rows.sort_by_key(|c| (c.parent_id, c.sort_order, c.id));
        Ok(rows)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Category>, ApiError> {
        let table = self.table.lock().await;
        Ok(table.rows.iter().find(|c| c.id == id).cloned())
    }

    async fn create(&self, category: NewCategory) -> Result<Category, ApiError> {
        let mut table = self.table.lock().await;
        let created = Category {
            id: table.allocate_id(),
            name: category.name,
            parent_id: category.parent_id,
            sort_order: category.sort_order,
        };
        table.rows.push(created.clone());
        Ok(created)
    }

    async fn update(&self, category: &Category) -> Result<Option<Category>, ApiError> {
        let mut table = self.table.lock().await;
        Ok(table.rows.iter_mut().find(|c| c.id == category.id).map(|row| {
            *row = category.clone();
            row.clone()
        }))
    }

    async fn delete(&self, id: i32) -> Result<bool, ApiError> {
        let mut table = self.table.lock().await;
        let before = table.rows.len();
        table.rows.retain(|c| c.id != id);
        Ok(table.rows.len() != before)
    }

    async fn has_children(&self, id: i32) -> Result<bool, ApiError> {
        let table = self.table.lock().await;
        Ok(table.rows.iter().any(|c| c.parent_id == id))
    }
}
