use std::sync::Arc;

use shared::{
    domain::{BackendInfo, UserId, UserRecord},
    error::ApiError,
    protocol::NewUserRequest,
};
use tokio::sync::RwLock;

pub const HEALTH_MESSAGE: &str = "Backend is running!";

#[derive(Clone)]
pub struct ApiContext {
    pub users: Arc<RwLock<Vec<UserRecord>>>,
    pub info: BackendInfo,
}

impl ApiContext {
    pub fn new(info: BackendInfo, users: Vec<UserRecord>) -> Self {
        Self {
            users: Arc::new(RwLock::new(users)),
            info,
        }
    }
}

pub fn seed_users() -> Vec<UserRecord> {
    vec![
        UserRecord::new(1, "John Doe", "john@example.com"),
        UserRecord::new(2, "Jane Smith", "jane@example.com"),
        UserRecord::new(3, "Bob Johnson", "bob@example.com"),
    ]
}

pub fn health(timestamp: impl Into<String>) -> BackendInfo {
    BackendInfo::new(HEALTH_MESSAGE, timestamp)
}

pub fn backend_info(ctx: &ApiContext) -> BackendInfo {
    ctx.info.clone()
}

pub async fn list_users(ctx: &ApiContext) -> Vec<UserRecord> {
    ctx.users.read().await.clone()
}

pub async fn get_user(ctx: &ApiContext, user_id: UserId) -> Result<UserRecord, ApiError> {
    ctx.users
        .read()
        .await
        .iter()
        .find(|user| user.id == user_id)
        .cloned()
        .ok_or_else(|| ApiError::not_found(format!("user {user_id} not found")))
}

/// Appends a user with the next sequential id (`len + 1`).
pub async fn create_user(
    ctx: &ApiContext,
    request: NewUserRequest,
) -> Result<UserRecord, ApiError> {
    let name = request.name.trim();
    let email = request.email.trim();
    if name.is_empty() {
        return Err(ApiError::validation("name must not be empty"));
    }
    if email.is_empty() {
        return Err(ApiError::validation("email must not be empty"));
    }

    let mut users = ctx.users.write().await;
    let id = i64::try_from(users.len())
        .map_err(|_| ApiError::internal("user directory is full"))?
        + 1;
    let user = UserRecord::new(id, name, email);
    users.push(user.clone());
    Ok(user)
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
