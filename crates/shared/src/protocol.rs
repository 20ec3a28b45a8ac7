use serde::{Deserialize, Serialize};

pub const INFO_ROUTE: &str = "/api/info";
pub const USERS_ROUTE: &str = "/api/users";
pub const HEALTH_ROUTE: &str = "/api/health";

pub fn user_route(user_id: i64) -> String {
    format!("{USERS_ROUTE}/{user_id}")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUserRequest {
    pub name: String,
    pub email: String,
}
