use super::entities::UserRole;
use serde::Deserialize;

// 账号创建请求（存储层使用，password 为哈希后的值）
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub display_name: Option<String>,
}
