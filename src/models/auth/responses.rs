use crate::models::teachers::entities::Teacher;
use serde::Serialize;

// 登录响应
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub teacher: Teacher,
    pub permanent: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
