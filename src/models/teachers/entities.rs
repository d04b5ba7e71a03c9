use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Teacher {
    pub id: i64,
    pub name: String,
    pub email: String,
    // 密码哈希不会写入响应或会话存储
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    // 所属班级
    pub class_id: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
