use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub email: String,
    // 规范化后的电话号码（国内格式）
    pub phone: String,
    pub location: String,
    pub course: String,
    pub class_type: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 批量导入的写入结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportOutcome {
    pub inserted: usize,
    // 因邮箱重复而跳过的行号
    pub skipped_rows: Vec<usize>,
}
