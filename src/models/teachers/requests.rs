// 创建教师请求（仅用于初始化数据）
#[derive(Debug, Clone)]
pub struct CreateTeacherRequest {
    pub name: String,
    pub email: String,
    /// 已哈希的密码
    pub password_hash: String,
    pub class_id: Option<i64>,
}
