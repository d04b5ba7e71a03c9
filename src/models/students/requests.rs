use crate::models::common::deserialize_string_to_i64;
use serde::Deserialize;

fn default_page() -> i64 {
    1
}

// 班级花名册查询
#[derive(Debug, Clone, Deserialize)]
pub struct RosterQuery {
    #[serde(deserialize_with = "deserialize_string_to_i64")]
    pub class_id: i64,
    #[serde(
        default = "default_page",
        deserialize_with = "deserialize_string_to_i64"
    )]
    pub page: i64,
}

// 添加学生页面参数
#[derive(Debug, Clone, Deserialize)]
pub struct ClassContextQuery {
    #[serde(deserialize_with = "deserialize_string_to_i64")]
    pub class_id: i64,
}

// 添加学生表单
#[derive(Debug, Clone, Deserialize)]
pub struct AddStudentForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub class_type: String,
    #[serde(deserialize_with = "deserialize_string_to_i64")]
    pub class_id: i64,
}

// 编辑学生页面参数
#[derive(Debug, Clone, Deserialize)]
pub struct StudentRefForm {
    #[serde(deserialize_with = "deserialize_string_to_i64")]
    pub student_id: i64,
    #[serde(deserialize_with = "deserialize_string_to_i64")]
    pub class_id: i64,
}

// 编辑学生表单
#[derive(Debug, Clone, Deserialize)]
pub struct EditStudentForm {
    #[serde(deserialize_with = "deserialize_string_to_i64")]
    pub student_id: i64,
    #[serde(deserialize_with = "deserialize_string_to_i64")]
    pub class_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub class_type: String,
}

// 创建学生请求（存储层，字段均已校验）
#[derive(Debug, Clone)]
pub struct CreateStudentRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub course: String,
    pub class_type: String,
}

// 更新学生请求（存储层）
#[derive(Debug, Clone, Default)]
pub struct UpdateStudentRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub class_type: Option<String>,
}

// 导入的单行数据（已校验），`row` 为文件中的行号
#[derive(Debug, Clone)]
pub struct ImportStudentRow {
    pub row: usize,
    pub name: String,
    pub email: String,
    pub phone: String,
}
