use super::entities::Student;
use crate::models::classes::entities::Class;
use crate::models::common::PaginationInfo;
use serde::Serialize;

// 班级花名册
#[derive(Debug, Serialize)]
pub struct RosterResponse {
    pub class: Class,
    pub items: Vec<Student>,
    pub pagination: PaginationInfo,
}

// 单个学生（附带返回的班级）
#[derive(Debug, Serialize)]
pub struct StudentResponse {
    pub student: Student,
    pub class_id: i64,
}

// 添加学生表单的可选项
#[derive(Debug, Serialize)]
pub struct StudentFormResponse {
    pub class: Class,
    pub locations: &'static [&'static str],
    pub class_types: &'static [&'static str],
}

// 编辑学生页面
#[derive(Debug, Serialize)]
pub struct EditStudentResponse {
    pub student: Student,
    pub class_id: i64,
    pub locations: &'static [&'static str],
    pub class_types: &'static [&'static str],
}

// 导入错误行
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ImportRowError {
    pub row: usize,
    pub field: String,
    pub message: String,
}

// 导入结果
#[derive(Debug, Serialize)]
pub struct StudentImportResponse {
    pub class_id: i64,
    pub total: usize,
    pub success: usize,
    pub skipped: usize,
    pub failed: usize,
    pub errors: Vec<ImportRowError>,
}
