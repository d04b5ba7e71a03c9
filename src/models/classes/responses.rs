use super::entities::Class;
use crate::models::common::PaginatedResponse;
use crate::models::students::entities::Student;
use serde::Serialize;

// 班级列表响应
pub type ClassListResponse = PaginatedResponse<Class>;

// 晋级预览：来源班级、可复用的目标班级以及可勾选的学生
#[derive(Debug, Serialize)]
pub struct AdvancePreviewResponse {
    pub class: Class,
    // None 表示确认后会新建 Advanced 班级
    pub destination: Option<Class>,
    pub students: PaginatedResponse<Student>,
}
