use std::sync::Arc;

use crate::models::{
    classes::{
        entities::{AdvanceOutcome, Class},
        requests::CreateClassRequest,
    },
    students::{
        entities::{ImportOutcome, Student},
        requests::{CreateStudentRequest, ImportStudentRow, UpdateStudentRequest},
    },
    teachers::{entities::Teacher, requests::CreateTeacherRequest},
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 教师
    // 统计教师数量（用于初始化种子数据）
    async fn count_teachers(&self) -> Result<u64>;
    // 创建教师
    async fn create_teacher(&self, teacher: CreateTeacherRequest) -> Result<Teacher>;
    // 通过邮箱获取教师
    async fn get_teacher_by_email(&self, email: &str) -> Result<Option<Teacher>>;
    // 通过ID获取教师
    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<Teacher>>;

    /// 班级
    // 统计班级数量
    async fn count_classes(&self) -> Result<u64>;
    // 创建班级，并记录创建它的教师
    async fn create_class(&self, class: CreateClassRequest, teacher_id: Option<i64>)
    -> Result<Class>;
    // 通过ID获取班级
    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>>;
    // 按归档状态列出班级
    async fn list_classes(&self, archived: bool) -> Result<Vec<Class>>;
    // 设置归档状态，班级不存在时返回 false
    async fn set_class_archived(&self, class_id: i64, archived: bool) -> Result<bool>;
    // 删除班级，同时删除不再属于任何班级的学生
    async fn delete_class(&self, class_id: i64) -> Result<bool>;
    // 搜索班级
    async fn search_classes(&self, query: &str, archived: Option<bool>) -> Result<Vec<Class>>;
    // 查找同课程、同校区、同年份的 Advanced 班级（不含源班级本身）
    async fn find_advanced_class(
        &self,
        source_id: i64,
        course: &str,
        location: &str,
        year: i32,
    ) -> Result<Option<Class>>;
    // 班级晋级
    async fn advance_class(
        &self,
        class_id: i64,
        student_ids: &[i64],
        teacher_id: i64,
    ) -> Result<AdvanceOutcome>;

    /// 学生
    // 创建学生并加入班级
    async fn create_student_in_class(
        &self,
        student: CreateStudentRequest,
        class_id: i64,
    ) -> Result<Student>;
    // 通过ID获取学生
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    // 通过邮箱获取学生
    async fn get_student_by_email(&self, email: &str) -> Result<Option<Student>>;
    // 列出班级内的学生（按姓名排序）
    async fn list_students_in_class(&self, class_id: i64) -> Result<Vec<Student>>;
    // 更新学生
    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>>;
    // 删除学生及其所有班级关联
    async fn delete_student(&self, id: i64) -> Result<bool>;
    // 批量导入学生到班级，重复邮箱跳过
    async fn import_students(
        &self,
        class_id: i64,
        rows: Vec<ImportStudentRow>,
    ) -> Result<ImportOutcome>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
