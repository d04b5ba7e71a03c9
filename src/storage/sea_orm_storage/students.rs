//! 学生存储操作

use super::SeaOrmStorage;
use crate::entity::class;
use crate::entity::class_student;
use crate::entity::student::{ActiveModel, Column, Entity as Students};
use crate::errors::{CourseAdminError, Result};
use crate::models::students::{
    entities::Student,
    requests::{CreateStudentRequest, UpdateStudentRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Set, SqlErr, TransactionTrait,
};
use sea_orm::sea_query::JoinType;

// 邮箱唯一索引冲突单独返回 Conflict
fn student_write_error(action: &str, e: DbErr) -> CourseAdminError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            CourseAdminError::conflict("Email already exists")
        }
        _ => CourseAdminError::database_operation(format!("{action}失败: {e}")),
    }
}

/// 插入学生行
pub(super) async fn insert_student<C: ConnectionTrait>(
    conn: &C,
    req: CreateStudentRequest,
) -> Result<crate::entity::student::Model> {
    let now = chrono::Utc::now().timestamp();

    let model = ActiveModel {
        name: Set(req.name),
        email: Set(req.email),
        phone: Set(req.phone),
        location: Set(req.location),
        course: Set(req.course),
        class_type: Set(req.class_type),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    model
        .insert(conn)
        .await
        .map_err(|e| student_write_error("创建学生", e))
}

/// 将学生加入班级，已存在的关联不重复写入，返回是否新增
pub(super) async fn link_student<C: ConnectionTrait>(
    conn: &C,
    class_id: i64,
    student_id: i64,
) -> Result<bool> {
    let existing = class_student::Entity::find()
        .filter(class_student::Column::ClassId.eq(class_id))
        .filter(class_student::Column::StudentId.eq(student_id))
        .one(conn)
        .await
        .map_err(|e| CourseAdminError::database_operation(format!("查询班级学生关联失败: {e}")))?;
    if existing.is_some() {
        return Ok(false);
    }

    class_student::ActiveModel {
        class_id: Set(class_id),
        student_id: Set(student_id),
        joined_at: Set(chrono::Utc::now().timestamp()),
        ..Default::default()
    }
    .insert(conn)
    .await
    .map_err(|e| CourseAdminError::database_operation(format!("关联班级学生失败: {e}")))?;

    Ok(true)
}

impl SeaOrmStorage {
    /// 创建学生并加入班级
    pub async fn create_student_in_class_impl(
        &self,
        req: CreateStudentRequest,
        class_id: i64,
    ) -> Result<Student> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CourseAdminError::database_operation(format!("开启事务失败: {e}")))?;

        class::Entity::find_by_id(class_id)
            .one(&txn)
            .await
            .map_err(|e| CourseAdminError::database_operation(format!("查询班级失败: {e}")))?
            .ok_or_else(|| CourseAdminError::not_found("Class not found"))?;

        let student = insert_student(&txn, req).await?;
        link_student(&txn, class_id, student.id).await?;

        txn.commit()
            .await
            .map_err(|e| CourseAdminError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(student.into_student())
    }

    /// 通过 ID 获取学生
    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CourseAdminError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 通过邮箱获取学生
    pub async fn get_student_by_email_impl(&self, email: &str) -> Result<Option<Student>> {
        let result = Students::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| CourseAdminError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 列出班级内的学生，按姓名排序
    pub async fn list_students_in_class_impl(&self, class_id: i64) -> Result<Vec<Student>> {
        let students = Students::find()
            .join(
                JoinType::InnerJoin,
                crate::entity::student::Relation::ClassStudents.def(),
            )
            .filter(class_student::Column::ClassId.eq(class_id))
            .order_by_asc(Column::Name)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CourseAdminError::database_operation(format!("查询班级学生失败: {e}")))?;

        Ok(students.into_iter().map(|m| m.into_student()).collect())
    }

    /// 更新学生信息，未提供的字段保持不变
    pub async fn update_student_impl(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        if Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CourseAdminError::database_operation(format!("查询学生失败: {e}")))?
            .is_none()
        {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(email) = update.email {
            model.email = Set(email);
        }
        if let Some(phone) = update.phone {
            model.phone = Set(phone);
        }
        if let Some(location) = update.location {
            model.location = Set(location);
        }
        if let Some(class_type) = update.class_type {
            model.class_type = Set(class_type);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| student_write_error("更新学生", e))?;

        Ok(Some(result.into_student()))
    }

    /// 删除学生及其所有班级关联
    pub async fn delete_student_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CourseAdminError::database_operation(format!("开启事务失败: {e}")))?;

        class_student::Entity::delete_many()
            .filter(class_student::Column::StudentId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| CourseAdminError::database_operation(format!("删除学生关联失败: {e}")))?;

        let result = Students::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| CourseAdminError::database_operation(format!("删除学生失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| CourseAdminError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
