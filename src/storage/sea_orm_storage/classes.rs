//! 班级存储操作

use std::collections::HashSet;

use super::SeaOrmStorage;
use crate::entity::class::{ActiveModel, Column, Entity as Classes};
use crate::entity::{class_student, class_teacher, student};
use crate::errors::{CourseAdminError, Result};
use crate::models::classes::{
    entities::{Class, ClassType},
    requests::CreateClassRequest,
};
use crate::utils::escape_like_pattern;
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

/// 插入班级行，`teacher_id` 存在时同时写入班级教师关联
pub(super) async fn insert_class<C: ConnectionTrait>(
    conn: &C,
    req: CreateClassRequest,
    archived: bool,
    teacher_id: Option<i64>,
) -> Result<Class> {
    let now = chrono::Utc::now().timestamp();

    let model = ActiveModel {
        course: Set(req.course),
        class_type: Set(req.class_type),
        time_slot: Set(req.time_slot),
        location: Set(req.location),
        year: Set(req.year),
        archived: Set(archived),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let class = model
        .insert(conn)
        .await
        .map_err(|e| CourseAdminError::database_operation(format!("创建班级失败: {e}")))?;

    if let Some(teacher_id) = teacher_id {
        class_teacher::ActiveModel {
            class_id: Set(class.id),
            teacher_id: Set(teacher_id),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(|e| CourseAdminError::database_operation(format!("关联班级教师失败: {e}")))?;
    }

    Ok(class.into_class())
}

impl SeaOrmStorage {
    /// 统计班级数量
    pub async fn count_classes_impl(&self) -> Result<u64> {
        Classes::find()
            .count(&self.db)
            .await
            .map_err(|e| CourseAdminError::database_operation(format!("统计班级数量失败: {e}")))
    }

    /// 创建班级
    pub async fn create_class_impl(
        &self,
        req: CreateClassRequest,
        teacher_id: Option<i64>,
    ) -> Result<Class> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CourseAdminError::database_operation(format!("开启事务失败: {e}")))?;

        let class = insert_class(&txn, req, false, teacher_id).await?;

        txn.commit()
            .await
            .map_err(|e| CourseAdminError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(class)
    }

    /// 通过 ID 获取班级
    pub async fn get_class_by_id_impl(&self, class_id: i64) -> Result<Option<Class>> {
        let result = Classes::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| CourseAdminError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 按归档状态列出班级，按创建顺序排列
    pub async fn list_classes_impl(&self, archived: bool) -> Result<Vec<Class>> {
        let classes = Classes::find()
            .filter(Column::Archived.eq(archived))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CourseAdminError::database_operation(format!("查询班级列表失败: {e}")))?;

        Ok(classes.into_iter().map(|m| m.into_class()).collect())
    }

    /// 设置班级归档状态
    pub async fn set_class_archived_impl(&self, class_id: i64, archived: bool) -> Result<bool> {
        let result = Classes::update_many()
            .col_expr(Column::Archived, Expr::value(archived))
            .col_expr(Column::UpdatedAt, Expr::value(chrono::Utc::now().timestamp()))
            .filter(Column::Id.eq(class_id))
            .exec(&self.db)
            .await
            .map_err(|e| CourseAdminError::database_operation(format!("更新班级状态失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 删除班级
    ///
    /// 同一事务内：删除班级学生关联，删除因此不再属于任何班级的学生，
    /// 删除班级教师关联，最后删除班级本身。
    pub async fn delete_class_impl(&self, class_id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CourseAdminError::database_operation(format!("开启事务失败: {e}")))?;

        if Classes::find_by_id(class_id)
            .one(&txn)
            .await
            .map_err(|e| CourseAdminError::database_operation(format!("查询班级失败: {e}")))?
            .is_none()
        {
            return Ok(false);
        }

        let member_ids: Vec<i64> = class_student::Entity::find()
            .select_only()
            .column(class_student::Column::StudentId)
            .filter(class_student::Column::ClassId.eq(class_id))
            .into_tuple()
            .all(&txn)
            .await
            .map_err(|e| CourseAdminError::database_operation(format!("查询班级学生失败: {e}")))?;

        class_student::Entity::delete_many()
            .filter(class_student::Column::ClassId.eq(class_id))
            .exec(&txn)
            .await
            .map_err(|e| CourseAdminError::database_operation(format!("删除班级学生关联失败: {e}")))?;

        if !member_ids.is_empty() {
            let still_enrolled: HashSet<i64> = class_student::Entity::find()
                .select_only()
                .column(class_student::Column::StudentId)
                .filter(class_student::Column::StudentId.is_in(member_ids.clone()))
                .into_tuple::<i64>()
                .all(&txn)
                .await
                .map_err(|e| {
                    CourseAdminError::database_operation(format!("查询学生关联失败: {e}"))
                })?
                .into_iter()
                .collect();

            let orphans: Vec<i64> = member_ids
                .into_iter()
                .filter(|id| !still_enrolled.contains(id))
                .collect();

            if !orphans.is_empty() {
                student::Entity::delete_many()
                    .filter(student::Column::Id.is_in(orphans))
                    .exec(&txn)
                    .await
                    .map_err(|e| {
                        CourseAdminError::database_operation(format!("删除学生失败: {e}"))
                    })?;
            }
        }

        class_teacher::Entity::delete_many()
            .filter(class_teacher::Column::ClassId.eq(class_id))
            .exec(&txn)
            .await
            .map_err(|e| CourseAdminError::database_operation(format!("删除班级教师关联失败: {e}")))?;

        let result = Classes::delete_by_id(class_id)
            .exec(&txn)
            .await
            .map_err(|e| CourseAdminError::database_operation(format!("删除班级失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| CourseAdminError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 搜索班级
    ///
    /// 课程、类型、时段、校区做子串匹配；查询词是整数时也匹配年份。
    pub async fn search_classes_impl(
        &self,
        query: &str,
        archived: Option<bool>,
    ) -> Result<Vec<Class>> {
        let mut select = Classes::find();

        let query = query.trim();
        if !query.is_empty() {
            let pattern = format!("%{}%", escape_like_pattern(query));
            let like = || LikeExpr::new(pattern.clone()).escape('\\');

            let mut condition = Condition::any()
                .add(Column::Course.like(like()))
                .add(Column::ClassType.like(like()))
                .add(Column::TimeSlot.like(like()))
                .add(Column::Location.like(like()));
            if let Ok(year) = query.parse::<i32>() {
                condition = condition.add(Column::Year.eq(year));
            }
            select = select.filter(condition);
        }

        if let Some(archived) = archived {
            select = select.filter(Column::Archived.eq(archived));
        }

        let classes = select
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CourseAdminError::database_operation(format!("搜索班级失败: {e}")))?;

        Ok(classes.into_iter().map(|m| m.into_class()).collect())
    }

    /// 查找同一课程、校区、年份的 Advanced 班级
    pub async fn find_advanced_class_impl(
        &self,
        source_id: i64,
        course: &str,
        location: &str,
        year: i32,
    ) -> Result<Option<Class>> {
        find_advanced_class(&self.db, source_id, course, location, year).await
    }
}

// 源班级本身是 Advanced 时不能作为目标，否则学员随源班级一起被归档
pub(super) async fn find_advanced_class<C: ConnectionTrait>(
    conn: &C,
    source_id: i64,
    course: &str,
    location: &str,
    year: i32,
) -> Result<Option<Class>> {
    let result = Classes::find()
        .filter(Column::Course.eq(course))
        .filter(Column::Location.eq(location))
        .filter(Column::Year.eq(year))
        .filter(Column::ClassType.eq(ClassType::ADVANCED))
        .filter(Column::Id.ne(source_id))
        .order_by_asc(Column::Id)
        .one(conn)
        .await
        .map_err(|e| CourseAdminError::database_operation(format!("查询晋级班级失败: {e}")))?;

    Ok(result.map(|m| m.into_class()))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::students::requests::CreateStudentRequest;

    pub(crate) fn class_request(class_type: &str, time_slot: &str) -> CreateClassRequest {
        CreateClassRequest {
            course: "Junior Fullstack Developer".to_string(),
            class_type: class_type.to_string(),
            time_slot: time_slot.to_string(),
            location: "Lisbon".to_string(),
            year: 2024,
        }
    }

    pub(crate) fn student_request(name: &str, email: &str) -> CreateStudentRequest {
        CreateStudentRequest {
            name: name.to_string(),
            email: email.to_string(),
            phone: "912 345 678".to_string(),
            location: "Lisbon".to_string(),
            course: "Junior Fullstack Developer".to_string(),
            class_type: "PowerUp".to_string(),
        }
    }

    #[tokio::test]
    async fn test_class_round_trip() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let created = storage
            .create_class_impl(class_request("PowerUp", "Morning"), None)
            .await
            .unwrap();

        let fetched = storage
            .get_class_by_id_impl(created.id)
            .await
            .unwrap()
            .expect("class exists");
        assert_eq!(fetched, created);
        assert!(!fetched.archived);
        assert_eq!(storage.count_classes_impl().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_archive_moves_between_lists() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let morning = storage
            .create_class_impl(class_request("PowerUp", "Morning"), None)
            .await
            .unwrap();
        storage
            .create_class_impl(class_request("PowerUp", "Afternoon"), None)
            .await
            .unwrap();

        assert!(storage.set_class_archived_impl(morning.id, true).await.unwrap());
        let ongoing = storage.list_classes_impl(false).await.unwrap();
        let archived = storage.list_classes_impl(true).await.unwrap();
        assert_eq!(ongoing.len(), 1);
        assert_eq!(archived.len(), 1);
        assert_eq!(archived[0].id, morning.id);

        assert!(storage.set_class_archived_impl(morning.id, false).await.unwrap());
        assert_eq!(storage.list_classes_impl(false).await.unwrap().len(), 2);
        assert!(!storage.set_class_archived_impl(999, true).await.unwrap());
    }

    #[tokio::test]
    async fn test_teacher_link_requires_existing_teacher() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let result = storage
            .create_class_impl(class_request("PowerUp", "Morning"), Some(42))
            .await;
        assert!(result.is_err());
        // 事务回滚，班级行也不存在
        assert_eq!(storage.count_classes_impl().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_class_removes_orphaned_students_only() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let doomed = storage
            .create_class_impl(class_request("PowerUp", "Morning"), None)
            .await
            .unwrap();
        let other = storage
            .create_class_impl(class_request("Bootcamp", "Evening"), None)
            .await
            .unwrap();

        let only_here = storage
            .create_student_in_class_impl(student_request("Ana", "ana@x.com"), doomed.id)
            .await
            .unwrap();
        let shared = storage
            .create_student_in_class_impl(student_request("Rui", "rui@x.com"), doomed.id)
            .await
            .unwrap();
        class_student::ActiveModel {
            class_id: Set(other.id),
            student_id: Set(shared.id),
            joined_at: Set(0),
            ..Default::default()
        }
        .insert(&storage.db)
        .await
        .unwrap();

        assert!(storage.delete_class_impl(doomed.id).await.unwrap());
        assert!(storage.get_class_by_id_impl(doomed.id).await.unwrap().is_none());
        assert!(
            storage
                .get_student_by_id_impl(only_here.id)
                .await
                .unwrap()
                .is_none()
        );
        let remaining = storage.list_students_in_class_impl(other.id).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, shared.id);

        assert!(!storage.delete_class_impl(doomed.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_search_matches_fields_and_year() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        storage
            .create_class_impl(class_request("PowerUp", "Morning"), None)
            .await
            .unwrap();
        let mut porto = class_request("Bootcamp", "Evening");
        porto.location = "Porto".to_string();
        porto.year = 2025;
        let porto = storage.create_class_impl(porto, None).await.unwrap();
        storage.set_class_archived_impl(porto.id, true).await.unwrap();

        assert_eq!(storage.search_classes_impl("port", None).await.unwrap().len(), 1);
        assert_eq!(storage.search_classes_impl("2024", None).await.unwrap().len(), 1);
        assert_eq!(storage.search_classes_impl("", None).await.unwrap().len(), 2);
        assert_eq!(
            storage
                .search_classes_impl("Fullstack", Some(false))
                .await
                .unwrap()
                .len(),
            1
        );
        // 通配符按字面匹配
        assert!(storage.search_classes_impl("%", None).await.unwrap().is_empty());
    }
}
