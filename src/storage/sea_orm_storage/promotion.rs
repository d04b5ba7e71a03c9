//! 班级晋级

use super::SeaOrmStorage;
use super::classes::{find_advanced_class, insert_class};
use super::students::link_student;
use crate::entity::class::{Column, Entity as Classes};
use crate::errors::{CourseAdminError, Result};
use crate::models::classes::{
    entities::{ADVANCED_TIME_SLOT, AdvanceOutcome, ClassType},
    requests::CreateClassRequest,
};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, TransactionTrait};
use tracing::debug;

impl SeaOrmStorage {
    /// 班级晋级
    ///
    /// 在一个事务内完成：
    /// 1. 归档原班级
    /// 2. 复用同课程、校区、年份的 Advanced 班级，不存在则新建并关联当前教师
    /// 3. 将勾选的学生加入目标班级，原班级关系保留
    ///
    /// 任一步失败整个事务回滚。
    pub async fn advance_class_impl(
        &self,
        class_id: i64,
        student_ids: &[i64],
        teacher_id: i64,
    ) -> Result<AdvanceOutcome> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CourseAdminError::database_operation(format!("开启事务失败: {e}")))?;

        let source = Classes::find_by_id(class_id)
            .one(&txn)
            .await
            .map_err(|e| CourseAdminError::database_operation(format!("查询班级失败: {e}")))?
            .ok_or_else(|| CourseAdminError::not_found("Class not found"))?;

        Classes::update_many()
            .col_expr(Column::Archived, Expr::value(true))
            .col_expr(Column::UpdatedAt, Expr::value(chrono::Utc::now().timestamp()))
            .filter(Column::Id.eq(class_id))
            .exec(&txn)
            .await
            .map_err(|e| CourseAdminError::database_operation(format!("归档班级失败: {e}")))?;

        let existing = find_advanced_class(
            &txn,
            source.id,
            &source.course,
            &source.location,
            source.year,
        )
        .await?;
        let (destination, created) = match existing {
            Some(existing) => (existing, false),
            None => {
                let request = CreateClassRequest {
                    course: source.course.clone(),
                    class_type: ClassType::ADVANCED.to_string(),
                    time_slot: ADVANCED_TIME_SLOT.to_string(),
                    location: source.location.clone(),
                    year: source.year,
                };
                (insert_class(&txn, request, false, Some(teacher_id)).await?, true)
            }
        };
        debug!(
            "Advancing class {} into class {} (created: {})",
            class_id, destination.id, created
        );

        let mut linked = 0;
        for &student_id in student_ids {
            if link_student(&txn, destination.id, student_id).await? {
                linked += 1;
            }
        }

        txn.commit()
            .await
            .map_err(|e| CourseAdminError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(AdvanceOutcome {
            source_class_id: class_id,
            destination_class_id: destination.id,
            created,
            linked,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::teachers::requests::CreateTeacherRequest;
    use crate::storage::sea_orm_storage::classes::tests::{class_request, student_request};

    async fn setup() -> (SeaOrmStorage, i64, i64, Vec<i64>) {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let teacher = storage
            .create_teacher_impl(CreateTeacherRequest {
                name: "Tiago".to_string(),
                email: "admin@dev.com".to_string(),
                password_hash: "hash".to_string(),
                class_id: None,
            })
            .await
            .unwrap();
        let class = storage
            .create_class_impl(class_request("PowerUp", "Morning"), Some(teacher.id))
            .await
            .unwrap();

        let mut ids = Vec::new();
        for (name, email) in [("Ana", "ana@x.com"), ("Rui", "rui@x.com"), ("Marta", "m@x.com")] {
            let student = storage
                .create_student_in_class_impl(student_request(name, email), class.id)
                .await
                .unwrap();
            ids.push(student.id);
        }
        (storage, teacher.id, class.id, ids)
    }

    #[tokio::test]
    async fn test_advance_creates_destination() {
        let (storage, teacher_id, class_id, ids) = setup().await;
        let checked = &ids[..2];

        let outcome = storage
            .advance_class_impl(class_id, checked, teacher_id)
            .await
            .unwrap();
        assert!(outcome.created);
        assert_eq!(outcome.linked, 2);
        assert_eq!(storage.count_classes_impl().await.unwrap(), 2);

        let source = storage.get_class_by_id_impl(class_id).await.unwrap().unwrap();
        assert!(source.archived);

        let destination = storage
            .get_class_by_id_impl(outcome.destination_class_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(destination.class_type, "Advanced");
        assert_eq!(destination.time_slot, "All Day");
        assert_eq!(destination.course, source.course);
        assert_eq!(destination.location, source.location);
        assert_eq!(destination.year, source.year);
        assert!(!destination.archived);

        let moved = storage
            .list_students_in_class_impl(destination.id)
            .await
            .unwrap();
        assert_eq!(moved.len(), 2);
        // 原班级关系保留
        assert_eq!(
            storage.list_students_in_class_impl(class_id).await.unwrap().len(),
            3
        );
    }

    #[tokio::test]
    async fn test_advance_reuses_existing_destination() {
        let (storage, teacher_id, class_id, ids) = setup().await;
        let existing = storage
            .create_class_impl(class_request("Advanced", "All Day"), None)
            .await
            .unwrap();

        let outcome = storage
            .advance_class_impl(class_id, &ids, teacher_id)
            .await
            .unwrap();
        assert!(!outcome.created);
        assert_eq!(outcome.destination_class_id, existing.id);
        assert_eq!(storage.count_classes_impl().await.unwrap(), 2);
        assert_eq!(
            storage.list_students_in_class_impl(existing.id).await.unwrap().len(),
            3
        );
    }

    #[tokio::test]
    async fn test_advancing_advanced_class_creates_new_destination() {
        let (storage, teacher_id, _, _) = setup().await;
        let advanced = storage
            .create_class_impl(class_request("Advanced", "All Day"), Some(teacher_id))
            .await
            .unwrap();
        let student = storage
            .create_student_in_class_impl(student_request("Joana", "joana@x.com"), advanced.id)
            .await
            .unwrap();

        let outcome = storage
            .advance_class_impl(advanced.id, &[student.id], teacher_id)
            .await
            .unwrap();
        assert_ne!(outcome.destination_class_id, advanced.id);
        assert!(outcome.created);
        assert_eq!(outcome.linked, 1);

        let ongoing = storage.list_classes_impl(false).await.unwrap();
        assert!(ongoing.iter().any(|c| c.id == outcome.destination_class_id));
        assert!(ongoing.iter().all(|c| c.id != advanced.id));
    }

    #[tokio::test]
    async fn test_advance_does_not_duplicate_memberships() {
        let (storage, teacher_id, class_id, ids) = setup().await;
        let first = storage
            .advance_class_impl(class_id, &ids[..1], teacher_id)
            .await
            .unwrap();

        let second = storage
            .advance_class_impl(class_id, &ids, teacher_id)
            .await
            .unwrap();
        assert_eq!(second.destination_class_id, first.destination_class_id);
        assert_eq!(second.linked, 2);
        assert_eq!(
            storage
                .list_students_in_class_impl(first.destination_class_id)
                .await
                .unwrap()
                .len(),
            3
        );
    }

    #[tokio::test]
    async fn test_advance_missing_class_changes_nothing() {
        let (storage, teacher_id, class_id, ids) = setup().await;

        let err = storage
            .advance_class_impl(9999, &ids, teacher_id)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.message(), "Class not found");

        let class = storage.get_class_by_id_impl(class_id).await.unwrap().unwrap();
        assert!(!class.archived);
        assert_eq!(storage.count_classes_impl().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_failed_link_rolls_back_everything() {
        let (storage, teacher_id, class_id, _) = setup().await;

        // 不存在的学生触发外键错误
        let result = storage
            .advance_class_impl(class_id, &[12345], teacher_id)
            .await;
        assert!(result.is_err());

        let class = storage.get_class_by_id_impl(class_id).await.unwrap().unwrap();
        assert!(!class.archived);
        assert_eq!(storage.count_classes_impl().await.unwrap(), 1);
    }
}
