//! 教师存储操作

use super::SeaOrmStorage;
use crate::entity::teacher::{ActiveModel, Column, Entity as Teachers};
use crate::errors::{CourseAdminError, Result};
use crate::models::teachers::{entities::Teacher, requests::CreateTeacherRequest};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 统计教师数量
    pub async fn count_teachers_impl(&self) -> Result<u64> {
        Teachers::find()
            .count(&self.db)
            .await
            .map_err(|e| CourseAdminError::database_operation(format!("统计教师数量失败: {e}")))
    }

    /// 创建教师（密码必须已经哈希）
    pub async fn create_teacher_impl(&self, req: CreateTeacherRequest) -> Result<Teacher> {
        let model = ActiveModel {
            name: Set(req.name),
            email: Set(req.email),
            password_hash: Set(req.password_hash),
            class_id: Set(req.class_id),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CourseAdminError::database_operation(format!("创建教师失败: {e}")))?;

        Ok(result.into_teacher())
    }

    /// 通过邮箱获取教师
    pub async fn get_teacher_by_email_impl(&self, email: &str) -> Result<Option<Teacher>> {
        let result = Teachers::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| CourseAdminError::database_operation(format!("查询教师失败: {e}")))?;

        Ok(result.map(|m| m.into_teacher()))
    }

    /// 通过 ID 获取教师
    pub async fn get_teacher_by_id_impl(&self, id: i64) -> Result<Option<Teacher>> {
        let result = Teachers::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CourseAdminError::database_operation(format!("查询教师失败: {e}")))?;

        Ok(result.map(|m| m.into_teacher()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teacher_request(email: &str) -> CreateTeacherRequest {
        CreateTeacherRequest {
            name: "Tiago".to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            class_id: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_lookup_teacher() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        assert_eq!(storage.count_teachers_impl().await.unwrap(), 0);

        let created = storage
            .create_teacher_impl(teacher_request("admin@dev.com"))
            .await
            .unwrap();

        let by_email = storage
            .get_teacher_by_email_impl("admin@dev.com")
            .await
            .unwrap()
            .expect("teacher by email");
        assert_eq!(by_email.id, created.id);
        assert_eq!(by_email.name, "Tiago");

        let by_id = storage.get_teacher_by_id_impl(created.id).await.unwrap();
        assert_eq!(by_id.map(|t| t.email), Some("admin@dev.com".to_string()));
        assert_eq!(storage.count_teachers_impl().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_teacher_email_is_unique() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        storage
            .create_teacher_impl(teacher_request("admin@dev.com"))
            .await
            .unwrap();
        assert!(
            storage
                .create_teacher_impl(teacher_request("admin@dev.com"))
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_unknown_teacher() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        assert!(
            storage
                .get_teacher_by_email_impl("nobody@dev.com")
                .await
                .unwrap()
                .is_none()
        );
    }
}
