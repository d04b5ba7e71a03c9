//! 学生批量导入

use std::collections::HashSet;

use super::SeaOrmStorage;
use super::students::{insert_student, link_student};
use crate::entity::{class, student};
use crate::errors::{CourseAdminError, Result};
use crate::models::students::{
    entities::ImportOutcome,
    requests::{CreateStudentRequest, ImportStudentRow},
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QuerySelect, TransactionTrait};

impl SeaOrmStorage {
    /// 批量导入学生到班级
    ///
    /// 校区、课程、班级类型取自目标班级。数据库中或文件中已出现过的邮箱跳过。
    /// 整个导入在一个事务中完成。
    pub async fn import_students_impl(
        &self,
        class_id: i64,
        rows: Vec<ImportStudentRow>,
    ) -> Result<ImportOutcome> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CourseAdminError::database_operation(format!("开启事务失败: {e}")))?;

        let class = class::Entity::find_by_id(class_id)
            .one(&txn)
            .await
            .map_err(|e| CourseAdminError::database_operation(format!("查询班级失败: {e}")))?
            .ok_or_else(|| CourseAdminError::not_found("Class not found"))?;

        let emails: Vec<String> = rows.iter().map(|r| r.email.clone()).collect();
        let mut seen: HashSet<String> = if emails.is_empty() {
            HashSet::new()
        } else {
            student::Entity::find()
                .select_only()
                .column(student::Column::Email)
                .filter(student::Column::Email.is_in(emails))
                .into_tuple::<String>()
                .all(&txn)
                .await
                .map_err(|e| CourseAdminError::database_operation(format!("查询学生邮箱失败: {e}")))?
                .into_iter()
                .collect()
        };

        let mut outcome = ImportOutcome::default();
        for row in rows {
            if !seen.insert(row.email.clone()) {
                outcome.skipped_rows.push(row.row);
                continue;
            }

            let request = CreateStudentRequest {
                name: row.name,
                email: row.email,
                phone: row.phone,
                location: class.location.clone(),
                course: class.course.clone(),
                class_type: class.class_type.clone(),
            };
            let inserted = insert_student(&txn, request).await?;
            link_student(&txn, class.id, inserted.id).await?;
            outcome.inserted += 1;
        }

        txn.commit()
            .await
            .map_err(|e| CourseAdminError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::classes::tests::{class_request, student_request};

    fn row(row: usize, name: &str, email: &str) -> ImportStudentRow {
        ImportStudentRow {
            row,
            name: name.to_string(),
            email: email.to_string(),
            phone: "912 345 678".to_string(),
        }
    }

    #[tokio::test]
    async fn test_import_skips_duplicate_emails() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let class = storage
            .create_class_impl(class_request("Bootcamp", "Evening"), None)
            .await
            .unwrap();
        storage
            .create_student_in_class_impl(student_request("Ana", "ana@x.com"), class.id)
            .await
            .unwrap();

        let outcome = storage
            .import_students_impl(
                class.id,
                vec![
                    row(2, "Ana Again", "ana@x.com"),
                    row(3, "Rui", "rui@x.com"),
                    row(4, "Rui Twin", "rui@x.com"),
                    row(5, "Marta", "marta@x.com"),
                ],
            )
            .await
            .unwrap();

        assert_eq!(outcome.inserted, 2);
        assert_eq!(outcome.skipped_rows, vec![2, 4]);

        let roster = storage.list_students_in_class_impl(class.id).await.unwrap();
        assert_eq!(roster.len(), 3);

        let rui = storage
            .get_student_by_email_impl("rui@x.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(rui.name, "Rui");
        assert_eq!(rui.class_type, "Bootcamp");
        assert_eq!(rui.location, "Lisbon");
    }

    #[tokio::test]
    async fn test_import_into_missing_class() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let err = storage
            .import_students_impl(7, vec![row(2, "Rui", "rui@x.com")])
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(storage.get_student_by_email_impl("rui@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_empty_import() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let class = storage
            .create_class_impl(class_request("PowerUp", "Morning"), None)
            .await
            .unwrap();
        let outcome = storage.import_students_impl(class.id, Vec::new()).await.unwrap();
        assert_eq!(outcome, ImportOutcome::default());
    }
}
