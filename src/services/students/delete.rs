use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{StudentService, roster::roster};
use crate::models::{ErrorCode, students::requests::StudentRefForm};
use crate::services::{database_error, student_not_found};

/// 删除学生后返回其所在班级的花名册
pub async fn delete_student(
    service: &StudentService,
    request: &HttpRequest,
    form: StudentRefForm,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_student(form.student_id).await {
        Ok(true) => {
            info!("Student {} deleted", form.student_id);
            roster(service, request, form.class_id, 1, "Student deleted successfully").await
        }
        Ok(false) => Ok(student_not_found()),
        Err(e) => Ok(database_error(ErrorCode::StudentDeleteFailed, &e)),
    }
}
