use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::StudentService;
use super::create::validate_student_fields;
use crate::models::{
    ApiResponse, ErrorCode,
    students::{
        requests::{EditStudentForm, UpdateStudentRequest},
        responses::StudentResponse,
    },
};
use crate::services::{bad_request, database_error, email_conflict, student_not_found};

pub async fn update_student(
    service: &StudentService,
    request: &HttpRequest,
    form: EditStudentForm,
) -> ActixResult<HttpResponse> {
    let fields = match validate_student_fields(
        &form.name,
        &form.email,
        &form.phone,
        &form.location,
        &form.class_type,
    ) {
        Ok(fields) => fields,
        Err((code, msg)) => return Ok(bad_request(code, msg)),
    };

    let storage = service.get_storage(request);

    // 邮箱改成了别的学生正在使用的邮箱
    match storage.get_student_by_email(&fields.email).await {
        Ok(Some(other)) if other.id != form.student_id => return Ok(email_conflict()),
        Ok(_) => {}
        Err(e) => return Ok(database_error(ErrorCode::DatabaseError, &e)),
    }

    let update = UpdateStudentRequest {
        name: Some(fields.name),
        email: Some(fields.email),
        phone: Some(fields.phone),
        location: Some(fields.location),
        class_type: Some(fields.class_type),
    };

    match storage.update_student(form.student_id, update).await {
        Ok(Some(student)) => {
            info!("Student {} updated", student.id);
            let response = StudentResponse {
                student,
                class_id: form.class_id,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "Student updated successfully",
            )))
        }
        Ok(None) => Ok(student_not_found()),
        Err(e) if e.is_conflict() => Ok(email_conflict()),
        Err(e) => Ok(database_error(ErrorCode::StudentUpdateFailed, &e)),
    }
}
