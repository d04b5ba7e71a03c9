use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::{
    ApiResponse, ErrorCode,
    classes::entities::{ClassType, Location},
    students::{
        requests::StudentRefForm,
        responses::{EditStudentResponse, StudentFormResponse},
    },
};
use crate::services::{class_not_found, database_error, student_not_found};

pub async fn add_form(
    service: &StudentService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_class_by_id(class_id).await {
        Ok(Some(class)) => {
            let response = StudentFormResponse {
                class,
                locations: Location::all(),
                class_types: ClassType::all(),
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Form options retrieved")))
        }
        Ok(None) => Ok(class_not_found()),
        Err(e) => Ok(database_error(ErrorCode::DatabaseError, &e)),
    }
}

pub async fn edit_form(
    service: &StudentService,
    request: &HttpRequest,
    form: StudentRefForm,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_student_by_id(form.student_id).await {
        Ok(Some(student)) => {
            let response = EditStudentResponse {
                student,
                class_id: form.class_id,
                locations: Location::all(),
                class_types: ClassType::all(),
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Student retrieved")))
        }
        Ok(None) => Ok(student_not_found()),
        Err(e) => Ok(database_error(ErrorCode::DatabaseError, &e)),
    }
}
