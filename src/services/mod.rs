pub mod auth;
pub mod classes;
pub mod students;

pub use auth::AuthService;
pub use classes::ClassService;
pub use students::StudentService;

use actix_web::HttpResponse;

use crate::errors::CourseAdminError;
use crate::models::{ApiResponse, ErrorCode};

/// 存储层错误统一返回 500，消息形如 `Database error: ...`
pub(crate) fn database_error(code: ErrorCode, err: &CourseAdminError) -> HttpResponse {
    tracing::error!("Database error ({}): {}", err.code(), err.message());
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        code,
        format!("Database error: {}", err.message()),
    ))
}

pub(crate) fn bad_request(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn email_conflict() -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error_empty(
        ErrorCode::StudentEmailAlreadyExists,
        "Email already exists",
    ))
}

pub(crate) fn class_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::ClassNotFound,
        "Class not found",
    ))
}

pub(crate) fn student_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::StudentNotFound,
        "Student not found",
    ))
}
