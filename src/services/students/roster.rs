use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::config::AppConfig;
use crate::models::{
    ApiResponse, ErrorCode, PaginationQuery, students::responses::RosterResponse,
};
use crate::services::{class_not_found, database_error};
use crate::utils::pagination::{paginate, total_pages};

/// 分页返回班级花名册
pub async fn roster(
    service: &StudentService,
    request: &HttpRequest,
    class_id: i64,
    page: i64,
    message: &str,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let class = match storage.get_class_by_id(class_id).await {
        Ok(Some(class)) => class,
        Ok(None) => return Ok(class_not_found()),
        Err(e) => return Ok(database_error(ErrorCode::DatabaseError, &e)),
    };

    let students = match storage.list_students_in_class(class_id).await {
        Ok(students) => students,
        Err(e) => return Ok(database_error(ErrorCode::DatabaseError, &e)),
    };

    let size = AppConfig::get().pagination.student_page_size;
    let page = PaginationQuery { page }.clamp_to(total_pages(students.len(), size));
    let page = paginate(students, page, size);

    let response = RosterResponse {
        class,
        items: page.items,
        pagination: page.pagination,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(response, message)))
}
