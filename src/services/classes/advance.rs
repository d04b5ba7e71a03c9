use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header::LOCATION};
use tracing::{info, warn};

use super::ClassService;
use crate::config::AppConfig;
use crate::middlewares::RequireSession;
use crate::models::{
    ApiResponse, ErrorCode, PaginationQuery,
    classes::{requests::ConfirmAdvanceRequest, responses::AdvancePreviewResponse},
};
use crate::services::{class_not_found, database_error};
use crate::utils::pagination::{paginate, total_pages};

/// 晋级预览：来源班级、已存在的目标班级（若有）以及分页的学生
pub async fn advance_preview(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
    page: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let class = match storage.get_class_by_id(class_id).await {
        Ok(Some(class)) => class,
        Ok(None) => return Ok(class_not_found()),
        Err(e) => return Ok(database_error(ErrorCode::DatabaseError, &e)),
    };

    let destination = match storage
        .find_advanced_class(class.id, &class.course, &class.location, class.year)
        .await
    {
        Ok(destination) => destination,
        Err(e) => return Ok(database_error(ErrorCode::DatabaseError, &e)),
    };

    let students = match storage.list_students_in_class(class_id).await {
        Ok(students) => students,
        Err(e) => return Ok(database_error(ErrorCode::DatabaseError, &e)),
    };

    let size = AppConfig::get().pagination.student_page_size;
    let page = PaginationQuery { page }.clamp_to(total_pages(students.len(), size));

    let response = AdvancePreviewResponse {
        class,
        destination,
        students: paginate(students, page, size),
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Advance preview retrieved successfully",
    )))
}

/// 确认晋级，成功后重定向到首页
pub async fn confirm_advance(
    service: &ClassService,
    request: &HttpRequest,
    advance: ConfirmAdvanceRequest,
) -> ActixResult<HttpResponse> {
    let Some(teacher_id) = RequireSession::extract_teacher_id(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Please log in",
        )));
    };

    let storage = service.get_storage(request);

    match storage
        .advance_class(advance.class_id, &advance.checked, teacher_id)
        .await
    {
        Ok(outcome) => {
            info!(
                "Class {} advanced into {} (created: {}, linked: {})",
                outcome.source_class_id,
                outcome.destination_class_id,
                outcome.created,
                outcome.linked
            );
            Ok(HttpResponse::SeeOther()
                .insert_header((LOCATION, "/homepage"))
                .finish())
        }
        Err(e) if e.is_not_found() => {
            warn!("Advance requested for missing class {}", advance.class_id);
            Ok(class_not_found())
        }
        Err(e) => Ok(database_error(ErrorCode::ClassAdvanceFailed, &e)),
    }
}
