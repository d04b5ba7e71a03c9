use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::models::{ApiResponse, ErrorCode, PaginationQuery};
use crate::services::database_error;
use crate::utils::pagination::{paginate, total_pages};

/// 返回分页后的班级列表
///
/// 写操作完成后也通过这里重新取列表，`message` 描述刚完成的操作。
pub async fn list_classes(
    service: &ClassService,
    request: &HttpRequest,
    archived: bool,
    page: i64,
    message: &str,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let size = service.page_size();

    match storage.list_classes(archived).await {
        Ok(classes) => {
            let page = PaginationQuery { page }.clamp_to(total_pages(classes.len(), size));
            let response = paginate(classes, page, size);
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, message)))
        }
        Err(e) => Ok(database_error(ErrorCode::DatabaseError, &e)),
    }
}
