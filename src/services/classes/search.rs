use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::models::{ApiResponse, ErrorCode, classes::requests::ClassSearchQuery};
use crate::services::database_error;

pub async fn search_classes(
    service: &ClassService,
    request: &HttpRequest,
    query: ClassSearchQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.search_classes(&query.q, query.archived).await {
        Ok(classes) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            classes,
            "Classes retrieved successfully",
        ))),
        Err(e) => Ok(database_error(ErrorCode::DatabaseError, &e)),
    }
}
