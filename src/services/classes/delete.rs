use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ClassService, list::list_classes};
use crate::models::ErrorCode;
use crate::services::{class_not_found, database_error};

pub async fn delete_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_class(class_id).await {
        Ok(true) => {
            info!("Class {} deleted", class_id);
            list_classes(service, request, false, 1, "Class deleted successfully").await
        }
        Ok(false) => Ok(class_not_found()),
        Err(e) => Ok(database_error(ErrorCode::ClassDeleteFailed, &e)),
    }
}
