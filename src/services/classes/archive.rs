use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ClassService, list::list_classes};
use crate::models::ErrorCode;
use crate::services::{class_not_found, database_error};

/// 归档后返回进行中的班级列表，取消归档后返回已归档列表
pub async fn set_archived(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
    archived: bool,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.set_class_archived(class_id, archived).await {
        Ok(true) => {
            info!("Class {} archived flag set to {}", class_id, archived);
            let message = if archived {
                "Class archived successfully"
            } else {
                "Class unarchived successfully"
            };
            list_classes(service, request, !archived, 1, message).await
        }
        Ok(false) => Ok(class_not_found()),
        Err(e) => Ok(database_error(ErrorCode::ClassUpdateFailed, &e)),
    }
}
