use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ClassService, list::list_classes};
use crate::middlewares::RequireSession;
use crate::models::{ErrorCode, classes::requests::CreateClassRequest};
use crate::services::{bad_request, database_error};
use crate::utils::validate::{require_field, validate_class_type, validate_location};

pub async fn create_class(
    service: &ClassService,
    request: &HttpRequest,
    class_data: CreateClassRequest,
) -> ActixResult<HttpResponse> {
    let class_data = match normalize(class_data) {
        Ok(data) => data,
        Err(msg) => return Ok(bad_request(ErrorCode::ClassInvalid, msg)),
    };

    let storage = service.get_storage(request);
    let teacher_id = RequireSession::extract_teacher_id(request);

    match storage.create_class(class_data, teacher_id).await {
        Ok(class) => {
            info!(
                "Class {} created: {} {} {}",
                class.id, class.course, class.class_type, class.time_slot
            );
            list_classes(service, request, false, 1, "Class created successfully").await
        }
        Err(e) => Ok(database_error(ErrorCode::ClassCreationFailed, &e)),
    }
}

// 校验并去掉首尾空白
fn normalize(data: CreateClassRequest) -> Result<CreateClassRequest, String> {
    let course = require_field(&data.course, "course")?.to_string();
    let time_slot = require_field(&data.time_slot, "time_slot")?.to_string();
    let class_type = data.class_type.trim().to_string();
    let location = data.location.trim().to_string();
    validate_class_type(&class_type)?;
    validate_location(&location)?;
    if data.year <= 0 {
        return Err(format!("Invalid year: {}", data.year));
    }

    Ok(CreateClassRequest {
        course,
        class_type,
        time_slot,
        location,
        year: data.year,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateClassRequest {
        CreateClassRequest {
            course: " Junior Fullstack Developer ".to_string(),
            class_type: "PowerUp".to_string(),
            time_slot: "Morning".to_string(),
            location: "Lisbon".to_string(),
            year: 2024,
        }
    }

    #[test]
    fn test_normalize_trims_fields() {
        let data = normalize(request()).unwrap();
        assert_eq!(data.course, "Junior Fullstack Developer");
    }

    #[test]
    fn test_normalize_rejects_invalid_fields() {
        let mut data = request();
        data.course = "  ".to_string();
        assert_eq!(normalize(data).unwrap_err(), "course is required");

        let mut data = request();
        data.location = "Faro".to_string();
        assert!(normalize(data).is_err());

        let mut data = request();
        data.year = 0;
        assert!(normalize(data).is_err());
    }
}
