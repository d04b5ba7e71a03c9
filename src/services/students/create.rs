use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::StudentService;
use crate::models::{
    ApiResponse, ErrorCode,
    students::{
        requests::{AddStudentForm, CreateStudentRequest},
        responses::StudentResponse,
    },
};
use crate::services::{bad_request, class_not_found, database_error, email_conflict};
use crate::utils::phone::validate_phone_number;
use crate::utils::validate::{
    require_field, validate_class_type, validate_email, validate_location,
};

/// 校验通过的学生字段
#[derive(Debug, PartialEq)]
pub(super) struct StudentFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub class_type: String,
}

/// 校验表单字段，电话号码返回规范化后的格式
pub(super) fn validate_student_fields(
    name: &str,
    email: &str,
    phone: &str,
    location: &str,
    class_type: &str,
) -> Result<StudentFields, (ErrorCode, String)> {
    let name = require_field(name, "name").map_err(|m| (ErrorCode::StudentFieldMissing, m))?;
    let email = require_field(email, "email").map_err(|m| (ErrorCode::StudentFieldMissing, m))?;
    validate_email(email).map_err(|m| (ErrorCode::StudentEmailInvalid, m.to_string()))?;

    let phone = validate_phone_number(phone).ok_or_else(|| {
        (
            ErrorCode::StudentPhoneInvalid,
            "Invalid phone number".to_string(),
        )
    })?;

    let location = location.trim();
    validate_location(location).map_err(|m| (ErrorCode::BadRequest, m))?;
    let class_type = class_type.trim();
    validate_class_type(class_type).map_err(|m| (ErrorCode::BadRequest, m))?;

    Ok(StudentFields {
        name: name.to_string(),
        email: email.to_string(),
        phone,
        location: location.to_string(),
        class_type: class_type.to_string(),
    })
}

pub async fn create_student(
    service: &StudentService,
    request: &HttpRequest,
    form: AddStudentForm,
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

    let class = match storage.get_class_by_id(form.class_id).await {
        Ok(Some(class)) => class,
        Ok(None) => return Ok(class_not_found()),
        Err(e) => return Ok(database_error(ErrorCode::DatabaseError, &e)),
    };

    match storage.get_student_by_email(&fields.email).await {
        Ok(Some(_)) => return Ok(email_conflict()),
        Ok(None) => {}
        Err(e) => return Ok(database_error(ErrorCode::DatabaseError, &e)),
    }

    let create = CreateStudentRequest {
        name: fields.name,
        email: fields.email,
        phone: fields.phone,
        location: fields.location,
        course: class.course,
        class_type: fields.class_type,
    };

    match storage.create_student_in_class(create, class.id).await {
        Ok(student) => {
            info!("Student {} added to class {}", student.id, class.id);
            let response = StudentResponse {
                student,
                class_id: class.id,
            };
            Ok(HttpResponse::Created().json(ApiResponse::success(
                response,
                "Student added successfully",
            )))
        }
        Err(e) if e.is_not_found() => Ok(class_not_found()),
        // 预检之后并发写入了同一邮箱
        Err(e) if e.is_conflict() => Ok(email_conflict()),
        Err(e) => Ok(database_error(ErrorCode::StudentCreationFailed, &e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_fields_are_normalized() {
        let fields =
            validate_student_fields(" Ana Silva ", "ana@x.com", "912345678", "Lisbon", "PowerUp")
                .unwrap();
        assert_eq!(fields.name, "Ana Silva");
        assert_eq!(fields.phone, "912 345 678");
    }

    #[test]
    fn test_invalid_fields_report_error_codes() {
        let err = validate_student_fields("", "ana@x.com", "912345678", "Lisbon", "PowerUp")
            .unwrap_err();
        assert_eq!(err.0, ErrorCode::StudentFieldMissing);

        let err = validate_student_fields("Ana", "ana-at-x", "912345678", "Lisbon", "PowerUp")
            .unwrap_err();
        assert_eq!(err.0, ErrorCode::StudentEmailInvalid);

        let err = validate_student_fields("Ana", "ana@x.com", "9123abc", "Lisbon", "PowerUp")
            .unwrap_err();
        assert_eq!(err.0, ErrorCode::StudentPhoneInvalid);

        let err = validate_student_fields("Ana", "ana@x.com", "912345678", "Faro", "PowerUp")
            .unwrap_err();
        assert_eq!(err.0, ErrorCode::BadRequest);
    }
}
