use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::RequireSession;
use crate::models::students::requests::{
    AddStudentForm, ClassContextQuery, EditStudentForm, RosterQuery, StudentRefForm,
};
use crate::services::StudentService;

// 懒加载的全局 STUDENT_SERVICE 实例
static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);

pub async fn list(req: HttpRequest, query: web::Query<RosterQuery>) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .roster(&req, query.class_id, query.page)
        .await
}

pub async fn add_student(
    req: HttpRequest,
    query: web::Query<ClassContextQuery>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.add_form(&req, query.class_id).await
}

pub async fn confirm_add_student(
    req: HttpRequest,
    form: web::Form<AddStudentForm>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .create_student(&req, form.into_inner())
        .await
}

pub async fn edit_student(
    req: HttpRequest,
    query: web::Query<StudentRefForm>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.edit_form(&req, query.into_inner()).await
}

pub async fn confirm_edit(
    req: HttpRequest,
    form: web::Form<EditStudentForm>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .update_student(&req, form.into_inner())
        .await
}

pub async fn delete_student(
    req: HttpRequest,
    form: web::Form<StudentRefForm>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .delete_student(&req, form.into_inner())
        .await
}

pub async fn import_data(req: HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.import_students(&req, payload).await
}

// 配置路由（导入接口挂在 /actions 下，见 classes 路由）
pub fn configure_students_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/list")
            .wrap(RequireSession)
            .route(web::get().to(list))
            .route(web::post().to(list)),
    )
    .service(
        web::resource("/add_student")
            .wrap(RequireSession)
            .route(web::get().to(add_student))
            .route(web::post().to(add_student)),
    )
    .service(
        web::resource("/confirm_add_student")
            .wrap(RequireSession)
            .route(web::post().to(confirm_add_student)),
    )
    .service(
        web::resource("/edit_student")
            .wrap(RequireSession)
            .route(web::get().to(edit_student))
            .route(web::post().to(edit_student)),
    )
    .service(
        web::resource("/confirm_edit")
            .wrap(RequireSession)
            .route(web::post().to(confirm_edit)),
    )
    .service(
        web::resource("/delete_student")
            .wrap(RequireSession)
            .route(web::post().to(delete_student)),
    );
}

#[cfg(test)]
mod tests {
    use actix_web::http::{StatusCode, header};
    use actix_web::{App, test as actix_test, web};

    use crate::config::AppConfig;
    use crate::routes::test_support::{
        TEACHER_EMAIL, TEACHER_PASSWORD, seeded_storage, session_cache, session_cookie,
    };

    const BOUNDARY: &str = "course-admin-boundary";

    fn multipart_body(class_id: Option<&str>, file: Option<&[u8]>) -> Vec<u8> {
        let mut body = Vec::new();
        if let Some(class_id) = class_id {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"class_id\"\r\n\r\n{class_id}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some(file) = file {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"students.csv\"\r\nContent-Type: text/csv\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(file);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    #[actix_web::test]
    async fn test_add_student_after_login() {
        let (storage, _) = seeded_storage().await;
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(storage.clone()))
                .app_data(web::Data::new(session_cache()))
                .configure(crate::routes::configure_routes),
        )
        .await;

        // 未登录
        let req = actix_test::TestRequest::get()
            .uri("/list?class_id=1")
            .to_request();
        assert_eq!(
            actix_test::call_service(&app, req).await.status(),
            StatusCode::UNAUTHORIZED
        );

        let req = actix_test::TestRequest::post()
            .uri("/login")
            .peer_addr("10.20.30.40:5000".parse().unwrap())
            .set_form([("email", TEACHER_EMAIL), ("password", TEACHER_PASSWORD)])
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let cookie = resp
            .response()
            .cookies()
            .find(|c| c.name() == AppConfig::get().session.cookie_name)
            .map(|c| c.into_owned())
            .expect("session cookie");

        let req = actix_test::TestRequest::post()
            .uri("/confirm_add_student")
            .cookie(cookie.clone())
            .set_form([
                ("name", "Ana Silva"),
                ("email", "ana@x.com"),
                ("phone", "912345678"),
                ("location", "Lisbon"),
                ("class_type", "PowerUp"),
                ("class_id", "1"),
            ])
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: serde_json::Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["data"]["class_id"], 1);
        assert_eq!(body["data"]["student"]["phone"], "912 345 678");

        // 同一邮箱再次添加
        let req = actix_test::TestRequest::post()
            .uri("/confirm_add_student")
            .cookie(cookie.clone())
            .set_form([
                ("name", "Ana Costa"),
                ("email", "ana@x.com"),
                ("phone", "912345679"),
                ("location", "Lisbon"),
                ("class_type", "PowerUp"),
                ("class_id", "1"),
            ])
            .to_request();
        assert_eq!(
            actix_test::call_service(&app, req).await.status(),
            StatusCode::CONFLICT
        );

        let req = actix_test::TestRequest::get()
            .uri("/list?class_id=1")
            .cookie(cookie)
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["data"]["pagination"]["total"], 1);
        assert_eq!(body["data"]["items"][0]["name"], "Ana Silva");
    }

    #[actix_web::test]
    async fn test_import_data_upload() {
        let (storage, teacher) = seeded_storage().await;
        let cache = session_cache();
        let cookie = session_cookie(&cache, &teacher).await;
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(storage.clone()))
                .app_data(web::Data::new(cache))
                .configure(crate::routes::configure_routes),
        )
        .await;
        let content_type = format!("multipart/form-data; boundary={BOUNDARY}");

        let csv = b"name,email,phone\n\
                    Ana Silva,ana@x.com,912345678\n\
                    Rui,rui@x.com,abc\n\
                    Ana Dup,ana@x.com,912345679\n";
        let req = actix_test::TestRequest::post()
            .uri("/actions/import_data")
            .cookie(cookie.clone())
            .insert_header((header::CONTENT_TYPE, content_type.clone()))
            .set_payload(multipart_body(Some("1"), Some(csv)))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["data"]["total"], 3);
        assert_eq!(body["data"]["success"], 1);
        assert_eq!(body["data"]["skipped"], 1);
        assert_eq!(body["data"]["failed"], 1);
        assert_eq!(storage.list_students_in_class(1).await.unwrap().len(), 1);

        // 缺少 class_id
        let req = actix_test::TestRequest::post()
            .uri("/actions/import_data")
            .cookie(cookie.clone())
            .insert_header((header::CONTENT_TYPE, content_type.clone()))
            .set_payload(multipart_body(None, Some(csv)))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["message"], "Missing class_id");

        // 空文件
        let req = actix_test::TestRequest::post()
            .uri("/actions/import_data")
            .cookie(cookie.clone())
            .insert_header((header::CONTENT_TYPE, content_type.clone()))
            .set_payload(multipart_body(Some("1"), Some(b"")))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["message"], "No file uploaded");

        let req = actix_test::TestRequest::post()
            .uri("/actions/import_data")
            .cookie(cookie)
            .insert_header((header::CONTENT_TYPE, content_type))
            .set_payload(multipart_body(Some("999"), Some(csv)))
            .to_request();
        assert_eq!(
            actix_test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }
}
