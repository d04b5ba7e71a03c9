use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::RequireSession;
use crate::models::classes::requests::{
    ClassIdForm, ClassSearchQuery, ConfirmAdvanceRequest, CreateClassRequest,
};
use crate::models::students::requests::RosterQuery;
use crate::models::{ApiResponse, ErrorCode, PaginationQuery};
use crate::services::ClassService;

// 懒加载的全局 CLASS_SERVICE 实例
static CLASS_SERVICE: Lazy<ClassService> = Lazy::new(ClassService::new_lazy);

// HTTP处理程序
pub async fn homepage(
    req: HttpRequest,
    query: web::Query<PaginationQuery>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.list_classes(&req, false, query.page).await
}

pub async fn archived_classes(
    req: HttpRequest,
    query: web::Query<PaginationQuery>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.list_classes(&req, true, query.page).await
}

pub async fn archive(req: HttpRequest, form: web::Form<ClassIdForm>) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.set_archived(&req, form.class_id, true).await
}

pub async fn unarchive(
    req: HttpRequest,
    form: web::Form<ClassIdForm>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.set_archived(&req, form.class_id, false).await
}

pub async fn delete_class(
    req: HttpRequest,
    form: web::Form<ClassIdForm>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.delete_class(&req, form.class_id).await
}

pub async fn add_class(
    req: HttpRequest,
    form: web::Form<CreateClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.create_class(&req, form.into_inner()).await
}

pub async fn search(
    req: HttpRequest,
    query: web::Query<ClassSearchQuery>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.search_classes(&req, query.into_inner()).await
}

pub async fn advance(req: HttpRequest, form: web::Form<ClassIdForm>) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.advance_preview(&req, form.class_id, 1).await
}

pub async fn advance_list(
    req: HttpRequest,
    query: web::Query<RosterQuery>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .advance_preview(&req, query.class_id, query.page)
        .await
}

// `checked` 会重复出现，按原始键值对接收
pub async fn confirm_advance(
    req: HttpRequest,
    form: web::Form<Vec<(String, String)>>,
) -> ActixResult<HttpResponse> {
    match ConfirmAdvanceRequest::from_pairs(&form) {
        Ok(advance) => CLASS_SERVICE.confirm_advance(&req, advance).await,
        Err(msg) => Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg))),
    }
}

// 配置路由
pub fn configure_classes_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/homepage")
            .wrap(RequireSession)
            .route(web::get().to(homepage))
            .route(web::post().to(homepage)),
    )
    .service(
        web::resource("/archived_classes")
            .wrap(RequireSession)
            .route(web::get().to(archived_classes))
            .route(web::post().to(archived_classes)),
    )
    .service(
        web::scope("/actions")
            .wrap(RequireSession)
            .route("/archive", web::post().to(archive))
            .route("/unarchive", web::post().to(unarchive))
            .route("/delete", web::post().to(delete_class))
            .route("/add_class", web::post().to(add_class))
            .route(
                "/import_data",
                web::post().to(super::students::import_data),
            ),
    )
    .service(
        web::resource("/search")
            .wrap(RequireSession)
            .route(web::get().to(search)),
    )
    .service(
        web::resource("/advance")
            .wrap(RequireSession)
            .route(web::post().to(advance)),
    )
    .service(
        web::resource("/advance_list")
            .wrap(RequireSession)
            .route(web::get().to(advance_list))
            .route(web::post().to(advance_list)),
    )
    .service(
        web::resource("/confirm_advance")
            .wrap(RequireSession)
            .route(web::post().to(confirm_advance)),
    );
}
