//! 静态前端
//!
//! 登录页和脚本在编译时通过 rust-embed 嵌入二进制。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use rust_embed::Embed;
use std::path::Path;

#[derive(Embed)]
#[folder = "static/"]
struct StaticAssets;

fn get_mime_type(path: &str) -> &'static str {
    let ext = Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("");

    match ext {
        "html" => "text/html; charset=utf-8",
        "js" => "application/javascript; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "png" => "image/png",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        _ => "application/octet-stream",
    }
}

fn serve_asset(path: &str) -> HttpResponse {
    match StaticAssets::get(path) {
        Some(file) => HttpResponse::Ok()
            .content_type(get_mime_type(path))
            .insert_header(("Cache-Control", "no-cache"))
            .body(file.data.into_owned()),
        None => HttpResponse::NotFound()
            .content_type("text/plain; charset=utf-8")
            .body("Not Found"),
    }
}

/// 登录页
pub async fn index() -> ActixResult<HttpResponse> {
    Ok(serve_asset("index.html"))
}

/// `/static/` 下的资源
pub async fn static_file(req: HttpRequest) -> ActixResult<HttpResponse> {
    let path = req.match_info().query("tail").trim_start_matches('/');
    // 嵌入资源不含上级目录，拒绝路径穿越
    if path.split('/').any(|part| part == "..") {
        return Ok(HttpResponse::NotFound().finish());
    }
    Ok(serve_asset(path))
}

/// 配置前端路由
pub fn configure_frontend_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/static/{tail:.*}", web::get().to(static_file));
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test as actix_test};

    #[test]
    fn test_get_mime_type() {
        assert_eq!(get_mime_type("index.html"), "text/html; charset=utf-8");
        assert_eq!(
            get_mime_type("scripts/scripts.js"),
            "application/javascript; charset=utf-8"
        );
        assert_eq!(get_mime_type("unknown.xyz"), "application/octet-stream");
    }

    #[actix_web::test]
    async fn test_embedded_assets_are_served() {
        let app =
            actix_test::init_service(App::new().configure(configure_frontend_routes)).await;

        let req = actix_test::TestRequest::get().uri("/").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = actix_test::TestRequest::get()
            .uri("/static/scripts/scripts.js")
            .to_request();
        assert_eq!(actix_test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = actix_test::TestRequest::get()
            .uri("/static/missing.js")
            .to_request();
        assert_eq!(
            actix_test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }
}
