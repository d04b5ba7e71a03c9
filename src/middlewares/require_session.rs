/*!
 * 登录会话中间件
 *
 * 保护需要登录的路由。会话令牌从 Cookie 中读取，校验签名与有效期后，
 * 再到会话存储中查找对应记录；记录不存在（已登出或已过期）同样视为未登录。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * web::resource("/homepage")
 *     .wrap(RequireSession)
 *     .route(web::get().to(homepage))
 * ```
 *
 * 处理程序中通过 `RequireSession::extract_teacher(&req)` 取得当前教师。
 */

use crate::cache::{CacheResult, ObjectCache};
use crate::models::teachers::entities::Teacher;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::session::SessionUtils;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info, warn};

#[derive(Clone)]
pub struct RequireSession;

fn unauthorized(message: &str) -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::<()>::error_empty(
        ErrorCode::Unauthorized,
        message,
    ))
}

// 校验会话令牌并取出会话记录
async fn load_session(req: &ServiceRequest) -> Result<Teacher, String> {
    let token = req
        .cookie(&crate::config::AppConfig::get().session.cookie_name)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| "Please log in".to_string())?;

    let claims = SessionUtils::verify_token(&token).map_err(|err| {
        info!("Session token validation failed: {}", err);
        "Invalid session".to_string()
    })?;

    let cache = req
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| {
            warn!("Session store is not configured");
            "Session store unavailable".to_string()
        })?;

    let key = SessionUtils::cache_key(&claims.sid);
    match cache.get::<Teacher>(&key).await {
        CacheResult::Found(teacher) if claims.teacher_id() == Some(teacher.id) => Ok(teacher),
        CacheResult::Found(_) => {
            cache.remove(&key).await;
            Err("Invalid session".to_string())
        }
        CacheResult::NotFound => Err("Session expired, please log in again".to_string()),
        CacheResult::ExistsButNoValue => Err("Session store unavailable".to_string()),
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireSession
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireSessionMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireSessionMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireSessionMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireSessionMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            match load_session(&req).await {
                Ok(teacher) => {
                    debug!("Session authenticated for teacher {}", teacher.id);
                    req.extensions_mut().insert(teacher);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    info!("Session check failed for {}: {}", req.path(), err);
                    Ok(req.into_response(unauthorized(&err).map_into_right_body()))
                }
            }
        })
    }
}

impl RequireSession {
    /// 当前登录的教师，只能在 `RequireSession` 保护的路由中使用
    pub fn extract_teacher(req: &actix_web::HttpRequest) -> Option<Teacher> {
        req.extensions().get::<Teacher>().cloned()
    }

    pub fn extract_teacher_id(req: &actix_web::HttpRequest) -> Option<i64> {
        req.extensions().get::<Teacher>().map(|teacher| teacher.id)
    }
}
