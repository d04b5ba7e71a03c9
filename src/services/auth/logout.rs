use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header::LOCATION};
use tracing::info;

use super::AuthService;
use crate::utils::session::SessionUtils;

/// 登出：删除会话记录并清除 Cookie，然后回到登录页
pub async fn handle_logout(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(token) = SessionUtils::extract_session_token(request)
        && let Ok(claims) = SessionUtils::verify_token(&token)
        && let Some(sessions) = service.get_sessions(request)
    {
        sessions.remove(&SessionUtils::cache_key(&claims.sid)).await;
        info!("Session closed for teacher {}", claims.sub);
    }

    Ok(HttpResponse::SeeOther()
        .insert_header((LOCATION, "/"))
        .cookie(SessionUtils::create_empty_session_cookie())
        .finish())
}
