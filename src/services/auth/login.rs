use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::AuthService;
use crate::config::AppConfig;
use crate::models::{
    ApiResponse, ErrorCode,
    auth::{LoginRequest, LoginResponse},
};
use crate::utils::password::verify_password;
use crate::utils::session::SessionUtils;

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let email = login_request.email.trim();

    // 1. 根据邮箱查找教师
    let teacher = match storage.get_teacher_by_email(email).await {
        Ok(Some(teacher)) => teacher,
        Ok(None) => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::AuthFailed,
                "Incorrect email or password",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Login failed: {e}"),
                )),
            );
        }
    };

    // 2. 校验密码
    if !verify_password(&login_request.password, &teacher.password_hash) {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::IncorrectPassword,
            "Incorrect password",
        )));
    }

    let Some(sessions) = service.get_sessions(request) else {
        error!("Session store is not configured");
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "Login failed, session store unavailable",
            )),
        );
    };

    // 3. 签发会话令牌并写入会话记录
    let (token, sid) = match SessionUtils::generate_session_token(teacher.id) {
        Ok(pair) => pair,
        Err(e) => {
            error!("Failed to generate session token: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed, unable to create session",
                )),
            );
        }
    };

    let ttl = SessionUtils::lifetime().num_seconds().max(1) as u64;
    sessions
        .insert(SessionUtils::cache_key(&sid), &teacher, ttl)
        .await;

    info!("Teacher {} logged in", teacher.email);

    let response = LoginResponse {
        teacher,
        permanent: AppConfig::get().session.permanent,
        created_at: chrono::Utc::now(),
    };

    Ok(HttpResponse::Ok()
        .cookie(SessionUtils::create_session_cookie(&token))
        .json(ApiResponse::success(response, "Login successful")))
}
