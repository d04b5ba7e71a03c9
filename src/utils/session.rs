//! 登录会话
//!
//! 会话令牌是用 `session.secret_key` 签名的 JWT，`sid` 指向缓存中的会话记录。
//! 令牌放在 http-only Cookie 中，名字由 `session.cookie_name` 决定。

use crate::config::AppConfig;
use actix_web::cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

// 会话 Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String, // 教师 ID
    pub sid: String, // 会话 ID，对应缓存键
    pub exp: usize,  // 过期时间戳
    pub iat: usize,  // 签发时间
}

impl SessionClaims {
    pub fn teacher_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

pub struct SessionUtils;

impl SessionUtils {
    fn get_secret() -> String {
        AppConfig::get().session.secret_key.clone()
    }

    /// 会话记录在缓存中的键
    pub fn cache_key(sid: &str) -> String {
        format!("session:{sid}")
    }

    /// 会话有效期
    ///
    /// 非永久会话的 Cookie 随浏览器关闭失效，但服务端记录仍以一天为上限。
    pub fn lifetime() -> chrono::Duration {
        let config = AppConfig::get();
        if config.session.permanent {
            chrono::Duration::days(config.session.lifetime_days.max(1))
        } else {
            chrono::Duration::days(1)
        }
    }

    /// 签发会话令牌，返回 (令牌, 会话 ID)
    pub fn generate_session_token(
        teacher_id: i64,
    ) -> Result<(String, String), jsonwebtoken::errors::Error> {
        let sid = uuid::Uuid::new_v4().to_string();
        let token = Self::generate_token_with_expiry(teacher_id, &sid, Self::lifetime())?;
        Ok((token, sid))
    }

    pub fn generate_token_with_expiry(
        teacher_id: i64,
        sid: &str,
        expiry_duration: chrono::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let expiration = now + expiry_duration;

        let claims = SessionClaims {
            sub: teacher_id.to_string(),
            sid: sid.to_string(),
            exp: expiration.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let secret = Self::get_secret();
        let encoding_key = EncodingKey::from_secret(secret.as_ref());

        encode(&Header::default(), &claims, &encoding_key)
    }

    // 验证会话令牌
    pub fn verify_token(token: &str) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
        let secret = Self::get_secret();
        let decoding_key = DecodingKey::from_secret(secret.as_ref());
        let validation = Validation::default();

        decode::<SessionClaims>(token, &decoding_key, &validation)
            .map(|token_data| token_data.claims)
    }

    /// 创建会话 Cookie
    pub fn create_session_cookie(token: &str) -> Cookie<'static> {
        let config = AppConfig::get();
        let mut builder = Cookie::build(config.session.cookie_name.clone(), token.to_string())
            .path("/")
            .same_site(SameSite::Lax)
            .http_only(true)
            .secure(config.is_production());

        // 永久会话才设置 max-age，否则为浏览器会话 Cookie
        if config.session.permanent {
            builder = builder.max_age(actix_web::cookie::time::Duration::days(
                config.session.lifetime_days.max(1),
            ));
        }
        builder.finish()
    }

    /// 创建空的会话 Cookie（用于注销）
    pub fn create_empty_session_cookie() -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(config.session.cookie_name.clone(), "")
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(0))
            .same_site(SameSite::Lax)
            .http_only(true)
            .secure(config.is_production())
            .finish()
    }

    /// 从请求中提取会话令牌
    pub fn extract_session_token(req: &actix_web::HttpRequest) -> Option<String> {
        Self::extract_from_cookie_value(
            req.cookie(&AppConfig::get().session.cookie_name)
                .map(|c| c.value().to_string()),
        )
    }

    fn extract_from_cookie_value(value: Option<String>) -> Option<String> {
        value.filter(|v| !v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip() {
        let (token, sid) = SessionUtils::generate_session_token(7).expect("token");
        let claims = SessionUtils::verify_token(&token).expect("verify");
        assert_eq!(claims.teacher_id(), Some(7));
        assert_eq!(claims.sid, sid);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let token = SessionUtils::generate_token_with_expiry(1, "sid", chrono::Duration::hours(-2))
            .expect("token");
        assert!(SessionUtils::verify_token(&token).is_err());
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let (token, _) = SessionUtils::generate_session_token(1).expect("token");
        let tampered = format!("{token}x");
        assert!(SessionUtils::verify_token(&tampered).is_err());
    }

    #[test]
    fn test_empty_cookie_clears_session() {
        let cookie = SessionUtils::create_empty_session_cookie();
        assert_eq!(cookie.value(), "");
        assert_eq!(
            cookie.max_age(),
            Some(actix_web::cookie::time::Duration::seconds(0))
        );
        assert!(SessionUtils::extract_from_cookie_value(Some(String::new())).is_none());
    }

    #[test]
    fn test_cache_key() {
        assert_eq!(SessionUtils::cache_key("abc"), "session:abc");
    }
}
