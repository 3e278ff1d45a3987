//! 访问令牌与刷新令牌
//!
//! access token 放在 `Authorization: Bearer` 头中，refresh token 只通过 HttpOnly cookie 传递。

use crate::config::AppConfig;
use actix_web::cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

pub const REFRESH_COOKIE_NAME: &str = "refresh_token";

type JwtResult<T> = Result<T, jsonwebtoken::errors::Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // 账号 ID
    pub role: String,
    pub kind: TokenKind,
    pub exp: usize,
    pub iat: usize,
}

impl Claims {
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct JwtUtils;

impl JwtUtils {
    fn secret() -> &'static str {
        &AppConfig::get().jwt.secret
    }

    /// access token 有效期
    pub fn access_token_ttl() -> chrono::Duration {
        chrono::Duration::minutes(AppConfig::get().jwt.access_token_expiry)
    }

    /// refresh token 有效期，记住登录时使用更长的期限
    pub fn refresh_token_ttl(remember_me: bool) -> chrono::Duration {
        let jwt = &AppConfig::get().jwt;
        if remember_me {
            chrono::Duration::days(jwt.refresh_token_remember_me_expiry)
        } else {
            chrono::Duration::days(jwt.refresh_token_expiry)
        }
    }

    pub fn issue(
        user_id: i64,
        role: &str,
        kind: TokenKind,
        ttl: chrono::Duration,
    ) -> JwtResult<String> {
        let now = chrono::Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            role: role.to_string(),
            kind,
            exp: (now + ttl).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(Self::secret().as_bytes()),
        )
    }

    pub fn generate_access_token(user_id: i64, role: &str) -> JwtResult<String> {
        Self::issue(user_id, role, TokenKind::Access, Self::access_token_ttl())
    }

    /// 生成 access + refresh，未指定期限时 refresh 使用默认有效期
    pub fn generate_token_pair(
        user_id: i64,
        role: &str,
        refresh_ttl: Option<chrono::Duration>,
    ) -> JwtResult<TokenPair> {
        Ok(TokenPair {
            access_token: Self::generate_access_token(user_id, role)?,
            refresh_token: Self::issue(
                user_id,
                role,
                TokenKind::Refresh,
                refresh_ttl.unwrap_or_else(|| Self::refresh_token_ttl(false)),
            )?,
        })
    }

    /// 校验签名、过期时间与令牌类型
    pub fn verify(token: &str, expected: TokenKind) -> JwtResult<Claims> {
        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(Self::secret().as_bytes()),
            &Validation::default(),
        )?
        .claims;

        if claims.kind != expected {
            return Err(jsonwebtoken::errors::ErrorKind::InvalidToken.into());
        }
        Ok(claims)
    }

    pub fn verify_access_token(token: &str) -> JwtResult<Claims> {
        Self::verify(token, TokenKind::Access)
    }

    pub fn verify_refresh_token(token: &str) -> JwtResult<Claims> {
        Self::verify(token, TokenKind::Refresh)
    }

    /// 用 refresh token 换取新的 access token
    pub fn refresh_access_token(refresh_token: &str) -> JwtResult<String> {
        let claims = Self::verify_refresh_token(refresh_token)?;
        let user_id = claims
            .user_id()
            .ok_or(jsonwebtoken::errors::ErrorKind::InvalidSubject)?;
        Self::generate_access_token(user_id, &claims.role)
    }

    /// refresh token cookie，max-age 与令牌有效期一致
    pub fn refresh_token_cookie(refresh_token: &str, ttl: chrono::Duration) -> Cookie<'static> {
        Self::build_cookie(
            refresh_token.to_string(),
            actix_web::cookie::time::Duration::seconds(ttl.num_seconds()),
        )
    }

    /// 注销时下发的过期 cookie
    pub fn expired_refresh_token_cookie() -> Cookie<'static> {
        Self::build_cookie(String::new(), actix_web::cookie::time::Duration::ZERO)
    }

    fn build_cookie(value: String, max_age: actix_web::cookie::time::Duration) -> Cookie<'static> {
        Cookie::build(REFRESH_COOKIE_NAME, value)
            .path("/api/v1/auth")
            .max_age(max_age)
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(AppConfig::get().is_production())
            .finish()
    }

    pub fn refresh_token_from_cookie(req: &actix_web::HttpRequest) -> Option<String> {
        req.cookie(REFRESH_COOKIE_NAME)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
    }

    /// 从 `Authorization: Bearer <token>` 中取出令牌
    pub fn bearer_token(req: &actix_web::HttpRequest) -> Option<String> {
        req.headers()
            .get(actix_web::http::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_round_trip() {
        let token = JwtUtils::generate_access_token(42, "admin").unwrap();
        let claims = JwtUtils::verify_access_token(&token).unwrap();
        assert_eq!(claims.user_id(), Some(42));
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.kind, TokenKind::Access);
    }

    #[test]
    fn test_token_kind_is_enforced() {
        let pair = JwtUtils::generate_token_pair(7, "staff", None).unwrap();
        assert!(JwtUtils::verify_access_token(&pair.refresh_token).is_err());
        assert!(JwtUtils::verify_refresh_token(&pair.access_token).is_err());

        let refreshed = JwtUtils::refresh_access_token(&pair.refresh_token).unwrap();
        assert_eq!(
            JwtUtils::verify_access_token(&refreshed).unwrap().user_id(),
            Some(7)
        );
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let token = JwtUtils::issue(
            1,
            "staff",
            TokenKind::Access,
            chrono::Duration::minutes(-10),
        )
        .unwrap();
        assert!(JwtUtils::verify_access_token(&token).is_err());
    }

    #[test]
    fn test_remember_me_extends_refresh_ttl() {
        assert!(JwtUtils::refresh_token_ttl(true) > JwtUtils::refresh_token_ttl(false));
    }
}
