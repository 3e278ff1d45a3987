/*!
 * JWT 认证中间件
 *
 * 校验 `Authorization: Bearer <access token>`，通过后把当前账号 [`User`] 放入请求扩展。
 *
 * ```rust,ignore
 * web::scope("/api/v1/students")
 *     .wrap(RequireJWT)
 *     .route("", web::get().to(list_students));
 *
 * async fn list_students(req: HttpRequest) -> HttpResponse {
 *     let user = RequireJWT::extract_user(&req);
 *     // ...
 * }
 * ```
 *
 * 账号信息按 `user:{token}` 缓存在对象缓存中，缓存未命中时回源到存储层。
 * 停用的账号即使持有未过期的令牌也会被拒绝。
 */

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::models::ErrorCode;
use crate::models::users::entities::{User, UserStatus};
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, error, info};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireJWT;

/// 已认证账号的缓存键
pub fn user_cache_key(token: &str) -> String {
    format!("user:{token}")
}

enum AuthFailure {
    MissingToken,
    InvalidToken,
    UnknownUser,
    Inactive,
    Internal(&'static str),
}

impl AuthFailure {
    fn into_response(self) -> HttpResponse {
        match self {
            AuthFailure::MissingToken => create_error_response(
                StatusCode::UNAUTHORIZED,
                ErrorCode::Unauthorized,
                "Unauthorized: missing or invalid Authorization header",
            ),
            AuthFailure::InvalidToken => create_error_response(
                StatusCode::UNAUTHORIZED,
                ErrorCode::Unauthorized,
                "Unauthorized: invalid or expired token",
            ),
            AuthFailure::UnknownUser => create_error_response(
                StatusCode::UNAUTHORIZED,
                ErrorCode::Unauthorized,
                "Unauthorized: account not found",
            ),
            AuthFailure::Inactive => create_error_response(
                StatusCode::FORBIDDEN,
                ErrorCode::Forbidden,
                "Account is suspended",
            ),
            AuthFailure::Internal(message) => create_error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalServerError,
                message,
            ),
        }
    }
}

async fn authenticate(req: &ServiceRequest) -> Result<User, AuthFailure> {
    let token = JwtUtils::bearer_token(req.request()).ok_or(AuthFailure::MissingToken)?;

    let claims = JwtUtils::verify_access_token(&token).map_err(|err| {
        debug!("Access token rejected: {}", err);
        AuthFailure::InvalidToken
    })?;

    let cache = req
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|data| data.get_ref().clone())
        .ok_or(AuthFailure::Internal("Object cache is not configured"))?;

    let key = user_cache_key(&token);
    if let CacheResult::Found(json) = cache.get_raw(&key).await {
        match serde_json::from_str::<User>(&json) {
            Ok(user) => return Ok(user),
            Err(err) => {
                debug!("Dropping undecodable cached user: {}", err);
                cache.remove(&key).await;
            }
        }
    }

    let storage = req
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or(AuthFailure::Internal("Storage is not configured"))?;

    let user_id = claims.user_id().ok_or(AuthFailure::InvalidToken)?;
    let user = storage
        .get_user_by_id(user_id)
        .await
        .map_err(|err| {
            error!("Failed to load user {}: {}", user_id, err);
            AuthFailure::Internal("Failed to load account")
        })?
        .ok_or(AuthFailure::UnknownUser)?;

    if user.status != UserStatus::Active {
        return Err(AuthFailure::Inactive);
    }

    // 缓存时长不超过令牌剩余有效期
    let remaining = (claims.exp as i64 - chrono::Utc::now().timestamp()).max(1) as u64;
    let ttl = AppConfig::get().cache.default_ttl.min(remaining);
    if let Ok(json) = serde_json::to_string(&user) {
        cache.insert_raw(key, json, ttl).await;
    }

    Ok(user)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
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
            // CORS 预检直接放行
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(
                    req.into_response(HttpResponse::NoContent().finish().map_into_right_body())
                );
            }

            match authenticate(&req).await {
                Ok(user) => {
                    debug!("Authenticated user {} ({})", user.id, user.role);
                    req.extensions_mut().insert(user);
                    Ok(srv.call(req).await?.map_into_left_body())
                }
                Err(failure) => {
                    info!("Authentication failed for {} {}", req.method(), req.path());
                    Ok(req.into_response(failure.into_response().map_into_right_body()))
                }
            }
        })
    }
}

impl RequireJWT {
    /// 当前请求的账号，仅在 RequireJWT 之后可用
    pub fn extract_user(req: &actix_web::HttpRequest) -> Option<User> {
        req.extensions().get::<User>().cloned()
    }
}
