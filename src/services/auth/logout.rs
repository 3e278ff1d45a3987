use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::debug;

use crate::middlewares::require_jwt::user_cache_key;
use crate::models::ApiResponse;
use crate::utils::jwt::JwtUtils;

use super::AuthService;

/// 清除 refresh token cookie，并移除当前 access token 对应的账号缓存
pub async fn handle_logout(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(token) = JwtUtils::bearer_token(request)
        && let Some(cache) = service.get_cache(request)
    {
        cache.remove(&user_cache_key(&token)).await;
        debug!("Evicted cached session on logout");
    }

    Ok(HttpResponse::Ok()
        .cookie(JwtUtils::expired_refresh_token_cookie())
        .json(ApiResponse::<()>::success_empty("Logout successful")))
}
