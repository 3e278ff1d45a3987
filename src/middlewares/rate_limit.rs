/*!
 * 速率限制中间件
 *
 * 固定窗口计数：每个 `前缀:客户端` 键在窗口内最多放行 `max_requests` 次，超出返回 429。
 * 计数保存在进程内的 moka 缓存中，所有 worker 共享。
 *
 * ```rust,ignore
 * web::resource("/login")
 *     .route(web::post().to(login).wrap(RateLimit::login()))
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::{CONTENT_TYPE, RETRY_AFTER},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::net::IpAddr;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::warn;

use crate::config::AppConfig;
use crate::models::{ApiResponse, ErrorCode};

/// 值为 (窗口开始时间, 窗口内计数)
static RATE_LIMIT_WINDOWS: Lazy<Cache<String, (Instant, u32)>> = Lazy::new(|| {
    Cache::builder()
        .time_to_idle(Duration::from_secs(3600))
        .max_capacity(100_000)
        .build()
});

#[derive(Clone)]
pub struct RateLimit {
    max_requests: u32,
    window: Duration,
    key_prefix: String,
}

impl RateLimit {
    pub fn new(prefix: &str, max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests: max_requests.max(1),
            window: Duration::from_secs(window_secs.max(1)),
            key_prefix: prefix.to_string(),
        }
    }

    /// 登录限流，阈值来自 `rate_limit` 配置
    pub fn login() -> Self {
        let config = &AppConfig::get().rate_limit;
        Self::new("login", config.login_max_requests, config.login_window_secs)
    }

    /// 注册与登录共用阈值，但单独计数
    pub fn register() -> Self {
        let config = &AppConfig::get().rate_limit;
        Self::new(
            "register",
            config.login_max_requests,
            config.login_window_secs,
        )
    }
}

/// 解析客户端标识
///
/// 优先使用连接信息中的地址，其次 `X-Forwarded-For` 的第一个地址，再次 `X-Real-IP`。
/// 非法地址一律忽略。
fn client_identifier(
    peer: Option<&str>,
    forwarded_for: Option<&str>,
    real_ip: Option<&str>,
) -> String {
    let parse = |value: &str| value.trim().parse::<IpAddr>().ok();

    peer.and_then(parse)
        .or_else(|| forwarded_for.and_then(|v| v.split(',').next()).and_then(parse))
        .or_else(|| real_ip.and_then(parse))
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn request_identifier(req: &ServiceRequest) -> String {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };
    let peer = req.peer_addr().map(|addr| addr.ip().to_string());

    client_identifier(
        peer.as_deref(),
        header("X-Forwarded-For").as_deref(),
        header("X-Real-IP").as_deref(),
    )
}

/// 窗口内计数加一，窗口过期则重新开始
fn advance_window(entry: Option<(Instant, u32)>, now: Instant, window: Duration) -> (Instant, u32) {
    match entry {
        Some((started, count)) if now.duration_since(started) < window => {
            (started, count.saturating_add(1))
        }
        _ => (now, 1),
    }
}

/// 窗口剩余秒数，至少为 1
fn retry_after_secs(started: Instant, now: Instant, window: Duration) -> u64 {
    window
        .saturating_sub(now.duration_since(started))
        .as_secs()
        .max(1)
}

impl RateLimit {
    /// 原子地记录一次请求，返回更新后的 (窗口开始时间, 窗口内计数)
    async fn record_hit(&self, key: String, now: Instant) -> (Instant, u32) {
        let window = self.window;
        RATE_LIMIT_WINDOWS
            .entry(key)
            .and_upsert_with(|current| {
                std::future::ready(advance_window(
                    current.map(|entry| entry.into_value()),
                    now,
                    window,
                ))
            })
            .await
            .into_value()
    }
}

fn too_many_requests(retry_after: u64) -> HttpResponse {
    HttpResponse::build(StatusCode::TOO_MANY_REQUESTS)
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .insert_header((RETRY_AFTER, retry_after.to_string()))
        .json(ApiResponse::<()>::error_empty(
            ErrorCode::RateLimitExceeded,
            "Too many requests, please try again later",
        ))
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            limit: Rc::new(self.clone()),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    limit: Rc<RateLimit>,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
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
        let limit = self.limit.clone();

        Box::pin(async move {
            let key = format!("{}:{}", limit.key_prefix, request_identifier(&req));

            let now = Instant::now();
            let (started, count) = limit.record_hit(key.clone(), now).await;

            if count > limit.max_requests {
                warn!(
                    "Rate limit exceeded for {} ({}/{})",
                    key, count, limit.max_requests
                );
                let retry_after = retry_after_secs(started, now, limit.window);
                return Ok(req.into_response(too_many_requests(retry_after).map_into_right_body()));
            }

            Ok(srv.call(req).await?.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_identifier_prefers_peer() {
        assert_eq!(
            client_identifier(Some("10.0.0.1"), Some("1.2.3.4"), None),
            "10.0.0.1"
        );
        assert_eq!(
            client_identifier(None, Some(" 1.2.3.4 , 5.6.7.8"), Some("9.9.9.9")),
            "1.2.3.4"
        );
        assert_eq!(
            client_identifier(None, Some("garbage"), Some("9.9.9.9")),
            "9.9.9.9"
        );
        assert_eq!(client_identifier(None, None, None), "unknown");
    }

    #[test]
    fn test_window_counts_within_window() {
        let start = Instant::now();
        let window = Duration::from_secs(60);

        let state = advance_window(None, start, window);
        assert_eq!(state, (start, 1));
        let state = advance_window(Some(state), start + Duration::from_secs(5), window);
        let state = advance_window(Some(state), start + Duration::from_secs(10), window);
        assert_eq!(state, (start, 3));
        assert_eq!(
            retry_after_secs(state.0, start + Duration::from_secs(10), window),
            50
        );
    }

    #[test]
    fn test_window_resets_after_expiry() {
        let start = Instant::now();
        let window = Duration::from_secs(1);
        let state = advance_window(None, start, window);
        let later = start + Duration::from_secs(2);
        let state = advance_window(Some(state), later, window);
        assert_eq!(state, (later, 1));
        assert_eq!(retry_after_secs(start, later, window), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_hits_are_all_counted() {
        let limit = std::sync::Arc::new(RateLimit::new("concurrent-test", 1000, 60));
        let now = Instant::now();

        let handles: Vec<_> = (0..64)
            .map(|_| {
                let limit = limit.clone();
                tokio::spawn(async move {
                    limit
                        .record_hit("concurrent-test:10.9.9.9".to_string(), now)
                        .await
                        .1
                })
            })
            .collect();

        let mut counts = Vec::new();
        for handle in handles {
            counts.push(handle.await.unwrap());
        }
        counts.sort_unstable();
        assert_eq!(counts, (1..=64).collect::<Vec<u32>>());
    }

    #[test]
    fn test_limits_are_clamped() {
        let limit = RateLimit::new("x", 0, 0);
        assert_eq!(limit.max_requests, 1);
        assert_eq!(limit.window, Duration::from_secs(1));
    }
}
