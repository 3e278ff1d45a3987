//! 管理后台前端资源
//!
//! 构建产物在编译期通过 rust-embed 打包进二进制。未命中的页面路径回退到 `index.html`
//! 交给前端路由处理，`/api/` 下未匹配的路径仍返回 JSON 404。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header, web};
use rust_embed::Embed;
use std::borrow::Cow;
use std::path::Path;

use crate::models::{ApiResponse, ErrorCode};

#[derive(Embed)]
#[folder = "frontend/dist/"]
struct DashboardAssets;

const INDEX: &str = "index.html";

fn extension(path: &str) -> &str {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
}

/// 按扩展名推断 Content-Type
fn content_type(path: &str) -> &'static str {
    match extension(path).to_ascii_lowercase().as_str() {
        "html" | "htm" => "text/html; charset=utf-8",
        "js" | "mjs" => "application/javascript; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "json" | "map" | "webmanifest" => "application/json; charset=utf-8",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "ico" => "image/x-icon",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "txt" => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

/// `assets/` 下是带内容哈希的构建产物，可以长期缓存
fn cache_control(path: &str) -> &'static str {
    if path.starts_with("assets/") && extension(path) != "html" {
        "public, max-age=31536000, immutable"
    } else {
        "no-cache"
    }
}

/// 查找资源，找不到时回退到 index.html
fn resolve(path: &str) -> Option<(String, Cow<'static, [u8]>)> {
    let path = if path.is_empty() { INDEX } else { path };
    DashboardAssets::get(path)
        .map(|file| (path.to_string(), file.data))
        .or_else(|| DashboardAssets::get(INDEX).map(|file| (INDEX.to_string(), file.data)))
}

pub async fn serve_frontend(req: HttpRequest) -> ActixResult<HttpResponse> {
    let path = req.match_info().query("tail").trim_start_matches('/');

    if path == "api" || path.starts_with("api/") {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            format!("No API route for /{path}"),
        )));
    }

    match resolve(path) {
        Some((file, data)) => Ok(HttpResponse::Ok()
            .content_type(content_type(&file))
            .insert_header((header::CACHE_CONTROL, cache_control(&file)))
            .body(data.into_owned())),
        None => Ok(HttpResponse::NotFound()
            .content_type("text/plain; charset=utf-8")
            .body("Dashboard assets are not embedded in this build")),
    }
}

pub fn configure_frontend_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{tail:.*}", web::get().to(serve_frontend));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type() {
        assert_eq!(content_type("index.html"), "text/html; charset=utf-8");
        assert_eq!(
            content_type("assets/app-3f2a.js"),
            "application/javascript; charset=utf-8"
        );
        assert_eq!(content_type("assets/LOGO.PNG"), "image/png");
        assert_eq!(content_type("favicon.ico"), "image/x-icon");
        assert_eq!(content_type("data.bin"), "application/octet-stream");
        assert_eq!(content_type("no-extension"), "application/octet-stream");
    }

    #[test]
    fn test_cache_control() {
        assert_eq!(
            cache_control("assets/index-9c1e.css"),
            "public, max-age=31536000, immutable"
        );
        assert_eq!(cache_control("index.html"), "no-cache");
        assert_eq!(cache_control("favicon.ico"), "no-cache");
    }

    #[test]
    fn test_unknown_page_falls_back_to_index() {
        // build.rs 保证 dist 中至少有 index.html
        let (file, _) = resolve("students/12/edit").expect("index.html is embedded");
        assert_eq!(file, INDEX);
    }
}
